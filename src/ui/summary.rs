//! The budget ledger: scheduled hours per activity against its weekly quota.

use egui::{Align2, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use crate::services::report::QuotaStatus;
use crate::ui::theme::PlannerTheme;
use crate::utils::color::{block_color, with_alpha};

const ROW_WIDTH: f32 = 220.0;
const BAR_HEIGHT: f32 = 8.0;

pub struct Summary;

impl Summary {
    pub fn show(ui: &mut egui::Ui, rows: &[QuotaStatus], theme: &PlannerTheme) {
        ui.horizontal(|ui| {
            ui.strong("Time Budget Ledger");
            ui.weak("bars fill as you schedule; over-quota rows flag up");
        });
        ui.add_space(4.0);

        if rows.is_empty() {
            ui.weak("Create a block with a quota to start tracking.");
            return;
        }

        egui::ScrollArea::horizontal()
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    for row in rows {
                        Self::ledger_row(ui, row, theme);
                    }
                });
            });
    }

    fn ledger_row(ui: &mut egui::Ui, row: &QuotaStatus, theme: &PlannerTheme) {
        let (rect, _) =
            ui.allocate_exact_size(Vec2::new(ROW_WIDTH, 44.0), Sense::hover());
        let painter = ui.painter_at(rect);

        let qty = match row.quota_hours {
            Some(quota) => format!("{:.1}/{:.0} hrs{}", row.actual_hours, quota,
                if row.over { " ❌" } else { "" }),
            None => format!("{:.1} hrs", row.actual_hours),
        };
        painter.text(
            rect.left_top() + Vec2::new(2.0, 2.0),
            Align2::LEFT_TOP,
            &row.name,
            FontId::proportional(12.0),
            theme.text_primary,
        );
        painter.text(
            rect.right_top() + Vec2::new(-2.0, 2.0),
            Align2::RIGHT_TOP,
            qty,
            FontId::proportional(11.0),
            if row.over { theme.danger } else { theme.text_secondary },
        );

        let track = Rect::from_min_size(
            Pos2::new(rect.left() + 2.0, rect.top() + 24.0),
            Vec2::new(rect.width() - 8.0, BAR_HEIGHT),
        );
        let color = block_color(&row.color);
        painter.rect_filled(track, Rounding::same(4.0), with_alpha(color, 50));
        if row.progress > 0.0 {
            let fill = Rect::from_min_size(
                track.left_top(),
                Vec2::new(track.width() * row.progress, BAR_HEIGHT),
            );
            painter.rect_filled(fill, Rounding::same(4.0), color);
        }
        if row.over {
            painter.rect_stroke(track, Rounding::same(4.0), Stroke::new(1.0, theme.danger));
        }
    }
}
