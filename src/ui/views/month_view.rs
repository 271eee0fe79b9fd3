//! Month grid view.
//!
//! Each day cell is a drop target: dropping a block here anchors it to the
//! cell's date. Cells have no time axis, so moves keep the block's slot and
//! fresh drops land at the default morning hour (see the drag module).

use chrono::{Datelike, Duration, NaiveDate};
use egui::{Align2, FontId, Rect, Rounding, Sense, Stroke, Vec2};

use crate::models::payload::DragPayload;
use crate::services::store::BlockStore;
use crate::ui::drag::{resolve_drop, DragManager, DropEffect, DropTarget, RecentMoveGuard};
use crate::ui::palette::MonthPalette;
use crate::ui::theme::PlannerTheme;
use crate::utils::color::block_color;
use crate::utils::date::week_start;

const ROWS: usize = 6;
const CELL_SPACING: f32 = 4.0;
const MAX_CHIPS: usize = 3;

pub struct MonthView;

impl MonthView {
    pub fn show(
        ui: &mut egui::Ui,
        store: &mut BlockStore,
        anchor: NaiveDate,
        today: NaiveDate,
        first_day_of_week: u8,
        theme: &PlannerTheme,
        guard: &RecentMoveGuard,
    ) -> Vec<DropEffect> {
        let palette = MonthPalette::from_theme(theme);
        let month_first = anchor.with_day(1).unwrap_or(anchor);
        let grid_start = week_start(month_first, first_day_of_week);

        let cell_width = ((ui.available_width() - CELL_SPACING * 7.0) / 7.0).max(70.0);
        let cell_height =
            ((ui.available_height() - CELL_SPACING * ROWS as f32 - 22.0) / ROWS as f32).max(70.0);

        let mut effects = Vec::new();

        // Weekday header row.
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = CELL_SPACING;
            for offset in 0..7 {
                let date = grid_start + Duration::days(offset);
                let (rect, _) =
                    ui.allocate_exact_size(Vec2::new(cell_width, 18.0), Sense::hover());
                ui.painter_at(rect).text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    crate::utils::date::short_day_name(date),
                    FontId::proportional(11.0),
                    palette.muted_text,
                );
            }
        });

        for row in 0..ROWS {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = CELL_SPACING;
                for col in 0..7 {
                    let date = grid_start + Duration::days((row * 7 + col) as i64);
                    effects.extend(Self::day_cell(
                        ui,
                        store,
                        date,
                        anchor.month(),
                        today,
                        Vec2::new(cell_width, cell_height),
                        &palette,
                        guard,
                    ));
                }
            });
            ui.add_space(CELL_SPACING);
        }

        effects
    }

    #[allow(clippy::too_many_arguments)]
    fn day_cell(
        ui: &mut egui::Ui,
        store: &mut BlockStore,
        date: NaiveDate,
        shown_month: u32,
        today: NaiveDate,
        size: Vec2,
        palette: &MonthPalette,
        guard: &RecentMoveGuard,
    ) -> Vec<DropEffect> {
        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let in_month = date.month() == shown_month;

        let bg = if !in_month {
            palette.outside_bg
        } else if date == today {
            palette.today_bg
        } else if crate::utils::date::is_weekend(date) {
            palette.weekend_bg
        } else {
            palette.cell_bg
        };
        painter.rect_filled(rect, Rounding::same(6.0), bg);
        let border = if date == today {
            palette.today_border
        } else {
            palette.border
        };
        painter.rect_stroke(rect, Rounding::same(6.0), Stroke::new(1.0, border));

        painter.text(
            rect.left_top() + Vec2::new(6.0, 4.0),
            Align2::LEFT_TOP,
            date.format("%-d").to_string(),
            FontId::proportional(12.0),
            if in_month { palette.text } else { palette.muted_text },
        );

        // Block chips, capped with an overflow count.
        let weekday = date.weekday().num_days_from_sunday() as usize;
        let blocks = store.blocks_for_day(weekday, Some(date));
        let chip_width = rect.width() - 12.0;
        for (i, block) in blocks.iter().take(MAX_CHIPS).enumerate() {
            let chip = Rect::from_min_size(
                rect.left_top() + Vec2::new(6.0, 22.0 + i as f32 * 17.0),
                Vec2::new(chip_width, 14.0),
            );
            painter.rect_filled(chip, Rounding::same(4.0), block_color(&block.color));
            painter.text(
                chip.left_center() + Vec2::new(4.0, 0.0),
                Align2::LEFT_CENTER,
                &block.name,
                FontId::proportional(10.0),
                egui::Color32::from_rgb(252, 252, 252),
            );
        }
        if blocks.len() > MAX_CHIPS {
            painter.text(
                rect.left_top() + Vec2::new(6.0, 22.0 + MAX_CHIPS as f32 * 17.0),
                Align2::LEFT_TOP,
                format!("+{} more", blocks.len() - MAX_CHIPS),
                FontId::proportional(10.0),
                palette.muted_text,
            );
        }

        let mut effects = Vec::new();
        let pointer = ui.ctx().input(|i| i.pointer.latest_pos());

        // Fallback driver hover.
        if let Some(gesture) = DragManager::active(ui.ctx()) {
            if let Some(pos) = pointer {
                if rect.contains(pos) {
                    DragManager::note_pointer(ui.ctx(), pos);
                    DragManager::update_hover(ui.ctx(), DropTarget::MonthCell { date });
                    if gesture.is_dragging() {
                        painter.rect_stroke(
                            rect,
                            Rounding::same(6.0),
                            Stroke::new(2.0, palette.hover_border),
                        );
                    }
                }
            }
        }

        // Shared channel.
        if response.dnd_hover_payload::<String>().is_some() {
            painter.rect_stroke(
                rect,
                Rounding::same(6.0),
                Stroke::new(2.0, palette.hover_border),
            );
        }
        if let Some(wire) = response.dnd_release_payload::<String>() {
            if let Some(payload) = DragPayload::from_wire(&wire) {
                if guard.suppresses(&payload.id) {
                    log::debug!("Suppressing duplicate drop of {}", payload.id);
                } else {
                    effects.push(resolve_drop(store, &payload, &DropTarget::MonthCell { date }));
                }
            }
        }

        effects
    }
}
