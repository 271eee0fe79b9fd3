//! The weekly board: a time track plus seven day columns.
//!
//! Day columns are the primary drop surfaces. They accept payloads from both
//! transports (the shared drag-and-drop channel and the pointer-capture
//! fallback), show a placement highlight while a drag hovers them, and draw
//! scheduled blocks with the overlap layout applied.

use chrono::NaiveDate;
use egui::{
    Align2, Color32, CursorIcon, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2,
};

use crate::models::block::ScheduledBlock;
use crate::models::grid::TimeGrid;
use crate::models::payload::DragPayload;
use crate::services::store::BlockStore;
use crate::ui::drag::{resolve_drop, DragGesture, DragManager, DropEffect, DropTarget, RecentMoveGuard};
use crate::ui::layout::{compute_column_layout, BlockLayout, ColumnEntry};
use crate::ui::palette::BoardPalette;
use crate::ui::theme::PlannerTheme;
use crate::utils::color::{block_color, with_alpha};
use crate::utils::date::{is_weekend, short_day_name, WeekContext};

/// Pixel height of one 30-minute slot.
pub const SLOT_HEIGHT: f32 = 22.0;
pub const TIME_LABEL_WIDTH: f32 = 48.0;
pub const COLUMN_SPACING: f32 = 4.0;

pub struct WeekView;

impl WeekView {
    /// Render the board and apply any drops that landed this frame.
    pub fn show(
        ui: &mut egui::Ui,
        store: &mut BlockStore,
        week: &WeekContext,
        today: NaiveDate,
        theme: &PlannerTheme,
        guard: &RecentMoveGuard,
    ) -> Vec<DropEffect> {
        let grid = *store.grid();
        let palette = BoardPalette::from_theme(theme);
        // The surface keeps the one-slot bottom margin the resolver divides by.
        let surface_height = SLOT_HEIGHT * (grid.total_slots() + 1) as f32;
        let col_width =
            ((ui.available_width() - TIME_LABEL_WIDTH - COLUMN_SPACING * 7.0) / 7.0).max(60.0);

        let mut effects = Vec::new();

        Self::draw_header(ui, week, today, col_width, &palette);
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_top(|ui| {
                    ui.spacing_mut().item_spacing.x = COLUMN_SPACING;
                    Self::draw_time_track(ui, &grid, surface_height, &palette);
                    for (day_index, date) in week.dates.iter().enumerate() {
                        effects.extend(Self::day_column(
                            ui,
                            store,
                            day_index,
                            *date,
                            today,
                            col_width,
                            surface_height,
                            &palette,
                            guard,
                        ));
                    }
                });
            });

        effects
    }

    fn draw_header(
        ui: &mut egui::Ui,
        week: &WeekContext,
        today: NaiveDate,
        col_width: f32,
        palette: &BoardPalette,
    ) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = COLUMN_SPACING;
            ui.add_space(TIME_LABEL_WIDTH);
            for date in &week.dates {
                let (rect, _) =
                    ui.allocate_exact_size(Vec2::new(col_width, 34.0), Sense::hover());
                let painter = ui.painter_at(rect);
                let is_today = *date == today;
                let name_color = if is_today { palette.text } else { palette.muted_text };
                painter.text(
                    Pos2::new(rect.center().x, rect.top() + 8.0),
                    Align2::CENTER_CENTER,
                    short_day_name(*date),
                    FontId::proportional(12.0),
                    name_color,
                );
                painter.text(
                    Pos2::new(rect.center().x, rect.top() + 24.0),
                    Align2::CENTER_CENTER,
                    date.format("%-d").to_string(),
                    FontId::proportional(14.0),
                    palette.text,
                );
            }
        });
    }

    fn draw_time_track(
        ui: &mut egui::Ui,
        grid: &TimeGrid,
        surface_height: f32,
        palette: &BoardPalette,
    ) {
        let (rect, _) = ui.allocate_exact_size(
            Vec2::new(TIME_LABEL_WIDTH, surface_height),
            Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        for hour in grid.view_start_hour..=grid.view_end_hour {
            let y = rect.top()
                + (hour - grid.view_start_hour) as f32 * grid.slots_per_hour as f32 * SLOT_HEIGHT;
            painter.text(
                Pos2::new(rect.right() - 6.0, y),
                Align2::RIGHT_CENTER,
                grid.hour_label(hour),
                FontId::proportional(10.0),
                palette.muted_text,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn day_column(
        ui: &mut egui::Ui,
        store: &mut BlockStore,
        day_index: usize,
        date: NaiveDate,
        today: NaiveDate,
        col_width: f32,
        surface_height: f32,
        palette: &BoardPalette,
        guard: &RecentMoveGuard,
    ) -> Vec<DropEffect> {
        let grid = *store.grid();
        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(col_width, surface_height),
            Sense::click_and_drag(),
        );
        let painter = ui.painter_at(rect);

        let bg = if date == today {
            palette.today_bg
        } else if is_weekend(date) {
            palette.weekend_bg
        } else {
            palette.column_bg
        };
        painter.rect_filled(rect, Rounding::same(6.0), bg);

        for slot in 0..=grid.total_slots() {
            let y = rect.top() + slot as f32 * SLOT_HEIGHT;
            let on_hour = slot % grid.slots_per_hour as usize == 0;
            let color = if on_hour {
                palette.hour_line
            } else {
                palette.half_hour_line
            };
            painter.line_segment(
                [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                Stroke::new(1.0, color),
            );
        }
        painter.rect_stroke(rect, Rounding::same(6.0), Stroke::new(1.0, palette.column_border));

        // Overlap layout for this column, then draw bottom of stack first.
        let blocks: Vec<ScheduledBlock> = store
            .blocks_for_day(day_index, Some(date))
            .into_iter()
            .cloned()
            .collect();
        let entries: Vec<ColumnEntry> = blocks
            .iter()
            .map(|b| ColumnEntry::new(b.id.clone(), b.start_slot, b.duration_slots(&grid)))
            .collect();
        let layouts = compute_column_layout(&entries, SLOT_HEIGHT);

        let mut draw_order: Vec<usize> = (0..blocks.len()).collect();
        draw_order.sort_by_key(|&i| layouts[i].z);
        let mut block_rects: Vec<Rect> = vec![Rect::NOTHING; blocks.len()];
        for &i in &draw_order {
            block_rects[i] =
                Self::draw_block(&painter, rect, &blocks[i], &layouts[i], &grid, palette);
        }

        let pointer = ui.ctx().input(|i| i.pointer.latest_pos());
        let mut effects = Vec::new();

        // Hover cursor for grabbable blocks.
        if let Some(pos) = pointer {
            if rect.contains(pos)
                && block_rects.iter().any(|r| r.contains(pos))
                && DragManager::active(ui.ctx()).is_none()
            {
                ui.ctx().output_mut(|o| o.cursor_icon = CursorIcon::Grab);
            }
        }

        // Fallback driver: arm a gesture when a press starts on a block.
        if response.drag_started() {
            if let Some(press) = response.interact_pointer_pos() {
                let hit = draw_order
                    .iter()
                    .rev()
                    .find(|&&i| block_rects[i].contains(press));
                if let Some(&i) = hit {
                    DragManager::begin(
                        ui.ctx(),
                        DragGesture::arm(DragPayload::from_scheduled(&blocks[i]), press),
                    );
                }
            }
        }

        // Fallback driver: track the pointer and offer this column as the
        // drop target while it is hovered.
        if let Some(gesture) = DragManager::active(ui.ctx()) {
            if let Some(pos) = pointer {
                DragManager::note_pointer(ui.ctx(), pos);
                if rect.contains(pos) {
                    let duration_slots = grid.duration_slots(gesture.payload.duration_minutes);
                    let start_slot =
                        grid.resolve_drop_slot(pos.y - rect.top(), surface_height, duration_slots);
                    DragManager::update_hover(
                        ui.ctx(),
                        DropTarget::DaySurface {
                            day_index,
                            date,
                            start_slot,
                        },
                    );
                    if gesture.is_dragging() {
                        ui.ctx().output_mut(|o| o.cursor_icon = CursorIcon::Grabbing);
                        Self::draw_highlight(&painter, rect, start_slot, duration_slots, palette);
                    }
                }
            }
        }

        // Shared channel: highlight while hovered, commit on release.
        if let Some(wire) = response.dnd_hover_payload::<String>() {
            if let Some(payload) = DragPayload::from_wire(&wire) {
                if let Some(pos) = pointer {
                    let duration_slots = grid.duration_slots(payload.duration_minutes);
                    let start_slot =
                        grid.resolve_drop_slot(pos.y - rect.top(), surface_height, duration_slots);
                    Self::draw_highlight(&painter, rect, start_slot, duration_slots, palette);
                }
            }
        }
        if let Some(wire) = response.dnd_release_payload::<String>() {
            if let Some(payload) = DragPayload::from_wire(&wire) {
                if guard.suppresses(&payload.id) {
                    log::debug!("Suppressing duplicate drop of {}", payload.id);
                } else if let Some(pos) = pointer {
                    let duration_slots = grid.duration_slots(payload.duration_minutes);
                    let start_slot =
                        grid.resolve_drop_slot(pos.y - rect.top(), surface_height, duration_slots);
                    effects.push(resolve_drop(
                        store,
                        &payload,
                        &DropTarget::DaySurface {
                            day_index,
                            date,
                            start_slot,
                        },
                    ));
                }
            }
        }

        effects
    }

    /// Draw one scheduled block and return its rect for hit-testing.
    fn draw_block(
        painter: &egui::Painter,
        column: Rect,
        block: &ScheduledBlock,
        layout: &BlockLayout,
        grid: &TimeGrid,
        palette: &BoardPalette,
    ) -> Rect {
        let top = column.top() + block.start_slot as f32 * SLOT_HEIGHT;
        let height = block.duration_slots(grid) as f32 * SLOT_HEIGHT;
        let block_rect = Rect::from_min_size(
            Pos2::new(column.left() + 2.0, top + 1.0),
            Vec2::new(column.width() - 4.0, height - 2.0),
        );

        let mut fill = block_color(&block.color);
        if layout.translucent {
            fill = with_alpha(fill, 160);
        }
        painter.rect_filled(block_rect, Rounding::same(5.0), fill);

        if let Some(overlay) = layout.overlay {
            // Shade the range covered by the later, raised block.
            let shade = Rect::from_min_size(
                Pos2::new(block_rect.left(), top + overlay.top),
                Vec2::new(block_rect.width(), overlay.height.min(height)),
            );
            painter.rect_filled(shade, Rounding::ZERO, palette.overlay_shade);
        }

        let text_color = Color32::from_rgb(252, 252, 252);
        painter.text(
            block_rect.left_top() + Vec2::new(6.0, 4.0),
            Align2::LEFT_TOP,
            &block.name,
            FontId::proportional(12.0),
            text_color,
        );
        if height >= 2.0 * SLOT_HEIGHT {
            painter.text(
                block_rect.left_top() + Vec2::new(6.0, 19.0),
                Align2::LEFT_TOP,
                block.time_range_label(grid),
                FontId::proportional(10.0),
                with_alpha(text_color, 220),
            );
        }

        block_rect
    }

    fn draw_highlight(
        painter: &egui::Painter,
        column: Rect,
        start_slot: usize,
        duration_slots: usize,
        palette: &BoardPalette,
    ) {
        let top = column.top() + start_slot as f32 * SLOT_HEIGHT;
        let rect = Rect::from_min_size(
            Pos2::new(column.left() + 1.0, top),
            Vec2::new(column.width() - 2.0, duration_slots as f32 * SLOT_HEIGHT),
        );
        painter.rect_filled(rect, Rounding::same(5.0), palette.highlight_fill);
        painter.rect_stroke(rect, Rounding::same(5.0), Stroke::new(1.5, palette.highlight_border));
    }
}
