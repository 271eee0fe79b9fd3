//! Sidebar: the create form, the template palette, the saved list, the
//! scheduled-block history, and the delete zone.
//!
//! Palette and saved-list items are drag sources on the shared drag-and-drop
//! channel; they put the JSON wire encoding of their payload on it, and the
//! board parses it back on drop.

use egui::{Align2, FontId, Id, Rounding, Sense, Stroke, Vec2};

use crate::models::payload::{DragPayload, PayloadOrigin};
use crate::models::template::ActivityTemplate;
use crate::services::store::BlockStore;
use crate::ui::drag::{resolve_drop, DragManager, DropEffect, DropTarget, RecentMoveGuard};
use crate::ui::theme::PlannerTheme;
use crate::utils::color::{block_color, with_alpha};

pub const SWATCH_OPTIONS: [&str; 10] = [
    "#6366F1", "#22D3EE", "#10B981", "#F59E0B", "#F97316", "#EF4444", "#EC4899", "#8B5CF6",
    "#0EA5E9", "#64748B",
];

pub const DURATION_OPTIONS: [i64; 8] = [30, 60, 90, 120, 150, 180, 210, 240];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarPanel {
    Create,
    History,
}

pub struct SidebarState {
    pub panel: SidebarPanel,
    pub name_input: String,
    pub selected_color: String,
    pub selected_duration: i64,
    pub quota_input: f32,
    /// Validation cue shown on the form, never on a drop target.
    pub validation_error: Option<String>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self {
            panel: SidebarPanel::Create,
            name_input: String::new(),
            selected_color: SWATCH_OPTIONS[0].to_string(),
            selected_duration: DURATION_OPTIONS[1],
            quota_input: 0.0,
            validation_error: None,
        }
    }
}

#[derive(Default)]
pub struct SidebarOutcome {
    /// Template lists changed (snapshot needs saving).
    pub lists_changed: bool,
    pub effects: Vec<DropEffect>,
}

pub struct Sidebar;

impl Sidebar {
    pub fn show(
        ui: &mut egui::Ui,
        state: &mut SidebarState,
        created: &mut Vec<ActivityTemplate>,
        saved: &mut Vec<ActivityTemplate>,
        store: &mut BlockStore,
        theme: &PlannerTheme,
        guard: &RecentMoveGuard,
    ) -> SidebarOutcome {
        let mut outcome = SidebarOutcome::default();

        ui.horizontal(|ui| {
            ui.selectable_value(&mut state.panel, SidebarPanel::Create, "Create");
            ui.selectable_value(&mut state.panel, SidebarPanel::History, "History");
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match state.panel {
                SidebarPanel::Create => {
                    Self::create_panel(ui, state, created, saved, theme, &mut outcome);
                }
                SidebarPanel::History => {
                    Self::history_panel(ui, store, theme);
                }
            });

        Self::delete_zone(ui, store, created, saved, theme, guard, &mut outcome);

        outcome
    }

    fn create_panel(
        ui: &mut egui::Ui,
        state: &mut SidebarState,
        created: &mut Vec<ActivityTemplate>,
        saved: &mut Vec<ActivityTemplate>,
        theme: &PlannerTheme,
        outcome: &mut SidebarOutcome,
    ) {
        ui.add(
            egui::TextEdit::singleline(&mut state.name_input)
                .hint_text("e.g. Writing Sprint")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);

        ui.label("Accent color");
        ui.horizontal_wrapped(|ui| {
            for hex in SWATCH_OPTIONS {
                let (rect, response) =
                    ui.allocate_exact_size(Vec2::splat(20.0), Sense::click());
                let painter = ui.painter_at(rect.expand(2.0));
                painter.rect_filled(rect, Rounding::same(5.0), block_color(hex));
                if state.selected_color == hex {
                    painter.rect_stroke(
                        rect.expand(2.0),
                        Rounding::same(6.0),
                        Stroke::new(2.0, theme.accent),
                    );
                }
                if response.clicked() {
                    state.selected_color = hex.to_string();
                }
            }
        });
        ui.add_space(6.0);

        ui.label("Time allowance");
        ui.horizontal_wrapped(|ui| {
            for minutes in DURATION_OPTIONS {
                let label = crate::models::grid::format_duration_minutes(minutes);
                if ui
                    .selectable_label(state.selected_duration == minutes, label)
                    .clicked()
                {
                    state.selected_duration = minutes;
                }
            }
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label("Weekly quota (h)");
            ui.add(
                egui::DragValue::new(&mut state.quota_input)
                    .range(0.0..=60.0)
                    .speed(0.5),
            );
        });
        ui.add_space(6.0);

        if ui.button("Create block").clicked() {
            match ActivityTemplate::new(
                state.name_input.trim(),
                state.selected_color.clone(),
                state.selected_duration,
            ) {
                Ok(mut template) => {
                    if state.quota_input > 0.0 {
                        template = template.with_quota(state.quota_input);
                    }
                    created.insert(0, template);
                    state.name_input.clear();
                    state.validation_error = None;
                    outcome.lists_changed = true;
                }
                Err(err) => {
                    state.validation_error = Some(err);
                }
            }
        }
        if let Some(err) = &state.validation_error {
            ui.colored_label(theme.danger, err);
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(format!("Blocks: {}", created.len()));
            if ui.small_button("+").clicked() {
                if let Some(first) = created.first() {
                    let copy = first.duplicate();
                    created.insert(0, copy);
                    outcome.lists_changed = true;
                }
            }
            if ui.small_button("−").clicked() && !created.is_empty() {
                created.remove(0);
                outcome.lists_changed = true;
            }
        });
        ui.add_space(4.0);

        if created.is_empty() {
            ui.weak("No blocks yet. Create one, then drag it onto the board.");
        }
        let mut save_requests = Vec::new();
        for template in created.iter() {
            ui.horizontal(|ui| {
                Self::template_item(ui, template, PayloadOrigin::Template, theme);
                if ui
                    .small_button("save")
                    .on_hover_text("Copy to the saved list")
                    .clicked()
                {
                    save_requests.push(template.duplicate());
                }
            });
        }
        if !save_requests.is_empty() {
            saved.extend(save_requests);
            outcome.lists_changed = true;
        }

        if !saved.is_empty() {
            ui.add_space(10.0);
            ui.strong("Saved list");
            for template in saved.iter() {
                Self::template_item(ui, template, PayloadOrigin::Saved, theme);
            }
        }
    }

    /// One draggable palette entry.
    fn template_item(
        ui: &mut egui::Ui,
        template: &ActivityTemplate,
        origin: PayloadOrigin,
        theme: &PlannerTheme,
    ) {
        let wire = DragPayload::from_template(template, origin).to_wire();
        let id = Id::new(("palette-item", origin as usize, &template.id));
        ui.dnd_drag_source(id, wire, |ui| {
            let (rect, _) = ui.allocate_exact_size(
                Vec2::new(ui.available_width().max(140.0).min(190.0), 26.0),
                Sense::hover(),
            );
            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, Rounding::same(5.0), with_alpha(theme.surface_border, 70));
            let swatch = egui::Rect::from_min_size(
                rect.left_top() + Vec2::new(4.0, 5.0),
                Vec2::new(6.0, 16.0),
            );
            painter.rect_filled(swatch, Rounding::same(2.0), block_color(&template.color));
            painter.text(
                rect.left_top() + Vec2::new(16.0, 5.0),
                Align2::LEFT_TOP,
                format!("{}  {}", template.duration_label(), template.name),
                FontId::proportional(12.0),
                theme.text_primary,
            );
        });
    }

    fn history_panel(ui: &mut egui::Ui, store: &BlockStore, theme: &PlannerTheme) {
        let grid = *store.grid();
        let mut blocks: Vec<_> = store.blocks().to_vec();
        if blocks.is_empty() {
            ui.weak("No blocks logged yet.");
            return;
        }
        blocks.sort_by(|a, b| {
            (a.date, a.day_index, a.start_slot).cmp(&(b.date, b.day_index, b.start_slot))
        });
        const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
        for block in &blocks {
            let day = block
                .date
                .map(|d| d.format("%a %-d %b").to_string())
                .unwrap_or_else(|| DAY_NAMES[block.day_index.min(6)].to_string());
            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(6.0, 14.0), Sense::hover());
                ui.painter_at(rect)
                    .rect_filled(rect, Rounding::same(2.0), block_color(&block.color));
                ui.label(format!(
                    "{} · {}  {}",
                    day,
                    block.time_range_label(&grid),
                    block.name
                ));
            });
            ui.colored_label(
                theme.text_secondary,
                format!(
                    "    {}",
                    crate::models::grid::format_duration_minutes(block.duration_minutes)
                ),
            );
        }
    }

    /// Drop target that removes whatever lands on it. Only visible while a
    /// drag is in flight on either transport.
    fn delete_zone(
        ui: &mut egui::Ui,
        store: &mut BlockStore,
        created: &mut Vec<ActivityTemplate>,
        saved: &mut Vec<ActivityTemplate>,
        theme: &PlannerTheme,
        guard: &RecentMoveGuard,
        outcome: &mut SidebarOutcome,
    ) {
        let dragging_fallback = DragManager::is_dragging(ui.ctx());
        let dragging_shared = egui::DragAndDrop::has_any_payload(ui.ctx());
        if !dragging_fallback && !dragging_shared {
            return;
        }

        ui.add_space(6.0);
        let (rect, response) = ui.allocate_exact_size(
            Vec2::new(ui.available_width(), 44.0),
            Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::same(6.0), with_alpha(theme.danger, 26));
        painter.rect_stroke(rect, Rounding::same(6.0), Stroke::new(1.5, theme.danger));
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Drop here to remove",
            FontId::proportional(12.0),
            theme.danger,
        );

        if let Some(pos) = ui.ctx().input(|i| i.pointer.latest_pos()) {
            if rect.contains(pos) && DragManager::active(ui.ctx()).is_some() {
                DragManager::update_hover(ui.ctx(), DropTarget::DeleteZone);
            }
        }

        if let Some(wire) = response.dnd_release_payload::<String>() {
            if let Some(payload) = DragPayload::from_wire(&wire) {
                if guard.suppresses(&payload.id) {
                    log::debug!("Suppressing duplicate drop of {}", payload.id);
                } else {
                    let effect = resolve_drop(store, &payload, &DropTarget::DeleteZone);
                    apply_source_removal(&effect, created, saved, outcome);
                    outcome.effects.push(effect);
                }
            }
        }
    }
}

/// Remove a template from whichever collaborator list owned it.
pub fn apply_source_removal(
    effect: &DropEffect,
    created: &mut Vec<ActivityTemplate>,
    saved: &mut Vec<ActivityTemplate>,
    outcome: &mut SidebarOutcome,
) {
    if let DropEffect::RemoveSource { origin, id } = effect {
        let list = match origin {
            PayloadOrigin::Saved => saved,
            _ => created,
        };
        let before = list.len();
        list.retain(|t| &t.id != id);
        if list.len() != before {
            outcome.lists_changed = true;
        }
    }
}
