//! The planner application shell.
//!
//! Owns the block store, the template lists, and the gesture guard; lays out
//! the header, sidebar, board, and ledger panels; and is the single commit
//! point for the pointer-capture drag driver. Any state change persists the
//! snapshot immediately, so a crash never loses more than the current
//! gesture.

use std::path::PathBuf;

use chrono::{Duration, Local};

use crate::models::template::ActivityTemplate;
use crate::services::config::PlannerConfig;
use crate::services::report;
use crate::services::storage::{self, PlannerSnapshot};
use crate::services::store::BlockStore;
use crate::ui::drag::{resolve_drop, DragManager, DropEffect};
use crate::ui::sidebar::{apply_source_removal, Sidebar, SidebarOutcome, SidebarState};
use crate::ui::summary::Summary;
use crate::ui::theme::PlannerTheme;
use crate::ui::views::{MonthView, WeekView};
use crate::utils::date::week_context;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewType {
    Week,
    Month,
}

pub struct PlannerApp {
    config: PlannerConfig,
    theme: PlannerTheme,
    store: BlockStore,
    created_blocks: Vec<ActivityTemplate>,
    saved_list: Vec<ActivityTemplate>,
    week_offset: i64,
    view: ViewType,
    sidebar: SidebarState,
    move_guard: crate::ui::drag::RecentMoveGuard,
    snapshot_path: Option<PathBuf>,
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Hover targets re-assert themselves every frame; start clean so a
        // target the pointer left does not linger.
        DragManager::clear_hover(ctx);

        let today = Local::now().date_naive();
        let week = week_context(today, self.week_offset, self.config.first_day_of_week);
        let month_anchor = today + Duration::weeks(self.week_offset);
        let mut mutated = false;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("TimeBlocks");
                ui.separator();
                if ui.button("◀").clicked() {
                    self.week_offset -= 1;
                    mutated = true;
                }
                if ui.button("Today").clicked() && self.week_offset != 0 {
                    self.week_offset = 0;
                    mutated = true;
                }
                if ui.button("▶").clicked() {
                    self.week_offset += 1;
                    mutated = true;
                }
                ui.label(format!(
                    "Week {}, {}  {} – {}",
                    week.week_number,
                    week.year,
                    week.start.format("%b %-d"),
                    week.end.format("%b %-d"),
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.selectable_value(&mut self.view, ViewType::Month, "Month");
                    ui.selectable_value(&mut self.view, ViewType::Week, "Week");
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("ledger")
            .min_height(70.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                let rows = report::quota_status(&self.created_blocks, self.store.blocks());
                Summary::show(ui, &rows, &self.theme);
            });

        egui::SidePanel::left("sidebar")
            .default_width(240.0)
            .show(ctx, |ui| {
                let outcome = Sidebar::show(
                    ui,
                    &mut self.sidebar,
                    &mut self.created_blocks,
                    &mut self.saved_list,
                    &mut self.store,
                    &self.theme,
                    &self.move_guard,
                );
                if outcome.lists_changed || any_mutation(&outcome.effects) {
                    mutated = true;
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let effects = match self.view {
                ViewType::Week => WeekView::show(
                    ui,
                    &mut self.store,
                    &week,
                    today,
                    &self.theme,
                    &self.move_guard,
                ),
                ViewType::Month => MonthView::show(
                    ui,
                    &mut self.store,
                    month_anchor,
                    today,
                    self.config.first_day_of_week,
                    &self.theme,
                    &self.move_guard,
                ),
            };
            if any_mutation(&effects) {
                mutated = true;
            }
        });

        // All hover targets have reported in; the fallback driver can now
        // resolve or cancel a released gesture.
        if self.resolve_fallback_release(ctx) {
            mutated = true;
        }

        if mutated {
            self.persist();
        }
        if DragManager::is_dragging(ctx) {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.persist();
        log::info!("Planner state saved on exit");
    }
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = PlannerConfig::load();
        let theme = Self::pick_theme(&config);
        theme.apply_to_context(&cc.egui_ctx);

        let snapshot_path = storage::default_snapshot_path();
        let snapshot = match snapshot_path.as_deref() {
            Some(path) => storage::load_snapshot(path).unwrap_or_else(|err| {
                log::warn!("Could not load planner state: {:#}", err);
                PlannerSnapshot::default()
            }),
            None => {
                log::warn!("No data directory available; running without persistence");
                PlannerSnapshot::default()
            }
        };
        log::info!(
            "Loaded {} scheduled blocks, {} templates, {} saved",
            snapshot.scheduled_blocks.len(),
            snapshot.created_blocks.len(),
            snapshot.saved_list_blocks.len(),
        );

        let mut store = BlockStore::new(config.grid());
        store.replace_all(snapshot.scheduled_blocks);

        Self {
            config,
            theme,
            store,
            created_blocks: snapshot.created_blocks,
            saved_list: snapshot.saved_list_blocks,
            week_offset: snapshot.week_offset,
            view: ViewType::Week,
            sidebar: SidebarState::default(),
            move_guard: Default::default(),
            snapshot_path,
        }
    }

    fn pick_theme(config: &PlannerConfig) -> PlannerTheme {
        if config.use_system_theme {
            match dark_light::detect() {
                dark_light::Mode::Dark => PlannerTheme::dark(),
                dark_light::Mode::Light => PlannerTheme::light(),
                dark_light::Mode::Default => PlannerTheme::by_name(&config.theme),
            }
        } else {
            PlannerTheme::by_name(&config.theme)
        }
    }

    /// Terminal transitions for the fallback driver: resolve on release over
    /// a target, cancel on escape, sub-threshold release, or release
    /// off-target. Returns whether the store or lists changed.
    fn resolve_fallback_release(&mut self, ctx: &egui::Context) -> bool {
        if DragManager::active(ctx).is_none() {
            return false;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            DragManager::cancel(ctx);
            return false;
        }
        if !ctx.input(|i| i.pointer.any_released()) {
            return false;
        }
        let Some(gesture) = DragManager::finish(ctx) else {
            return false;
        };
        if !gesture.is_dragging() {
            // Click semantics preserved on drag-capable elements.
            return false;
        }
        let Some(target) = gesture.hovered else {
            return false;
        };

        let effect = resolve_drop(&mut self.store, &gesture.payload, &target);
        if let DropEffect::Moved { id } = &effect {
            self.move_guard.record(id);
        }
        let mut outcome = SidebarOutcome::default();
        apply_source_removal(&effect, &mut self.created_blocks, &mut self.saved_list, &mut outcome);
        any_mutation(std::slice::from_ref(&effect)) || outcome.lists_changed
    }

    fn persist(&self) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        let snapshot = PlannerSnapshot {
            week_offset: self.week_offset,
            created_blocks: self.created_blocks.clone(),
            scheduled_blocks: self.store.blocks().to_vec(),
            saved_list_blocks: self.saved_list.clone(),
        };
        if let Err(err) = storage::save_snapshot(path, &snapshot) {
            log::warn!("Could not save planner state: {:#}", err);
        }
    }
}

fn any_mutation(effects: &[DropEffect]) -> bool {
    effects.iter().any(|e| !matches!(e, DropEffect::Rejected))
}
