//! Drag transfer protocol.
//!
//! One abstract gesture state machine (`Armed -> Dragging -> resolved or
//! cancelled`) fed by two drivers: the shared egui drag-and-drop payload
//! channel (used by palette and saved-list sources, carrying the JSON wire
//! encoding) and a pointer-capture fallback (`DragManager`, used for moving
//! blocks already on the board). Both drivers commit through
//! [`resolve_drop`], and a cross-driver [`RecentMoveGuard`] keeps them from
//! ever committing the same gesture twice.

use std::time::{Duration, Instant};

use chrono::{Datelike, NaiveDate};
use egui::{Context, Id, Pos2};

use crate::models::block::BlockAnchor;
use crate::models::payload::{DragPayload, PayloadOrigin};
use crate::services::store::BlockStore;

/// Pointer travel on either axis required before a press becomes a drag.
/// Sub-threshold releases keep click semantics on drag-capable elements.
pub const DRAG_THRESHOLD_PX: f32 = 8.0;

/// How long a fallback-driver move suppresses a shared-channel drop of the
/// same block id.
pub const RECENT_MOVE_WINDOW: Duration = Duration::from_millis(700);

/// Default start hour for drops onto month cells, which carry no vertical
/// geometry to resolve against.
const MONTH_CELL_DEFAULT_HOUR: f32 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// Pressed on a source, threshold not yet exceeded.
    Armed,
    Dragging,
}

/// The live state of one gesture: the payload snapshot taken at arm time and
/// where the press started. Cleared on every resolve or cancel, so no
/// payload ever outlives its gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    pub payload: DragPayload,
    pub press_origin: Pos2,
    pub phase: DragPhase,
    /// The drop-capable target currently under the pointer, if any.
    pub hovered: Option<DropTarget>,
}

impl DragGesture {
    pub fn arm(payload: DragPayload, press_origin: Pos2) -> Self {
        Self {
            payload,
            press_origin,
            phase: DragPhase::Armed,
            hovered: None,
        }
    }

    /// Feed a pointer position; arms become drags once the threshold is
    /// exceeded on either axis. Never transitions backwards.
    pub fn note_pointer(&mut self, pos: Pos2) -> DragPhase {
        if self.phase == DragPhase::Armed {
            let delta = pos - self.press_origin;
            if delta.x.abs() > DRAG_THRESHOLD_PX || delta.y.abs() > DRAG_THRESHOLD_PX {
                self.phase = DragPhase::Dragging;
            }
        }
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }
}

/// A drop-capable target under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    DaySurface {
        day_index: usize,
        date: NaiveDate,
        start_slot: usize,
    },
    MonthCell {
        date: NaiveDate,
    },
    DeleteZone,
}

/// What a committed drop did to the planner state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropEffect {
    Created { id: String },
    Moved { id: String },
    Deleted { id: String },
    /// The payload came from a collaborator list (palette or saved list);
    /// the store is untouched and the owner should drop the source entry.
    RemoveSource { origin: PayloadOrigin, id: String },
    /// Silently absorbed: unnamed new block, unknown id, or similar.
    Rejected,
}

/// Resolve a committed drop against the store.
///
/// A payload whose id is already in the store moves that block (identity
/// preserved); anything else is a create, subject to the store's name and
/// duration validation. Delete-zone drops of scheduled blocks remove them;
/// template/saved payloads are handed back to their owning list.
pub fn resolve_drop(
    store: &mut BlockStore,
    payload: &DragPayload,
    target: &DropTarget,
) -> DropEffect {
    match target {
        DropTarget::DeleteZone => {
            if payload.origin == PayloadOrigin::Scheduled {
                if store.delete(&payload.id) {
                    DropEffect::Deleted {
                        id: payload.id.clone(),
                    }
                } else {
                    DropEffect::Rejected
                }
            } else if !payload.id.is_empty() {
                DropEffect::RemoveSource {
                    origin: payload.origin,
                    id: payload.id.clone(),
                }
            } else {
                DropEffect::Rejected
            }
        }
        DropTarget::DaySurface {
            day_index,
            date,
            start_slot,
        } => {
            let anchor = BlockAnchor {
                day_index: *day_index,
                date: Some(*date),
                start_slot: *start_slot,
            };
            place_or_move(store, payload, anchor)
        }
        DropTarget::MonthCell { date } => {
            // Month cells have no time axis: moves keep the block's slot,
            // creates land at the default morning hour.
            let start_slot = store
                .get(&payload.id)
                .map(|b| b.start_slot)
                .unwrap_or_else(|| {
                    let grid = store.grid();
                    grid.clamp_start(
                        grid.hour_to_slot(MONTH_CELL_DEFAULT_HOUR),
                        grid.duration_slots(payload.duration_minutes),
                    )
                });
            let anchor = BlockAnchor {
                day_index: date.weekday().num_days_from_sunday() as usize,
                date: Some(*date),
                start_slot,
            };
            place_or_move(store, payload, anchor)
        }
    }
}

fn place_or_move(store: &mut BlockStore, payload: &DragPayload, anchor: BlockAnchor) -> DropEffect {
    if !payload.id.is_empty() && store.contains(&payload.id) {
        match store.move_block(&payload.id, anchor) {
            Some(block) => DropEffect::Moved {
                id: block.id.clone(),
            },
            None => DropEffect::Rejected,
        }
    } else if payload.origin == PayloadOrigin::Scheduled {
        // A scheduled-origin payload whose block is gone; nothing to move.
        log::warn!("Move payload references unknown block {}", payload.id);
        DropEffect::Rejected
    } else {
        match store.place(payload, anchor) {
            Ok(block) => DropEffect::Created {
                id: block.id.clone(),
            },
            Err(err) => {
                log::debug!("Placement rejected: {}", err);
                DropEffect::Rejected
            }
        }
    }
}

/// Cross-driver duplicate-commit suppression: the id and time of the last
/// fallback-driver move. A shared-channel drop of the same id inside the
/// window is discarded instead of double-processed.
///
/// The current sources are disjoint (the shared channel carries template and
/// saved-list payloads, the fallback driver carries scheduled blocks), so
/// the guard only fires if a source ever publishes scheduled-block payloads
/// on both transports. Every shared-channel commit still checks it so such
/// a source cannot double-commit a move.
#[derive(Debug, Clone, Default)]
pub struct RecentMoveGuard {
    last: Option<(String, Instant)>,
}

impl RecentMoveGuard {
    pub fn record(&mut self, id: &str) {
        self.record_at(id, Instant::now());
    }

    pub fn suppresses(&self, id: &str) -> bool {
        self.suppresses_at(id, Instant::now())
    }

    fn record_at(&mut self, id: &str, at: Instant) {
        self.last = Some((id.to_string(), at));
    }

    fn suppresses_at(&self, id: &str, now: Instant) -> bool {
        match &self.last {
            Some((last_id, at)) => {
                last_id == id && now.duration_since(*at) <= RECENT_MOVE_WINDOW
            }
            None => false,
        }
    }
}

/// Pointer-capture fallback driver. Holds the single active gesture in egui
/// context memory so any widget can see it; there is at most one gesture at
/// a time, and terminal transitions always clear the slot.
pub struct DragManager;

impl DragManager {
    fn storage_id() -> Id {
        Id::new("planner_block_gesture")
    }

    pub fn begin(ctx: &Context, gesture: DragGesture) {
        ctx.memory_mut(|mem| {
            mem.data.insert_temp(Self::storage_id(), gesture);
        });
    }

    pub fn active(ctx: &Context) -> Option<DragGesture> {
        ctx.memory_mut(|mem| mem.data.get_temp::<DragGesture>(Self::storage_id()))
    }

    pub fn is_dragging(ctx: &Context) -> bool {
        Self::active(ctx).is_some_and(|g| g.is_dragging())
    }

    /// Feed the current pointer position into the stored gesture.
    pub fn note_pointer(ctx: &Context, pos: Pos2) -> Option<DragPhase> {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            let mut gesture = mem.data.get_temp::<DragGesture>(id)?;
            let phase = gesture.note_pointer(pos);
            mem.data.insert_temp(id, gesture);
            Some(phase)
        })
    }

    /// Record the drop target under the pointer. Targets set this while
    /// hovered; the frame loop clears it before any target runs.
    pub fn update_hover(ctx: &Context, target: DropTarget) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut gesture) = mem.data.get_temp::<DragGesture>(id) {
                gesture.hovered = Some(target);
                mem.data.insert_temp(id, gesture);
            }
        });
    }

    pub fn clear_hover(ctx: &Context) {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            if let Some(mut gesture) = mem.data.get_temp::<DragGesture>(id) {
                gesture.hovered = None;
                mem.data.insert_temp(id, gesture);
            }
        });
    }

    /// Take the gesture out for resolution (release observed).
    pub fn finish(ctx: &Context) -> Option<DragGesture> {
        let id = Self::storage_id();
        ctx.memory_mut(|mem| {
            let gesture = mem.data.get_temp::<DragGesture>(id);
            if gesture.is_some() {
                mem.data.remove::<DragGesture>(id);
            }
            gesture
        })
    }

    /// Drop the gesture without resolving (pointer capture lost, escape).
    pub fn cancel(ctx: &Context) {
        ctx.memory_mut(|mem| {
            mem.data.remove::<DragGesture>(Self::storage_id());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grid::TimeGrid;

    fn store() -> BlockStore {
        BlockStore::new(TimeGrid::default())
    }

    fn template_payload(name: &str) -> DragPayload {
        DragPayload {
            id: "tpl-1".into(),
            name: name.into(),
            color: "#F59E0B".into(),
            duration_minutes: 60,
            origin: PayloadOrigin::Template,
        }
    }

    fn day_target(day_index: usize, start_slot: usize) -> DropTarget {
        DropTarget::DaySurface {
            day_index,
            date: NaiveDate::from_ymd_opt(2025, 6, 9).unwrap(),
            start_slot,
        }
    }

    #[test]
    fn test_sub_threshold_release_stays_armed() {
        // Scenario: the pointer moves only 3px before release.
        let mut gesture = DragGesture::arm(template_payload("Cooking"), Pos2::new(100.0, 100.0));
        assert_eq!(gesture.note_pointer(Pos2::new(103.0, 103.0)), DragPhase::Armed);
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn test_threshold_exceeded_on_one_axis() {
        let mut gesture = DragGesture::arm(template_payload("Cooking"), Pos2::new(100.0, 100.0));
        assert_eq!(
            gesture.note_pointer(Pos2::new(100.0, 109.0)),
            DragPhase::Dragging
        );
        // Never transitions back.
        assert_eq!(
            gesture.note_pointer(Pos2::new(100.0, 100.0)),
            DragPhase::Dragging
        );
    }

    #[test]
    fn test_drop_creates_from_template() {
        let mut store = store();
        let effect = resolve_drop(&mut store, &template_payload("Cooking"), &day_target(2, 10));
        assert!(matches!(effect, DropEffect::Created { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.blocks()[0].start_slot, 10);
    }

    #[test]
    fn test_unnamed_drop_is_rejected() {
        let mut store = store();
        for name in ["", "   "] {
            let effect = resolve_drop(&mut store, &template_payload(name), &day_target(0, 0));
            assert_eq!(effect, DropEffect::Rejected);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_scheduled_drop_moves_instead_of_creating() {
        let mut store = store();
        let id = match resolve_drop(&mut store, &template_payload("Strength"), &day_target(1, 4)) {
            DropEffect::Created { id } => id,
            other => panic!("expected create, got {:?}", other),
        };

        let moved = DragPayload {
            id: id.clone(),
            origin: PayloadOrigin::Scheduled,
            ..template_payload("Strength")
        };
        let effect = resolve_drop(&mut store, &moved, &day_target(4, 20));
        assert_eq!(effect, DropEffect::Moved { id: id.clone() });
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().day_index, 4);
    }

    #[test]
    fn test_move_of_unknown_block_is_noop() {
        let mut store = store();
        let payload = DragPayload {
            id: "block-gone".into(),
            origin: PayloadOrigin::Scheduled,
            ..template_payload("Ghost")
        };
        assert_eq!(
            resolve_drop(&mut store, &payload, &day_target(0, 0)),
            DropEffect::Rejected
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_zone() {
        let mut store = store();
        let id = match resolve_drop(&mut store, &template_payload("Play"), &day_target(3, 8)) {
            DropEffect::Created { id } => id,
            other => panic!("expected create, got {:?}", other),
        };

        let scheduled = DragPayload {
            id: id.clone(),
            origin: PayloadOrigin::Scheduled,
            ..template_payload("Play")
        };
        assert_eq!(
            resolve_drop(&mut store, &scheduled, &DropTarget::DeleteZone),
            DropEffect::Deleted { id }
        );
        assert!(store.is_empty());

        // Template payloads on the delete zone go back to their list owner.
        assert_eq!(
            resolve_drop(&mut store, &template_payload("Play"), &DropTarget::DeleteZone),
            DropEffect::RemoveSource {
                origin: PayloadOrigin::Template,
                id: "tpl-1".into()
            }
        );
    }

    #[test]
    fn test_month_cell_create_and_move() {
        let mut store = store();
        let date = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(); // Saturday
        let effect = resolve_drop(&mut store, &template_payload("Reading"), &DropTarget::MonthCell { date });
        let id = match effect {
            DropEffect::Created { id } => id,
            other => panic!("expected create, got {:?}", other),
        };
        let block = store.get(&id).unwrap();
        assert_eq!(block.date, Some(date));
        assert_eq!(block.day_index, 6);
        // Default morning anchor: 09:00 on the 5-23 window is slot 8.
        assert_eq!(block.start_slot, 8);

        // Moving onto another month cell keeps the slot.
        let other = date + chrono::Duration::days(3);
        let payload = DragPayload {
            id: id.clone(),
            origin: PayloadOrigin::Scheduled,
            ..template_payload("Reading")
        };
        resolve_drop(&mut store, &payload, &DropTarget::MonthCell { date: other });
        let block = store.get(&id).unwrap();
        assert_eq!(block.date, Some(other));
        assert_eq!(block.start_slot, 8);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_recent_move_guard_window() {
        let mut guard = RecentMoveGuard::default();
        let t0 = Instant::now();
        guard.record_at("block-1", t0);

        assert!(guard.suppresses_at("block-1", t0 + Duration::from_millis(100)));
        assert!(guard.suppresses_at("block-1", t0 + RECENT_MOVE_WINDOW));
        assert!(!guard.suppresses_at("block-1", t0 + RECENT_MOVE_WINDOW + Duration::from_millis(1)));
        assert!(!guard.suppresses_at("block-2", t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_guard_empty_never_suppresses() {
        let guard = RecentMoveGuard::default();
        assert!(!guard.suppresses("anything"));
    }
}
