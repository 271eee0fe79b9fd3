//! The scheduled block store.
//!
//! An ordered collection of placed blocks with create/move/delete operations.
//! The store exclusively owns every `ScheduledBlock`; the UI only holds
//! display projections keyed by id. Every write clamps the start slot so the
//! block invariant (`start_slot + duration_slots <= total_slots`) holds
//! unconditionally. Mutations are synchronous and atomic per call: a
//! rejected placement leaves the store untouched.

use thiserror::Error;

use crate::models::block::{BlockAnchor, ScheduledBlock};
use crate::models::grid::TimeGrid;
use crate::models::payload::DragPayload;
use crate::utils::ids;

/// Why a placement was rejected. Rejections are absorbed locally by the UI
/// (no scheduled block appears); they never propagate as fatal errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("scheduled blocks need a non-empty name")]
    UnnamedBlock,
    #[error("duration must be positive")]
    InvalidDuration,
}

pub struct BlockStore {
    grid: TimeGrid,
    blocks: Vec<ScheduledBlock>,
}

impl BlockStore {
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            blocks: Vec::new(),
        }
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub fn blocks(&self) -> &[ScheduledBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ScheduledBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Create a new block from a drag payload at the given anchor.
    ///
    /// Name and color are copied from the payload; the id is always freshly
    /// generated (a payload id only identifies the *source*, which may be a
    /// template that can be scheduled many times over).
    pub fn place(
        &mut self,
        payload: &DragPayload,
        anchor: BlockAnchor,
    ) -> Result<&ScheduledBlock, PlacementError> {
        if payload.name.trim().is_empty() {
            return Err(PlacementError::UnnamedBlock);
        }
        if payload.duration_minutes <= 0 {
            return Err(PlacementError::InvalidDuration);
        }

        let duration_slots = self.grid.duration_slots(payload.duration_minutes);
        let block = ScheduledBlock {
            id: ids::next_block_id(),
            name: payload.name.clone(),
            color: payload.color.clone(),
            duration_minutes: payload.duration_minutes,
            start_slot: self.grid.clamp_start(anchor.start_slot, duration_slots),
            day_index: anchor.day_index,
            date: anchor.date,
        };
        log::debug!(
            "Placed block '{}' on day {} at slot {}",
            block.name,
            block.day_index,
            block.start_slot
        );
        self.blocks.push(block);
        Ok(self.blocks.last().unwrap())
    }

    /// Move an existing block to a new anchor, preserving its identity.
    /// Unknown ids are a no-op and return `None`.
    pub fn move_block(&mut self, id: &str, anchor: BlockAnchor) -> Option<&ScheduledBlock> {
        let grid = self.grid;
        let block = self.blocks.iter_mut().find(|b| b.id == id)?;
        let duration_slots = grid.duration_slots(block.duration_minutes);
        block.start_slot = grid.clamp_start(anchor.start_slot, duration_slots);
        block.day_index = anchor.day_index;
        block.date = anchor.date;
        Some(block)
    }

    /// Remove a block by id. Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.blocks.len();
        self.blocks.retain(|b| b.id != id);
        before != self.blocks.len()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Blocks belonging to one day column, in insertion order. Dated blocks
    /// match on the column date; undated ones on the column index.
    pub fn blocks_for_day(
        &self,
        day_index: usize,
        date: Option<chrono::NaiveDate>,
    ) -> Vec<&ScheduledBlock> {
        self.blocks
            .iter()
            .filter(|b| b.is_on_day(day_index, date))
            .collect()
    }

    /// Bulk-load blocks from a snapshot, re-clamping each one so a snapshot
    /// written under a different grid still satisfies the invariant.
    pub fn replace_all(&mut self, blocks: Vec<ScheduledBlock>) {
        self.blocks = blocks;
        let grid = self.grid;
        for block in &mut self.blocks {
            let duration_slots = grid.duration_slots(block.duration_minutes);
            block.start_slot = grid.clamp_start(block.start_slot, duration_slots);
        }
    }
}
