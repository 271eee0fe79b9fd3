// Scheduled block model
// A template instance anchored to a day column and time slot

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::grid::TimeGrid;

/// Where a block lands on the board: the day column, the absolute calendar
/// date behind that column (when known), and the starting slot.
///
/// `date` takes precedence over `day_index` for anchoring across week
/// navigation whenever it is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockAnchor {
    pub day_index: usize,
    pub date: Option<NaiveDate>,
    pub start_slot: usize,
}

/// A placed block on the weekly board.
///
/// Invariant: `start_slot + duration_slots(grid) <= grid.total_slots()`.
/// The store clamps at every write, so a block read back from it always
/// satisfies this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledBlock {
    /// Unique id, stable across moves.
    pub id: String,
    /// Display label copied from the source template at creation time;
    /// there is no live link back.
    pub name: String,
    pub color: String,
    pub duration_minutes: i64,
    pub start_slot: usize,
    /// Day-of-week column, 0-6.
    pub day_index: usize,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ScheduledBlock {
    pub fn duration_slots(&self, grid: &TimeGrid) -> usize {
        grid.duration_slots(self.duration_minutes)
    }

    pub fn end_slot(&self, grid: &TimeGrid) -> usize {
        self.start_slot + self.duration_slots(grid)
    }

    pub fn start_hour(&self, grid: &TimeGrid) -> f32 {
        grid.slot_to_hour(self.start_slot)
    }

    pub fn end_hour(&self, grid: &TimeGrid) -> f32 {
        grid.slot_to_hour(self.end_slot(grid))
    }

    pub fn duration_hours(&self) -> f32 {
        self.duration_minutes as f32 / 60.0
    }

    /// "07:30 – 09:00" style label for tooltips and the history panel.
    pub fn time_range_label(&self, grid: &TimeGrid) -> String {
        format!(
            "{} – {}",
            grid.time_of_day_label(self.start_hour(grid)),
            grid.time_of_day_label(self.end_hour(grid))
        )
    }

    /// Whether this block belongs to the given day column. A dated block
    /// matches on the date; an undated one falls back to the column index.
    pub fn is_on_day(&self, day_index: usize, date: Option<NaiveDate>) -> bool {
        match (self.date, date) {
            (Some(own), Some(column)) => own == column,
            _ => self.day_index == day_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> ScheduledBlock {
        ScheduledBlock {
            id: "b1".into(),
            name: "Deep Work".into(),
            color: "#10B981".into(),
            duration_minutes: 90,
            start_slot: 10,
            day_index: 2,
            date: None,
        }
    }

    #[test]
    fn test_derived_slot_math() {
        let grid = TimeGrid::default();
        let b = block();
        assert_eq!(b.duration_slots(&grid), 3);
        assert_eq!(b.end_slot(&grid), 13);
        assert_eq!(b.start_hour(&grid), 10.0);
        assert_eq!(b.end_hour(&grid), 11.5);
        assert_eq!(b.time_range_label(&grid), "10:00 – 11:30");
    }

    #[test]
    fn test_day_matching_prefers_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
        let mut b = block();
        b.date = Some(date);
        // Date wins over day_index when the column carries a date.
        assert!(b.is_on_day(5, Some(date)));
        assert!(!b.is_on_day(2, Some(date + chrono::Duration::days(1))));
        // Without a column date, fall back to the index.
        assert!(b.is_on_day(2, None));
    }
}
