//! The discrete time axis of the planner board.
//!
//! A `TimeGrid` defines the visible day window and slot granularity, and owns
//! all conversions between slot indices, wall-clock hours, and pointer
//! positions. Everything here is pure arithmetic with no side effects.

use serde::{Deserialize, Serialize};

/// View window and slot granularity. Immutable after startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// First visible hour of the day (inclusive).
    pub view_start_hour: u32,
    /// Last visible hour of the day (exclusive).
    pub view_end_hour: u32,
    /// Slots per hour (2 = 30-minute slots).
    pub slots_per_hour: u32,
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            view_start_hour: 5,
            view_end_hour: 23,
            slots_per_hour: 2,
        }
    }
}

impl TimeGrid {
    /// Total number of slots in the visible window.
    pub fn total_slots(&self) -> usize {
        (self.view_end_hour.saturating_sub(self.view_start_hour) * self.slots_per_hour) as usize
    }

    /// Wall-clock hour (fractional) at the top of a slot.
    pub fn slot_to_hour(&self, slot: usize) -> f32 {
        self.view_start_hour as f32 + slot as f32 / self.slots_per_hour as f32
    }

    /// Nearest slot for a wall-clock hour. Callers clamp to `[0, total_slots]`.
    pub fn hour_to_slot(&self, hour: f32) -> usize {
        let slot = (hour - self.view_start_hour as f32) * self.slots_per_hour as f32;
        slot.round().max(0.0) as usize
    }

    /// Convert a duration in minutes to a span of slots, never less than one.
    pub fn duration_slots(&self, minutes: i64) -> usize {
        let slots = (minutes as f64 / 60.0 * self.slots_per_hour as f64).round() as i64;
        slots.max(1) as usize
    }

    /// Pixel height of one slot on a surface of the given height.
    ///
    /// The `+1` divisor reserves a visual margin of one slot at the bottom of
    /// the column. It is deliberate, kept for parity with the board layout.
    pub fn slot_height(&self, surface_height: f32) -> f32 {
        surface_height / (self.total_slots() + 1) as f32
    }

    /// Largest valid start slot for a block of the given span.
    pub fn max_start(&self, duration_slots: usize) -> usize {
        self.total_slots().saturating_sub(duration_slots)
    }

    /// Clamp a candidate start slot so the block fits inside the window.
    pub fn clamp_start(&self, start_slot: usize, duration_slots: usize) -> usize {
        start_slot.min(self.max_start(duration_slots))
    }

    /// Resolve where a dropped block should land.
    ///
    /// `offset_y` is the pointer position relative to the top of the day
    /// surface; `surface_height` its on-screen height. Always returns a slot
    /// satisfying the scheduled-block invariant; degenerate (zero-height)
    /// surfaces resolve to slot 0.
    pub fn resolve_drop_slot(
        &self,
        offset_y: f32,
        surface_height: f32,
        duration_slots: usize,
    ) -> usize {
        let slot_height = self.slot_height(surface_height);
        if !slot_height.is_finite() || slot_height <= 0.0 {
            return 0;
        }
        let raw_slot = (offset_y / slot_height).floor().max(0.0) as usize;
        self.clamp_start(raw_slot, duration_slots)
    }

    /// Hour label for the time track, e.g. "0500".
    pub fn hour_label(&self, hour: u32) -> String {
        format!("{:02}00", hour % 24)
    }

    /// Time-of-day label for a fractional hour, e.g. "07:30".
    pub fn time_of_day_label(&self, hour: f32) -> String {
        let total_minutes = (hour * 60.0).round() as i64;
        format!("{:02}:{:02}", (total_minutes / 60) % 24, total_minutes % 60)
    }
}

/// Human-friendly duration label, e.g. "1h 30m", "2h", "45m".
pub fn format_duration_minutes(minutes: i64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    if hours > 0 && rest > 0 {
        format!("{}h {}m", hours, rest)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn grid() -> TimeGrid {
        TimeGrid::default()
    }

    #[test]
    fn test_default_window_has_36_slots() {
        assert_eq!(grid().total_slots(), 36);
    }

    #[test]
    fn test_slot_hour_round_trip() {
        let g = grid();
        assert_eq!(g.slot_to_hour(0), 5.0);
        assert_eq!(g.slot_to_hour(5), 7.5);
        assert_eq!(g.hour_to_slot(7.5), 5);
        assert_eq!(g.hour_to_slot(7.6), 5); // rounds to nearest slot
        assert_eq!(g.hour_to_slot(7.8), 6);
    }

    #[test_case(60, 2 ; "one hour is two slots")]
    #[test_case(30, 1 ; "half hour is one slot")]
    #[test_case(90, 3 ; "ninety minutes is three slots")]
    #[test_case(10, 1 ; "tiny durations round up to one slot")]
    #[test_case(240, 8 ; "four hours is eight slots")]
    fn test_duration_slots(minutes: i64, expected: usize) {
        assert_eq!(grid().duration_slots(minutes), expected);
    }

    #[test]
    fn test_drop_at_slot_10() {
        // Surface of 370px -> slot height 10px with the +1 margin divisor.
        let g = grid();
        let slot_height = g.slot_height(370.0);
        assert!((slot_height - 10.0).abs() < f32::EPSILON);
        let start = g.resolve_drop_slot(10.0 * slot_height + 1.0, 370.0, g.duration_slots(60));
        assert_eq!(start, 10);
    }

    #[test]
    fn test_drop_clamps_to_max_start() {
        // 240-minute block (8 slots) dropped at raw slot 34 on a 36-slot grid.
        let g = grid();
        let slot_height = g.slot_height(370.0);
        let start = g.resolve_drop_slot(34.0 * slot_height + 1.0, 370.0, 8);
        assert_eq!(start, 28);
        assert_eq!(g.max_start(8), 28);
    }

    #[test]
    fn test_drop_below_bottom_edge_clamps() {
        let g = grid();
        let start = g.resolve_drop_slot(10_000.0, 370.0, 2);
        assert_eq!(start, g.max_start(2));
    }

    #[test]
    fn test_drop_above_top_edge_clamps_to_zero() {
        assert_eq!(grid().resolve_drop_slot(-40.0, 370.0, 2), 0);
    }

    #[test]
    fn test_degenerate_surface_resolves_to_zero() {
        assert_eq!(grid().resolve_drop_slot(120.0, 0.0, 2), 0);
        assert_eq!(grid().resolve_drop_slot(120.0, -5.0, 2), 0);
    }

    #[test]
    fn test_labels() {
        let g = grid();
        assert_eq!(g.hour_label(5), "0500");
        assert_eq!(g.hour_label(24), "0000");
        assert_eq!(g.time_of_day_label(7.5), "07:30");
        assert_eq!(format_duration_minutes(90), "1h 30m");
        assert_eq!(format_duration_minutes(120), "2h");
        assert_eq!(format_duration_minutes(45), "45m");
    }
}
