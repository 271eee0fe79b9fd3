//! Week arithmetic for the planner board.
//!
//! Pure date helpers: week starts, week offsets, and the header context
//! (ISO week number plus the seven dates of the visible week).

use chrono::{Datelike, Duration, NaiveDate};

/// The seven dates of a visible week plus its header metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekContext {
    pub week_number: u32,
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub dates: [NaiveDate; 7],
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

/// Build the week context for `today` shifted by `week_offset` whole weeks.
pub fn week_context(today: NaiveDate, week_offset: i64, first_day_of_week: u8) -> WeekContext {
    let target = today + Duration::weeks(week_offset);
    let start = week_start(target, first_day_of_week);
    let mut dates = [start; 7];
    for (i, slot) in dates.iter_mut().enumerate() {
        *slot = start + Duration::days(i as i64);
    }
    WeekContext {
        week_number: target.iso_week().week(),
        year: target.year(),
        start,
        end: dates[6],
        dates,
    }
}

/// Short day name (Sun..Sat) for a date.
pub fn short_day_name(date: NaiveDate) -> &'static str {
    const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    NAMES[date.weekday().num_days_from_sunday() as usize]
}

pub fn is_weekend(date: NaiveDate) -> bool {
    let dow = date.weekday().num_days_from_sunday();
    dow == 0 || dow == 6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = week_start(date, 0);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
    }

    #[test]
    fn test_week_start_monday() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 4).unwrap();
        let start = week_start(date, 1);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 12, 2).unwrap());
    }

    #[test]
    fn test_week_start_is_idempotent() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let start = week_start(date, 1);
        assert_eq!(week_start(start, 1), start);
    }

    #[test]
    fn test_week_context_offset_shifts_by_whole_weeks() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();
        let this_week = week_context(today, 0, 0);
        let next_week = week_context(today, 1, 0);
        assert_eq!(next_week.start, this_week.start + Duration::days(7));
        assert_eq!(next_week.dates[0], next_week.start);
        assert_eq!(next_week.end, next_week.start + Duration::days(6));
    }

    #[test]
    fn test_week_context_iso_week_number() {
        // Jan 1, 2025 falls in ISO week 1
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let ctx = week_context(date, 0, 1);
        assert_eq!(ctx.week_number, 1);
        assert_eq!(ctx.year, 2025);
    }

    #[test]
    fn test_weekend_detection() {
        assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap())); // Sunday
        assert!(is_weekend(NaiveDate::from_ymd_opt(2024, 12, 7).unwrap())); // Saturday
        assert!(!is_weekend(NaiveDate::from_ymd_opt(2024, 12, 4).unwrap())); // Wednesday
    }
}
