//! Day-index arithmetic for the fixed Monday-first week grid

use chrono::{Datelike, Local, NaiveDate};

use crate::models::program::DAYS_PER_WEEK;

/// Map a Sunday-first weekday (Sunday = 0 .. Saturday = 6) to the
/// Monday-first grid (Monday = 0 .. Sunday = 6)
pub fn day_index_from_native(native_weekday: u32) -> usize {
    ((native_weekday as usize % DAYS_PER_WEEK) + 6) % DAYS_PER_WEEK
}

/// Grid index for a calendar date
pub fn day_index_for(date: NaiveDate) -> usize {
    day_index_from_native(date.weekday().num_days_from_sunday())
}

/// Grid index for today in local time
pub fn today_day_index() -> usize {
    day_index_for(Local::now().date_naive())
}

pub fn next_day(index: usize) -> usize {
    (index.min(DAYS_PER_WEEK - 1) + 1) % DAYS_PER_WEEK
}

pub fn prev_day(index: usize) -> usize {
    (index.min(DAYS_PER_WEEK - 1) + DAYS_PER_WEEK - 1) % DAYS_PER_WEEK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sunday_maps_to_six_and_monday_to_zero() {
        assert_eq!(day_index_from_native(0), 6);
        assert_eq!(day_index_from_native(1), 0);
        assert_eq!(day_index_from_native(6), 5);
    }

    #[test]
    fn test_day_index_for_known_dates() {
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(day_index_for(monday), 0);
        assert_eq!(day_index_for(sunday), 6);
    }

    #[test]
    fn test_today_is_in_range() {
        assert!(today_day_index() < DAYS_PER_WEEK);
    }

    #[test]
    fn test_next_and_prev_wrap() {
        assert_eq!(next_day(6), 0);
        assert_eq!(next_day(2), 3);
        assert_eq!(prev_day(0), 6);
        assert_eq!(prev_day(4), 3);
    }
}
