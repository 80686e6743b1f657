// Date utility functions
// Month arithmetic shared by navigation, queries and seeding

use chrono::{Datelike, NaiveDate, NaiveDateTime};

pub fn is_same_day(a: NaiveDateTime, b: NaiveDate) -> bool {
    a.date() == b
}

/// Shift `(year, month)` by a signed number of months.
pub fn shift_month(year: i32, month: u32, delta_months: i32) -> (i32, u32) {
    let total_months = year * 12 + (month as i32 - 1) + delta_months;
    (total_months.div_euclid(12), total_months.rem_euclid(12) as u32 + 1)
}

pub fn first_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = shift_month(year, month, 1);
    first_day_of_month(next_year, next_month)?.pred_opt()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    last_day_of_month(year, month).map_or(0, |day| day.day())
}

/// `year-month-day`, with the day clamped to the month's length.
pub fn clamp_day(year: i32, month: u32, desired_day: u32) -> Option<NaiveDate> {
    let day = desired_day.clamp(1, days_in_month(year, month).max(1));
    NaiveDate::from_ymd_opt(year, month, day)
}
