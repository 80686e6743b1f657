// View month
// The month currently shown by the timeline; changed only by navigation

use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::error::{CalendarError, Result};
use crate::utils::date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewMonth {
    year: i32,
    month: u32,
    // Cached so accessors never have to re-validate.
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl ViewMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let (first_day, last_day) = date::first_day_of_month(year, month)
            .zip(date::last_day_of_month(year, month))
            .ok_or_else(|| {
                CalendarError::validation(format!("{}-{:02} is not a valid month", year, month))
            })?;

        Ok(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    /// The month containing `day`.
    pub fn containing(day: NaiveDate) -> Self {
        let first_day = day.with_day(1).unwrap_or(day);
        let last_day = date::last_day_of_month(day.year(), day.month()).unwrap_or(day);
        Self {
            year: day.year(),
            month: day.month(),
            first_day,
            last_day,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last_day
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day.day()
    }

    /// Every day of the month in order; one timeline column each.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.first_day
            .iter_days()
            .take(self.days_in_month() as usize)
            .collect()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.first_day && day <= self.last_day
    }

    /// Day `day_of_month` clamped into this month.
    pub fn day(&self, day_of_month: u32) -> NaiveDate {
        date::clamp_day(self.year, self.month, day_of_month).unwrap_or(self.first_day)
    }

    pub fn previous(&self) -> Self {
        self.shifted(-1)
    }

    pub fn next(&self) -> Self {
        self.shifted(1)
    }

    fn shifted(&self, delta_months: i32) -> Self {
        let (year, month) = date::shift_month(self.year, self.month, delta_months);
        Self::new(year, month).unwrap_or(*self)
    }

    /// Header text, e.g. "June 2024".
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

impl fmt::Display for ViewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
