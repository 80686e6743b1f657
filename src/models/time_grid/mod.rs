// Time grid model
// Linear mapping between time of day and vertical pixel offset

use chrono::{NaiveTime, Timelike};

use crate::error::{CalendarError, Result};

const MINUTES_PER_HOUR: u32 = 60;

/// Visible hour range and vertical scale of the timeline.
///
/// Hours are inclusive on both ends, so a `0..=23` grid covers the whole day
/// and its bottom edge sits at 24:00.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    start_hour: u32,
    end_hour: u32,
    pixels_per_hour: f32,
    snap_minutes: u32,
}

impl TimeGrid {
    pub fn new(start_hour: u32, end_hour: u32, pixels_per_hour: f32, snap_minutes: u32) -> Result<Self> {
        if start_hour > end_hour || end_hour > 23 {
            return Err(CalendarError::validation(format!(
                "Hour range {}..={} must satisfy 0 <= start <= end <= 23",
                start_hour, end_hour
            )));
        }
        if !(pixels_per_hour.is_finite() && pixels_per_hour > 0.0) {
            return Err(CalendarError::validation("Pixels per hour must be positive"));
        }
        if snap_minutes == 0 || MINUTES_PER_HOUR % snap_minutes != 0 {
            return Err(CalendarError::validation(format!(
                "Snap granularity of {} minutes must divide an hour",
                snap_minutes
            )));
        }

        Ok(Self {
            start_hour,
            end_hour,
            pixels_per_hour,
            snap_minutes,
        })
    }

    /// Full-day grid at one pixel per minute with 5-minute snapping.
    pub fn full_day() -> Self {
        Self {
            start_hour: 0,
            end_hour: 23,
            pixels_per_hour: 60.0,
            snap_minutes: 5,
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn pixels_per_hour(&self) -> f32 {
        self.pixels_per_hour
    }

    pub fn snap_minutes(&self) -> u32 {
        self.snap_minutes
    }

    pub fn pixels_per_minute(&self) -> f32 {
        self.pixels_per_hour / MINUTES_PER_HOUR as f32
    }

    /// Height of one snap unit, the smallest size an event is drawn at.
    pub fn snap_height(&self) -> f32 {
        self.snap_minutes as f32 * self.pixels_per_minute()
    }

    /// Hour labels shown in the time column.
    pub fn hours(&self) -> impl Iterator<Item = u32> {
        self.start_hour..=self.end_hour
    }

    pub fn height(&self) -> f32 {
        (self.end_hour - self.start_hour + 1) as f32 * self.pixels_per_hour
    }

    /// Offset of `hour:minute` below the top of the grid.
    ///
    /// Times before the first visible hour clamp to the top edge, times past
    /// the last visible hour clamp to the bottom edge.
    pub fn hour_to_offset(&self, hour: u32, minute: u32) -> f32 {
        let first = self.start_hour * MINUTES_PER_HOUR;
        let last = (self.end_hour + 1) * MINUTES_PER_HOUR;
        let minutes = (hour * MINUTES_PER_HOUR + minute).clamp(first, last);
        (minutes - first) as f32 * self.pixels_per_minute()
    }

    pub fn time_to_offset(&self, time: NaiveTime) -> f32 {
        self.hour_to_offset(time.hour(), time.minute())
    }

    /// Inverse of [`hour_to_offset`](Self::hour_to_offset), rounded to the
    /// snap granularity and clamped to the last snap slot of the grid.
    pub fn offset_to_hour(&self, pixels: f32) -> (u32, u32) {
        let snap = self.snap_minutes as f32;
        let raw_minutes = pixels / self.pixels_per_minute();
        let snapped = if raw_minutes.is_finite() {
            ((raw_minutes / snap).round() * snap).max(0.0) as u32
        } else {
            0
        };

        let span = (self.end_hour - self.start_hour + 1) * MINUTES_PER_HOUR - self.snap_minutes;
        let minutes = self.start_hour * MINUTES_PER_HOUR + snapped.min(span);
        (minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
    }

    pub fn offset_to_time(&self, pixels: f32) -> NaiveTime {
        let (hour, minute) = self.offset_to_hour(pixels);
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
    }

    /// Round a pixel displacement to whole snap units, in minutes.
    pub fn offset_to_minutes_delta(&self, pixels: f32) -> i64 {
        let snap = self.snap_minutes as f32;
        let minutes = pixels / self.pixels_per_minute();
        if !minutes.is_finite() {
            return 0;
        }
        ((minutes / snap).round() * snap) as i64
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::full_day()
    }
}
