use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{CalendarError, Result};

/// Raw values typed into the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventForm {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `H`, `HH` or `HH:MM`
    pub hour: String,
    /// Minutes; empty means the configured default.
    pub duration_minutes: String,
    /// Hex color; empty means the configured default.
    pub color: String,
}

/// Typed form values, ready for `EventStore::create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: String,
}

impl EventForm {
    /// Form prefilled for an empty grid cell.
    pub fn for_slot(day: NaiveDate, hour: u32) -> Self {
        Self {
            date: day.format("%Y-%m-%d").to_string(),
            hour: format!("{:02}:00", hour),
            ..Self::default()
        }
    }

    pub fn parse(&self, default_duration: Duration, default_color: &str) -> Result<EventDraft> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            CalendarError::validation(format!("Unrecognised date '{}'", self.date.trim()))
        })?;
        let time = parse_hour(self.hour.trim())?;

        let duration = match self.duration_minutes.trim() {
            "" => default_duration,
            raw => {
                let minutes: i64 = raw.parse().map_err(|_| {
                    CalendarError::validation(format!("Unrecognised duration '{}'", raw))
                })?;
                if minutes <= 0 {
                    return Err(CalendarError::validation("Duration must be positive"));
                }
                Duration::try_minutes(minutes)
                    .ok_or_else(|| CalendarError::validation("Duration is too long"))?
            }
        };

        let color = match self.color.trim() {
            "" => default_color.to_string(),
            color => color.to_string(),
        };

        let start = date.and_time(time);
        let end = start
            .checked_add_signed(duration)
            .ok_or_else(|| CalendarError::validation("Event would end past the supported date range"))?;
        Ok(EventDraft {
            title: self.title.trim().to_string(),
            start,
            end,
            color,
        })
    }
}

fn parse_hour(raw: &str) -> Result<NaiveTime> {
    let parsed = if raw.contains(':') {
        NaiveTime::parse_from_str(raw, "%H:%M").ok()
    } else {
        raw.parse::<u32>()
            .ok()
            .and_then(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
    };
    parsed.ok_or_else(|| CalendarError::validation(format!("Unrecognised hour '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn form(hour: &str, duration: &str) -> EventForm {
        EventForm {
            title: "  Standup ".to_string(),
            date: "2024-06-15".to_string(),
            hour: hour.to_string(),
            duration_minutes: duration.to_string(),
            color: String::new(),
        }
    }

    #[test_case("9", 9, 0 ; "bare hour")]
    #[test_case("09", 9, 0 ; "padded hour")]
    #[test_case("14:30", 14, 30 ; "hour and minute")]
    fn test_parse_hour_formats(hour: &str, h: u32, m: u32) {
        let draft = form(hour, "").parse(Duration::minutes(60), "#b9daff").unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(draft.start, day.and_hms_opt(h, m, 0).unwrap());
    }

    #[test]
    fn test_defaults_fill_empty_fields() {
        let draft = form("10", "").parse(Duration::minutes(45), "#b9daff").unwrap();
        assert_eq!(draft.title, "Standup");
        assert_eq!(draft.color, "#b9daff");
        assert_eq!(draft.end - draft.start, Duration::minutes(45));
    }

    #[test_case("24" ; "hour out of range")]
    #[test_case("noon" ; "words")]
    #[test_case("" ; "empty")]
    fn test_bad_hour_is_validation_error(hour: &str) {
        let err = form(hour, "").parse(Duration::minutes(60), "#fff").unwrap_err();
        assert!(err.is_validation());
    }

    #[test_case("0" ; "zero")]
    #[test_case("-15" ; "negative")]
    #[test_case("soon" ; "not a number")]
    #[test_case("99999999999999" ; "huge duration")]
    #[test_case("9223372036854775807" ; "past the duration range")]
    #[test_case("5000000000000" ; "past the calendar range")]
    fn test_bad_duration_is_validation_error(duration: &str) {
        let err = form("10", duration).parse(Duration::minutes(60), "#fff").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_bad_date_is_validation_error() {
        let mut bad = form("10", "");
        bad.date = "15/06/2024".to_string();
        assert!(bad.parse(Duration::minutes(60), "#fff").is_err());
    }

    #[test]
    fn test_for_slot_prefills_day_and_hour() {
        let day = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();
        let prefilled = EventForm::for_slot(day, 8);
        assert_eq!(prefilled.date, "2024-07-02");
        assert_eq!(prefilled.hour, "08:00");
        assert!(prefilled.title.is_empty());
    }
}
