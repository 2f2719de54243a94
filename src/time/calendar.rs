//! Calendar field types and the field-to-wall-clock conversion.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike,
};
use serde::{Deserialize, Serialize};
use tickline_core::CalendarPolicy;

use crate::error::InstantError;
use crate::time::weekday::WeekdayIndex;

/// Unvalidated calendar input. Month is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInput {
    pub year: i64,
    pub month_index: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub millisecond: i64,
}

impl CalendarInput {
    /// Midnight of the given day.
    pub fn date(year: i64, month_index: i64, day: i64) -> Self {
        Self {
            year,
            month_index,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            millisecond: 0,
        }
    }

    pub fn with_time(mut self, hour: i64, minute: i64, second: i64) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    pub fn with_millisecond(mut self, millisecond: i64) -> Self {
        self.millisecond = millisecond;
        self
    }

    /// Converts the fields to a wall-clock reading under `policy`.
    pub fn to_naive(&self, policy: CalendarPolicy) -> Result<NaiveDateTime, InstantError> {
        match policy {
            CalendarPolicy::Rollover => self.rollover().ok_or(InstantError::OutOfRange),
            CalendarPolicy::Strict => self.strict(),
        }
    }

    /// Month carries into the year; the remaining fields are offsets
    /// from midnight on the first of the resulting month.
    fn rollover(&self) -> Option<NaiveDateTime> {
        let year = self.year.checked_add(self.month_index.div_euclid(12))?;
        let month = self.month_index.rem_euclid(12) as u32 + 1;
        let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;
        let date = first.checked_add_signed(Duration::try_days(self.day.checked_sub(1)?)?)?;

        let millis = self
            .hour
            .checked_mul(3_600_000)?
            .checked_add(self.minute.checked_mul(60_000)?)?
            .checked_add(self.second.checked_mul(1_000)?)?
            .checked_add(self.millisecond)?;

        date.and_time(NaiveTime::MIN)
            .checked_add_signed(Duration::try_milliseconds(millis)?)
    }

    fn strict(&self) -> Result<NaiveDateTime, InstantError> {
        let year = i32::try_from(self.year).map_err(|_| InstantError::OutOfRange)?;
        let month = in_range("month_index", self.month_index, 0, 11)? as u32 + 1;
        let day = u32::try_from(self.day).map_err(|_| invalid("day", self.day))?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            if NaiveDate::from_ymd_opt(year, month, 1).is_some() {
                invalid("day", self.day)
            } else {
                InstantError::OutOfRange
            }
        })?;

        let hour = in_range("hour", self.hour, 0, 23)? as u32;
        let minute = in_range("minute", self.minute, 0, 59)? as u32;
        let second = in_range("second", self.second, 0, 59)? as u32;
        let milli = in_range("millisecond", self.millisecond, 0, 999)? as u32;

        date.and_hms_milli_opt(hour, minute, second, milli)
            .ok_or(InstantError::OutOfRange)
    }
}

fn invalid(field: &'static str, value: i64) -> InstantError {
    InstantError::InvalidField { field, value }
}

fn in_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, InstantError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(invalid(field, value))
    }
}

/// Calendar fields of an instant as seen from one zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFields {
    pub year: i32,
    /// Zero-based month.
    pub month_index: u32,
    pub day: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
    pub weekday: WeekdayIndex,
    pub offset_minutes: i32,
}

impl From<&DateTime<FixedOffset>> for CalendarFields {
    fn from(dt: &DateTime<FixedOffset>) -> Self {
        Self {
            year: dt.year(),
            month_index: dt.month0(),
            day: dt.day(),
            hours: dt.hour(),
            minutes: dt.minute(),
            seconds: dt.second(),
            milliseconds: dt.timestamp_subsec_millis(),
            weekday: dt.weekday().into(),
            offset_minutes: dt.offset().local_minus_utc() / 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn in_range_fields_agree_under_both_policies() {
        let input = CalendarInput::date(2024, 1, 21).with_time(12, 30, 6);
        let expected = naive(2024, 2, 21, 12, 30, 6);
        assert_eq!(input.to_naive(CalendarPolicy::Rollover).unwrap(), expected);
        assert_eq!(input.to_naive(CalendarPolicy::Strict).unwrap(), expected);
    }

    #[test]
    fn month_twelve_rolls_into_next_year() {
        let input = CalendarInput::date(2024, 12, 1);
        assert_eq!(
            input.to_naive(CalendarPolicy::Rollover).unwrap(),
            naive(2025, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn negative_month_borrows_from_previous_year() {
        let input = CalendarInput::date(2024, -1, 15);
        assert_eq!(
            input.to_naive(CalendarPolicy::Rollover).unwrap(),
            naive(2023, 12, 15, 0, 0, 0)
        );
    }

    #[test]
    fn day_zero_is_last_day_of_previous_month() {
        let input = CalendarInput::date(2024, 2, 0);
        assert_eq!(
            input.to_naive(CalendarPolicy::Rollover).unwrap(),
            naive(2024, 2, 29, 0, 0, 0)
        );
    }

    #[test]
    fn time_overflow_carries_into_date() {
        let input = CalendarInput::date(2024, 11, 31).with_time(23, 59, 60);
        assert_eq!(
            input.to_naive(CalendarPolicy::Rollover).unwrap(),
            naive(2025, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn strict_policy_rejects_overflow() {
        let err = CalendarInput::date(2024, 12, 1)
            .to_naive(CalendarPolicy::Strict)
            .unwrap_err();
        assert_eq!(err, InstantError::InvalidField { field: "month_index", value: 12 });

        let err = CalendarInput::date(2023, 1, 29)
            .to_naive(CalendarPolicy::Strict)
            .unwrap_err();
        assert_eq!(err, InstantError::InvalidField { field: "day", value: 29 });

        let err = CalendarInput::date(2024, 0, 1)
            .with_time(0, 0, 60)
            .to_naive(CalendarPolicy::Strict)
            .unwrap_err();
        assert_eq!(err, InstantError::InvalidField { field: "second", value: 60 });
    }

    #[test]
    fn strict_policy_rejects_day_zero_and_negative_days() {
        let err = CalendarInput::date(2024, 2, 0)
            .to_naive(CalendarPolicy::Strict)
            .unwrap_err();
        assert_eq!(err, InstantError::InvalidField { field: "day", value: 0 });

        let err = CalendarInput::date(2024, 2, -3)
            .to_naive(CalendarPolicy::Strict)
            .unwrap_err();
        assert_eq!(err, InstantError::InvalidField { field: "day", value: -3 });
    }

    #[test]
    fn absurd_years_are_out_of_range() {
        let input = CalendarInput::date(i64::MAX, 0, 1);
        assert_eq!(
            input.to_naive(CalendarPolicy::Rollover).unwrap_err(),
            InstantError::OutOfRange
        );
        assert_eq!(
            input.to_naive(CalendarPolicy::Strict).unwrap_err(),
            InstantError::OutOfRange
        );
    }
}
