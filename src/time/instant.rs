use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Serialize, Serializer};
use tickline_core::CalendarPolicy;

use crate::error::InstantError;
use crate::time::calendar::{CalendarFields, CalendarInput};
use crate::time::parse::parse_datetime;
use crate::time::weekday::WeekdayIndex;
use crate::time::zone::Zone;

/// Largest distance from the epoch, in milliseconds, that an instant may have.
pub const MAX_EPOCH_MILLIS: i64 = 8_640_000_000_000_000;

/// A point in time with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    /// The epoch origin, 1970-01-01T00:00:00Z.
    pub fn epoch() -> Self {
        Instant(DateTime::<Utc>::default())
    }

    /// Samples the system clock.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_epoch_millis(millis: i64) -> Result<Self, InstantError> {
        if !(-MAX_EPOCH_MILLIS..=MAX_EPOCH_MILLIS).contains(&millis) {
            return Err(InstantError::OutOfRange);
        }
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(Instant)
            .ok_or(InstantError::OutOfRange)
    }

    /// Builds the instant for local calendar fields in `zone`.
    pub fn from_calendar(
        input: CalendarInput,
        zone: Zone,
        policy: CalendarPolicy,
    ) -> Result<Self, InstantError> {
        let naive = input.to_naive(policy)?;
        let utc = zone.resolve(&naive).ok_or(InstantError::OutOfRange)?;
        Self::from_epoch_millis(utc.timestamp_millis())
    }

    pub fn parse(text: &str, zone: Zone) -> Result<Self, InstantError> {
        let utc = parse_datetime(text, zone)?;
        Self::from_epoch_millis(utc.timestamp_millis())
    }

    /// Truncates to milliseconds.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Instant(dt.trunc_subsecs(3))
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Milliseconds since the epoch.
    pub fn timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn fields(&self, zone: Zone) -> CalendarFields {
        CalendarFields::from(&zone.project(&self.0))
    }

    pub fn weekday(&self, zone: Zone) -> WeekdayIndex {
        self.fields(zone).weekday
    }

    pub fn day(&self, zone: Zone) -> u32 {
        self.fields(zone).day
    }

    pub fn month_index(&self, zone: Zone) -> u32 {
        self.fields(zone).month_index
    }

    pub fn year(&self, zone: Zone) -> i32 {
        self.fields(zone).year
    }

    /// `Wed Feb 21 2024 12:30:06 GMT+0100`
    pub fn to_date_string(&self, zone: Zone) -> String {
        zone.project(&self.0)
            .format("%a %b %d %Y %H:%M:%S GMT%z")
            .to_string()
    }

    /// `12:30:06 GMT+0100`
    pub fn to_time_string(&self, zone: Zone) -> String {
        zone.project(&self.0).format("%H:%M:%S GMT%z").to_string()
    }

    pub fn checked_add_millis(&self, millis: i64) -> Result<Self, InstantError> {
        let target = self
            .timestamp_millis()
            .checked_add(millis)
            .ok_or(InstantError::OutOfRange)?;
        Self::from_epoch_millis(target)
    }
}

/// ISO 8601 in UTC with milliseconds.
impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    fn tutorial_input() -> CalendarInput {
        CalendarInput::date(2024, 1, 21).with_time(12, 30, 6)
    }

    #[test]
    fn zero_offset_is_the_epoch() {
        let epoch = Instant::from_epoch_millis(0).unwrap();
        assert_eq!(epoch, Instant::epoch());
        assert_eq!(epoch.timestamp_millis(), 0);
        assert_eq!(epoch.to_string(), "1970-01-01T00:00:00.000Z");

        let fields = epoch.fields(Zone::Utc);
        assert_eq!((fields.year, fields.month_index, fields.day), (1970, 0, 1));
        assert_eq!(fields.weekday.name(), "Thursday");
    }

    #[test]
    fn rejects_offsets_beyond_the_limit() {
        assert_eq!(
            Instant::from_epoch_millis(MAX_EPOCH_MILLIS + 1),
            Err(InstantError::OutOfRange)
        );
        assert_eq!(
            Instant::from_epoch_millis(i64::MIN),
            Err(InstantError::OutOfRange)
        );
    }

    #[test]
    fn calendar_fields_round_trip_in_fixed_zone() {
        let zone = Zone::Fixed(FixedOffset::east_opt(-3 * 3600).unwrap());
        let instant =
            Instant::from_calendar(tutorial_input(), zone, CalendarPolicy::Rollover).unwrap();
        let fields = instant.fields(zone);

        assert_eq!(fields.year, 2024);
        assert_eq!(fields.month_index, 1);
        assert_eq!(fields.day, 21);
        assert_eq!((fields.hours, fields.minutes, fields.seconds), (12, 30, 6));
        assert_eq!(fields.offset_minutes, -180);
        assert_eq!(instant.to_string(), "2024-02-21T15:30:06.000Z");
    }

    #[test]
    fn calendar_fields_round_trip_in_local_zone() {
        let instant =
            Instant::from_calendar(tutorial_input(), Zone::Local, CalendarPolicy::Rollover)
                .unwrap();
        let fields = instant.fields(Zone::Local);
        assert_eq!(
            (fields.year, fields.month_index, fields.day),
            (2024, 1, 21)
        );
        assert_eq!((fields.hours, fields.minutes, fields.seconds), (12, 30, 6));
    }

    #[test]
    fn parses_the_tutorial_string() {
        let instant = Instant::parse("2019-03-09 12:32:45", Zone::Local).unwrap();
        assert_eq!(instant.year(Zone::Local), 2019);
        assert_eq!(instant.month_index(Zone::Local), 2);
        assert_eq!(instant.day(Zone::Local), 9);
    }

    #[test]
    fn malformed_strings_surface_as_parse_errors() {
        assert!(matches!(
            Instant::parse("yesterday-ish", Zone::Utc),
            Err(InstantError::Parse(_))
        ));
    }

    #[test]
    fn renders_date_and_time_strings() {
        let zone = Zone::Fixed(FixedOffset::east_opt(3600).unwrap());
        let instant =
            Instant::from_calendar(tutorial_input(), zone, CalendarPolicy::Strict).unwrap();
        assert_eq!(instant.to_date_string(zone), "Wed Feb 21 2024 12:30:06 GMT+0100");
        assert_eq!(instant.to_time_string(zone), "12:30:06 GMT+0100");
        assert_eq!(instant.weekday(zone).name(), "Wednesday");
    }

    #[test]
    fn weekday_is_always_in_range() {
        let mut instant = Instant::from_epoch_millis(0).unwrap();
        for _ in 0..14 {
            assert!(instant.weekday(Zone::Utc).get() <= 6);
            instant = instant.checked_add_millis(86_400_000).unwrap();
        }
    }

    #[test]
    fn now_is_truncated_to_millis() {
        let now = Instant::now();
        assert_eq!(now.as_datetime().timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
