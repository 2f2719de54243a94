use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::InvalidWeekday;

/// English weekday names, index 0 is Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Day-of-week index in `0..=6`, 0 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeekdayIndex(u8);

impl WeekdayIndex {
    pub const SUNDAY: WeekdayIndex = WeekdayIndex(0);
    pub const SATURDAY: WeekdayIndex = WeekdayIndex(6);

    pub fn get(self) -> u8 {
        self.0
    }

    /// Name from the fixed table; total over the index domain.
    pub fn name(self) -> &'static str {
        WEEKDAY_NAMES[self.0 as usize]
    }

    pub fn all() -> impl Iterator<Item = WeekdayIndex> {
        (0..7u8).map(WeekdayIndex)
    }
}

impl TryFrom<u8> for WeekdayIndex {
    type Error = InvalidWeekday;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if usize::from(value) < WEEKDAY_NAMES.len() {
            Ok(WeekdayIndex(value))
        } else {
            Err(InvalidWeekday(value))
        }
    }
}

impl From<WeekdayIndex> for u8 {
    fn from(index: WeekdayIndex) -> Self {
        index.0
    }
}

impl From<Weekday> for WeekdayIndex {
    fn from(weekday: Weekday) -> Self {
        WeekdayIndex(weekday.num_days_from_sunday() as u8)
    }
}

impl fmt::Display for WeekdayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names an index given as a plain integer.
pub fn weekday_name(index: u8) -> Result<&'static str, InvalidWeekday> {
    WeekdayIndex::try_from(index).map(WeekdayIndex::name)
}
