use thiserror::Error;
use tickline_core::TicklineError;

/// Failure to interpret a string as an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty date string")]
    Empty,
    #[error("unrecognised date string: {0:?}")]
    Malformed(String),
    #[error("local time {0:?} does not exist in the requested zone")]
    NonexistentLocalTime(String),
}

/// Errors raised while constructing an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantError {
    #[error("instant is outside the representable range")]
    OutOfRange,
    #[error("calendar field {field} out of range: {value}")]
    InvalidField { field: &'static str, value: i64 },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown zone {0:?}; expected local, utc or an offset like +05:30")]
pub struct ZoneError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("weekday index {0} is outside 0..=6")]
pub struct InvalidWeekday(pub u8);

impl From<InstantError> for TicklineError {
    fn from(err: InstantError) -> Self {
        TicklineError::TimeError(err.to_string())
    }
}

impl From<ZoneError> for TicklineError {
    fn from(err: ZoneError) -> Self {
        TicklineError::ConfigError(err.to_string())
    }
}

impl From<InvalidWeekday> for TicklineError {
    fn from(err: InvalidWeekday) -> Self {
        TicklineError::TimeError(err.to_string())
    }
}
