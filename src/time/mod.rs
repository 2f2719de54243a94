//! Instants, zones and the weekday table.
//!
//! - `instant`: the point-in-time value and its construction paths
//! - `calendar`: calendar field input/output and overflow policy
//! - `parse`: accepted date string forms
//! - `zone`: local / UTC / fixed-offset frames
//! - `weekday`: fixed weekday name table
//! - `source`: pluggable current-time sources

pub mod calendar;
pub mod instant;
pub mod parse;
pub mod source;
pub mod weekday;
pub mod zone;

pub use calendar::{CalendarFields, CalendarInput};
pub use instant::{Instant, MAX_EPOCH_MILLIS};
pub use parse::parse_datetime;
pub use source::{FixedClock, SystemClock, TimeSource};
pub use weekday::{weekday_name, WeekdayIndex, WEEKDAY_NAMES};
pub use zone::Zone;
