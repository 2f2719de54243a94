//! tickline: date/time reporting and a periodic clock display.
//!
//! # Modules
//!
//! * `time`: instants, calendar fields, zones and the weekday table
//! * `display`: named output surfaces and the periodic clock
//! * `report`: the console date/time report
//! * `error`: error types for the modules above

pub mod display;
pub mod error;
pub mod report;
pub mod time;

pub use display::{
    ClockHandle, Document, MemorySurface, OutputSurface, PeriodicClock, TerminalSurface,
};
pub use error::{InstantError, InvalidWeekday, ParseError, ZoneError};
pub use report::{Report, Reporter};
pub use tickline_core::{CalendarPolicy, ClockConfig, TicklineError};
pub use time::{CalendarFields, CalendarInput, Instant, TimeSource, WeekdayIndex, Zone};
