//! Output surfaces and the periodic clock that drives them.

pub mod clock;
pub mod surface;

pub use clock::{ClockHandle, PeriodicClock, DEFAULT_PERIOD};
pub use surface::{Document, MemorySurface, OutputSurface, TerminalSurface};
