//! Core shared library for the tickline workspace.
//!
//! This crate exposes the pieces every other crate depends on:
//! the canonical error type, environment configuration loading and
//! the tracing subscriber setup.

pub mod config;
pub mod errors;
pub mod logging;

pub use config::{CalendarPolicy, ClockConfig};
pub use errors::{ConfigError, Result as CoreResult, TicklineError};
