//! The date/time report: constructs a handful of instants and prints
//! them together with fields of the current instant.

use std::io::Write;
use std::sync::Arc;

use serde::Serialize;
use tickline_core::{CalendarPolicy, CoreResult};
use tracing::warn;

use crate::time::{CalendarFields, CalendarInput, Instant, SystemClock, TimeSource, Zone};

pub const BANNER: &str = "this is date and time tutorial";
pub const SAMPLE_DATE_STRING: &str = "2019-03-09 12:32:45";
pub const INVALID_DATE: &str = "Invalid Date";

/// 2024-02-21 12:30:06, month index 1.
pub fn sample_calendar_input() -> CalendarInput {
    CalendarInput::date(2024, 1, 21).with_time(12, 30, 6)
}

/// Everything the report prints, in a serializable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub zone: Zone,
    pub now: Instant,
    pub epoch: Instant,
    /// `None` when the calendar fields could not be represented.
    pub calendar: Option<Instant>,
    /// `None` when the sample string did not parse.
    pub parsed: Option<Instant>,
    pub current: Instant,
    pub timestamp_millis: i64,
    pub fields: CalendarFields,
    pub weekday_name: &'static str,
}

/// Builds and renders [`Report`]s.
pub struct Reporter {
    source: Arc<dyn TimeSource>,
    zone: Zone,
    policy: CalendarPolicy,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), Zone::Local, CalendarPolicy::Rollover)
    }
}

impl Reporter {
    pub fn new(source: Arc<dyn TimeSource>, zone: Zone, policy: CalendarPolicy) -> Self {
        Self {
            source,
            zone,
            policy,
        }
    }

    pub fn collect(&self) -> Report {
        let now = self.source.now();
        let epoch = Instant::epoch();

        let calendar = Instant::from_calendar(sample_calendar_input(), self.zone, self.policy)
            .map_err(|err| warn!(error = %err, "calendar sample not representable"))
            .ok();
        let parsed = Instant::parse(SAMPLE_DATE_STRING, self.zone)
            .map_err(|err| warn!(error = %err, input = SAMPLE_DATE_STRING, "sample did not parse"))
            .ok();

        let current = self.source.now();
        let fields = current.fields(self.zone);
        let weekday_name = now.weekday(self.zone).name();

        Report {
            zone: self.zone,
            now,
            epoch,
            calendar,
            parsed,
            current,
            timestamp_millis: current.timestamp_millis(),
            fields,
            weekday_name,
        }
    }

    /// Writes the report as ordered human-readable lines.
    pub fn render<W: Write>(&self, report: &Report, out: &mut W) -> CoreResult<()> {
        let show = |instant: &Option<Instant>| {
            instant
                .map(|i| i.to_string())
                .unwrap_or_else(|| INVALID_DATE.to_string())
        };

        writeln!(out, "{}", BANNER)?;
        writeln!(out, "{}", report.now)?;
        writeln!(out, "{}", report.epoch)?;
        writeln!(out, "{}", show(&report.calendar))?;
        writeln!(out, "{}", show(&report.parsed))?;
        writeln!(out, "{}", report.current)?;
        writeln!(out, "Time now is {}", report.timestamp_millis)?;
        writeln!(out, "weekday index is {}", report.fields.weekday)?;
        writeln!(out, "day of month is {}", report.fields.day)?;
        writeln!(out, "month is {}", report.fields.month_index)?;
        writeln!(out, "year is {}", report.fields.year)?;
        writeln!(out, "Today is {}", report.weekday_name)?;
        Ok(())
    }

    pub fn render_json<W: Write>(&self, report: &Report, out: &mut W) -> CoreResult<()> {
        serde_json::to_writer_pretty(&mut *out, report)?;
        writeln!(out)?;
        Ok(())
    }

    /// Collects and renders in one step.
    pub fn run<W: Write>(&self, out: &mut W) -> CoreResult<Report> {
        let report = self.collect();
        self.render(&report, out)?;
        Ok(report)
    }
}
