use crate::time::instant::Instant;

/// Source of the current instant.
///
/// The periodic clock and the reporter sample time only through this
/// trait so that embedders and tests can substitute their own clock.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Instant);

impl TimeSource for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}
