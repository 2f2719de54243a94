use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tickline_core::ClockConfig;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::display::surface::Document;
use crate::time::{SystemClock, TimeSource, Zone};

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1000);

/// Writes the current time-of-day into a named surface on a fixed cadence.
pub struct PeriodicClock {
    document: Arc<Document>,
    element: String,
    zone: Zone,
    period: Duration,
    source: Arc<dyn TimeSource>,
    max_ticks: Option<u64>,
}

impl PeriodicClock {
    pub fn new(document: Arc<Document>, element: impl Into<String>) -> Self {
        Self {
            document,
            element: element.into(),
            zone: Zone::Local,
            period: DEFAULT_PERIOD,
            source: Arc::new(SystemClock),
            max_ticks: None,
        }
    }

    /// Element name and period come from `config`; `zone` is already parsed.
    pub fn from_config(document: Arc<Document>, config: &ClockConfig, zone: Zone) -> Self {
        Self::new(document, config.element.clone())
            .with_zone(zone)
            .with_period(config.period())
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    /// Zero periods are clamped to one millisecond.
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period.max(Duration::from_millis(1));
        self
    }

    pub fn with_source(mut self, source: Arc<dyn TimeSource>) -> Self {
        self.source = source;
        self
    }

    /// Stop by itself after `ticks` updates.
    pub fn with_max_ticks(mut self, ticks: u64) -> Self {
        self.max_ticks = Some(ticks);
        self
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs one update. Returns the text written, or `None` when the
    /// element is absent or the write failed.
    pub fn tick(&self) -> Option<String> {
        let surface = self.document.get_element(&self.element)?;
        let text = self.source.now().to_time_string(self.zone);

        if let Err(err) = surface.replace_content(&text) {
            warn!(element = %self.element, error = %err, "surface write failed");
            return None;
        }

        debug!(element = %self.element, %text, "clock updated");
        Some(text)
    }

    /// Spawns the clock on the current tokio runtime. The first update
    /// happens immediately.
    pub fn start(self) -> ClockHandle {
        let shared = Arc::new(ClockShared {
            stopping: AtomicBool::new(false),
            notify: Notify::new(),
            ticks: AtomicU64::new(0),
        });

        info!(
            element = %self.element,
            period_ms = self.period.as_millis() as u64,
            zone = %self.zone,
            "starting periodic clock"
        );

        let task = tokio::spawn(run_clock(self, shared.clone()));

        ClockHandle {
            shared,
            task: Some(task),
        }
    }
}

struct ClockShared {
    stopping: AtomicBool,
    notify: Notify,
    ticks: AtomicU64,
}

async fn run_clock(clock: PeriodicClock, shared: Arc<ClockShared>) {
    let mut interval = tokio::time::interval(clock.period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shared.notify.notified() => {}
            _ = interval.tick() => {}
        }

        if shared.stopping.load(Ordering::Acquire) {
            break;
        }
        if clock
            .max_ticks
            .is_some_and(|max| shared.ticks.load(Ordering::Acquire) >= max)
        {
            break;
        }

        clock.tick();
        let count = shared.ticks.fetch_add(1, Ordering::AcqRel) + 1;

        if clock.max_ticks.is_some_and(|max| count >= max) {
            debug!(ticks = count, "tick limit reached");
            break;
        }
    }

    info!(element = %clock.element, "periodic clock stopped");
}

/// Owns a running clock. Dropping the handle aborts the clock.
pub struct ClockHandle {
    shared: Arc<ClockShared>,
    task: Option<JoinHandle<()>>,
}

impl ClockHandle {
    /// Number of ticks run so far, including ticks on an absent element.
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, |task| task.is_finished())
    }

    /// Stops the timer and waits for the clock task to exit.
    pub async fn stop(mut self) {
        self.shared.stopping.store(true, Ordering::Release);
        self.shared.notify.notify_one();
        self.join().await;
    }

    /// Waits for the clock to finish by itself (tick limit).
    pub async fn wait(mut self) {
        self.join().await;
    }

    /// Like [`ClockHandle::wait`] but keeps the handle, so the wait can
    /// be raced against a shutdown signal and followed by `stop`.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.as_mut() {
            if let Err(err) = task.await {
                error!("clock task crashed: {:?}", err);
            }
            self.task = None;
        }
    }
}

impl Drop for ClockHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::surface::MemorySurface;
    use crate::time::{FixedClock, Instant};

    fn fixed_source() -> Arc<dyn TimeSource> {
        Arc::new(FixedClock(Instant::from_epoch_millis(45_296_000).unwrap()))
    }

    #[test]
    fn tick_writes_time_of_day_when_element_exists() {
        let surface = Arc::new(MemorySurface::new());
        let document = Arc::new(Document::new().with_element("time", surface.clone()));
        let clock = PeriodicClock::new(document, "time")
            .with_zone(Zone::Utc)
            .with_source(fixed_source());

        assert_eq!(clock.tick().as_deref(), Some("12:34:56 GMT+0000"));
        assert_eq!(surface.history(), vec!["12:34:56 GMT+0000".to_string()]);
    }

    #[test]
    fn tick_is_a_no_op_without_the_element() {
        let surface = Arc::new(MemorySurface::new());
        let document = Arc::new(Document::new().with_element("other", surface.clone()));
        let clock = PeriodicClock::new(document, "time").with_source(fixed_source());

        assert_eq!(clock.tick(), None);
        assert!(surface.history().is_empty());
    }

    #[test]
    fn zero_period_is_clamped() {
        let clock = PeriodicClock::new(Arc::new(Document::new()), "time")
            .with_period(Duration::ZERO);
        assert_eq!(clock.period(), Duration::from_millis(1));
    }

    #[test]
    fn config_supplies_element_and_period() {
        let config = ClockConfig {
            period_ms: 250,
            element: "clock".into(),
            ..ClockConfig::default()
        };
        let clock = PeriodicClock::from_config(Arc::new(Document::new()), &config, Zone::Utc);
        assert_eq!(clock.element(), "clock");
        assert_eq!(clock.period(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_ends_ticking() {
        let surface = Arc::new(MemorySurface::new());
        let document = Arc::new(Document::new().with_element("time", surface.clone()));
        let handle = PeriodicClock::new(document, "time")
            .with_source(fixed_source())
            .start();

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(handle.ticks(), 3);
        handle.stop().await;

        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert_eq!(surface.history().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_limit_stops_the_clock() {
        let surface = Arc::new(MemorySurface::new());
        let document = Arc::new(Document::new().with_element("time", surface.clone()));
        let handle = PeriodicClock::new(document, "time")
            .with_source(fixed_source())
            .with_max_ticks(2)
            .start();

        handle.wait().await;
        assert_eq!(surface.history().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_tick_limit_writes_nothing() {
        let surface = Arc::new(MemorySurface::new());
        let document = Arc::new(Document::new().with_element("time", surface.clone()));
        let handle = PeriodicClock::new(document, "time")
            .with_source(fixed_source())
            .with_max_ticks(0)
            .start();

        handle.wait().await;
        assert!(surface.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_aborts_the_clock() {
        let surface = Arc::new(MemorySurface::new());
        let document = Arc::new(Document::new().with_element("time", surface.clone()));
        let handle = PeriodicClock::new(document, "time")
            .with_source(fixed_source())
            .start();

        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert_eq!(surface.history().len(), 1);
    }
}
