//! Browser shell composition root
//!
//! `BrowserApplication` owns the performance logger and hands out
//! `StartupTracker` handles to the parts of the shell that report timings.

mod tracker;

pub use tracker::StartupTracker;

use std::sync::{Arc, Mutex};

use crate::config::PerfConfig;
use crate::perf::{
    BufferedSink, LogCrateSink, MonotonicClock, PerformanceLogger, ProcessMemory, TeeSink,
};

/// Top-level application state
pub struct BrowserApplication {
    perf: Arc<Mutex<PerformanceLogger>>,
    buffer: BufferedSink,
    config: PerfConfig,
}

impl BrowserApplication {
    /// Build the application with timings going to both `log` and an
    /// in-memory buffer
    pub fn new(config: PerfConfig) -> Self {
        let buffer = BufferedSink::with_capacity(config.max_buffered_lines);
        let logger = PerformanceLogger::with_parts(
            Box::new(MonotonicClock::new()),
            Box::new(TeeSink::new(LogCrateSink, buffer.clone())),
            Box::new(ProcessMemory::new()),
        )
        .with_config(config.clone());

        log::debug!(
            "Performance logging {} (tag {:?})",
            if config.enabled { "enabled" } else { "disabled" },
            config.log_tag
        );

        Self::with_logger(logger, buffer)
    }

    /// Build around an existing logger; `buffer` is what `report` reads
    pub fn with_logger(logger: PerformanceLogger, buffer: BufferedSink) -> Self {
        let config = logger.config().clone();
        Self {
            perf: Arc::new(Mutex::new(logger)),
            buffer,
            config,
        }
    }

    /// Get a tracker handle for lifecycle callbacks
    pub fn tracker(&self) -> StartupTracker {
        StartupTracker::new(Arc::clone(&self.perf))
    }

    /// Shared handle to the logger for ad-hoc measurements
    pub fn perf(&self) -> Arc<Mutex<PerformanceLogger>> {
        Arc::clone(&self.perf)
    }

    /// Get the configuration the logger was built with
    pub fn config(&self) -> &PerfConfig {
        &self.config
    }

    /// Timing lines captured so far, oldest first
    pub fn report(&self) -> Vec<String> {
        self.buffer.messages()
    }

    /// Drop abandoned measurements and buffered lines
    pub fn reset(&self) {
        if let Ok(mut perf) = self.perf.lock() {
            perf.clear();
        }
        self.buffer.clear();
    }
}

impl Default for BrowserApplication {
    fn default() -> Self {
        Self::new(PerfConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf::Tag;

    #[test]
    fn test_application_creation() {
        let app = BrowserApplication::default();
        assert!(app.config().enabled);
        assert!(app.report().is_empty());
    }

    #[test]
    fn test_application_report_collects_lines() {
        let app = BrowserApplication::default();
        let tracker = app.tracker();
        tracker.on_activity_create(|| ());
        let report = app.report();
        assert_eq!(report.len(), 1);
        assert!(report[0].starts_with("ACTIVITY_ON_CREATE took "));
    }

    #[test]
    fn test_disabled_application_reports_nothing() {
        let app = BrowserApplication::new(PerfConfig {
            enabled: false,
            ..PerfConfig::default()
        });
        app.tracker().on_application_create(|| ());
        assert!(app.report().is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let app = BrowserApplication::default();
        let tracker = app.tracker();
        tracker.on_activity_create(|| ());
        tracker.on_page_load_started();
        app.reset();
        assert!(app.report().is_empty());
        assert!(!tracker.is_measuring(Tag::PageLoad));
    }
}
