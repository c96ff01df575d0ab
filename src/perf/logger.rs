//! Timing registry
//!
//! Keeps one start timestamp per tag. Stopping a tag logs
//! `"<tag> took <N>ms"` and forgets it; restarting a running tag replaces
//! its start time; stopping an idle tag does nothing.

use std::collections::HashMap;
use std::time::Duration;

use super::clock::{Clock, MonotonicClock};
use super::memory::{MemorySource, ProcessMemory};
use super::sink::{LogCrateSink, LogSink};
use crate::config::PerfConfig;

/// Records named intervals and heap snapshots.
///
/// Mutating calls take `&mut self`, so a logger shared between threads has
/// to be wrapped by its owner (see `BrowserApplication`). There is no
/// per-tag locking beyond that.
pub struct PerformanceLogger {
    clock: Box<dyn Clock>,
    sink: Box<dyn LogSink>,
    memory: Box<dyn MemorySource>,
    active: HashMap<String, Duration>,
    config: PerfConfig,
}

impl PerformanceLogger {
    /// Create a logger on the system clock, `log` facade and procfs
    pub fn new() -> Self {
        Self::with_parts(
            Box::new(MonotonicClock::new()),
            Box::new(LogCrateSink),
            Box::new(ProcessMemory::new()),
        )
    }

    /// Create a logger from explicit clock, sink and memory source
    pub fn with_parts(
        clock: Box<dyn Clock>,
        sink: Box<dyn LogSink>,
        memory: Box<dyn MemorySource>,
    ) -> Self {
        Self {
            clock,
            sink,
            memory,
            active: HashMap::new(),
            config: PerfConfig::default(),
        }
    }

    /// Replace the configuration. Disabling drops running measurements.
    pub fn with_config(mut self, config: PerfConfig) -> Self {
        if !config.enabled {
            self.active.clear();
        }
        self.config = config;
        self
    }

    /// Get the active configuration
    pub fn config(&self) -> &PerfConfig {
        &self.config
    }

    /// Start (or restart) timing `tag`
    pub fn start_measuring(&mut self, tag: impl AsRef<str>) {
        if !self.config.enabled {
            return;
        }
        let now = self.clock.now();
        self.active.insert(tag.as_ref().to_string(), now);
    }

    /// Finish timing `tag` and log the elapsed whole milliseconds
    pub fn stop_measuring(&mut self, tag: impl AsRef<str>) {
        self.finish(tag);
    }

    /// Stop `tag` and return the exact duration that was logged
    pub(crate) fn finish(&mut self, tag: impl AsRef<str>) -> Option<Duration> {
        let tag = tag.as_ref();
        let Some(started_at) = self.active.remove(tag) else {
            log::trace!("stop_measuring({}) with no active measurement", tag);
            return None;
        };
        if !self.config.enabled {
            return None;
        }

        let elapsed = self.clock.now().saturating_sub(started_at);
        self.sink.debug(
            &self.config.log_tag,
            &format!("{} took {}ms", tag, elapsed.as_millis()),
        );
        Some(elapsed)
    }

    /// Log current heap usage in whole megabytes
    pub fn log_memory_usage(&self, tag: impl AsRef<str>) {
        if !self.config.enabled {
            return;
        }
        let used_mb = self.memory.heap_usage().used_mb();
        self.sink.debug(
            &self.config.log_tag,
            &format!("{} - Used Memory: {}MB", tag.as_ref(), used_mb),
        );
    }

    /// Time `f` under `tag` and hand back its result
    pub fn measure<T>(&mut self, tag: impl AsRef<str>, f: impl FnOnce() -> T) -> T {
        let tag = tag.as_ref();
        self.start_measuring(tag);
        let value = f();
        self.stop_measuring(tag);
        value
    }

    /// Check if `tag` has a running measurement
    pub fn is_measuring(&self, tag: impl AsRef<str>) -> bool {
        self.active.contains_key(tag.as_ref())
    }

    /// Time elapsed so far on a running measurement
    pub fn elapsed(&self, tag: impl AsRef<str>) -> Option<Duration> {
        self.active
            .get(tag.as_ref())
            .map(|started_at| self.clock.now().saturating_sub(*started_at))
    }

    /// Number of running measurements
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Running tags, sorted
    pub fn active_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.active.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Drop every running measurement without logging
    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl Default for PerformanceLogger {
    fn default() -> Self {
        Self::new()
    }
}
