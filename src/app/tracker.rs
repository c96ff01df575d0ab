//! Lifecycle hooks that drive the timing registry

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::perf::{PerformanceLogger, Tag};
use crate::performance_targets;

/// Handle the shell's lifecycle callbacks report into.
///
/// Clones share one logger. The lock is released while user code runs, so
/// hooks may nest (an activity created from inside application setup).
#[derive(Clone)]
pub struct StartupTracker {
    perf: Arc<Mutex<PerformanceLogger>>,
}

impl StartupTracker {
    /// Create a tracker around a shared logger
    pub fn new(perf: Arc<Mutex<PerformanceLogger>>) -> Self {
        Self { perf }
    }

    fn with_logger<R>(&self, f: impl FnOnce(&mut PerformanceLogger) -> R) -> Option<R> {
        match self.perf.lock() {
            Ok(mut logger) => Some(f(&mut logger)),
            Err(_) => {
                log::warn!("Performance logger lock poisoned; skipping measurement");
                None
            }
        }
    }

    fn timed<T>(&self, tag: Tag, f: impl FnOnce() -> T) -> T {
        self.with_logger(|perf| perf.start_measuring(tag));
        let value = f();
        self.with_logger(|perf| perf.stop_measuring(tag));
        value
    }

    /// Time application setup, then snapshot memory
    pub fn on_application_create<T>(&self, setup: impl FnOnce() -> T) -> T {
        let value = self.timed(Tag::AppOnCreate, setup);
        self.with_logger(|perf| perf.log_memory_usage(Tag::InitialMemory));
        value
    }

    /// Time activity setup
    pub fn on_activity_create<T>(&self, setup: impl FnOnce() -> T) -> T {
        self.timed(Tag::ActivityOnCreate, setup)
    }

    /// Time fragment setup; first-draw timing starts here too
    pub fn on_fragment_create<T>(&self, setup: impl FnOnce() -> T) -> T {
        self.with_logger(|perf| perf.start_measuring(Tag::FragmentFirstDraw));
        self.timed(Tag::FragmentOnCreate, setup)
    }

    /// Layout pass callback. Fires on every pass; only the first one after
    /// fragment creation is logged.
    pub fn on_first_draw(&self) {
        self.with_logger(|perf| perf.stop_measuring(Tag::FragmentFirstDraw));
    }

    /// Start timing a page load
    pub fn on_page_load_started(&self) {
        self.with_logger(|perf| perf.start_measuring(Tag::PageLoad));
    }

    /// Finish the page-load measurement, returning its duration if one was
    /// running
    pub fn on_page_load_finished(&self) -> Option<Duration> {
        let elapsed = self.with_logger(|perf| perf.finish(Tag::PageLoad)).flatten()?;
        let target = Duration::from_millis(performance_targets::PAGE_LOAD_MS);
        if elapsed > target {
            log::warn!(
                "Page load took {}ms, over the {}ms target",
                elapsed.as_millis(),
                target.as_millis()
            );
        }
        Some(elapsed)
    }

    /// Run a page load future between the start and finish hooks
    pub async fn track_page_load<F: Future>(&self, load: F) -> (F::Output, Option<Duration>) {
        self.on_page_load_started();
        let output = load.await;
        (output, self.on_page_load_finished())
    }

    /// Check if `tag` has a running measurement
    pub fn is_measuring(&self, tag: Tag) -> bool {
        self.with_logger(|perf| perf.is_measuring(tag))
            .unwrap_or(false)
    }
}
