//! # binix-perf - Startup and page-load timing for Binix
//!
//! Measures how long the browser shell takes to come up and to load pages,
//! and snapshots memory along the way.
//!
//! ## Architecture
//!
//! - **perf**: the timing registry plus its clock, memory and log-sink seams
//! - **app**: the composition root and lifecycle hooks feeding the registry
//! - **config**: file and environment configuration
//! - **utils**: Shared utilities and error types

pub mod app;
pub mod config;
pub mod perf;
pub mod utils;

// Re-export main types for convenience
pub use app::{BrowserApplication, StartupTracker};
pub use config::PerfConfig;
pub use perf::{PerformanceLogger, Tag};
pub use utils::error::{PerfError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "binix-perf";

/// Performance target constants
pub mod performance_targets {
    /// Target page load time in milliseconds
    pub const PAGE_LOAD_MS: u64 = 1500;
    /// Maximum memory per tab in MB
    pub const MAX_TAB_MEMORY_MB: u64 = 150;
}
