//! Heap usage sources

use std::fs;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// A point-in-time reading of process memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeapUsage {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl HeapUsage {
    /// Create a reading from raw byte counts
    pub fn new(total_bytes: u64, free_bytes: u64) -> Self {
        Self {
            total_bytes,
            free_bytes,
        }
    }

    /// Bytes in use (`total - free`)
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.free_bytes)
    }

    /// Megabytes in use, truncated
    pub fn used_mb(&self) -> u64 {
        self.used_bytes() / BYTES_PER_MB
    }
}

/// Something that can report current heap usage
pub trait MemorySource: Send + Sync {
    fn heap_usage(&self) -> HeapUsage;
}

impl<F> MemorySource for F
where
    F: Fn() -> HeapUsage + Send + Sync,
{
    fn heap_usage(&self) -> HeapUsage {
        self()
    }
}

/// Reads the current process's memory from `/proc/self/status`.
///
/// `VmSize` is reported as total and `VmSize - VmRSS` as free, so the used
/// figure is the resident set. Where procfs is unavailable every reading is
/// zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessMemory;

impl ProcessMemory {
    const STATUS_PATH: &'static str = "/proc/self/status";

    /// Create a procfs-backed source
    pub fn new() -> Self {
        Self
    }
}

impl MemorySource for ProcessMemory {
    fn heap_usage(&self) -> HeapUsage {
        match fs::read_to_string(Self::STATUS_PATH) {
            Ok(status) => parse_proc_status(&status).unwrap_or_else(|| {
                log::debug!("No VmSize/VmRSS in {}", Self::STATUS_PATH);
                HeapUsage::default()
            }),
            Err(e) => {
                log::debug!("Cannot read {}: {}", Self::STATUS_PATH, e);
                HeapUsage::default()
            }
        }
    }
}

/// Extract `VmSize` and `VmRSS` (reported in kB) from a procfs status file
pub fn parse_proc_status(status: &str) -> Option<HeapUsage> {
    let mut size_kb = None;
    let mut rss_kb = None;

    for line in status.lines() {
        if let Some(rest) = line.strip_prefix("VmSize:") {
            size_kb = parse_kb(rest);
        } else if let Some(rest) = line.strip_prefix("VmRSS:") {
            rss_kb = parse_kb(rest);
        }
    }

    let total = size_kb? * 1024;
    let used = rss_kb? * 1024;
    Some(HeapUsage::new(total, total.saturating_sub(used)))
}

fn parse_kb(field: &str) -> Option<u64> {
    field.split_whitespace().next()?.parse().ok()
}
