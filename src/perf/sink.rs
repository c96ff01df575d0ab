//! Log sinks for timing output

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Destination for debug-level timing lines
#[cfg_attr(test, mockall::automock)]
pub trait LogSink: Send + Sync {
    /// Accept one line at debug severity
    fn debug(&self, tag: &str, message: &str);
}

/// Forwards every line to the `log` facade, using the tag as log target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn debug(&self, tag: &str, message: &str) {
        log::debug!(target: tag, "{}", message);
    }
}

/// A line captured by [`BufferedSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkLine {
    pub tag: String,
    pub message: String,
}

/// Bounded in-memory sink; drops the oldest line once full.
///
/// Clones share one buffer.
#[derive(Debug, Clone)]
pub struct BufferedSink {
    lines: Arc<Mutex<VecDeque<SinkLine>>>,
    max_lines: usize,
}

impl BufferedSink {
    pub const DEFAULT_MAX_LINES: usize = 1000;

    /// Create a sink holding the default number of lines
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_LINES)
    }

    /// Create a sink holding at most `max_lines` lines
    pub fn with_capacity(max_lines: usize) -> Self {
        Self {
            lines: Arc::new(Mutex::new(VecDeque::new())),
            max_lines: max_lines.max(1),
        }
    }

    /// Snapshot of the buffered lines, oldest first
    pub fn lines(&self) -> Vec<SinkLine> {
        self.lines
            .lock()
            .map(|lines| lines.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Just the messages, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|l| l.message).collect()
    }

    /// Number of buffered lines
    pub fn len(&self) -> usize {
        self.lines.lock().map(|lines| lines.len()).unwrap_or(0)
    }

    /// Check if no lines are buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all buffered lines
    pub fn clear(&self) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.clear();
        }
    }
}

impl Default for BufferedSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for BufferedSink {
    fn debug(&self, tag: &str, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() >= self.max_lines {
                lines.pop_front();
            }
            lines.push_back(SinkLine {
                tag: tag.to_string(),
                message: message.to_string(),
            });
        }
    }
}

/// Sends each line to two sinks
pub struct TeeSink<A, B> {
    first: A,
    second: B,
}

impl<A: LogSink, B: LogSink> TeeSink<A, B> {
    /// Create a sink writing to `first`, then `second`
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: LogSink, B: LogSink> LogSink for TeeSink<A, B> {
    fn debug(&self, tag: &str, message: &str) {
        self.first.debug(tag, message);
        self.second.debug(tag, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_buffered_sink_records() {
        let sink = BufferedSink::new();
        sink.debug("perf", "PAGE_LOAD took 12ms");
        assert_eq!(
            sink.lines(),
            vec![SinkLine {
                tag: "perf".to_string(),
                message: "PAGE_LOAD took 12ms".to_string(),
            }]
        );
    }

    #[test]
    fn test_buffered_sink_drops_oldest() {
        let sink = BufferedSink::with_capacity(2);
        sink.debug("perf", "a");
        sink.debug("perf", "b");
        sink.debug("perf", "c");
        assert_eq!(sink.messages(), vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_buffered_sink_clones_share_buffer() {
        let sink = BufferedSink::new();
        let handle = sink.clone();
        sink.debug("perf", "line");
        assert_eq!(handle.len(), 1);
        handle.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_tee_sink_writes_both() {
        let left = BufferedSink::new();
        let right = BufferedSink::new();
        let tee = TeeSink::new(left.clone(), right.clone());
        tee.debug("perf", "line");
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
    }

    #[test]
    fn test_log_crate_sink_does_not_panic() {
        LogCrateSink.debug("perf", "no logger installed");
    }
}
