//! Performance logging for the browser shell
//!
//! - Clock: monotonic time sources
//! - Memory: heap usage sources
//! - Sink: where timing lines end up
//! - Logger: the tag -> start-time registry

mod clock;
mod logger;
mod memory;
mod sink;
mod tag;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use logger::PerformanceLogger;
pub use memory::{HeapUsage, MemorySource, ProcessMemory, parse_proc_status};
pub use sink::{BufferedSink, LogCrateSink, LogSink, SinkLine, TeeSink};
pub use tag::Tag;
