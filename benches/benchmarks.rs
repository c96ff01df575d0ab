use criterion::{black_box, criterion_group, criterion_main, Criterion};

use binix_perf::perf::{BufferedSink, HeapUsage, MonotonicClock, PerformanceLogger};

fn buffered_logger() -> PerformanceLogger {
    PerformanceLogger::with_parts(
        Box::new(MonotonicClock::new()),
        Box::new(BufferedSink::with_capacity(64)),
        Box::new(|| HeapUsage::new(1 << 30, 1 << 29)),
    )
}

/// Cost of one full start/stop cycle, including formatting the line
fn benchmark_start_stop(c: &mut Criterion) {
    let mut logger = buffered_logger();
    c.bench_function("start_stop", |b| {
        b.iter(|| {
            logger.start_measuring(black_box("PAGE_LOAD"));
            logger.stop_measuring(black_box("PAGE_LOAD"));
        })
    });
}

fn benchmark_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    group.bench_function("stop_unknown_tag", |b| {
        let mut logger = buffered_logger();
        b.iter(|| logger.stop_measuring(black_box("never-started")))
    });

    group.bench_function("restart_running_tag", |b| {
        let mut logger = buffered_logger();
        b.iter(|| logger.start_measuring(black_box("FRAGMENT_FIRST_DRAW")))
    });

    group.bench_function("log_memory_usage", |b| {
        let logger = buffered_logger();
        b.iter(|| logger.log_memory_usage(black_box("INITIAL_MEMORY")))
    });

    group.finish();
}

criterion_group!(benches, benchmark_start_stop, benchmark_registry);
criterion_main!(benches);
