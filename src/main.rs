//! binix-perf - Startup and page-load timing for Binix
//!
//! Simulates the browser shell coming up and loading one page, logging the
//! timings it would report.

use std::env;
use std::time::Duration;

use binix_perf::perf::{MemorySource, ProcessMemory};
use binix_perf::{BrowserApplication, NAME, PerfConfig, VERSION, performance_targets};

const DEFAULT_PAGE_LOAD_MS: u64 = 250;

struct CliArgs {
    config: Option<String>,
    page_load_ms: u64,
    report: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("❌ {}", msg);
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        config: None,
        page_load_ms: DEFAULT_PAGE_LOAD_MS,
        report: false,
    };

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                cli.config = Some(iter.next().ok_or("--config needs a path")?.clone());
            }
            "--page-load-ms" => {
                let value = iter.next().ok_or("--page-load-ms needs a value")?;
                cli.page_load_ms = value
                    .parse()
                    .map_err(|_| format!("invalid --page-load-ms: {}", value))?;
            }
            "--report" => cli.report = true,
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(cli)
}

fn print_usage() {
    println!("{} v{}", NAME, VERSION);
    println!("usage: {} [--config <file>] [--page-load-ms <N>] [--report]", NAME);
}

fn run(cli: CliArgs) -> binix_perf::Result<()> {
    let config = match &cli.config {
        Some(path) => PerfConfig::from_file(path)?,
        None => PerfConfig::default(),
    }
    .apply_env()?;

    let app = BrowserApplication::new(config);
    let tracker = app.tracker();

    tracker.on_application_create(|| {
        tracker.on_activity_create(|| {
            tracker.on_fragment_create(|| ());
        });
    });
    // Layout listeners fire more than once
    tracker.on_first_draw();
    tracker.on_first_draw();

    let runtime = tokio::runtime::Runtime::new()?;
    let (_, elapsed) = runtime.block_on(
        tracker.track_page_load(tokio::time::sleep(Duration::from_millis(cli.page_load_ms))),
    );
    if let Some(elapsed) = elapsed {
        log::info!("Page loaded in {}ms", elapsed.as_millis());
    }

    let used_mb = ProcessMemory::new().heap_usage().used_mb();
    if used_mb > performance_targets::MAX_TAB_MEMORY_MB {
        log::warn!(
            "Using {}MB, over the {}MB per-tab budget",
            used_mb,
            performance_targets::MAX_TAB_MEMORY_MB
        );
    }

    if cli.report {
        for line in app.report() {
            println!("{}", line);
        }
    }
    Ok(())
}
