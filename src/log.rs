// src/log.rs
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directives used when `RUST_LOG` is not set.
/// HTTP plumbing stays at warn so a run prints one line per pipeline stage.
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("{level},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,eframe=warn,egui_glow=warn")
}

/// Install the stderr subscriber. Elapsed time since start is printed
/// instead of wall-clock time, like `[00:00:01.250]` in the old debug log.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_timer(fmt::time::uptime())
                .with_target(false),
        )
        .with(filter)
        .try_init();
}
