//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

/// Map `-v`/`-q` to a level.
///
/// Diagnostics are already part of every report, so tracing stays silent
/// unless asked for.
pub(crate) fn level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbose {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install a fmt subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the command line flags.
pub(crate) fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level(verbose, quiet).into()));

    // A subscriber may already be set when embedded; keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
