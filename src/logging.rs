//! Logging setup
//!
//! Installs the process-wide `tracing` subscriber once at start-up:
//! - Console output with timestamps and levels
//! - Plain-text copy appended to a log file through a non-blocking writer
//!
//! The returned [`LogHandle`] owns the file writer's worker; dropping it
//! flushes whatever is still buffered, so keep it alive for the whole run.

use crate::ScrapeError;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging options resolved from the command line and configuration
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Extra verbosity (-v count)
    pub verbose: u8,

    /// Only errors
    pub quiet: bool,

    /// File to append log lines to; `None` logs to the console only
    pub log_file: Option<PathBuf>,
}

/// Keeps the file writer alive for the duration of the run
#[must_use = "dropping the handle stops file logging"]
pub struct LogHandle {
    _file_guard: Option<WorkerGuard>,
}

/// Builds the level filter for the given verbosity
///
/// `RUST_LOG` takes precedence when it is set and parses.
pub fn build_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if quiet {
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::new("listing_harvest=info,warn"),
        1 => EnvFilter::new("listing_harvest=debug,info"),
        2 => EnvFilter::new("listing_harvest=trace,debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs the global subscriber
///
/// # Returns
///
/// * `Ok(LogHandle)` - Subscriber installed
/// * `Err(ScrapeError)` - The log file could not be opened, or a subscriber
///   was already installed
pub fn init_logging(options: &LogOptions) -> Result<LogHandle, ScrapeError> {
    let filter = build_filter(options.verbose, options.quiet);

    let console_layer = fmt::layer().with_target(false);

    let (file_layer, file_guard) = match &options.log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ScrapeError::Logging(e.to_string()))?;

    Ok(LogHandle {
        _file_guard: file_guard,
    })
}

/// Opens the log file for appending, creating it if needed
fn open_log_file(path: &Path) -> Result<std::fs::File, ScrapeError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ScrapeError::Logging(format!("cannot open {}: {}", path.display(), e)))
}
