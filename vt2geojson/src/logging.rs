//! Logging infrastructure for vt2geojson.
//!
//! Log output goes to stderr so that stdout only ever carries GeoJSON:
//! - Compact single-line format on stderr
//! - Optional plain-text copy in a log file
//! - Configurable via RUST_LOG environment variable

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default filter when RUST_LOG is not set.
pub const DEFAULT_LEVEL: &str = "warn";

/// Filter used for verbose runs.
pub const VERBOSE_LEVEL: &str = "debug";

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Logging options.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Log at debug level instead of warn
    pub verbose: bool,
    /// Also append logs to this file
    pub log_file: Option<String>,
}

impl LoggingConfig {
    /// Filter directive to use when RUST_LOG is not set.
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LEVEL
        } else {
            DEFAULT_LEVEL
        }
    }
}

/// Initialize logging system.
///
/// # Returns
///
/// LoggingGuard that must be kept alive for logging to work
///
/// # Errors
///
/// Returns error if the log file directory cannot be created or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, io::Error> {
    // RUST_LOG wins over the verbosity flag
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, file_guard) = match &config.log_file {
        Some(path) => {
            let (dir, name) = split_log_path(Path::new(path))?;
            std::fs::create_dir_all(dir)?;

            let file_appender = tracing_appender::rolling::never(dir, name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false); // No ANSI colors in file
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Split a log file path into its directory and file name.
fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr), io::Error> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log file path has no file name: {}", path.display()),
        )
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok((dir, name))
}
