//! Log output for the Lectern binaries
//!
//! The console shows Lectern's own events at the chosen level and only
//! warnings from dependencies such as `hyper` or `tower_http`. Every run also
//! rewrites a debug log file in the configured logs directory.

use std::fs::{self, File};
use std::path::PathBuf;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::LecternError;
use crate::config::LoggingConfig;

/// File name of the debug log inside the logs directory.
pub const LAST_RUN_LOG: &str = "lectern-last-run.log";

/// Crate targets whose events follow the requested level.
const LECTERN_TARGETS: [&str; 3] = ["lectern", "lectern_core", "lectern_web"];

/// Verbosity of Lectern's own console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive spelling of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter directives giving Lectern crates `lectern` and everything else
/// `dependencies`.
///
/// ```
/// use lectern_core::tracing_setup::{LogLevel, filter_directives};
///
/// let directives = filter_directives(LogLevel::Debug, LogLevel::Warn);
/// assert!(directives.starts_with("warn,"));
/// assert!(directives.contains("lectern_web=debug"));
/// ```
pub fn filter_directives(lectern: LogLevel, dependencies: LogLevel) -> String {
    let mut directives = dependencies.as_str().to_string();
    for target in LECTERN_TARGETS {
        directives.push_str(&format!(",{target}={lectern}"));
    }
    directives
}

/// Installs the console and file subscribers for this process.
///
/// `RUST_LOG` replaces the console filter when set. The file layer records
/// Lectern at trace and dependencies at debug. Returns the path of the
/// debug log.
///
/// # Errors
/// - `LecternError::Io` - Logs directory or log file could not be created
/// - `LecternError::Configuration` - A global subscriber is already installed
pub fn init_tracing(level: LogLevel, logging: &LoggingConfig) -> Result<PathBuf, LecternError> {
    fs::create_dir_all(&logging.logs_dir)?;
    let log_path = logging.logs_dir.join(LAST_RUN_LOG);
    let log_file = File::create(&log_path)?;

    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(level, LogLevel::Warn)));
    let console = fmt::layer()
        .with_target(level >= LogLevel::Debug)
        .compact()
        .with_filter(console_filter);

    let file = fmt::layer()
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_writer(log_file)
        .with_filter(EnvFilter::new(filter_directives(
            LogLevel::Trace,
            LogLevel::Debug,
        )));

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .map_err(|e| LecternError::Configuration {
            reason: format!("tracing already initialized: {e}"),
        })?;

    tracing::debug!(%level, log = %log_path.display(), "Tracing ready");
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn test_dependencies_stay_at_their_own_level() {
        let directives = filter_directives(LogLevel::Trace, LogLevel::Warn);

        assert_eq!(
            directives,
            "warn,lectern=trace,lectern_core=trace,lectern_web=trace"
        );
        assert!(!directives.contains("tower_http"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("debug", true), Ok(LogLevel::Debug));
        assert_eq!(LogLevel::from_str("WARN", true), Ok(LogLevel::Warn));
        assert!(LogLevel::from_str("verbose", true).is_err());
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert!(LogLevel::Trace > LogLevel::Info);
    }

    #[test]
    fn test_init_tracing_writes_last_run_log() {
        let logs = tempfile::tempdir().unwrap();
        let logging = LoggingConfig {
            logs_dir: logs.path().join("nested"),
        };

        let path = init_tracing(LogLevel::Warn, &logging).unwrap();
        assert_eq!(path, logs.path().join("nested").join(LAST_RUN_LOG));
        assert!(path.exists());

        assert!(matches!(
            init_tracing(LogLevel::Warn, &logging),
            Err(LecternError::Configuration { .. })
        ));
    }
}
