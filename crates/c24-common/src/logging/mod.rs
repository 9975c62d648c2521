// # Logging Bootstrap
//
// Wires a named logger to two sinks at process start:
//
// - a CSV file `<log_dir>/<name>.log.<DD_MM>.<HH_MM>.csv` whose first line is
//   a plain header and whose other lines are tab-delimited records
// - the console (stderr), with the stock `tracing-subscriber` layout
//
// The result is an explicit [`Logger`] handle. Nothing is global until the
// caller asks for it with [`Logger::install`].
//
// ## Usage
//
// ```rust,no_run
// let logger = c24_common::logging::initialize("c24d", "./logs", false)?;
// logger.install()?;
// tracing::info!("surface daemon starting");
// # Ok::<(), c24_common::Error>(())
// ```
//
// `initialize` is meant to run once per process. A second call with the same
// name builds a second, independent set of sinks over the same file.

pub mod dir;
pub mod format;

pub use dir::{InvokingUser, ensure_log_dir, fix_ownership};
pub use format::{TabFormat, header_line};

use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Dispatch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

use crate::config::{Defaults, LOG_FORMAT};
use crate::{Error, Result};

/// Level used when debug output is off and no table overrides it
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

/// File name of a log started at `started`: `<name>.log.DD_MM.HH_MM.csv`
pub fn log_file_name(name: &str, started: DateTime<Local>) -> String {
    format!("{}.log.{}.csv", name, started.format("%d_%m.%H_%M"))
}

/// Handle to a configured logger
///
/// Cloning is cheap; clones share the same sinks.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    level: LevelFilter,
    log_file: PathBuf,
    dispatch: Dispatch,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum level both sinks emit
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Path of the CSV file sink
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Make this logger the process-wide default
    ///
    /// # Errors
    ///
    /// `Bootstrap` when another global default was already installed.
    pub fn install(&self) -> Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| Error::bootstrap(format!("Failed to set global logger: {}", e)))
    }

    /// Run `f` with this logger as the current default
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

/// Build the logger `name` writing under `log_dir`
///
/// Same as [`initialize_with`] over the built-in [`Defaults`] table, so the
/// level is `DEBUG` with `debug` and [`DEFAULT_LEVEL`] otherwise.
pub fn initialize(name: &str, log_dir: impl AsRef<Path>, debug: bool) -> Result<Logger> {
    initialize_with(name, log_dir, debug, &Defaults::default())
}

/// Build the logger `name` writing under `log_dir`, leveled by `defaults`
///
/// Creates `log_dir` when missing (see [`ensure_log_dir`]), writes the header
/// line, then attaches the tab-delimited file sink and the console sink.
/// `debug` lowers the level from `defaults.log_level` to `DEBUG`.
///
/// # Errors
///
/// - `Config` when `defaults.log_level` is not a level
/// - `BootstrapFailure` when the directory or the log file cannot be prepared
pub fn initialize_with(
    name: &str,
    log_dir: impl AsRef<Path>,
    debug: bool,
    defaults: &Defaults,
) -> Result<Logger> {
    let level = if debug { LevelFilter::DEBUG } else { defaults.level_filter()? };

    let log_dir = log_dir.as_ref();
    let created = ensure_log_dir(log_dir)?;
    let log_file = log_dir.join(log_file_name(name, Local::now()));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| Error::bootstrap_io(&log_file, e))?;

    // Written raw, before the formatter is attached
    writeln!(file, "{}", header_line(LOG_FORMAT)).map_err(|e| Error::bootstrap_io(&log_file, e))?;

    let file_sink = fmt::layer()
        .event_format(TabFormat::new(name))
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    let console_sink = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let subscriber = tracing_subscriber::registry()
        .with(level)
        .with(file_sink)
        .with(console_sink);

    let logger = Logger {
        name: name.to_string(),
        level,
        log_file,
        dispatch: Dispatch::new(subscriber),
    };

    logger.in_scope(|| {
        if created {
            tracing::debug!("Created log directory {}", log_dir.display());
        }
        tracing::debug!("Logging {} at {} to {}", logger.name, level, logger.log_file.display());
    });

    Ok(logger)
}
