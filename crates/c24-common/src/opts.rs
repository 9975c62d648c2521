//! Command-line options shared by every program of the suite
//!
//! Programs flatten [`CommonOpts`] into their own `clap` parser:
//!
//! ```rust
//! use clap::Parser;
//! use c24_common::opts::CommonOpts;
//!
//! #[derive(Parser)]
//! struct Cli {
//!     #[command(flatten)]
//!     common: CommonOpts,
//! }
//!
//! let cli = Cli::parse_from(["c24d", "-d", "-o", "/tmp/c24"]);
//! assert!(cli.common.debug);
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::Defaults;

const NOTICE: &str = "part of ReaControl24  Copyright (c)2018 Phase Walker
This program comes with ABSOLUTELY NO WARRANTY;
This is free software, and you are welcome to redistribute it
under certain conditions; see COPYING.md for details.";

/// Logging flags common to all programs
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CommonOpts {
    /// Logger should use debug level. Default is off (INFO level)
    #[arg(short, long)]
    pub debug: bool,

    /// Logger should create its directory and files here
    #[arg(short = 'o', long = "logdir", env = "C24_LOGDIR", default_value = "./logs")]
    pub log_dir: PathBuf,
}

impl CommonOpts {
    /// Full `--help` description: the program's own text plus the project notice
    pub fn about(desc: &str) -> String {
        format!("{}\n\n{}", desc.trim_end(), NOTICE)
    }

    /// Start the logger for program `name` from these options
    pub fn start_logging(&self, name: &str) -> crate::Result<crate::logging::Logger> {
        crate::logging::initialize(name, &self.log_dir, self.debug)
    }

    /// Same as [`start_logging`](Self::start_logging), leveled by `defaults.log_level`
    /// when `--debug` is off
    pub fn start_logging_with(
        &self,
        name: &str,
        defaults: &Defaults,
    ) -> crate::Result<crate::logging::Logger> {
        crate::logging::initialize_with(name, &self.log_dir, self.debug, defaults)
    }
}

impl Default for CommonOpts {
    fn default() -> Self {
        Self {
            debug: false,
            log_dir: Defaults::default().log_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        common: CommonOpts,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["test"]);
        assert!(!cli.common.debug);
        // C24_LOGDIR may be set by the environment running the tests
        if std::env::var_os("C24_LOGDIR").is_none() {
            assert_eq!(cli.common, CommonOpts::default());
        }
    }

    #[test]
    fn test_short_and_long_flags() {
        let cli = TestCli::parse_from(["test", "-d", "-o", "/var/log/c24"]);
        assert!(cli.common.debug);
        assert_eq!(cli.common.log_dir, PathBuf::from("/var/log/c24"));

        let cli = TestCli::parse_from(["test", "--debug", "--logdir", "logs2"]);
        assert!(cli.common.debug);
        assert_eq!(cli.common.log_dir, PathBuf::from("logs2"));
    }

    #[test]
    fn test_start_logging_with_table_level() {
        let temp = tempfile::TempDir::new().unwrap();
        let opts = CommonOpts {
            debug: false,
            log_dir: temp.path().to_path_buf(),
        };
        let defaults = Defaults {
            log_level: "warn".to_string(),
            ..Defaults::default()
        };

        let logger = opts.start_logging_with("c24d", &defaults).unwrap();
        assert_eq!(logger.level(), tracing::level_filters::LevelFilter::WARN);
    }

    #[test]
    fn test_about_appends_notice() {
        let about = CommonOpts::about("Control24 daemon\n");
        assert!(about.starts_with("Control24 daemon\n\n"));
        assert!(about.contains("ABSOLUTELY NO WARRANTY"));
    }
}
