//! Process-wide defaults for the Control24 middleware
//!
//! Every program in the suite starts from the same table. A JSON override can
//! replace any subset of it; absent keys keep their defaults.

use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use crate::net::ResolvedBinding;

/// Number of channel strips on the surface
pub const CHANNELS: usize = 24;

/// Resolution of a fader position (10 bits)
pub const FADER_RANGE: u32 = 1 << 10;

/// Size of one fader position on a 0.0..=1.0 scale
pub const FADER_STEP: f64 = 1.0 / FADER_RANGE as f64;

/// Column layout of a log line.
///
/// The file sink writes this pattern, stripped of its placeholder
/// punctuation, as the header line of every log file.
pub const LOG_FORMAT: &str = "%(asctime)s\t%(name)s\t%(levelname)s\t\
                              %(threadName)s\t%(funcName)s\t%(lineno)d\t%(message)s";

/// Default table shared by all programs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Bind address used when no interface yields one
    #[serde(default = "default_ip")]
    pub ip: Ipv4Addr,

    /// Port of the surface daemon
    #[serde(default = "default_daemon_port")]
    pub daemon_port: u16,

    /// Port the OSC client listens on
    #[serde(default = "default_control24_osc_port")]
    pub control24_osc_port: u16,

    /// Port of the DAW's OSC endpoint
    #[serde(default = "default_osc_daw_port")]
    pub osc_daw_port: u16,

    /// Shared secret between daemon and client
    #[serde(default = "default_auth")]
    pub auth: String,

    /// Level used when debug is off
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Interface name reported with the fallback binding
    #[serde(default = "default_interface")]
    pub interface: String,

    /// OSC address of the scribble strip text
    #[serde(default = "default_scribble")]
    pub scribble: String,

    /// Directory for log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Defaults {
    /// Create the built-in table
    pub fn new() -> Self {
        Self {
            ip: default_ip(),
            daemon_port: default_daemon_port(),
            control24_osc_port: default_control24_osc_port(),
            osc_daw_port: default_osc_daw_port(),
            auth: default_auth(),
            log_level: default_log_level(),
            interface: default_interface(),
            scribble: default_scribble(),
            log_dir: default_log_dir(),
        }
    }

    /// Load a table from JSON, keeping defaults for absent keys
    pub fn from_json_str(json: &str) -> Result<Self, crate::Error> {
        let defaults: Self = serde_json::from_str(json)?;
        defaults.validate()?;
        Ok(defaults)
    }

    /// Validate the table
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.interface.is_empty() {
            return Err(crate::Error::config("Default interface name cannot be empty"));
        }

        if self.log_dir.as_os_str().is_empty() {
            return Err(crate::Error::config("Log directory cannot be empty"));
        }

        self.level_filter()?;

        Ok(())
    }

    /// Level used when debug is off, parsed from `log_level`
    pub fn level_filter(&self) -> Result<LevelFilter, crate::Error> {
        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => self
                .log_level
                .parse()
                .map_err(|e| crate::Error::config(format!("Log level '{}': {}", self.log_level, e))),
            other => Err(crate::Error::config(format!(
                "Log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ))),
        }
    }

    /// The binding returned when default discovery finds nothing usable
    pub fn binding(&self) -> ResolvedBinding {
        ResolvedBinding::new(self.interface.clone(), self.ip)
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::new()
    }
}

fn default_ip() -> Ipv4Addr {
    Ipv4Addr::UNSPECIFIED
}

fn default_daemon_port() -> u16 {
    9123
}

fn default_control24_osc_port() -> u16 {
    9124
}

fn default_osc_daw_port() -> u16 {
    9125
}

fn default_auth() -> String {
    "be_in-control".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_interface() -> String {
    "en0".to_string()
}

fn default_scribble() -> String {
    "/track/c24scribstrip/name".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}
