//! Error types for the startup helpers
//!
//! Every variant is fatal to process initialization: callers are expected to
//! abort startup and report, never to retry.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bootstrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for interface resolution and logging bootstrap
#[derive(Error, Debug)]
pub enum Error {
    /// The requested interface is not present on the host
    #[error("{0} is not a valid interface name")]
    UnknownInterface(String),

    /// The requested interface exists but carries no usable IPv4 address
    #[error("{0} interface has no ipv4 addresses")]
    NoAddressForInterface(String),

    /// The host refused to enumerate its interfaces
    #[error("Interface enumeration failed: {0}")]
    InterfaceEnumeration(#[source] io::Error),

    /// Filesystem failure while preparing the log directory or file
    #[error("Bootstrap failure at {}: {source}", path.display())]
    BootstrapFailure {
        /// Path being prepared when the failure happened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Logging could not be wired for a reason other than I/O
    #[error("Bootstrap failure: {0}")]
    Bootstrap(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an unknown-interface error
    pub fn unknown_interface(name: impl Into<String>) -> Self {
        Self::UnknownInterface(name.into())
    }

    /// Create a no-address error
    pub fn no_address(name: impl Into<String>) -> Self {
        Self::NoAddressForInterface(name.into())
    }

    /// Create a filesystem bootstrap error for `path`
    pub fn bootstrap_io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::BootstrapFailure {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a non-I/O bootstrap error
    pub fn bootstrap(msg: impl Into<String>) -> Self {
        Self::Bootstrap(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error came from the logging bootstrap
    pub fn is_bootstrap(&self) -> bool {
        matches!(self, Self::BootstrapFailure { .. } | Self::Bootstrap(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_messages_name_the_interface() {
        assert_eq!(
            Error::unknown_interface("eth9").to_string(),
            "eth9 is not a valid interface name"
        );
        assert_eq!(
            Error::no_address("lo").to_string(),
            "lo interface has no ipv4 addresses"
        );
    }

    #[test]
    fn test_bootstrap_classification() {
        let err = Error::bootstrap_io(
            "/root/logs",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(err.is_bootstrap());
        assert!(err.to_string().contains("/root/logs"));
        assert!(!Error::unknown_interface("x").is_bootstrap());
    }
}
