//! Bind-address selection
//!
//! [`InterfaceResolver`] picks the IPv4 address the middleware listens on,
//! either from an operator-named interface or by best-effort discovery.

pub mod host;
pub mod resolver;
pub mod table;

pub use host::HostInterfaces;
pub use resolver::{InterfaceResolver, resolve};
pub use table::StaticInterfaces;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Which interface the resolver should look at
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InterfaceSelection {
    /// Operator-mandated interface; failure to resolve it is fatal
    Named(String),
    /// Best effort: first usable address on any interface, else the default
    #[default]
    Auto,
}

impl InterfaceSelection {
    /// Select a named interface
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Whether an interface called `name` is in scope for this selection
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Named(wanted) => wanted == name,
            Self::Auto => true,
        }
    }
}

impl From<Option<String>> for InterfaceSelection {
    fn from(name: Option<String>) -> Self {
        name.map_or(Self::Auto, Self::Named)
    }
}

/// A resolved (interface, IPv4 address) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedBinding {
    interface: String,
    address: Ipv4Addr,
}

impl ResolvedBinding {
    pub fn new(interface: impl Into<String>, address: Ipv4Addr) -> Self {
        Self {
            interface: interface.into(),
            address,
        }
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    /// `address:port` string for this binding
    pub fn endpoint(&self, port: u16) -> String {
        crate::util::format_endpoint(self.address, port)
    }
}

impl fmt::Display for ResolvedBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.interface)
    }
}
