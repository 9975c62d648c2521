// # Interface Resolver
//
// Selects the IPv4 address the middleware binds its listening socket to.
//
// ## Selection rules
//
// - Interfaces are scanned in host order; within an interface, addresses are
//   scanned in host order.
// - Records exposing a peer address (loopback, point-to-point) are skipped.
// - The first acceptable record ends the scan. First match wins, not best.
// - An interface that disappears between listing and lookup counts as having
//   no usable address.
//
// ## Modes
//
// - `InterfaceSelection::Named`: the interface must exist (`UnknownInterface`)
//   and must carry a usable address (`NoAddressForInterface`).
// - `InterfaceSelection::Auto`: never fails for lack of an address; falls back
//   to the default binding instead.

use tracing::{debug, info, warn};

use crate::config::Defaults;
use crate::net::{HostInterfaces, InterfaceSelection, ResolvedBinding};
use crate::traits::InterfaceSource;
use crate::{Error, Result};

/// Resolves an [`InterfaceSelection`] against an [`InterfaceSource`]
///
/// # Example
///
/// ```rust
/// use c24_common::net::{InterfaceResolver, InterfaceSelection, StaticInterfaces};
/// use c24_common::traits::{AddressRecord, InterfaceDescriptor};
/// use std::net::Ipv4Addr;
///
/// let table = StaticInterfaces::default()
///     .with(InterfaceDescriptor::new("lo0").with_ipv4(AddressRecord::peer(Ipv4Addr::LOCALHOST, None)))
///     .with(InterfaceDescriptor::new("en0").with_ipv4(AddressRecord::broadcast(Ipv4Addr::new(10, 0, 0, 5), None)));
///
/// let resolver = InterfaceResolver::new(Box::new(table));
/// let binding = resolver.resolve(&InterfaceSelection::Auto).unwrap();
/// assert_eq!(binding.endpoint(9123), "10.0.0.5:9123");
/// ```
pub struct InterfaceResolver {
    source: Box<dyn InterfaceSource>,
    fallback: ResolvedBinding,
}

impl InterfaceResolver {
    /// Create a resolver over `source` with the built-in fallback binding
    pub fn new(source: Box<dyn InterfaceSource>) -> Self {
        Self {
            source,
            fallback: Defaults::default().binding(),
        }
    }

    /// Resolver over the running host
    pub fn host() -> Self {
        Self::new(Box::new(HostInterfaces::new()))
    }

    /// Replace the binding returned when discovery finds nothing
    pub fn with_default(mut self, fallback: ResolvedBinding) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn fallback(&self) -> &ResolvedBinding {
        &self.fallback
    }

    /// Resolve `selection` to a binding
    ///
    /// # Errors
    ///
    /// - `UnknownInterface`: a named interface is not on the host. Raised
    ///   before any address is looked at.
    /// - `NoAddressForInterface`: a named interface has no usable IPv4 address.
    /// - `InterfaceEnumeration`: the host could not be queried.
    pub fn resolve(&self, selection: &InterfaceSelection) -> Result<ResolvedBinding> {
        let names = self.source.interfaces()?;

        if let InterfaceSelection::Named(wanted) = selection
            && !names.iter().any(|name| name == wanted)
        {
            return Err(Error::unknown_interface(wanted));
        }

        for name in names.iter().filter(|name| selection.matches(name)) {
            if let Some(binding) = self.first_usable(name)? {
                info!("Resolved bind address {}", binding);
                return Ok(binding);
            }
        }

        match selection {
            InterfaceSelection::Named(wanted) => Err(Error::no_address(wanted)),
            InterfaceSelection::Auto => {
                warn!(
                    "No interface carries a usable IPv4 address, falling back to {}",
                    self.fallback
                );
                Ok(self.fallback.clone())
            }
        }
    }

    fn first_usable(&self, name: &str) -> Result<Option<ResolvedBinding>> {
        let descriptor = match self.source.describe(name) {
            Ok(descriptor) => descriptor,
            Err(Error::UnknownInterface(_)) => {
                debug!("{} disappeared while scanning", name);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(records) = descriptor.ipv4() else {
            debug!("{} has no IPv4 family", name);
            return Ok(None);
        };

        for record in records {
            if record.is_peer() {
                debug!("Skipping {} on {}: peer link", record.address(), name);
                continue;
            }
            return Ok(Some(ResolvedBinding::new(name, record.address())));
        }

        Ok(None)
    }
}

impl Default for InterfaceResolver {
    fn default() -> Self {
        Self::host()
    }
}

/// Resolve `selection` against the running host with the built-in fallback
pub fn resolve(selection: &InterfaceSelection) -> Result<ResolvedBinding> {
    InterfaceResolver::host().resolve(selection)
}
