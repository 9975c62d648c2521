// # Interface Source Trait
//
// Defines the capability the resolver uses to look at host networking.
//
// ## Implementations
//
// - `HostInterfaces`: live host enumeration through `if-addrs`
// - `StaticInterfaces`: a fixed table, for tests and embedders
//
// ## Usage
//
// ```rust,ignore
// use c24_common::traits::InterfaceSource;
//
// let source = /* InterfaceSource implementation */;
// for name in source.interfaces()? {
//     let descriptor = source.describe(&name)?;
//     println!("{}: {:?}", name, descriptor.ipv4());
// }
// ```

use std::net::{Ipv4Addr, Ipv6Addr};

/// How an IPv4 address is attached to its link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Broadcast-capable link, with its broadcast address when known
    Broadcast(Option<Ipv4Addr>),
    /// Loopback or point-to-point link, with the peer address when known
    Peer(Option<Ipv4Addr>),
}

/// One IPv4 address carried by an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRecord {
    address: Ipv4Addr,
    link: LinkKind,
}

impl AddressRecord {
    /// Address on a broadcast-capable link
    pub fn broadcast(address: Ipv4Addr, broadcast: Option<Ipv4Addr>) -> Self {
        Self {
            address,
            link: LinkKind::Broadcast(broadcast),
        }
    }

    /// Address on a loopback or point-to-point link
    pub fn peer(address: Ipv4Addr, peer: Option<Ipv4Addr>) -> Self {
        Self {
            address,
            link: LinkKind::Peer(peer),
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn link(&self) -> LinkKind {
        self.link
    }

    /// Whether the record exposes a peer instead of a broadcast address
    pub fn is_peer(&self) -> bool {
        matches!(self.link, LinkKind::Peer(_))
    }
}

/// Address family entry of an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressFamily {
    /// IPv4 records in host order
    Inet(Vec<AddressRecord>),
    /// IPv6 addresses in host order
    Inet6(Vec<Ipv6Addr>),
}

/// A host interface and the address families it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    name: String,
    families: Vec<AddressFamily>,
}

impl InterfaceDescriptor {
    /// Create a descriptor with no address families
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            families: Vec::new(),
        }
    }

    /// Add an IPv4 record
    pub fn with_ipv4(mut self, record: AddressRecord) -> Self {
        self.push_ipv4(record);
        self
    }

    /// Add an IPv6 address
    pub fn with_ipv6(mut self, address: Ipv6Addr) -> Self {
        self.push_ipv6(address);
        self
    }

    /// Append an IPv4 record, opening the family on first use
    pub fn push_ipv4(&mut self, record: AddressRecord) {
        for family in &mut self.families {
            if let AddressFamily::Inet(records) = family {
                records.push(record);
                return;
            }
        }
        self.families.push(AddressFamily::Inet(vec![record]));
    }

    /// Append an IPv6 address, opening the family on first use
    pub fn push_ipv6(&mut self, address: Ipv6Addr) {
        for family in &mut self.families {
            if let AddressFamily::Inet6(addresses) = family {
                addresses.push(address);
                return;
            }
        }
        self.families.push(AddressFamily::Inet6(vec![address]));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn families(&self) -> &[AddressFamily] {
        &self.families
    }

    /// IPv4 records, or `None` when the interface has no IPv4 family
    pub fn ipv4(&self) -> Option<&[AddressRecord]> {
        self.families.iter().find_map(|family| match family {
            AddressFamily::Inet(records) => Some(records.as_slice()),
            AddressFamily::Inet6(_) => None,
        })
    }
}

/// Trait for host interface enumeration
///
/// Split in two steps the way host APIs expose it: a cheap listing of names,
/// then the address families of one interface. The resolver validates a
/// requested name against [`interfaces`](InterfaceSource::interfaces) before
/// it ever calls [`describe`](InterfaceSource::describe).
///
/// Implementations read fresh host state on every call; nothing is cached.
pub trait InterfaceSource: Send + Sync {
    /// Names of all interfaces, in host order, without duplicates
    fn interfaces(&self) -> Result<Vec<String>, crate::Error>;

    /// Address families of the named interface
    ///
    /// # Returns
    ///
    /// - `Ok(InterfaceDescriptor)`: the interface and its families in host order
    /// - `Err(Error::UnknownInterface)`: the interface disappeared or never existed
    fn describe(&self, name: &str) -> Result<InterfaceDescriptor, crate::Error>;
}
