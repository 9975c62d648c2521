// # Host Interface Source
//
// Live enumeration of the host's interfaces.
//
// - Unix: `getifaddrs(3)` through `nix`. Link-layer entries (AF_PACKET /
//   AF_LINK) are kept as address-less records, so interfaces without any IP
//   address are still listed.
// - Elsewhere: `if-addrs`.
//
// The host reports one entry per address. Entries are regrouped per
// interface name, keeping the order in which the host reported both the
// interfaces and their addresses.
//
// IPv4 records on loopback or point-to-point links are classified as
// `LinkKind::Peer` so the resolver never binds the middleware to an address
// external hardware cannot reach.

use std::net::{IpAddr, Ipv4Addr};

use crate::Error;
use crate::traits::{AddressRecord, InterfaceDescriptor, InterfaceSource};

/// One raw entry as the host reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub name: String,
    /// `None` for link-layer entries
    pub address: Option<IpAddr>,
    pub broadcast: Option<Ipv4Addr>,
    /// Peer address of a point-to-point link
    pub destination: Option<Ipv4Addr>,
    pub loopback: bool,
    pub point_to_point: bool,
}

impl HostRecord {
    /// Entry carrying no IP address
    pub fn link(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            broadcast: None,
            destination: None,
            loopback: false,
            point_to_point: false,
        }
    }

    fn is_peer_link(&self) -> bool {
        self.loopback || self.point_to_point || self.destination.is_some()
    }
}

/// Interface source backed by the running host
#[derive(Debug, Clone, Copy, Default)]
pub struct HostInterfaces;

impl HostInterfaces {
    pub fn new() -> Self {
        Self
    }

    fn snapshot() -> Result<Vec<InterfaceDescriptor>, Error> {
        Ok(group_records(host_records()?))
    }
}

impl InterfaceSource for HostInterfaces {
    fn interfaces(&self) -> Result<Vec<String>, Error> {
        let names = Self::snapshot()?
            .into_iter()
            .map(|descriptor| descriptor.name().to_string())
            .collect::<Vec<_>>();
        tracing::debug!("Host reports {} interface(s)", names.len());
        Ok(names)
    }

    fn describe(&self, name: &str) -> Result<InterfaceDescriptor, Error> {
        Self::snapshot()?
            .into_iter()
            .find(|descriptor| descriptor.name() == name)
            .ok_or_else(|| Error::unknown_interface(name))
    }
}

/// Group raw entries into descriptors, in first-seen order
pub fn group_records(records: Vec<HostRecord>) -> Vec<InterfaceDescriptor> {
    let mut grouped: Vec<InterfaceDescriptor> = Vec::new();

    for record in records {
        let position = match grouped.iter().position(|d| d.name() == record.name) {
            Some(position) => position,
            None => {
                grouped.push(InterfaceDescriptor::new(record.name.clone()));
                grouped.len() - 1
            }
        };
        let descriptor = &mut grouped[position];

        match record.address {
            Some(IpAddr::V4(ip)) => {
                let entry = if record.is_peer_link() {
                    AddressRecord::peer(ip, record.destination.or(record.loopback.then_some(ip)))
                } else {
                    AddressRecord::broadcast(ip, record.broadcast)
                };
                descriptor.push_ipv4(entry);
            }
            Some(IpAddr::V6(ip)) => descriptor.push_ipv6(ip),
            None => {}
        }
    }

    grouped
}

#[cfg(unix)]
fn host_records() -> Result<Vec<HostRecord>, Error> {
    use nix::net::if_::InterfaceFlags;

    let entries = nix::ifaddrs::getifaddrs()
        .map_err(|errno| Error::InterfaceEnumeration(std::io::Error::from(errno)))?;

    let records = entries
        .map(|entry| {
            let v4 = |addr: &Option<nix::sys::socket::SockaddrStorage>| {
                addr.as_ref().and_then(|a| a.as_sockaddr_in()).map(|sin| sin.ip())
            };
            let address = match entry.address.as_ref() {
                Some(addr) => match (addr.as_sockaddr_in(), addr.as_sockaddr_in6()) {
                    (Some(sin), _) => Some(IpAddr::V4(sin.ip())),
                    (None, Some(sin6)) => Some(IpAddr::V6(sin6.ip())),
                    (None, None) => None,
                },
                None => None,
            };

            HostRecord {
                name: entry.interface_name.clone(),
                address,
                broadcast: v4(&entry.broadcast),
                destination: v4(&entry.destination),
                loopback: entry.flags.contains(InterfaceFlags::IFF_LOOPBACK),
                point_to_point: entry.flags.contains(InterfaceFlags::IFF_POINTOPOINT),
            }
        })
        .collect();

    Ok(records)
}

#[cfg(not(unix))]
fn host_records() -> Result<Vec<HostRecord>, Error> {
    use if_addrs::IfAddr;

    let raw = if_addrs::get_if_addrs().map_err(Error::InterfaceEnumeration)?;

    let records = raw
        .into_iter()
        .map(|iface| {
            let loopback = iface.is_loopback();
            let mut record = HostRecord::link(iface.name);
            record.loopback = loopback;
            match iface.addr {
                IfAddr::V4(v4) => {
                    // broadcast is only reported for broadcast-capable links
                    record.point_to_point = v4.broadcast.is_none();
                    record.address = Some(IpAddr::V4(v4.ip));
                    record.broadcast = v4.broadcast;
                }
                IfAddr::V6(v6) => record.address = Some(IpAddr::V6(v6.ip)),
            }
            record
        })
        .collect();

    Ok(records)
}
