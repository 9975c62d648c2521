//! Test doubles and common utilities for contract tests

#![allow(dead_code)]

use c24_common::Result;
use c24_common::net::StaticInterfaces;
use c24_common::traits::{AddressRecord, InterfaceDescriptor, InterfaceSource};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Wraps a table and counts how often each capability is used
pub struct CountingSource {
    inner: StaticInterfaces,
    list_calls: Arc<AtomicUsize>,
    describe_calls: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(inner: StaticInterfaces) -> Self {
        Self {
            inner,
            list_calls: Arc::new(AtomicUsize::new(0)),
            describe_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Another source sharing this one's counters, for handing to a resolver
    pub fn sharing_counters_with(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            list_calls: Arc::clone(&self.list_calls),
            describe_calls: Arc::clone(&self.describe_calls),
        }
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn describe_call_count(&self) -> usize {
        self.describe_calls.load(Ordering::SeqCst)
    }
}

impl InterfaceSource for CountingSource {
    fn interfaces(&self) -> Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.interfaces()
    }

    fn describe(&self, name: &str) -> Result<InterfaceDescriptor> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.describe(name)
    }
}

/// Loopback as a typical host reports it
pub fn loopback(name: &str) -> InterfaceDescriptor {
    InterfaceDescriptor::new(name)
        .with_ipv4(AddressRecord::peer(Ipv4Addr::LOCALHOST, Some(Ipv4Addr::LOCALHOST)))
        .with_ipv6(Ipv6Addr::LOCALHOST)
}

/// Ethernet-like interface with one broadcast-capable address
pub fn ethernet(name: &str, address: [u8; 4]) -> InterfaceDescriptor {
    let [a, b, c, _] = address;
    InterfaceDescriptor::new(name).with_ipv4(AddressRecord::broadcast(
        Ipv4Addr::from(address),
        Some(Ipv4Addr::new(a, b, c, 255)),
    ))
}

/// Interface with IPv6 only
pub fn ipv6_only(name: &str) -> InterfaceDescriptor {
    InterfaceDescriptor::new(name).with_ipv6("fe80::1".parse().unwrap())
}

/// Interface with no address families at all
pub fn bare(name: &str) -> InterfaceDescriptor {
    InterfaceDescriptor::new(name)
}
