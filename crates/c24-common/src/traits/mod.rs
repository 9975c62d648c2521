//! Core traits for the startup helpers
//!
//! - [`InterfaceSource`]: Enumerate host network interfaces and their addresses

pub mod interface_source;

pub use interface_source::{AddressFamily, AddressRecord, InterfaceDescriptor, InterfaceSource, LinkKind};
