// # Static Interface Source
//
// A fixed interface table. Used by tests and by embedders that already know
// their network layout (containers, CI runners).

use crate::Error;
use crate::traits::{InterfaceDescriptor, InterfaceSource};

/// Interface source serving a fixed table in insertion order
#[derive(Debug, Clone, Default)]
pub struct StaticInterfaces {
    table: Vec<InterfaceDescriptor>,
}

impl StaticInterfaces {
    pub fn new(table: Vec<InterfaceDescriptor>) -> Self {
        Self { table }
    }

    /// Append an interface to the table
    pub fn with(mut self, descriptor: InterfaceDescriptor) -> Self {
        self.table.push(descriptor);
        self
    }
}

impl InterfaceSource for StaticInterfaces {
    fn interfaces(&self) -> Result<Vec<String>, Error> {
        Ok(self.table.iter().map(|d| d.name().to_string()).collect())
    }

    fn describe(&self, name: &str) -> Result<InterfaceDescriptor, Error> {
        self.table
            .iter()
            .find(|d| d.name() == name)
            .cloned()
            .ok_or_else(|| Error::unknown_interface(name))
    }
}
