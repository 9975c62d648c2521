// # c24-common
//
// Startup helpers shared by the ReaControl24 control-surface middleware.
//
// ## Overview
//
// Everything here runs once, single-threaded, before the middleware opens a
// socket or talks to the surface:
// - **InterfaceResolver**: Picks the IPv4 address to listen on
// - **logging::initialize**: Wires the named logger to a CSV file and the console
// - **Defaults**: The shared port/address/path table
// - **CommonOpts**: Command-line flags every program accepts
// - **util**: `ip:port` strings, hex dumps, the execution clock

pub mod config;
pub mod error;
pub mod logging;
pub mod net;
pub mod opts;
pub mod traits;
pub mod util;

// Re-export core types for convenience
pub use config::Defaults;
pub use error::{Error, Result};
pub use logging::Logger;
pub use net::{InterfaceResolver, InterfaceSelection, ResolvedBinding};
pub use opts::CommonOpts;
pub use traits::InterfaceSource;
pub use util::{format_endpoint, hex_dump, tick};
