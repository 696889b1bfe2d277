//! `[serve]` section configuration.
//!
//! Contains preview server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 3080                 # HTTP port number (overridden by PORT)
//! workers = 4                 # Request handler threads
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the preview accessible from LAN.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Default preview port.
pub const DEFAULT_PORT: u16 = 3080;

/// Preview server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Number of request handler threads.
    pub workers: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: DEFAULT_PORT,
            workers: 4,
        }
    }
}
