//! Seed Node Configuration
//!
//! Hardcoded bootstrap peers for initial peer discovery.
//! New nodes connect to these first to discover the rest of the network.

use serde::Serialize;
use std::net::SocketAddr;

use crate::error::ConfigurationError;

/// Fixed bootstrap peer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeedNode {
    pub addr: SocketAddr,
}

impl SeedNode {
    /// Parse an `ip:port` literal. Host names belong in [`DnsSeed`].
    pub fn parse(seed: &str) -> Result<Self, ConfigurationError> {
        seed.parse()
            .map(|addr| SeedNode { addr })
            .map_err(|_| ConfigurationError::InvalidSeedNode(seed.to_string()))
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// DNS seeder queried for peer addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsSeed {
    pub name: String,
    pub host: String,
}

/// Parse a list of seed literals, failing on the first bad one
pub fn parse_seed_nodes(seeds: &[&str]) -> Result<Vec<SeedNode>, ConfigurationError> {
    seeds.iter().map(|seed| SeedNode::parse(seed)).collect()
}
