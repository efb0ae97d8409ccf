//! Outbound seams of the discovery pipeline.
//!
//! The orchestrator only depends on these traits; the concrete raw-socket
//! probes live in `netcensus-core`, and tests swap in fakes.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use async_trait::async_trait;
use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;

use crate::error::ScanError;
use crate::model::AddressSpace;

/// Produces the range to scan: either the caller's explicit subnet or the
/// network of the default route.
pub trait AddressSpaceProvider: Send + Sync {
    fn resolve(&self, subnet: Option<&str>) -> Result<AddressSpace, ScanError>;
}

/// Link-layer sweep of a range.
#[async_trait]
pub trait HostDiscovery: Send + Sync {
    /// Returns the hardware address of every host that answered.
    ///
    /// Silent hosts are absent from the map; that is not an error.
    async fn discover(
        &self,
        network: Ipv4Network,
        interface: Option<&str>,
    ) -> Result<HashMap<Ipv4Addr, MacAddr>, ScanError>;
}

/// Echo probe measuring round-trip time.
#[async_trait]
pub trait LivenessProbe: Send + Sync {
    /// Round-trip times in milliseconds for the addresses that replied.
    async fn probe(&self, addresses: &[Ipv4Addr]) -> HashMap<Ipv4Addr, f64>;
}

/// Reverse name lookup of a single address.
#[async_trait]
pub trait HostnameLookup: Send + Sync {
    async fn lookup(&self, address: Ipv4Addr) -> Option<String>;
}
