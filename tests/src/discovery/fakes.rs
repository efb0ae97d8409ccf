//! In-memory stand-ins for the raw-socket stages.

use std::collections::HashMap;
use std::io;
use std::net::Ipv4Addr;

use async_trait::async_trait;
use netcensus_common::error::ScanError;
use netcensus_common::model::AddressSpace;
use netcensus_common::scanning::{AddressSpaceProvider, HostDiscovery, HostnameLookup, LivenessProbe};
use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;

pub struct FixedAddressSpace(pub AddressSpace);

impl AddressSpaceProvider for FixedAddressSpace {
    fn resolve(&self, _subnet: Option<&str>) -> Result<AddressSpace, ScanError> {
        Ok(self.0.clone())
    }
}

/// Answers with a fixed reply table, restricted to the requested network.
pub struct ScriptedArp(pub Vec<(Ipv4Addr, MacAddr)>);

#[async_trait]
impl HostDiscovery for ScriptedArp {
    async fn discover(
        &self,
        network: Ipv4Network,
        _interface: Option<&str>,
    ) -> Result<HashMap<Ipv4Addr, MacAddr>, ScanError> {
        Ok(self
            .0
            .iter()
            .filter(|(addr, _)| network.contains(*addr))
            .copied()
            .collect())
    }
}

pub struct DeniedArp;

#[async_trait]
impl HostDiscovery for DeniedArp {
    async fn discover(
        &self,
        _network: Ipv4Network,
        interface: Option<&str>,
    ) -> Result<HashMap<Ipv4Addr, MacAddr>, ScanError> {
        Err(ScanError::Permission {
            interface: interface.unwrap_or("eth0").to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "Operation not permitted"),
        })
    }
}

/// Replies only for the listed addresses.
pub struct ScriptedEcho(pub HashMap<Ipv4Addr, f64>);

#[async_trait]
impl LivenessProbe for ScriptedEcho {
    async fn probe(&self, addresses: &[Ipv4Addr]) -> HashMap<Ipv4Addr, f64> {
        addresses
            .iter()
            .filter_map(|addr| self.0.get(addr).map(|rtt| (*addr, *rtt)))
            .collect()
    }
}

/// Panics if called; used where probing must be skipped.
pub struct UnreachableEcho;

#[async_trait]
impl LivenessProbe for UnreachableEcho {
    async fn probe(&self, _addresses: &[Ipv4Addr]) -> HashMap<Ipv4Addr, f64> {
        panic!("liveness probe must not run");
    }
}

pub struct ScriptedNames(pub HashMap<Ipv4Addr, String>);

#[async_trait]
impl HostnameLookup for ScriptedNames {
    async fn lookup(&self, address: Ipv4Addr) -> Option<String> {
        self.0.get(&address).cloned()
    }
}
