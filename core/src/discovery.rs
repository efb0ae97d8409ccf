//! # Network Discovery Service
//!
//! Implements the "scan the LAN" use case: resolve the address space, sweep it
//! at the link layer, then enrich every responding host with liveness, a
//! hostname and a vendor.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use pnet::util::MacAddr;
use tracing::{debug, info};

use netcensus_common::config::ScanConfig;
use netcensus_common::error::ScanError;
use netcensus_common::model::{AddressSpace, Device, ScanResult};
use netcensus_common::scanning::{AddressSpaceProvider, HostDiscovery, HostnameLookup, LivenessProbe};
use netcensus_common::vendors::VendorRepository;

use crate::liveness::IcmpProbe;
use crate::resolver::HostnameResolver;
use crate::scanner::ArpScanner;
use crate::system::SystemRepo;
use crate::vendors::VendorDirectory;

/// Application service for network discovery.
///
/// Orchestrates the scan by:
/// 1. asking the [`AddressSpaceProvider`] which range to cover.
/// 2. delegating the link-layer sweep to [`HostDiscovery`].
/// 3. enriching the hosts found with [`LivenessProbe`], [`HostnameLookup`]
///    and [`VendorRepository`] data.
pub struct DiscoveryService {
    address_space: Box<dyn AddressSpaceProvider>,
    scanner: Box<dyn HostDiscovery>,
    liveness: Box<dyn LivenessProbe>,
    names: Box<dyn HostnameLookup>,
    vendor_repo: Box<dyn VendorRepository>,
    config: ScanConfig,
}

impl DiscoveryService {
    pub fn new(
        address_space: Box<dyn AddressSpaceProvider>,
        scanner: Box<dyn HostDiscovery>,
        liveness: Box<dyn LivenessProbe>,
        names: Box<dyn HostnameLookup>,
        vendor_repo: Box<dyn VendorRepository>,
        config: ScanConfig,
    ) -> Self {
        Self {
            address_space,
            scanner,
            liveness,
            names,
            vendor_repo,
            config,
        }
    }

    /// Wires the raw-socket probes and the vendor directory named in `config`.
    pub fn from_config(config: ScanConfig) -> Self {
        let vendors: VendorDirectory = VendorDirectory::load(&config.vendor_db);

        Self::new(
            Box::new(SystemRepo),
            Box::new(ArpScanner::new(config.timings)),
            Box::new(IcmpProbe::new(config.timings)),
            Box::new(HostnameResolver::new(config.mdns, config.legacy_dns, config.timings)),
            Box::new(vendors),
            config,
        )
    }

    /// Runs one complete scan.
    ///
    /// Failures to resolve the range or to open the link-layer channel abort
    /// the scan; everything after the sweep only ever leaves fields empty.
    pub async fn perform_scan(&self) -> Result<ScanResult, ScanError> {
        let started_at: DateTime<Utc> = Utc::now();

        let space: AddressSpace = self.address_space.resolve(self.config.subnet.as_deref())?;
        info!("Scanning {}", space.network);

        let interface: Option<&str> = self
            .config
            .interface
            .as_deref()
            .or(space.interface.as_deref());
        let replies: HashMap<Ipv4Addr, MacAddr> = self.scanner.discover(space.network, interface).await?;
        debug!("{} hosts answered the ARP sweep", replies.len());

        let mut hosts: Vec<(Ipv4Addr, MacAddr)> = replies.into_iter().collect();
        hosts.sort_by_key(|(addr, _)| u32::from(*addr));
        let addresses: Vec<Ipv4Addr> = hosts.iter().map(|(addr, _)| *addr).collect();

        let rtts: Option<HashMap<Ipv4Addr, f64>> = if self.config.ping && !addresses.is_empty() {
            info!("Probing liveness of {} hosts", addresses.len());
            Some(self.liveness.probe(&addresses).await)
        } else {
            None
        };

        if !hosts.is_empty() {
            info!("Resolving hostnames and vendors");
        }
        let mut devices: Vec<Device> = Vec::with_capacity(hosts.len());
        for (address, mac_addr) in hosts {
            let mut device: Device = Device::new(address, started_at).with_mac(mac_addr);
            device.vendor = self.vendor_repo.get_vendor(mac_addr);
            device.hostname = self.names.lookup(address).await;
            device.is_gateway = space.gateway == Some(address);
            if let Some(rtts) = &rtts {
                device.set_liveness(rtts.get(&address).copied());
            }
            devices.push(device);
        }

        Ok(ScanResult {
            subnet: space.network,
            gateway_address: space.gateway,
            devices,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
