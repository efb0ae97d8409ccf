//! Link-layer host discovery.
//!
//! The orchestrator only sees the [`HostDiscovery`] trait; this module
//! provides the raw-socket implementation used against real networks.
//!
//! [`HostDiscovery`]: netcensus_common::scanning::HostDiscovery

mod local;

pub use local::ArpScanner;
