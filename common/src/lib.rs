//! Shared building blocks for the netcensus workspace.
//!
//! Holds the scan data model, the run configuration, the fatal error taxonomy
//! and the outbound traits the discovery pipeline is assembled from. Nothing
//! in here touches the network.

pub mod config;
pub mod error;
pub mod model;
pub mod network;
pub mod scanning;
pub mod vendors;

pub use config::{ProbeTimings, ScanConfig};
pub use error::ScanError;
pub use model::{AddressSpace, Device, ScanResult};
