//! The netcensus discovery pipeline.
//!
//! [`DiscoveryService`] drives the stages; each stage is implemented against
//! the host's network stack in its own module.

pub mod discovery;
pub mod liveness;
pub mod network;
pub mod resolver;
pub mod scanner;
pub mod system;
pub mod vendors;

pub use discovery::DiscoveryService;
pub use vendors::VendorDirectory;
