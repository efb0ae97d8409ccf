use std::path::PathBuf;
use std::time::Duration;

/// Default location of the prefix/vendor directory, relative to the working directory.
pub const DEFAULT_VENDOR_DB: &str = "data/oui_db.csv";

/// Settings for a single scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Explicit target range. `None` autodetects it from the default route.
    pub subnet: Option<String>,
    /// Interface used for the link-layer sweep.
    pub interface: Option<String>,
    /// Sends one ICMP echo per discovered host when set.
    pub ping: bool,
    /// Local-network (mDNS) reverse lookups.
    pub mdns: bool,
    /// Reverse lookups through the system resolver.
    ///
    /// Off by default: the resolver operator sees every probed address.
    pub legacy_dns: bool,
    pub vendor_db: PathBuf,
    pub timings: ProbeTimings,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            subnet: None,
            interface: None,
            ping: true,
            mdns: true,
            legacy_dns: false,
            vendor_db: PathBuf::from(DEFAULT_VENDOR_DB),
            timings: ProbeTimings::default(),
        }
    }
}

/// Timeout windows and pacing of every probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTimings {
    /// How long ARP replies are collected after the last request went out.
    pub arp_window: Duration,
    /// Spacing between two ARP requests.
    pub arp_spacing: Duration,
    pub echo_timeout: Duration,
    pub echo_spacing: Duration,
    pub mdns_timeout: Duration,
}

impl Default for ProbeTimings {
    fn default() -> Self {
        Self {
            arp_window: Duration::from_secs(2),
            arp_spacing: Duration::from_millis(20),
            echo_timeout: Duration::from_secs(1),
            echo_spacing: Duration::from_millis(30),
            mdns_timeout: Duration::from_millis(700),
        }
    }
}
