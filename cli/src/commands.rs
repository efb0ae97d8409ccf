pub mod discover;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use netcensus_common::config::{DEFAULT_VENDOR_DB, ScanConfig};

#[derive(Parser, Debug)]
#[command(name = "netcensus")]
#[command(version, about = "Discovers the hosts of a local IPv4 network.")]
pub struct CommandLine {
    /// Range to scan in CIDR notation (autodetected from the default route if omitted)
    #[arg(short, long)]
    pub subnet: Option<String>,

    /// Interface used for the ARP sweep
    #[arg(short, long = "iface")]
    pub iface: Option<String>,

    /// Skip the ICMP liveness probe
    #[arg(long)]
    pub no_ping: bool,

    /// Skip mDNS reverse lookups
    #[arg(long)]
    pub no_mdns: bool,

    /// Fall back to the system resolver for hostnames
    #[arg(long)]
    pub legacy_dns: bool,

    /// Prefix/vendor directory
    #[arg(long, default_value = DEFAULT_VENDOR_DB)]
    pub vendor_db: PathBuf,

    /// JSON inventory destination
    #[arg(short, long, default_value = "devices.json")]
    pub json_output: PathBuf,

    /// Graphviz topology destination; a .png path is rendered with twopi
    #[arg(short, long, default_value = "topology.dot")]
    pub graph_output: PathBuf,

    /// Print the results without writing any file
    #[arg(long)]
    pub no_export: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            subnet: self.subnet.clone(),
            interface: self.iface.clone(),
            ping: !self.no_ping,
            mdns: !self.no_mdns,
            legacy_dns: self.legacy_dns,
            vendor_db: self.vendor_db.clone(),
            ..ScanConfig::default()
        }
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
