//! The scan inventory handed to exporters.
//!
//! Everything here serializes to plain JSON (strings, numbers, booleans and
//! nulls) so the JSON exporter can dump it as-is.

use std::fmt::Display;
use std::net::Ipv4Addr;

use chrono::{DateTime, Utc};
use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;
use serde::{Serialize, Serializer};

use crate::network::mac;

/// The range a scan covers and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpace {
    /// Network with host bits masked off.
    pub network: Ipv4Network,
    /// Only known when the range was autodetected from the default route.
    pub gateway: Option<Ipv4Addr>,
    /// Outbound interface of the default route, when autodetected.
    pub interface: Option<String>,
}

impl AddressSpace {
    pub fn explicit(network: Ipv4Network) -> Self {
        Self {
            network,
            gateway: None,
            interface: None,
        }
    }
}

/// One discovered host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub address: Ipv4Addr,
    pub hardware_address: Option<String>,
    pub vendor: Option<String>,
    pub hostname: Option<String>,
    pub is_gateway: bool,
    /// `None` when liveness probing was disabled.
    pub alive: Option<bool>,
    /// Set if and only if `alive == Some(true)`.
    pub rtt_millis: Option<f64>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Device {
    pub fn new(address: Ipv4Addr, seen_at: DateTime<Utc>) -> Self {
        Self {
            address,
            hardware_address: None,
            vendor: None,
            hostname: None,
            is_gateway: false,
            alive: None,
            rtt_millis: None,
            first_seen: seen_at,
            last_seen: seen_at,
        }
    }

    pub fn with_mac(mut self, mac_addr: MacAddr) -> Self {
        self.hardware_address = Some(mac::canonical(mac_addr));
        self
    }

    /// Records the outcome of an echo probe. `None` means no reply arrived.
    pub fn set_liveness(&mut self, rtt_millis: Option<f64>) {
        self.alive = Some(rtt_millis.is_some());
        self.rtt_millis = rtt_millis;
    }
}

/// One completed scan. Built once by the orchestrator and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    #[serde(serialize_with = "as_display")]
    pub subnet: Ipv4Network,
    pub gateway_address: Option<Ipv4Addr>,
    pub devices: Vec<Device>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl ScanResult {
    pub fn gateway_device(&self) -> Option<&Device> {
        self.devices.iter().find(|device| device.is_gateway)
    }
}

fn as_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
