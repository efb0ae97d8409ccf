//! Helpers for picking the interface a scan runs on.
//!
//! Selection functions take the interface list as a slice so they can be
//! exercised with hand-built interfaces; callers pass `pnet::datalink::interfaces()`.

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

use crate::error::ScanError;

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
    /// First non-loopback IPv4 network configured on the interface.
    fn get_ipv4_net(&self) -> Option<Ipv4Network>;
    fn is_usable_for_arp(&self) -> bool;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }

    fn get_ipv4_net(&self) -> Option<Ipv4Network> {
        self.get_ipv4_nets()
            .into_iter()
            .find(|net| !net.ip().is_loopback())
    }

    fn is_usable_for_arp(&self) -> bool {
        self.is_up()
            && !self.is_loopback()
            && !self.is_point_to_point()
            && self.mac.is_some()
            && self.get_ipv4_net().is_some()
    }
}

/// Looks up an interface by its exact name.
pub fn find_by_name(interfaces: &[NetworkInterface], name: &str) -> Result<NetworkInterface, ScanError> {
    interfaces
        .iter()
        .find(|intf| intf.name == name)
        .cloned()
        .ok_or_else(|| ScanError::InterfaceNotFound(name.to_string()))
}

/// Finds the interface whose IPv4 network contains `target`.
///
/// Prefers an interface that can carry ARP; falls back to any interface
/// holding an overlapping address.
pub fn find_for_network(
    interfaces: &[NetworkInterface],
    target: Ipv4Network,
) -> Result<NetworkInterface, ScanError> {
    let attached = |intf: &&NetworkInterface| {
        intf.get_ipv4_nets()
            .iter()
            .any(|net| net.contains(target.network()) || target.contains(net.ip()))
    };

    interfaces
        .iter()
        .filter(attached)
        .find(|intf| intf.is_usable_for_arp())
        .or_else(|| interfaces.iter().find(attached))
        .cloned()
        .ok_or_else(|| ScanError::NoRouteToNetwork(target.to_string()))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
