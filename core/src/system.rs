//! Resolves the address space of a scan.
//!
//! An explicit subnet is parsed as CIDR. Otherwise the default IPv4 route is
//! read from the host's routing table and the network of its outbound
//! interface is used, with the route's next hop recorded as the gateway.

use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::Ipv4Network;
use tracing::debug;

use netcensus_common::error::ScanError;
use netcensus_common::model::AddressSpace;
use netcensus_common::network::interface::{self, NetworkInterfaceExtension};
use netcensus_common::network::range;
use netcensus_common::scanning::AddressSpaceProvider;

/// The default IPv4 route of the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRoute {
    pub gateway: Ipv4Addr,
    pub interface: String,
}

/// Reads the routing table and interface list of the running system.
pub struct SystemRepo;

impl AddressSpaceProvider for SystemRepo {
    fn resolve(&self, subnet: Option<&str>) -> Result<AddressSpace, ScanError> {
        resolve_address_space(subnet)
    }
}

/// Resolves the range of a scan against the running system.
pub fn resolve_address_space(subnet: Option<&str>) -> Result<AddressSpace, ScanError> {
    if let Some(cidr) = subnet {
        let network: Ipv4Network = range::parse_cidr(cidr)?;
        debug!("Using explicit subnet {network}");
        return Ok(AddressSpace::explicit(network));
    }

    let route: DefaultRoute = default_route()?.ok_or(ScanError::NoDefaultRoute)?;
    debug!("Default route via {} on {}", route.gateway, route.interface);
    autodetect(route, &datalink::interfaces())
}

/// Derives the address space from a default route and the interface list.
pub fn autodetect(
    route: DefaultRoute,
    interfaces: &[NetworkInterface],
) -> Result<AddressSpace, ScanError> {
    let intf: NetworkInterface = interface::find_by_name(interfaces, &route.interface)?;
    let net: Ipv4Network = intf
        .get_ipv4_net()
        .ok_or_else(|| ScanError::NoIpv4Address(route.interface.clone()))?;
    let network: Ipv4Network = range::masked(net.ip(), net.prefix())
        .map_err(|e| ScanError::invalid_subnet(&net.to_string(), e))?;

    Ok(AddressSpace {
        network,
        gateway: Some(route.gateway),
        interface: Some(route.interface),
    })
}

#[cfg(target_os = "linux")]
fn default_route() -> Result<Option<DefaultRoute>, ScanError> {
    let table: String = std::fs::read_to_string("/proc/net/route")?;
    Ok(linux_impl::parse_route_table(&table))
}

#[cfg(target_os = "macos")]
fn default_route() -> Result<Option<DefaultRoute>, ScanError> {
    let output = std::process::Command::new("route")
        .args(["-n", "get", "default"])
        .output()?;
    if !output.status.success() {
        return Ok(None);
    }
    Ok(macos_impl::parse_route_get(&String::from_utf8_lossy(&output.stdout)))
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn default_route() -> Result<Option<DefaultRoute>, ScanError> {
    Ok(None)
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
mod linux_impl {
    use super::*;

    const RTF_UP: u32 = 0x0001;
    const RTF_GATEWAY: u32 = 0x0002;

    /// Picks the lowest-metric default gateway route from `/proc/net/route`.
    ///
    /// Addresses in that file are hex dumps of network-order words, read
    /// back in host byte order.
    pub fn parse_route_table(table: &str) -> Option<DefaultRoute> {
        table
            .lines()
            .skip(1)
            .filter_map(parse_route_line)
            .min_by_key(|(_, metric)| *metric)
            .map(|(route, _)| route)
    }

    fn parse_route_line(line: &str) -> Option<(DefaultRoute, u32)> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 8 {
            return None;
        }

        let destination: u32 = u32::from_str_radix(fields[1], 16).ok()?;
        let gateway: u32 = u32::from_str_radix(fields[2], 16).ok()?;
        let flags: u32 = u32::from_str_radix(fields[3], 16).ok()?;
        let metric: u32 = fields[6].parse().ok()?;
        let mask: u32 = u32::from_str_radix(fields[7], 16).ok()?;

        let is_default = destination == 0 && mask == 0;
        let is_usable = flags & RTF_UP != 0 && flags & RTF_GATEWAY != 0;
        if !is_default || !is_usable || gateway == 0 {
            return None;
        }

        let route = DefaultRoute {
            gateway: Ipv4Addr::from(gateway.to_ne_bytes()),
            interface: fields[0].to_string(),
        };
        Some((route, metric))
    }
}

#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod macos_impl {
    use super::*;

    /// Reads `gateway:` and `interface:` out of `route -n get default`.
    pub fn parse_route_get(output: &str) -> Option<DefaultRoute> {
        let mut gateway: Option<Ipv4Addr> = None;
        let mut interface: Option<String> = None;

        for line in output.lines() {
            let Some((key, value)) = line.trim().split_once(':') else {
                continue;
            };
            match key.trim() {
                "gateway" => gateway = value.trim().parse().ok(),
                "interface" => interface = Some(value.trim().to_string()),
                _ => {}
            }
        }

        Some(DefaultRoute {
            gateway: gateway?,
            interface: interface?,
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
