use std::net::Ipv4Addr;

use netcensus_common::error::ScanError;
use netcensus_common::network::interface;
use netcensus_core::system::{self, DefaultRoute};
use pnet::datalink::{MacAddr, NetworkInterface};
use pnet::ipnetwork::Ipv4Network;

use super::util::{FLAGS_ETHERNET, FLAGS_LOOPBACK, FLAGS_TUNNEL, ni, v4, v6};

/*************************************************************
                 Tests for interface selection
**************************************************************/

fn net(a: u8, b: u8, c: u8, d: u8, p: u8) -> Ipv4Network {
    Ipv4Network::new(Ipv4Addr::new(a, b, c, d), p).unwrap()
}

#[test]
fn range_selects_enp9s0() {
    let selected = interface::find_for_network(&iface_all(), net(192, 168, 0, 0, 24)).unwrap();
    assert_eq!(selected, enp9s0());
}

#[test]
fn range_selects_wlan0() {
    let interfaces: Vec<NetworkInterface> = vec![ipv6leakintrf0(), lo(), veth1234(), wlan0()];
    let selected = interface::find_for_network(&interfaces, net(192, 168, 1, 0, 24)).unwrap();
    assert_eq!(selected, wlan0());
}

#[test]
fn single_host_inside_attached_network_selects_eth1() {
    let selected = interface::find_for_network(&iface_all(), net(10, 0, 0, 7, 32)).unwrap();
    assert_eq!(selected, eth1());
}

#[test]
fn tunnel_is_only_used_as_fallback() {
    let selected = interface::find_for_network(&iface_all(), net(10, 96, 0, 0, 16)).unwrap();
    assert_eq!(selected, tun0());
}

#[test]
fn unattached_range_has_no_route() {
    let result = interface::find_for_network(&iface_all(), net(203, 0, 113, 0, 24));
    assert!(matches!(result, Err(ScanError::NoRouteToNetwork(_))));
}

#[test]
fn unknown_name_is_reported() {
    let result = interface::find_by_name(&iface_all(), "eth9");
    assert!(matches!(result, Err(ScanError::InterfaceNotFound(name)) if name == "eth9"));
}

/*************************************************************
            Tests for address space autodetection
**************************************************************/

fn route(gateway: Ipv4Addr, interface: &str) -> DefaultRoute {
    DefaultRoute {
        gateway,
        interface: interface.to_string(),
    }
}

#[test]
fn autodetect_masks_interface_network() {
    let space = system::autodetect(route(Ipv4Addr::new(192, 168, 0, 1), "enp9s0"), &iface_all()).unwrap();
    assert_eq!(space.network, net(192, 168, 0, 0, 24));
    assert_eq!(space.gateway, Some(Ipv4Addr::new(192, 168, 0, 1)));
    assert_eq!(space.interface.as_deref(), Some("enp9s0"));
}

#[test]
fn autodetect_requires_ipv4_on_route_interface() {
    let result = system::autodetect(route(Ipv4Addr::new(10, 0, 0, 1), "ipv6leakintrf0"), &iface_all());
    assert!(matches!(result, Err(ScanError::NoIpv4Address(_))));
}

#[test]
fn autodetect_requires_route_interface() {
    let result = system::autodetect(route(Ipv4Addr::new(10, 0, 0, 1), "wwan0"), &iface_all());
    assert!(matches!(result, Err(ScanError::InterfaceNotFound(_))));
}

/*************************************************************
                  Mock interfaces for testing
**************************************************************/

fn iface_all() -> Vec<NetworkInterface> {
    vec![lo(), enp9s0(), tun0(), ipv6leakintrf0(), wlan0(), eth1(), veth1234()]
}

fn lo() -> NetworkInterface {
    ni(
        "lo",
        1,
        Some(MacAddr::new(0, 0, 0, 0, 0, 0)),
        &[v4(127, 0, 0, 1, 8), v6("::1", 128)],
        FLAGS_LOOPBACK,
    )
}

fn enp9s0() -> NetworkInterface {
    ni(
        "enp9s0",
        2,
        Some(MacAddr::new(0xa8, 0xa1, 0x59, 0x13, 0x41, 0x46)),
        &[
            v4(192, 168, 0, 32, 24),
            v6("2a02:908:8c1:b880::b054", 128),
            v6("fe80::b3dd:5c39:7c29:48b6", 64),
        ],
        FLAGS_ETHERNET,
    )
}

fn tun0() -> NetworkInterface {
    ni(
        "tun0",
        5,
        None,
        &[v4(10, 96, 0, 57, 16), v6("fe80::c137:8964:5a63:efde", 64)],
        FLAGS_TUNNEL,
    )
}

fn ipv6leakintrf0() -> NetworkInterface {
    ni(
        "ipv6leakintrf0",
        6,
        Some(MacAddr::new(0xd2, 0x25, 0xd4, 0x9f, 0x18, 0xfd)),
        &[v6("fdeb:446c:912d:8da::", 64), v6("fe80::7f87:ff4a:9ad8:d2f0", 64)],
        FLAGS_ETHERNET,
    )
}

fn wlan0() -> NetworkInterface {
    ni(
        "wlan0",
        3,
        Some(MacAddr::new(0x34, 0xcf, 0xf6, 0x9a, 0x11, 0x22)),
        &[v4(192, 168, 1, 42, 24), v6("fe80::36cf:f6ff:fe9a:1122", 64)],
        FLAGS_ETHERNET,
    )
}

fn eth1() -> NetworkInterface {
    ni(
        "eth1",
        4,
        Some(MacAddr::new(0x52, 0x54, 0x00, 0x12, 0x34, 0x56)),
        &[v4(10, 0, 0, 15, 24)],
        FLAGS_ETHERNET,
    )
}

fn veth1234() -> NetworkInterface {
    ni(
        "veth1234",
        8,
        Some(MacAddr::new(0x1a, 0x2b, 0x3c, 0x4d, 0x5e, 0x6f)),
        &[v6("fe80::1a2b:3cff:fe4d:5e6f", 64)],
        FLAGS_ETHERNET,
    )
}
