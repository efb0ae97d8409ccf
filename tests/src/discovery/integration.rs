use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use netcensus_common::config::ScanConfig;
use netcensus_common::error::ScanError;
use netcensus_common::model::{AddressSpace, ScanResult};
use netcensus_common::scanning::{AddressSpaceProvider, HostDiscovery, LivenessProbe};
use netcensus_core::system::SystemRepo;
use netcensus_core::{DiscoveryService, VendorDirectory};
use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;
use tempfile::TempDir;

use super::fakes::{
    DeniedArp, FixedAddressSpace, ScriptedArp, ScriptedEcho, ScriptedNames, UnreachableEcho,
};

const ACME_DB: &str = "prefix,vendor\n# test directory\nD8:EC:5E,Acme Corp\n";

fn lan() -> Ipv4Network {
    Ipv4Network::new(Ipv4Addr::new(192, 168, 1, 0), 24).unwrap()
}

fn autodetected_lan() -> AddressSpace {
    AddressSpace {
        network: lan(),
        gateway: Some(Ipv4Addr::new(192, 168, 1, 1)),
        interface: Some("eth0".to_string()),
    }
}

/// Writes `contents` to a vendor file inside a fresh temp directory.
/// The directory is removed when the returned guard drops.
fn vendor_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("oui_db.csv");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}

fn service(
    space: Box<dyn AddressSpaceProvider>,
    arp: Box<dyn HostDiscovery>,
    echo: Box<dyn LivenessProbe>,
    names: HashMap<Ipv4Addr, String>,
    vendors: VendorDirectory,
    config: ScanConfig,
) -> DiscoveryService {
    DiscoveryService::new(space, arp, echo, Box::new(ScriptedNames(names)), Box::new(vendors), config)
}

fn scenario_replies() -> ScriptedArp {
    ScriptedArp(vec![
        (Ipv4Addr::new(192, 168, 1, 10), MacAddr::new(0xaa, 0xbb, 0xcc, 0x11, 0x22, 0x33)),
        (Ipv4Addr::new(192, 168, 1, 2), MacAddr::new(0xd8, 0xec, 0x5e, 0x44, 0x55, 0x66)),
    ])
}

/*************************************************************
                     End-to-end scenarios
**************************************************************/

#[tokio::test]
async fn two_hosts_one_alive() {
    let (_dir, db) = vendor_file(ACME_DB);
    let vendors = VendorDirectory::load(&db);

    let svc = service(
        Box::new(FixedAddressSpace(autodetected_lan())),
        Box::new(scenario_replies()),
        Box::new(ScriptedEcho([(Ipv4Addr::new(192, 168, 1, 2), 0.8)].into_iter().collect())),
        HashMap::new(),
        vendors,
        ScanConfig::default(),
    );

    let result: ScanResult = svc.perform_scan().await.unwrap();
    assert_eq!(result.subnet, lan());
    assert_eq!(result.gateway_address, Some(Ipv4Addr::new(192, 168, 1, 1)));
    assert_eq!(result.devices.len(), 2);

    let first = &result.devices[0];
    assert_eq!(first.address, Ipv4Addr::new(192, 168, 1, 2));
    assert_eq!(first.hardware_address.as_deref(), Some("D8:EC:5E:44:55:66"));
    assert_eq!(first.vendor.as_deref(), Some("Acme Corp"));
    assert_eq!(first.alive, Some(true));
    assert_eq!(first.rtt_millis, Some(0.8));

    let second = &result.devices[1];
    assert_eq!(second.address, Ipv4Addr::new(192, 168, 1, 10));
    assert_eq!(second.vendor, None);
    assert_eq!(second.alive, Some(false));
    assert_eq!(second.rtt_millis, None);

    assert!(result.gateway_device().is_none());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["subnet"], "192.168.1.0/24");
    assert_eq!(json["devices"][0]["address"], "192.168.1.2");
    assert_eq!(json["devices"][0]["hardwareAddress"], "D8:EC:5E:44:55:66");
    assert_eq!(json["devices"][0]["isGateway"], false);
    assert!(json["devices"][1]["rttMillis"].is_null());
    assert!(json["devices"][1]["hostname"].is_null());
}

#[tokio::test]
async fn empty_network_yields_empty_inventory() {
    let svc = service(
        Box::new(FixedAddressSpace(autodetected_lan())),
        Box::new(ScriptedArp(Vec::new())),
        Box::new(UnreachableEcho),
        HashMap::new(),
        VendorDirectory::default(),
        ScanConfig::default(),
    );

    let result = svc.perform_scan().await.unwrap();
    assert!(result.devices.is_empty());
    assert_eq!(result.gateway_address, Some(Ipv4Addr::new(192, 168, 1, 1)));
    assert!(result.started_at <= result.finished_at);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["devices"], serde_json::json!([]));
}

#[tokio::test]
async fn discovered_gateway_is_flagged_and_named() {
    let replies = ScriptedArp(vec![
        (Ipv4Addr::new(192, 168, 1, 1), MacAddr::new(0xd8, 0xec, 0x5e, 0x00, 0x00, 0x01)),
        (Ipv4Addr::new(192, 168, 1, 30), MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55)),
    ]);
    let names: HashMap<Ipv4Addr, String> =
        [(Ipv4Addr::new(192, 168, 1, 30), "printer.local".to_string())].into_iter().collect();

    let svc = service(
        Box::new(FixedAddressSpace(autodetected_lan())),
        Box::new(replies),
        Box::new(ScriptedEcho(HashMap::new())),
        names,
        VendorDirectory::parse(ACME_DB),
        ScanConfig::default(),
    );

    let result = svc.perform_scan().await.unwrap();
    let gateway = result.gateway_device().unwrap();
    assert_eq!(gateway.address, Ipv4Addr::new(192, 168, 1, 1));
    assert_eq!(gateway.vendor.as_deref(), Some("Acme Corp"));
    assert_eq!(result.devices.iter().filter(|d| d.is_gateway).count(), 1);
    assert_eq!(result.devices[1].hostname.as_deref(), Some("printer.local"));
    assert!(result.devices.iter().all(|d| d.alive == Some(false)));
}

#[tokio::test]
async fn disabled_ping_skips_the_probe() {
    let config = ScanConfig {
        ping: false,
        ..ScanConfig::default()
    };
    let svc = service(
        Box::new(FixedAddressSpace(autodetected_lan())),
        Box::new(scenario_replies()),
        Box::new(UnreachableEcho),
        HashMap::new(),
        VendorDirectory::default(),
        config,
    );

    let result = svc.perform_scan().await.unwrap();
    assert_eq!(result.devices.len(), 2);
    assert!(result.devices.iter().all(|d| d.alive.is_none() && d.rtt_millis.is_none()));
}

/*************************************************************
                  Explicit ranges and failures
**************************************************************/

#[tokio::test]
async fn explicit_subnet_is_masked_and_has_no_gateway() {
    let config = ScanConfig {
        subnet: Some("192.168.1.77/24".to_string()),
        ..ScanConfig::default()
    };
    let replies = ScriptedArp(vec![
        (Ipv4Addr::new(192, 168, 1, 1), MacAddr::new(0, 1, 2, 3, 4, 5)),
        (Ipv4Addr::new(10, 1, 1, 1), MacAddr::new(0, 1, 2, 3, 4, 6)),
    ]);
    let svc = service(
        Box::new(SystemRepo),
        Box::new(replies),
        Box::new(ScriptedEcho(HashMap::new())),
        HashMap::new(),
        VendorDirectory::default(),
        config,
    );

    let result = svc.perform_scan().await.unwrap();
    assert_eq!(result.subnet, lan());
    assert_eq!(result.gateway_address, None);
    assert_eq!(result.devices.len(), 1);
    assert!(!result.devices[0].is_gateway);
}

#[tokio::test]
async fn malformed_subnet_aborts_the_scan() {
    let config = ScanConfig {
        subnet: Some("192.168.1.0/33".to_string()),
        ..ScanConfig::default()
    };
    let svc = service(
        Box::new(SystemRepo),
        Box::new(scenario_replies()),
        Box::new(UnreachableEcho),
        HashMap::new(),
        VendorDirectory::default(),
        config,
    );

    let result = svc.perform_scan().await;
    assert!(matches!(result, Err(ScanError::InvalidSubnet { .. })));
}

#[tokio::test]
async fn missing_privilege_aborts_the_scan() {
    let svc = service(
        Box::new(FixedAddressSpace(autodetected_lan())),
        Box::new(DeniedArp),
        Box::new(UnreachableEcho),
        HashMap::new(),
        VendorDirectory::default(),
        ScanConfig::default(),
    );

    match svc.perform_scan().await {
        Err(ScanError::Permission { interface, .. }) => assert_eq!(interface, "eth0"),
        other => panic!("expected a permission error, got {other:?}"),
    }
}

/*************************************************************
                 Vendor directory round trip
**************************************************************/

#[test]
fn vendor_directory_round_trip_through_file() {
    let (_dir, db) = vendor_file(
        "prefix,vendor\n\
         # comment row\n\
         d8-ec-5e,Acme Corp\n\
         F0:18:98,\"Apple, Inc.\"\n\
         bogus row\n",
    );
    let vendors = VendorDirectory::load(&db);

    assert_eq!(vendors.len(), 2);
    assert_eq!(vendors.lookup("d8:ec:5e:44:55:66"), Some("Acme Corp"));
    assert_eq!(vendors.lookup("D8-EC-5E-44-55-66"), Some("Acme Corp"));
    assert_eq!(vendors.lookup("f01898aabbcc"), Some("Apple, Inc."));
    assert_eq!(vendors.lookup("00:00:00:00:00:01"), None);
}

#[test]
fn missing_vendor_directory_is_empty() {
    let vendors = VendorDirectory::load("/nonexistent/netcensus/oui.csv");
    assert!(vendors.is_empty());
}
