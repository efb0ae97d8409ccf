use std::time::{Duration, Instant};

use colored::*;
use netcensus_common::model::ScanResult;
use netcensus_core::DiscoveryService;
use tracing::{Instrument, info, info_span, warn};

use crate::commands::CommandLine;
use crate::export;
use crate::mprint;
use crate::terminal::{format, print, spinner};

pub async fn discover(cli: &CommandLine) -> anyhow::Result<()> {
    let service = DiscoveryService::from_config(cli.scan_config());
    log_scan_parameters(cli);

    if !is_root::is_root() {
        warn!("Not running as root, the ARP sweep will likely be refused");
    }

    let span = info_span!("discovery");
    spinner::set_stage(&span, "Discovering hosts...");

    let start_time: Instant = Instant::now();
    let result: ScanResult = service.perform_scan().instrument(span).await?;
    let elapsed: Duration = start_time.elapsed();

    discovery_ends(&result, elapsed);

    if cli.no_export {
        return Ok(());
    }
    export::save_json(&result, &cli.json_output)?;
    info!("JSON saved: {}", cli.json_output.display());
    let topology = export::save_topology(&result, &cli.graph_output)?;
    info!("Topology saved: {}", topology.display());
    Ok(())
}

fn log_scan_parameters(cli: &CommandLine) {
    print::header("getting ready for discovery");
    print::aligned_line("Subnet", cli.subnet.clone().unwrap_or_else(|| "auto".to_string()));
    if let Some(iface) = &cli.iface {
        print::aligned_line("Iface", iface.clone());
    }
    print::aligned_line("Ping", on_off(!cli.no_ping));
    print::aligned_line("mDNS", on_off(!cli.no_mdns));
    print::aligned_line("DNS", on_off(cli.legacy_dns));
}

fn on_off(enabled: bool) -> ColoredString {
    if enabled { "on".green() } else { "off".bright_black() }
}

fn discovery_ends(result: &ScanResult, total_time: Duration) {
    mprint!();
    if result.devices.is_empty() {
        print::header("zero hosts detected");
        print::no_results();
        return;
    }

    print::header(&format!("network discovery {}", result.subnet));
    for (idx, device) in result.devices.iter().enumerate() {
        let name: &str = device.hostname.as_deref().unwrap_or("No hostname");
        print::tree_head(idx, name);
        print::as_tree_one_level(format::device_details(device));
        if idx + 1 != result.devices.len() {
            mprint!();
        }
    }
    print_summary(result.devices.len(), total_time);
}

fn print_summary(hosts_len: usize, total_time: Duration) {
    let text: String = format!(
        "Discovery complete: {hosts_len} hosts identified in {:.2}s",
        total_time.as_secs_f64()
    );
    print::fat_separator();
    print::centerln(&text, |s| s.bold());
}
