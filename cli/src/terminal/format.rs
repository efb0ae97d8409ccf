use colored::*;

use netcensus_common::model::Device;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// Key/value rows printed under a device's tree head.
pub fn device_details(device: &Device) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "IPv4".to_string(),
        device.address.to_string().color(colors::IPV4_ADDR),
    )];

    if let Some(mac) = &device.hardware_address {
        details.push(("MAC".to_string(), mac.as_str().color(colors::MAC_ADDR)));
    }
    if let Some(vendor) = &device.vendor {
        details.push(("Vendor".to_string(), vendor.as_str().color(colors::VENDOR)));
    }
    if let Some(status) = liveness_detail(device) {
        details.push(status);
    }
    if device.is_gateway {
        details.push(("Role".to_string(), "Gateway".bold()));
    }
    details
}

fn liveness_detail(device: &Device) -> Option<Detail> {
    let value: ColoredString = match (device.alive, device.rtt_millis) {
        (None, _) => return None,
        (Some(true), Some(rtt)) => format!("up ({rtt:.2} ms)").green(),
        (Some(true), None) => "up".green(),
        (Some(false), _) => "no echo reply".yellow(),
    };
    Some(("Echo".to_string(), value))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
