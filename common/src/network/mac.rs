//! Hardware address normalization.
//!
//! Accepts colon-separated, hyphen-separated or bare hex input in any case and
//! produces the canonical `XX:XX:XX:XX:XX:XX` form used throughout the inventory.

use pnet::util::MacAddr;

const MAC_LEN: usize = 6;
const OUI_LEN: usize = 3;
const OUI_TEXT_LEN: usize = 8;

/// Formats a MAC in canonical uppercase, colon-separated form.
pub fn canonical(mac_addr: MacAddr) -> String {
    let MacAddr(a, b, c, d, e, f) = mac_addr;
    format!("{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{f:02X}")
}

/// Normalizes a textual MAC address, returning `None` when it is malformed.
fn normalize(input: &str) -> Option<String> {
    let octets: [u8; MAC_LEN] = parse_octets(input)?.try_into().ok()?;
    Some(canonical(MacAddr::from(octets)))
}

/// Extracts the manufacturer prefix (`XX:XX:XX`) of a full MAC address.
pub fn oui_of(input: &str) -> Option<String> {
    let full: String = normalize(input)?;
    Some(full[..OUI_TEXT_LEN].to_string())
}

/// Normalizes a manufacturer prefix as found in a vendor directory.
///
/// Rows may hold a bare prefix or a longer address; only the first three
/// octets are kept.
pub fn normalize_oui(input: &str) -> Option<String> {
    let octets = parse_octets(input)?;
    if octets.len() < OUI_LEN || octets.len() > MAC_LEN {
        return None;
    }
    Some(join(&octets[..OUI_LEN]))
}

/// The manufacturer prefix of an already parsed MAC.
pub fn oui_of_mac(mac_addr: MacAddr) -> String {
    let MacAddr(a, b, c, ..) = mac_addr;
    join(&[a, b, c])
}

fn join(octets: &[u8]) -> String {
    octets
        .iter()
        .map(|octet| format!("{octet:02X}"))
        .collect::<Vec<String>>()
        .join(":")
}

fn parse_octets(input: &str) -> Option<Vec<u8>> {
    let trimmed: &str = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains([':', '-']) {
        return trimmed
            .split([':', '-'])
            .map(|part| match part.len() {
                1 | 2 => u8::from_str_radix(part, 16).ok(),
                _ => None,
            })
            .collect();
    }

    if trimmed.len() % 2 != 0 || !trimmed.is_ascii() {
        return None;
    }
    (0..trimmed.len())
        .step_by(2)
        .map(|idx| u8::from_str_radix(&trimmed[idx..idx + 2], 16).ok())
        .collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
