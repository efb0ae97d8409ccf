//! Manufacturer lookup from a local prefix/vendor directory.
//!
//! The directory is a comment-tolerant two-column file:
//!
//! ```text
//! prefix,vendor
//! # comment
//! D8:EC:5E,Linksys / Belkin
//! f0-18-98,"Apple, Inc."
//! ```
//!
//! It is read once when the [`VendorDirectory`] is built and never touched
//! again. A missing or unreadable file yields an empty directory.

use std::collections::HashMap;
use std::path::Path;

use pnet::util::MacAddr;
use tracing::debug;

use netcensus_common::network::mac;
use netcensus_common::vendors::VendorRepository;

const HEADER_TOKEN: &str = "prefix";

#[derive(Debug, Clone, Default)]
pub struct VendorDirectory {
    entries: HashMap<String, String>,
}

impl VendorDirectory {
    /// Loads the directory at `path`, degrading to an empty one on any I/O failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path: &Path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let directory = Self::parse(&contents);
                debug!("Loaded {} vendor prefixes from {}", directory.len(), path.display());
                directory
            }
            Err(e) => {
                debug!("Vendor directory {} unavailable: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Parses directory text. Malformed rows are skipped.
    pub fn parse(contents: &str) -> Self {
        let entries: HashMap<String, String> = contents.lines().filter_map(parse_row).collect();
        Self { entries }
    }

    /// Vendor of a textual MAC address in any common notation.
    pub fn lookup(&self, mac_addr: &str) -> Option<&str> {
        let oui: String = mac::oui_of(mac_addr)?;
        self.entries.get(&oui).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl VendorRepository for VendorDirectory {
    fn get_vendor(&self, mac_addr: MacAddr) -> Option<String> {
        self.entries.get(&mac::oui_of_mac(mac_addr)).cloned()
    }
}

fn parse_row(line: &str) -> Option<(String, String)> {
    let line: &str = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (prefix, vendor) = line.split_once(',')?;
    let prefix: &str = prefix.trim();
    if prefix.eq_ignore_ascii_case(HEADER_TOKEN) {
        return None;
    }

    let vendor: &str = unquote(vendor.trim());
    if vendor.is_empty() {
        return None;
    }
    Some((mac::normalize_oui(prefix)?, vendor.to_string()))
}

fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .map(str::trim)
        .unwrap_or(field)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
