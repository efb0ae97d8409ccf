use anyhow::{Context, Result};
use dns_parser::{Packet, RData};

/// Target name of the first PTR answer in a response to query `expected_id`.
///
/// Legacy unicast responders echo the query id; some stacks answer with id 0,
/// which is accepted as well. Any other id yields `Ok(None)`.
pub fn first_ptr_answer(data: &[u8], expected_id: u16) -> Result<Option<String>> {
    let packet = Packet::parse(data).context("failed to parse mDNS packet")?;
    if packet.header.query {
        return Ok(None);
    }
    if packet.header.id != expected_id && packet.header.id != 0 {
        return Ok(None);
    }

    let hostname = packet.answers.iter().find_map(|record| match &record.data {
        RData::PTR(ptr) => Some(strip_root(&ptr.0.to_string())),
        _ => None,
    });

    Ok(hostname.filter(|name| !name.is_empty()))
}

fn strip_root(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
