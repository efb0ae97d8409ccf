use std::net::Ipv4Addr;

use pnet::packet::dns::{DnsClass, DnsQuery, DnsTypes, MutableDnsPacket, Opcode, Retcode};

use crate::{DNS_HDR_LEN, PacketError};

const MAX_LABEL_LEN: usize = 63;
const CLASS_IN: DnsClass = DnsClass(1);

/// Reverse-lookup name of an address, e.g. `30.1.168.192.in-addr.arpa`.
pub fn reverse_name(ip_addr: Ipv4Addr) -> String {
    let [a, b, c, d] = ip_addr.octets();
    format!("{d}.{c}.{b}.{a}.in-addr.arpa")
}

/// Builds a single-question PTR query for `ip_addr`.
///
/// Multicast queries must not ask for recursion; unicast resolvers expect it.
pub fn create_ptr_packet(ip_addr: Ipv4Addr, id: u16, recursion: bool) -> Result<Vec<u8>, PacketError> {
    let question: DnsQuery = ptr_question(ip_addr)?;
    let mut packet: Vec<u8> = vec![0u8; DNS_HDR_LEN];

    // A zeroed header is a standard query with every count at zero.
    let mut header = MutableDnsPacket::new(&mut packet).ok_or(PacketError::DnsBuffer)?;
    header.set_id(id);
    header.set_opcode(Opcode::StandardQuery);
    header.set_rcode(Retcode::NoError);
    header.set_is_recursion_desirable(u8::from(recursion));
    header.set_query_count(1);

    packet.extend_from_slice(&question.qname);
    packet.extend_from_slice(&question.qtype.0.to_be_bytes());
    packet.extend_from_slice(&question.qclass.0.to_be_bytes());
    Ok(packet)
}

fn ptr_question(ip_addr: Ipv4Addr) -> Result<DnsQuery, PacketError> {
    Ok(DnsQuery {
        qname: encode_dns_name(&reverse_name(ip_addr))?,
        qtype: DnsTypes::PTR,
        qclass: CLASS_IN,
        payload: Vec::new(),
    })
}

/// Length-prefixed label encoding, terminated by the root label.
fn encode_dns_name(name: &str) -> Result<Vec<u8>, PacketError> {
    let mut encoded: Vec<u8> = Vec::with_capacity(name.len() + 2);
    for label in name.split('.').filter(|label| !label.is_empty()) {
        let len: u8 = u8::try_from(label.len())
            .ok()
            .filter(|len| usize::from(*len) <= MAX_LABEL_LEN)
            .ok_or_else(|| PacketError::DnsLabel(label.to_string()))?;
        encoded.push(len);
        encoded.extend_from_slice(label.as_bytes());
    }
    encoded.push(0);
    Ok(encoded)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
