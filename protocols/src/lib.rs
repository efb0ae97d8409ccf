//! Wire codecs used by the discovery probes.
//!
//! Every function here is pure: frames are built into and parsed from byte
//! buffers, and the sockets live in `netcensus-core`.

pub mod arp;
pub mod dns;
pub mod ethernet;
pub mod icmp;
pub mod mdns;

use thiserror::Error;

pub const ETH_HDR_LEN: usize = 14;
pub const ARP_LEN: usize = 28;
pub const MIN_ETH_FRAME_NO_FCS: usize = 60;
pub const DNS_HDR_LEN: usize = 12;
pub const ICMP_ECHO_HDR_LEN: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    #[error("buffer too small for an ethernet header")]
    EthernetBuffer,
    #[error("buffer too small for an ARP payload")]
    ArpBuffer,
    #[error("buffer too small for an ICMP echo request")]
    IcmpBuffer,
    #[error("buffer too small for a DNS header")]
    DnsBuffer,
    #[error("DNS label '{0}' exceeds 63 bytes")]
    DnsLabel(String),
}
