//! Layer-4 ICMP socket used by the echo probe.
//!
//! The kernel fills in the IPv4 header and routes the request, so no
//! interface is bound here.

use std::io;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use pnet::packet::Packet;
use pnet::packet::icmp::IcmpPacket;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{
    self, TransportChannelType, TransportProtocol, TransportReceiver, TransportSender,
};

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));

/// Datagram access to ICMP, abstracted so probes can run against a fake.
pub trait EchoSocket: Send {
    fn send_to(&mut self, packet: &[u8], destination: Ipv4Addr) -> io::Result<()>;

    /// Next ICMP message and its source, or `None` once `timeout` elapsed.
    fn recv(&mut self, timeout: Duration) -> io::Result<Option<(Vec<u8>, Ipv4Addr)>>;
}

pub struct IcmpSocket {
    tx: TransportSender,
    rx: TransportReceiver,
}

impl IcmpSocket {
    pub fn open() -> io::Result<Self> {
        let (tx, rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_ICMP)?;
        Ok(Self { tx, rx })
    }
}

impl EchoSocket for IcmpSocket {
    fn send_to(&mut self, packet: &[u8], destination: Ipv4Addr) -> io::Result<()> {
        let icmp = IcmpPacket::new(packet)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "truncated ICMP packet"))?;
        self.tx.send_to(icmp, IpAddr::V4(destination))?;
        Ok(())
    }

    fn recv(&mut self, timeout: Duration) -> io::Result<Option<(Vec<u8>, Ipv4Addr)>> {
        let mut iter = transport::icmp_packet_iter(&mut self.rx);
        loop {
            match iter.next_with_timeout(timeout)? {
                Some((packet, IpAddr::V4(source))) => return Ok(Some((packet.packet().to_vec(), source))),
                Some((_, IpAddr::V6(_))) => continue,
                None => return Ok(None),
            }
        }
    }
}
