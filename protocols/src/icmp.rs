use anyhow::Context;
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{IcmpCode, IcmpPacket, IcmpTypes, checksum};

use crate::{ICMP_ECHO_HDR_LEN, PacketError};

const ECHO_PAYLOAD_LEN: usize = 32;

/// Builds an ICMP echo request (header and payload, no IP header).
pub fn create_echo_request(identifier: u16, sequence: u16) -> Result<Vec<u8>, PacketError> {
    let mut buffer: Vec<u8> = vec![0u8; ICMP_ECHO_HDR_LEN + ECHO_PAYLOAD_LEN];
    {
        let mut echo =
            MutableEchoRequestPacket::new(&mut buffer).ok_or(PacketError::IcmpBuffer)?;
        echo.set_icmp_type(IcmpTypes::EchoRequest);
        echo.set_icmp_code(IcmpCode(0));
        echo.set_identifier(identifier);
        echo.set_sequence_number(sequence);
        echo.set_payload(&[0x6e; ECHO_PAYLOAD_LEN]);
        echo.set_checksum(0);
    }

    let csm: u16 = {
        let icmp = IcmpPacket::new(&buffer).ok_or(PacketError::IcmpBuffer)?;
        checksum(&icmp)
    };
    let mut echo = MutableEchoRequestPacket::new(&mut buffer).ok_or(PacketError::IcmpBuffer)?;
    echo.set_checksum(csm);
    Ok(buffer)
}

/// Checks whether `icmp` is the echo reply to the request `(identifier, sequence)`.
pub fn is_matching_reply(icmp: &IcmpPacket, identifier: u16, sequence: u16) -> anyhow::Result<bool> {
    if icmp.get_icmp_type() != IcmpTypes::EchoReply {
        return Ok(false);
    }
    let reply = EchoReplyPacket::new(icmp.packet()).context("truncated echo reply")?;
    Ok(reply.get_identifier() == identifier && reply.get_sequence_number() == sequence)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
