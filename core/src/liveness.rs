//! ICMP echo liveness probe.
//!
//! Each address gets exactly one echo request; a host is alive if the
//! matching reply arrives within the echo timeout. Requests are sent one
//! after the other with a fixed spacing so the probe never floods the LAN.

use std::collections::HashMap;
use std::io;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pnet::packet::icmp::IcmpPacket;
use tracing::{debug, trace, warn};

use netcensus_common::config::ProbeTimings;
use netcensus_common::scanning::LivenessProbe;
use netcensus_protocols::icmp;

use crate::network::transport::{EchoSocket, IcmpSocket};

type SocketOpener = fn() -> io::Result<Box<dyn EchoSocket>>;

pub struct IcmpProbe {
    timings: ProbeTimings,
    opener: SocketOpener,
}

impl IcmpProbe {
    pub fn new(timings: ProbeTimings) -> Self {
        Self::with_opener(timings, open_icmp_socket)
    }

    pub fn with_opener(timings: ProbeTimings, opener: SocketOpener) -> Self {
        Self { timings, opener }
    }
}

fn open_icmp_socket() -> io::Result<Box<dyn EchoSocket>> {
    Ok(Box::new(IcmpSocket::open()?))
}

#[async_trait]
impl LivenessProbe for IcmpProbe {
    async fn probe(&self, addresses: &[Ipv4Addr]) -> HashMap<Ipv4Addr, f64> {
        if addresses.is_empty() {
            return HashMap::new();
        }

        let opener: SocketOpener = self.opener;
        let timings: ProbeTimings = self.timings;
        let targets: Vec<Ipv4Addr> = addresses.to_vec();
        let identifier: u16 = rand::random();

        let result = tokio::task::spawn_blocking(move || {
            let mut socket = opener()?;
            Ok::<_, io::Error>(echo_all(socket.as_mut(), &targets, identifier, timings))
        })
        .await;

        match result {
            Ok(Ok(rtts)) => rtts,
            Ok(Err(e)) => {
                warn!("ICMP probe unavailable, every host is reported unreachable: {e}");
                HashMap::new()
            }
            Err(e) => {
                warn!("ICMP probe task failed: {e}");
                HashMap::new()
            }
        }
    }
}

fn echo_all(
    socket: &mut dyn EchoSocket,
    targets: &[Ipv4Addr],
    identifier: u16,
    timings: ProbeTimings,
) -> HashMap<Ipv4Addr, f64> {
    let mut rtts: HashMap<Ipv4Addr, f64> = HashMap::new();

    for (index, target) in targets.iter().enumerate() {
        let sequence: u16 = sequence_for(index);
        if let Some(rtt) = echo_one(socket, *target, identifier, sequence, timings.echo_timeout) {
            trace!("{target} replied in {rtt:.2} ms");
            rtts.insert(*target, rtt);
        }
        if index + 1 < targets.len() && !timings.echo_spacing.is_zero() {
            std::thread::sleep(timings.echo_spacing);
        }
    }

    debug!("{} of {} hosts answered ICMP echo", rtts.len(), targets.len());
    rtts
}

/// Sequence number of the `index`-th echo, wrapping after 65535.
///
/// Echoes go out one at a time, so a sequence only has to be unique among the
/// replies still in flight.
fn sequence_for(index: usize) -> u16 {
    (index % (usize::from(u16::MAX) + 1)) as u16
}

/// Round-trip time in milliseconds, or `None` on timeout or send failure.
fn echo_one(
    socket: &mut dyn EchoSocket,
    target: Ipv4Addr,
    identifier: u16,
    sequence: u16,
    timeout: Duration,
) -> Option<f64> {
    let request: Vec<u8> = icmp::create_echo_request(identifier, sequence).ok()?;
    let started: Instant = Instant::now();
    if let Err(e) = socket.send_to(&request, target) {
        trace!("echo request to {target} failed: {e}");
        return None;
    }

    let deadline: Instant = started + timeout;
    loop {
        let remaining: Duration = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return None;
        }
        match socket.recv(remaining) {
            Ok(Some((bytes, source))) if source == target => {
                let matched = IcmpPacket::new(&bytes)
                    .map(|packet| icmp::is_matching_reply(&packet, identifier, sequence).unwrap_or(false))
                    .unwrap_or(false);
                if matched {
                    return Some(started.elapsed().as_secs_f64() * 1000.0);
                }
            }
            Ok(Some(_)) => continue,
            Ok(None) => return None,
            Err(e) => {
                trace!("receive failed while waiting for {target}: {e}");
                return None;
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
