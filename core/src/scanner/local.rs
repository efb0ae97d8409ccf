//! An ARP sweep of a **local area network (LAN)**.
//!
//! One who-has request is broadcast per host of the range, paced by a fixed
//! spacing, and replies are collected until a window after the last request
//! has elapsed. Opening the datalink channel requires raw-socket privileges.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use pnet::ipnetwork::Ipv4Network;
use pnet::util::MacAddr;
use tracing::{debug, info, trace};

use netcensus_common::config::ProbeTimings;
use netcensus_common::error::ScanError;
use netcensus_common::network::interface::{self, NetworkInterfaceExtension};
use netcensus_common::network::range;
use netcensus_common::scanning::HostDiscovery;
use netcensus_protocols::arp;

const READ_TIMEOUT: Duration = Duration::from_millis(10);

type EthernetPair = (Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>);

pub struct ArpScanner {
    timings: ProbeTimings,
}

impl ArpScanner {
    pub fn new(timings: ProbeTimings) -> Self {
        Self { timings }
    }
}

#[async_trait]
impl HostDiscovery for ArpScanner {
    async fn discover(
        &self,
        network: Ipv4Network,
        interface: Option<&str>,
    ) -> Result<HashMap<Ipv4Addr, MacAddr>, ScanError> {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        let intf: NetworkInterface = match interface {
            Some(name) => interface::find_by_name(&interfaces, name)?,
            None => interface::find_for_network(&interfaces, network)?,
        };
        let ctx = SweepContext::from_interface(&intf, network)?;
        let timings: ProbeTimings = self.timings;

        info!("Sweeping {network} on {}", intf.name);
        tokio::task::spawn_blocking(move || {
            let (tx, rx) = open_eth_channel(&intf, &channel_config(), datalink::channel)?;
            Ok(sweep(tx, rx, &ctx, range::host_iter(network), timings))
        })
        .await
        .map_err(|e| ScanError::Io(std::io::Error::other(e)))?
    }
}

/// Addressing used for requests and for filtering replies.
#[derive(Debug, Clone, Copy)]
struct SweepContext {
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    network: Ipv4Network,
}

impl SweepContext {
    fn from_interface(intf: &NetworkInterface, network: Ipv4Network) -> Result<Self, ScanError> {
        let src_mac: MacAddr = intf
            .mac
            .filter(|mac| *mac != MacAddr::zero())
            .ok_or_else(|| ScanError::NoMacAddress(intf.name.clone()))?;
        let src_addr: Ipv4Addr = intf
            .get_ipv4_net()
            .ok_or_else(|| ScanError::NoIpv4Address(intf.name.clone()))?
            .ip();
        Ok(Self {
            src_mac,
            src_addr,
            network,
        })
    }
}

fn open_eth_channel<F>(intf: &NetworkInterface, cfg: &Config, channel_opener: F) -> Result<EthernetPair, ScanError>
where
    F: FnOnce(&NetworkInterface, Config) -> std::io::Result<Channel>,
{
    match channel_opener(intf, *cfg) {
        Ok(Channel::Ethernet(tx, rx)) => {
            debug!("Datalink channel open on {}", intf.name);
            Ok((tx, rx))
        }
        Ok(_) => Err(ScanError::Channel {
            interface: intf.name.clone(),
            reason: "non-ethernet channel".to_string(),
        }),
        Err(e) => Err(ScanError::from_channel_error(&intf.name, e)),
    }
}

fn channel_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    }
}

fn sweep(
    mut tx: Box<dyn DataLinkSender>,
    mut rx: Box<dyn DataLinkReceiver>,
    ctx: &SweepContext,
    targets: impl Iterator<Item = Ipv4Addr>,
    timings: ProbeTimings,
) -> HashMap<Ipv4Addr, MacAddr> {
    let mut replies: HashMap<Ipv4Addr, MacAddr> = HashMap::new();
    let mut sent: usize = 0;

    for target in targets {
        match arp::create_request(ctx.src_mac, ctx.src_addr, target) {
            Ok(frame) => {
                if let Some(Err(e)) = tx.send_to(&frame, None) {
                    trace!("ARP request to {target} failed: {e}");
                }
                sent += 1;
            }
            Err(e) => trace!("Skipping {target}: {e}"),
        }
        listen_until(rx.as_mut(), Instant::now() + timings.arp_spacing, ctx, &mut replies);
    }

    listen_until(rx.as_mut(), Instant::now() + timings.arp_window, ctx, &mut replies);
    debug!("Sent {sent} ARP requests, {} hosts replied", replies.len());
    replies
}

fn listen_until(
    rx: &mut dyn DataLinkReceiver,
    deadline: Instant,
    ctx: &SweepContext,
    replies: &mut HashMap<Ipv4Addr, MacAddr>,
) {
    while Instant::now() < deadline {
        if let Ok(frame) = rx.next() {
            record_reply(frame, ctx, replies);
        }
    }
}

fn record_reply(frame: &[u8], ctx: &SweepContext, replies: &mut HashMap<Ipv4Addr, MacAddr>) {
    let Some(reply) = arp::parse_reply(frame) else {
        return;
    };
    if reply.sender_mac == ctx.src_mac || !ctx.network.contains(reply.sender_addr) {
        return;
    }
    if let Some(previous) = replies.insert(reply.sender_addr, reply.sender_mac) {
        if previous != reply.sender_mac {
            debug!(
                "{} answered from {} after {}",
                reply.sender_addr, reply.sender_mac, previous
            );
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
