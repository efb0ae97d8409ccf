//! Reverse hostname resolution.
//!
//! A PTR query is first sent to the mDNS group. When that yields nothing and
//! the fallback is enabled, the system resolver is asked.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::time::{Instant, timeout, timeout_at};
use tracing::{debug, trace};
use trust_dns_resolver::TokioAsyncResolver;
use trust_dns_resolver::error::ResolveError;

use netcensus_common::config::ProbeTimings;
use netcensus_common::scanning::HostnameLookup;
use netcensus_protocols::{dns, mdns};

const MDNS_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);
const MDNS_PORT: u16 = 5353;
const LEGACY_TIMEOUT: Duration = Duration::from_secs(2);
const RECV_BUFFER_SIZE: usize = 4096;

/// One way of turning an address into a hostname.
#[async_trait]
pub trait ReverseStrategy: Send + Sync {
    async fn reverse(&self, address: Ipv4Addr) -> Option<String>;
}

/// Tries each strategy in order and keeps the first name found.
pub struct HostnameResolver {
    strategies: Vec<Box<dyn ReverseStrategy>>,
}

impl HostnameResolver {
    /// A legacy fallback that cannot be configured from the system is
    /// dropped with a debug log.
    pub fn new(mdns: bool, legacy: bool, timings: ProbeTimings) -> Self {
        let mut strategies: Vec<Box<dyn ReverseStrategy>> = Vec::new();
        if mdns {
            strategies.push(Box::new(MdnsQuery::new(timings.mdns_timeout)));
        }
        if legacy {
            match SystemResolverQuery::from_system_conf() {
                Ok(query) => strategies.push(Box::new(query)),
                Err(e) => debug!("System resolver unavailable: {e}"),
            }
        }
        Self::with_strategies(strategies)
    }

    pub fn with_strategies(strategies: Vec<Box<dyn ReverseStrategy>>) -> Self {
        Self { strategies }
    }
}

#[async_trait]
impl HostnameLookup for HostnameResolver {
    async fn lookup(&self, address: Ipv4Addr) -> Option<String> {
        for strategy in &self.strategies {
            if let Some(name) = strategy.reverse(address).await {
                return Some(name);
            }
        }
        None
    }
}

/// PTR query sent to a multicast group from an ephemeral port, which makes
/// responders answer with a legacy unicast reply.
pub struct MdnsQuery {
    group: SocketAddrV4,
    wait: Duration,
}

impl MdnsQuery {
    pub fn new(wait: Duration) -> Self {
        Self::with_group(SocketAddrV4::new(MDNS_GROUP, MDNS_PORT), wait)
    }

    pub fn with_group(group: SocketAddrV4, wait: Duration) -> Self {
        Self { group, wait }
    }

    async fn query(&self, address: Ipv4Addr) -> anyhow::Result<Option<String>> {
        let id: u16 = rand::random();
        let query: Vec<u8> = dns::create_ptr_packet(address, id, false)?;
        let socket: UdpSocket = UdpSocket::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))).await?;
        socket.send_to(&query, self.group).await?;

        let deadline: Instant = Instant::now() + self.wait;
        let mut buf = vec![0u8; RECV_BUFFER_SIZE];
        while let Ok(received) = timeout_at(deadline, socket.recv_from(&mut buf)).await {
            let (len, source) = received?;
            match mdns::first_ptr_answer(&buf[..len], id) {
                Ok(Some(name)) => {
                    debug!("{address} is {name} (mDNS answer from {source})");
                    return Ok(Some(name));
                }
                Ok(None) => continue,
                Err(e) => trace!("Ignoring datagram from {source}: {e}"),
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl ReverseStrategy for MdnsQuery {
    async fn reverse(&self, address: Ipv4Addr) -> Option<String> {
        match self.query(address).await {
            Ok(name) => name,
            Err(e) => {
                trace!("mDNS lookup of {address} failed: {e}");
                None
            }
        }
    }
}

/// Reverse lookup through the system's DNS configuration.
///
/// Only `/etc/resolv.conf` and the hosts file are read. NSS sources such as
/// nss-mdns, LDAP or systemd-resolved's own modules are not consulted, so a
/// name `getent hosts` can find may still be missing here.
pub struct SystemResolverQuery {
    resolver: TokioAsyncResolver,
}

impl SystemResolverQuery {
    pub fn from_system_conf() -> Result<Self, ResolveError> {
        Ok(Self {
            resolver: TokioAsyncResolver::tokio_from_system_conf()?,
        })
    }
}

#[async_trait]
impl ReverseStrategy for SystemResolverQuery {
    async fn reverse(&self, address: Ipv4Addr) -> Option<String> {
        let lookup = match timeout(LEGACY_TIMEOUT, self.resolver.reverse_lookup(IpAddr::V4(address))).await {
            Ok(Ok(lookup)) => lookup,
            Ok(Err(e)) => {
                trace!("Reverse lookup of {address} failed: {e}");
                return None;
            }
            Err(_) => {
                trace!("Reverse lookup of {address} timed out");
                return None;
            }
        };

        lookup
            .iter()
            .map(|name| name.to_string().trim_end_matches('.').to_string())
            .find(|name| !name.is_empty())
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
