use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ScanError;

/// Parses CIDR notation, masking off any host bits.
///
/// `192.168.1.5/24` yields `192.168.1.0/24`. An address without a prefix is
/// taken as a single host (`/32`).
pub fn parse_cidr(input: &str) -> Result<Ipv4Network, ScanError> {
    let trimmed: &str = input.trim();
    let parsed: Ipv4Network = trimmed
        .parse()
        .map_err(|e| ScanError::invalid_subnet(trimmed, e))?;
    masked(parsed.ip(), parsed.prefix()).map_err(|e| ScanError::invalid_subnet(trimmed, e))
}

/// Builds the network enclosing `ip` for the given prefix length.
pub fn masked(ip: Ipv4Addr, prefix: u8) -> Result<Ipv4Network, pnet::ipnetwork::IpNetworkError> {
    let net = Ipv4Network::new(ip, prefix)?;
    Ipv4Network::new(net.network(), prefix)
}

/// Iterates over the addresses worth probing in `net`.
///
/// The network and broadcast addresses are skipped unless the prefix is /31
/// or /32, where every address is a host.
pub fn host_iter(net: Ipv4Network) -> impl Iterator<Item = Ipv4Addr> {
    let start: u32 = net.network().into();
    let end: u32 = net.broadcast().into();
    let (first, last) = if net.prefix() >= 31 {
        (start, end)
    } else {
        (start + 1, end - 1)
    };
    (first..=last).map(Ipv4Addr::from)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cidr_masks_host_bits() {
        let net = parse_cidr("192.168.1.5/24").unwrap();
        assert_eq!(net.ip(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(net.prefix(), 24);
        assert_eq!(net.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn parse_cidr_contains_every_implied_address() {
        let net = parse_cidr("10.20.30.200/22").unwrap();
        assert_eq!(net.to_string(), "10.20.28.0/22");
        assert!(net.contains(Ipv4Addr::new(10, 20, 30, 200)));
        assert!(net.contains(Ipv4Addr::new(10, 20, 28, 0)));
        assert!(net.contains(Ipv4Addr::new(10, 20, 31, 255)));
        assert!(!net.contains(Ipv4Addr::new(10, 20, 32, 0)));
    }

    #[test]
    fn parse_cidr_without_prefix_is_single_host() {
        let net = parse_cidr("192.168.1.7").unwrap();
        assert_eq!(net.to_string(), "192.168.1.7/32");
    }

    #[test]
    fn parse_cidr_rejects_garbage() {
        assert!(matches!(
            parse_cidr("192.168.1.0/33"),
            Err(ScanError::InvalidSubnet { .. })
        ));
        assert!(matches!(
            parse_cidr("not-a-subnet"),
            Err(ScanError::InvalidSubnet { .. })
        ));
        assert!(parse_cidr("").is_err());
    }

    #[test]
    fn host_iter_skips_network_and_broadcast() {
        let net = parse_cidr("192.168.1.0/30").unwrap();
        let hosts: Vec<Ipv4Addr> = host_iter(net).collect();
        assert_eq!(
            hosts,
            vec![Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(192, 168, 1, 2)]
        );
    }

    #[test]
    fn host_iter_keeps_point_to_point_and_single_hosts() {
        assert_eq!(host_iter(parse_cidr("10.0.0.0/31").unwrap()).count(), 2);
        assert_eq!(host_iter(parse_cidr("10.0.0.9/32").unwrap()).count(), 1);
        assert_eq!(host_iter(parse_cidr("10.0.0.0/24").unwrap()).count(), 254);
    }
}
