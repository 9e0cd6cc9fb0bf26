//! # Subnet Model
//!
//! A [`Subnet`] is a network address plus a contiguous mask, parsed from CIDR
//! notation (e.g. `192.168.1.0/24`). It knows its size, its broadcast address
//! and which addresses a sweep should visit.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::{AddressError, TargetError};
use crate::network::ipv4::{self, increment_address, int_to_address};

/// Which addresses of a subnet are enumerated for probing.
///
/// Both policies start right after the network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangePolicy {
    /// Visits `network_size - 1` addresses, which stops before the broadcast address.
    #[default]
    SkipBroadcast,
    /// Visits `network_size` addresses, the broadcast address included.
    ThroughBroadcast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    network: Ipv4Addr,
    mask: Ipv4Addr,
}

impl Subnet {
    /// Builds a subnet from any address inside it and its mask.
    ///
    /// Host bits of `addr` are cleared, so `10.1.2.3` with `255.255.0.0`
    /// becomes `10.1.0.0/16`.
    pub fn new(addr: Ipv4Addr, mask: Ipv4Addr) -> Result<Self, AddressError> {
        let mask_u32: u32 = u32::from(mask);
        if !ipv4::is_contiguous_mask(mask_u32) {
            return Err(AddressError::NonContiguousMask(mask));
        }

        Ok(Self {
            network: int_to_address(u32::from(addr) & mask_u32),
            mask,
        })
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn mask(&self) -> Ipv4Addr {
        self.mask
    }

    pub fn prefix(&self) -> u8 {
        ipv4::mask_to_prefix(u32::from(self.mask))
    }

    /// The inverted mask: the number of addresses after the network address.
    pub fn network_size(&self) -> u32 {
        !u32::from(self.mask)
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        int_to_address(u32::from(self.network).wrapping_add(self.network_size()))
    }

    /// Number of addresses [`Subnet::hosts`] yields under `policy`.
    pub fn host_count(&self, policy: RangePolicy) -> u32 {
        match policy {
            RangePolicy::SkipBroadcast => self.network_size().saturating_sub(1),
            RangePolicy::ThroughBroadcast => self.network_size(),
        }
    }

    /// Lazily enumerates the addresses to probe, starting after the network address.
    pub fn hosts(&self, policy: RangePolicy) -> HostIter {
        HostIter {
            next: increment_address(self.network),
            remaining: self.host_count(policy),
        }
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix())
    }
}

impl FromStr for Subnet {
    type Err = TargetError;

    /// Parses CIDR notation like "192.168.1.0/24".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| TargetError::InvalidCidr {
            input: s.to_string(),
            reason,
        };

        let Some((ip_str, prefix_str)) = s.trim().split_once('/') else {
            return Err(invalid("missing '/<prefix>'".to_string()));
        };

        let ipv4_addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|e| invalid(format!("invalid IP '{ip_str}': {e}")))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|e| invalid(format!("invalid prefix '{prefix_str}': {e}")))?;

        let network = Ipv4Network::new(ipv4_addr, prefix).map_err(|e| invalid(e.to_string()))?;

        Subnet::new(network.network(), network.mask()).map_err(|e| invalid(e.to_string()))
    }
}

/// Iterator returned by [`Subnet::hosts`].
#[derive(Debug, Clone)]
pub struct HostIter {
    next: Ipv4Addr,
    remaining: u32,
}

impl Iterator for HostIter {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let current: Ipv4Addr = self.next;
        self.next = increment_address(current);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining as usize;
        (len, Some(len))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let Ok(skip) = u32::try_from(n) else {
            self.remaining = 0;
            return None;
        };
        if skip >= self.remaining {
            self.remaining = 0;
            return None;
        }
        self.next = int_to_address(u32::from(self.next).saturating_add(skip));
        self.remaining -= skip;
        self.next()
    }

    fn last(mut self) -> Option<Self::Item> {
        let skip = self.remaining.checked_sub(1)? as usize;
        self.nth(skip)
    }
}

impl ExactSizeIterator for HostIter {}

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
    use crate::network::ipv4::{mask_to_int, prefix_to_mask};

    fn subnet(s: &str) -> Subnet {
        s.parse().unwrap()
    }

    #[test]
    fn parses_cidr_into_network_and_mask() {
        let net = subnet("192.168.1.0/24");
        assert_eq!(net.network(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(net.mask(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(net.prefix(), 24);
        assert_eq!(net.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn parsing_clears_host_bits() {
        let net = subnet("172.16.5.10/20");
        assert_eq!(net.network(), Ipv4Addr::new(172, 16, 0, 0));
        assert_eq!(net.broadcast(), Ipv4Addr::new(172, 16, 15, 255));
    }

    #[test]
    fn rejects_malformed_cidr() {
        for input in [
            "not-a-cidr",
            "10.0.0.0",
            "10.0.0.1/33",
            "10.0.0.256/8",
            "10.0.0.0/abc",
            "10.0.0.0/-1",
            "::1/64",
            "",
        ] {
            let result = input.parse::<Subnet>();
            assert!(
                matches!(result, Err(TargetError::InvalidCidr { .. })),
                "'{input}' should not parse, got {result:?}"
            );
        }
    }

    #[test]
    fn new_rejects_non_contiguous_mask() {
        let mask = Ipv4Addr::new(255, 0, 255, 0);
        assert_eq!(
            Subnet::new(Ipv4Addr::new(10, 0, 0, 0), mask),
            Err(AddressError::NonContiguousMask(mask))
        );
    }

    #[test]
    fn network_size_is_inverted_mask_for_every_prefix() {
        for prefix in 0..=32u8 {
            let mask = int_to_address(prefix_to_mask(prefix).unwrap());
            let net = Subnet::new(Ipv4Addr::new(10, 20, 30, 40), mask).unwrap();
            let mask_u32 = mask_to_int(&mask.octets()).unwrap();
            assert_eq!(net.network_size(), !mask_u32);
        }
    }

    #[test]
    fn broadcast_is_network_plus_size_for_every_prefix() {
        for prefix in 0..=32u8 {
            let net = subnet(&format!("203.0.113.77/{prefix}"));
            let expected = u32::from(net.network()) + net.network_size();
            assert_eq!(u32::from(net.broadcast()), expected);
        }
    }

    #[test]
    fn boundary_prefixes() {
        let all = subnet("10.20.30.40/0");
        assert_eq!(all.network(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(all.network_size(), u32::MAX);
        assert_eq!(all.broadcast(), Ipv4Addr::BROADCAST);

        let pair = subnet("192.168.0.7/31");
        assert_eq!(pair.network(), Ipv4Addr::new(192, 168, 0, 6));
        assert_eq!(pair.network_size(), 1);
        assert_eq!(pair.broadcast(), Ipv4Addr::new(192, 168, 0, 7));

        let single = subnet("255.255.255.255/32");
        assert_eq!(single.network_size(), 0);
        assert_eq!(single.broadcast(), Ipv4Addr::BROADCAST);
    }

    #[test]
    fn slash_30_skips_network_and_broadcast_by_default() {
        let hosts: Vec<Ipv4Addr> = subnet("10.0.0.0/30").hosts(RangePolicy::SkipBroadcast).collect();
        assert_eq!(hosts, vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]);
    }

    #[test]
    fn slash_30_through_broadcast_yields_three() {
        let hosts: Vec<Ipv4Addr> =
            subnet("10.0.0.0/30").hosts(RangePolicy::ThroughBroadcast).collect();
        assert_eq!(
            hosts,
            vec![
                Ipv4Addr::new(10, 0, 0, 1),
                Ipv4Addr::new(10, 0, 0, 2),
                Ipv4Addr::new(10, 0, 0, 3),
            ]
        );
    }

    #[test]
    fn slash_24_visits_254_hosts() {
        let net = subnet("192.168.1.0/24");
        let mut hosts = net.hosts(RangePolicy::default());
        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts.next(), Some(Ipv4Addr::new(192, 168, 1, 1)));
        assert_eq!(hosts.last(), Some(Ipv4Addr::new(192, 168, 1, 254)));
    }

    #[test]
    fn tiny_subnets_yield_nothing_by_default() {
        assert_eq!(subnet("10.0.0.0/31").hosts(RangePolicy::SkipBroadcast).count(), 0);
        assert_eq!(subnet("10.0.0.1/32").hosts(RangePolicy::SkipBroadcast).count(), 0);
    }

    #[test]
    fn tiny_subnets_through_broadcast() {
        let pair: Vec<Ipv4Addr> = subnet("10.0.0.0/31")
            .hosts(RangePolicy::ThroughBroadcast)
            .collect();
        assert_eq!(pair, vec![Ipv4Addr::new(10, 0, 0, 1)]);
        assert_eq!(subnet("10.0.0.1/32").hosts(RangePolicy::ThroughBroadcast).count(), 0);
    }

    #[test]
    fn whole_address_space_endpoints() {
        let all = subnet("0.0.0.0/0");

        let skip = all.hosts(RangePolicy::SkipBroadcast);
        assert_eq!(skip.len(), (u32::MAX - 1) as usize);
        assert_eq!(skip.clone().next(), Some(Ipv4Addr::new(0, 0, 0, 1)));
        assert_eq!(skip.last(), Some(Ipv4Addr::new(255, 255, 255, 254)));

        let through = all.hosts(RangePolicy::ThroughBroadcast);
        assert_eq!(through.len(), u32::MAX as usize);
        assert_eq!(through.last(), Some(Ipv4Addr::BROADCAST));
    }

    #[test]
    fn top_of_address_space_never_wraps() {
        let hosts: Vec<Ipv4Addr> = subnet("255.255.255.252/30")
            .hosts(RangePolicy::ThroughBroadcast)
            .collect();
        assert_eq!(hosts.last(), Some(&Ipv4Addr::BROADCAST));
        assert!(hosts.iter().all(|ip| ip.octets()[0] == 255));
    }

    #[test]
    fn nth_skips_ahead() {
        let mut hosts = subnet("10.0.0.0/24").hosts(RangePolicy::SkipBroadcast);
        assert_eq!(hosts.nth(9), Some(Ipv4Addr::new(10, 0, 0, 10)));
        assert_eq!(hosts.len(), 244);
        assert_eq!(hosts.nth(1_000), None);
        assert_eq!(hosts.next(), None);
    }
}
