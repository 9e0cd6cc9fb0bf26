use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

/// What a single probe learned about one address.
///
/// Created by the probe task that owns it and handed out once when the task
/// finishes; it is never shared between tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub addr: Ipv4Addr,
    /// Open TCP ports, in the order they were probed.
    pub active_ports: Vec<u16>,
    /// First echo round-trip time reported by the reachability probe.
    pub rtt: Option<Duration>,
}

impl Host {
    pub fn new(addr: Ipv4Addr) -> Self {
        Self {
            addr,
            active_ports: Vec::new(),
            rtt: None,
        }
    }

    pub fn with_rtt(mut self, rtt: Option<Duration>) -> Self {
        self.rtt = rtt;
        self
    }

    pub fn add_port(&mut self, port: u16) {
        self.active_ports.push(port);
    }

    pub fn has_open_ports(&self) -> bool {
        !self.active_ports.is_empty()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ports: Vec<String> = self.active_ports.iter().map(u16::to_string).collect();
        write!(f, "{} [{}]", self.addr, ports.join(", "))
    }
}
