use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::error::ProbeError;
use sweepr_common::network::host::Host;
use tokio::net::TcpStream;
use tokio::time::timeout;

use super::{Probe, ProbeOutcome};

/// TCP connect probe over a fixed list of ports.
///
/// Ports are tried one after another. A completed handshake marks the port
/// open and the connection is dropped straight away; refusals and timeouts
/// mark it closed and the next port is tried.
pub struct ConnectProbe {
    ports: Arc<[u16]>,
    timeout: Duration,
}

impl ConnectProbe {
    pub fn new(ports: impl Into<Arc<[u16]>>, timeout: Duration) -> Self {
        Self {
            ports: ports.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Probe for ConnectProbe {
    async fn probe(&self, addr: Ipv4Addr) -> Result<ProbeOutcome, ProbeError> {
        let mut host: Host = Host::new(addr);

        for &port in self.ports.iter() {
            if is_port_open(SocketAddr::from((addr, port)), self.timeout).await {
                host.add_port(port);
            }
        }

        if host.has_open_ports() {
            Ok(ProbeOutcome::Up(host))
        } else {
            Ok(ProbeOutcome::Down(host))
        }
    }
}

pub async fn is_port_open(socket_addr: SocketAddr, probe_timeout: Duration) -> bool {
    match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(_)) | Err(_) => false,
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
