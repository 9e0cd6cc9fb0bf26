//! The per-address probe strategies.
//!
//! The scanner only talks to the [`Probe`] trait, so the reachability sweep
//! and the connect scan share one orchestration path:
//!
//! * [`PingProbe`] asks the system `ping` utility whether a host answers echo requests.
//! * [`ConnectProbe`] opens (and immediately drops) TCP connections to a list of ports.
//!
//! A negative answer is an ordinary [`ProbeOutcome::Down`]. Only a probe that
//! cannot be carried out at all returns a [`ProbeError`].

use std::net::Ipv4Addr;

use async_trait::async_trait;
use sweepr_common::error::ProbeError;
use sweepr_common::network::host::Host;

mod ping;
mod tcp;

pub use ping::{EchoSummary, PingProbe};
pub use tcp::ConnectProbe;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Up(Host),
    Down(Host),
}

impl ProbeOutcome {
    pub fn is_up(&self) -> bool {
        matches!(self, ProbeOutcome::Up(_))
    }

    pub fn host(&self) -> &Host {
        match self {
            ProbeOutcome::Up(host) | ProbeOutcome::Down(host) => host,
        }
    }

    pub fn into_host(self) -> Host {
        match self {
            ProbeOutcome::Up(host) | ProbeOutcome::Down(host) => host,
        }
    }
}

#[async_trait]
pub trait Probe: Send + Sync {
    /// Probes one address and reports whether it counts as up.
    async fn probe(&self, addr: Ipv4Addr) -> Result<ProbeOutcome, ProbeError>;
}
