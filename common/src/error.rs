use std::net::Ipv4Addr;
use std::process::ExitStatus;

use thiserror::Error;

/// Raised by the IPv4 conversions when the input is not an IPv4 value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("expected 4 address bytes, got {0}")]
    InvalidLength(usize),
    #[error("{0} is not a contiguous subnet mask")]
    NonContiguousMask(Ipv4Addr),
}

/// Configuration errors. Any of these aborts the run before a probe is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid CIDR '{input}': {reason}")]
    InvalidCidr { input: String, reason: String },
    #[error("invalid port range {start}-{end}: start port is greater than end port")]
    InvalidPortRange { start: u16, end: u16 },
}

/// A probe could not be carried out at all.
///
/// This is different from a negative result (host down, port closed), which
/// is a successful probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to execute '{program}' against {addr}: {source}")]
    Execution {
        program: String,
        addr: Ipv4Addr,
        #[source]
        source: std::io::Error,
    },
    /// The program ran but reported that it could not send anything.
    #[error("'{program}' could not probe {addr} ({status}): {stderr}")]
    Failed {
        program: String,
        addr: Ipv4Addr,
        status: ExitStatus,
        stderr: String,
    },
}
