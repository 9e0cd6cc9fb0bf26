//! Reachability probe backed by the system `ping` utility.
//!
//! The result is classified from the exit status plus the presence of an echo
//! reply line (`ttl=`), which every mainstream `ping` prints untranslated.
//! Messages such as "Destination host unreachable" are never matched, because
//! their wording depends on the system locale.
//!
//! A `ping` that exits with an error status on Unix never got to send, so it
//! is reported as [`ProbeError::Failed`] instead of a down host.

use std::net::Ipv4Addr;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::config::Config;
use sweepr_common::debug;
use sweepr_common::error::ProbeError;
use sweepr_common::network::host::Host;
use tokio::process::Command;
use tokio::time::timeout;

use super::{Probe, ProbeOutcome};

const PING_PROGRAM: &str = "ping";
const REPLY_WAIT: Duration = Duration::from_secs(1);

pub struct PingProbe {
    program: String,
    count: u8,
    timeout: Duration,
}

impl PingProbe {
    pub fn new(count: u8, timeout: Duration) -> Self {
        Self {
            program: PING_PROGRAM.to_string(),
            count: count.max(1),
            timeout,
        }
    }

    /// Runs `program` instead of `ping`. It receives the same arguments.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl From<&Config> for PingProbe {
    fn from(cfg: &Config) -> Self {
        Self::new(cfg.ping_count, cfg.ping_timeout)
    }
}

#[async_trait]
impl Probe for PingProbe {
    async fn probe(&self, addr: Ipv4Addr) -> Result<ProbeOutcome, ProbeError> {
        let mut command = Command::new(&self.program);
        command
            .args(echo_args(self.count, addr))
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|source| ProbeError::Execution {
                program: self.program.clone(),
                addr,
                source,
            })?,
            Err(_elapsed) => {
                debug!("{} did not finish within {:?} for {addr}", self.program, self.timeout);
                return Ok(ProbeOutcome::Down(Host::new(addr)));
            }
        };

        if failed_to_run(output.status) {
            return Err(ProbeError::Failed {
                program: self.program.clone(),
                addr,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let summary = EchoSummary::interpret(output.status.success(), &stdout);
        let host = Host::new(addr).with_rtt(summary.rtt);

        if summary.replied {
            Ok(ProbeOutcome::Up(host))
        } else {
            Ok(ProbeOutcome::Down(host))
        }
    }
}

#[cfg(target_os = "windows")]
fn echo_args(count: u8, addr: Ipv4Addr) -> Vec<String> {
    vec![
        "-n".to_string(),
        count.to_string(),
        "-w".to_string(),
        REPLY_WAIT.as_millis().to_string(),
        addr.to_string(),
    ]
}

#[cfg(target_os = "macos")]
fn echo_args(count: u8, addr: Ipv4Addr) -> Vec<String> {
    vec![
        "-c".to_string(),
        count.to_string(),
        "-W".to_string(),
        REPLY_WAIT.as_millis().to_string(),
        addr.to_string(),
    ]
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn echo_args(count: u8, addr: Ipv4Addr) -> Vec<String> {
    vec![
        "-c".to_string(),
        count.to_string(),
        "-W".to_string(),
        REPLY_WAIT.as_secs().max(1).to_string(),
        addr.to_string(),
    ]
}

/// Unix `ping` exits 1 when no reply came back and 2 or more when it could
/// not send at all (missing privileges, bad arguments). A signal exit counts
/// as the latter.
#[cfg(not(target_os = "windows"))]
fn failed_to_run(status: ExitStatus) -> bool {
    !matches!(status.code(), Some(0) | Some(1))
}

/// Windows `ping` exits 1 for every kind of failure, so none is told apart.
#[cfg(target_os = "windows")]
fn failed_to_run(_status: ExitStatus) -> bool {
    false
}

/// What a finished `ping` run says about the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoSummary {
    pub replied: bool,
    pub rtt: Option<Duration>,
}

impl EchoSummary {
    /// Classifies captured `ping` output.
    ///
    /// Up requires both a successful exit and at least one echo reply line.
    /// Windows exits with 0 when a router answers "unreachable", which is why
    /// the exit status alone is not trusted.
    pub fn interpret(exit_success: bool, output: &str) -> Self {
        let no_reply = Self { replied: false, rtt: None };
        if !exit_success {
            return no_reply;
        }

        let lower: String = output.to_ascii_lowercase();
        let mut replies = lower.lines().filter(|line| line.contains("ttl=")).peekable();
        if replies.peek().is_none() {
            return no_reply;
        }

        Self {
            replied: true,
            rtt: replies.find_map(parse_rtt),
        }
    }
}

/// Reads the millisecond value after `time=` or `time<`.
fn parse_rtt(line: &str) -> Option<Duration> {
    let idx = line.find("time=").or_else(|| line.find("time<"))?;
    let digits: String = line[idx + 5..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let millis: f64 = digits.parse().ok()?;
    Some(Duration::from_micros((millis * 1_000.0).round() as u64))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
