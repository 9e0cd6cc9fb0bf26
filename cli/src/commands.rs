pub mod sweep;

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use sweepr_common::config::{
    Config, DEFAULT_CONCURRENCY, DEFAULT_CONNECT_TIMEOUT, DEFAULT_PING_COUNT, DEFAULT_PING_TIMEOUT,
};
use sweepr_common::network::subnet::RangePolicy;

const DEFAULT_TARGET: &str = "192.168.1.0/24";

#[derive(Parser)]
#[command(name = "sweepr", version)]
#[command(about = "A concurrent ping sweeper and TCP connect scanner.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Print less (repeat for even less)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Maximum number of probes in flight
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY, global = true)]
    pub concurrency: usize,

    /// Also probe the broadcast address of the network
    #[arg(long, global = true)]
    pub include_broadcast: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sweep a network for hosts answering ping
    #[command(alias = "p")]
    Ping {
        /// Network in CIDR notation
        #[arg(default_value = DEFAULT_TARGET)]
        target: String,
        /// Echo requests sent to each host
        #[arg(long, default_value_t = DEFAULT_PING_COUNT)]
        ping_count: u8,
        /// Seconds before a single ping process is given up on
        #[arg(long, default_value_t = DEFAULT_PING_TIMEOUT.as_secs())]
        ping_timeout: u64,
    },
    /// Scan every host of a network for open TCP ports
    #[command(alias = "t")]
    Tcp {
        /// Network in CIDR notation
        #[arg(default_value = DEFAULT_TARGET)]
        target: String,
        /// First port to scan
        #[arg(short, long, default_value_t = 1)]
        start_port: u16,
        /// Last port to scan (inclusive)
        #[arg(short, long, default_value_t = 1)]
        end_port: u16,
        /// Connect timeout per port, in milliseconds
        #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT.as_millis() as u64)]
        timeout_ms: u64,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Config {
        let range_policy = if self.include_broadcast {
            RangePolicy::ThroughBroadcast
        } else {
            RangePolicy::SkipBroadcast
        };

        let mut cfg = Config {
            no_banner: self.no_banner,
            quiet: self.quiet,
            concurrency: self.concurrency,
            range_policy,
            ..Config::default()
        };

        match &self.command {
            Commands::Ping {
                ping_count,
                ping_timeout,
                ..
            } => {
                cfg.ping_count = *ping_count;
                cfg.ping_timeout = Duration::from_secs(*ping_timeout);
            }
            Commands::Tcp { timeout_ms, .. } => {
                cfg.connect_timeout = Duration::from_millis(*timeout_ms);
            }
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_defaults() {
        let cli = CommandLine::try_parse_from(["sweepr", "ping"]).unwrap();
        let cfg = cli.to_config();
        assert!(matches!(cli.command, Commands::Ping { ref target, .. } if target == DEFAULT_TARGET));
        assert_eq!(cfg.ping_count, DEFAULT_PING_COUNT);
        assert_eq!(cfg.range_policy, RangePolicy::SkipBroadcast);
        assert_eq!(cfg.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn tcp_flags_and_globals() {
        let cli = CommandLine::try_parse_from([
            "sweepr",
            "t",
            "10.0.0.0/30",
            "-s",
            "20",
            "-e",
            "25",
            "--timeout-ms",
            "50",
            "-qq",
            "--include-broadcast",
            "-c",
            "8",
        ])
        .unwrap();
        let cfg = cli.to_config();

        match cli.command {
            Commands::Tcp {
                target,
                start_port,
                end_port,
                ..
            } => {
                assert_eq!(target, "10.0.0.0/30");
                assert_eq!((start_port, end_port), (20, 25));
            }
            Commands::Ping { .. } => panic!("expected the tcp command"),
        }
        assert_eq!(cfg.connect_timeout, Duration::from_millis(50));
        assert_eq!(cfg.quiet, 2);
        assert_eq!(cfg.concurrency, 8);
        assert_eq!(cfg.range_policy, RangePolicy::ThroughBroadcast);
    }

    #[test]
    fn ping_tuning_flags() {
        let cli = CommandLine::try_parse_from([
            "sweepr",
            "p",
            "172.16.0.0/28",
            "--ping-count",
            "4",
            "--ping-timeout",
            "9",
        ])
        .unwrap();
        let cfg = cli.to_config();

        assert_eq!(cfg.ping_count, 4);
        assert_eq!(cfg.ping_timeout, Duration::from_secs(9));
        assert_eq!(cfg.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(CommandLine::try_parse_from(["sweepr", "tcp", "-e", "70000"]).is_err());
    }
}
