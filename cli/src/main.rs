mod commands;
mod terminal;

use commands::{CommandLine, Commands, sweep};
use sweepr_common::network::ports::PortRange;
use sweepr_core::scanner::ScanMode;
use terminal::{print, spinner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    let cfg = commands.to_config();

    spinner::init_logging();
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Ping { target, .. } => {
            print::header("starting ping sweep", cfg.quiet);
            sweep::sweep(&target, ScanMode::Ping, &cfg).await
        }
        Commands::Tcp {
            target,
            start_port,
            end_port,
            ..
        } => {
            print::header("starting connect scan", cfg.quiet);
            let ports = PortRange::new(start_port, end_port)?;
            sweep::sweep(&target, ScanMode::Tcp(ports), &cfg).await
        }
    }
}
