use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use colored::*;
use tracing::{Instrument, Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{colors, format, print, spinner};
use sweepr_common::{config::Config, success, warn};
use sweepr_core::probe::ProbeOutcome;
use sweepr_core::scanner::{self, OutcomeCallback, ScanMode, ScanReport};

pub async fn sweep(target: &str, mode: ScanMode, cfg: &Config) -> anyhow::Result<()> {
    let span: Span = match cfg.quiet {
        0 => info_span!("sweep", indicatif.pb_show = true),
        _ => info_span!("sweep"),
    };
    span.pb_set_style(&spinner::sweep_style());

    if cfg.quiet == 0 {
        print::print_status(format!("Target network: {target}"));
        if let ScanMode::Tcp(ports) = mode {
            print::print_status(format!("Ports: {ports} ({} per host)", ports.len()));
        }
    }

    let on_outcome: OutcomeCallback = print_outcomes(mode, cfg.quiet, span.clone());
    let report: ScanReport = scanner::perform_scan(target, mode, cfg, Some(on_outcome))
        .instrument(span.clone())
        .await?;

    drop(span);

    sweep_ends(&report, cfg);
    Ok(())
}

/// Prints per-host lines as they come in and keeps the spinner message current.
fn print_outcomes(mode: ScanMode, q_level: u8, span: Span) -> OutcomeCallback {
    let probed = AtomicUsize::new(0);
    let up = AtomicUsize::new(0);

    Arc::new(move |outcome: &ProbeOutcome| {
        let probed_now: usize = probed.fetch_add(1, Ordering::Relaxed) + 1;
        let up_now: usize = if outcome.is_up() {
            up.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            up.load(Ordering::Relaxed)
        };
        spinner::report_progress(&span, probed_now, up_now);

        match mode {
            ScanMode::Ping => {
                if outcome.is_up() && q_level < 2 {
                    print::print(&format::host_up(outcome.host()));
                }
            }
            ScanMode::Tcp(_) => {
                if q_level == 0 || (q_level == 1 && outcome.is_up()) {
                    print::print(&format::host_ports(outcome.host()));
                }
            }
        }
    })
}

fn sweep_ends(report: &ScanReport, cfg: &Config) {
    if report.failures > 0 {
        warn!(
            "{} of {} probes could not be executed",
            report.failures, report.probed
        );
    }

    if report.hosts_up == 0 {
        print::header("zero hosts up", cfg.quiet);
    }

    print_summary(report, cfg);
}

fn print_summary(report: &ScanReport, cfg: &Config) {
    let hosts_up: ColoredString = format!("{} hosts up", report.hosts_up).bold().green();
    let total_time: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();
    let output: String = format!(
        "Sweep of {} complete: {hosts_up} out of {} probed in {total_time}",
        report.subnet, report.probed
    )
    .color(colors::TEXT_DEFAULT)
    .to_string();

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
        }
        _ => success!("{}", output),
    }
}
