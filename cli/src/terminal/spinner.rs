use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::{IndicatifFilter, hide_indicatif_span_fields};
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::DefaultFields;
use tracing_subscriber::prelude::*;

use crate::terminal::{colors, logging::SweeprFormatter};

const DEFAULT_LOG_FILTER: &str = "info";

/// Installs the global subscriber.
///
/// Log lines are written through the progress bar layer so they never tear
/// the spinner. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let indicatif_layer = IndicatifLayer::new()
        .with_span_field_formatter(hide_indicatif_span_fields(DefaultFields::new()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(SweeprFormatter)
        .with_writer(indicatif_layer.get_stdout_writer());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .init();
}

pub fn sweep_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .map(|style| {
            style.tick_strings(&[
                "▁▁▁▁▁",
                "▁▂▂▂▁",
                "▁▄▂▄▁",
                "▂▄▆▄▂",
                "▄▆█▆▄",
                "▂▄▆▄▂",
                "▁▄▂▄▁",
                "▁▂▂▂▁",
            ])
        })
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

pub fn report_progress(span: &Span, probed: usize, up: usize) {
    let message: String = format!(
        "Probed {} addresses, {} so far...",
        probed.to_string().bold(),
        format!("{up} up").green().bold()
    )
    .color(colors::TEXT_DEFAULT)
    .to_string();

    span.pb_set_message(&message);
}
