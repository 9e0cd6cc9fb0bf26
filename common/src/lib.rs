//! Shared building blocks for `sweepr`.
//!
//! * [`network`]: IPv4 arithmetic, the subnet model, host records and port ranges.
//! * [`config`]: runtime knobs handed from the command line to the scanners.
//! * [`error`]: typed errors raised while parsing targets and running probes.
//! * [`log`]: status macros (`info!`, `success!`, `warn!`, `error!`) on top of `tracing`.

pub mod config;
pub mod error;
pub mod log;
pub mod network;

pub use tracing;
