//! The scanning engine of `sweepr`.
//!
//! * [`probe`]: the per-address probe strategies (ping, TCP connect).
//! * [`aggregator`]: the counters shared by every probe task of a scan.
//! * [`scanner`]: enumerates a subnet, fans probes out and joins them.

pub mod aggregator;
pub mod probe;
pub mod scanner;
