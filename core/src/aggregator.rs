use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by every probe task of one scan.
///
/// Tasks only ever increment. The totals are meant to be read once the
/// scanner has joined all tasks; the join provides the ordering, so relaxed
/// atomics are enough.
#[derive(Debug, Default)]
pub struct ScanResult {
    up: AtomicUsize,
    failed: AtomicUsize,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_up(&self) {
        self.up.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a probe that could not run. Kept apart from hosts that are down.
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> usize {
        self.up.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
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
