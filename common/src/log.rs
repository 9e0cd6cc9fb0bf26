//! Status macros used across the workspace.
//!
//! They forward to `tracing` so the binary decides how (and whether) they are
//! rendered. `success!` is an `INFO` event on its own target, which lets the
//! terminal formatter give it a distinct symbol.

pub const SUCCESS_TARGET: &str = "sweepr::success";
pub const PRINT_TARGET: &str = "sweepr::print";

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)*)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::tracing::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
