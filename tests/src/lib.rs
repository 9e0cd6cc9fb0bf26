//! End-to-end checks of the scanning engine against loopback.

#[cfg(test)]
mod scan;
