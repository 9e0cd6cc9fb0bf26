//! # IPv4 Arithmetic
//!
//! Addresses and masks are handled as big-endian `u32` values for every
//! computation and only turned back into [`Ipv4Addr`] at the edges.

use std::net::Ipv4Addr;

use crate::error::AddressError;

/// Interprets exactly four bytes as a big-endian IPv4 address.
pub fn address_to_int(bytes: &[u8]) -> Result<u32, AddressError> {
    let octets: [u8; 4] = bytes
        .try_into()
        .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
    Ok(u32::from_be_bytes(octets))
}

pub fn int_to_address(value: u32) -> Ipv4Addr {
    Ipv4Addr::from(value)
}

/// Same encoding as [`address_to_int`]. Does not check contiguity, see [`is_contiguous_mask`].
pub fn mask_to_int(mask: &[u8]) -> Result<u32, AddressError> {
    address_to_int(mask)
}

/// Returns the next address, or `addr` itself when it is `255.255.255.255`.
///
/// Saturating keeps range iteration from wrapping back to `0.0.0.0`.
pub fn increment_address(addr: Ipv4Addr) -> Ipv4Addr {
    int_to_address(u32::from(addr).saturating_add(1))
}

/// `true` when the mask is a run of high-order ones followed only by zeros.
pub fn is_contiguous_mask(mask: u32) -> bool {
    mask.leading_ones() + mask.trailing_zeros() == 32
}

pub fn prefix_to_mask(prefix: u8) -> Option<u32> {
    if prefix > 32 {
        return None;
    }
    Some(u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0))
}

pub fn mask_to_prefix(mask: u32) -> u8 {
    mask.leading_ones() as u8
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
