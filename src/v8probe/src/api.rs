//! String-Level Entry Surface
//!
//! Argument validation that runs before any pointer work. Rejection here is
//! a hard error, distinct from every pipeline sentinel.

use crate::error::ProbeError;

/// Parse a handle argument as received from the caller surface: decimal, or
/// hex with an `0x` prefix.
pub fn parse_handle(arg: &str) -> Result<u64, ProbeError> {
    let trimmed = arg.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => trimmed.parse::<u64>(),
    };
    parsed.map_err(|_| ProbeError::ExpectedNumber(arg.to_string()))
}
