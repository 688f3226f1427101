//! Address sanity checking and hex-token parsing.

/// True when `addr` lies in the user half of a 48-bit canonical address
/// space (bit 47 and everything above it clear). Kernel-half and
/// non-canonical addresses fail, which keeps obviously bogus handles away
/// from the dump oracle.
pub fn is_canonical(addr: u64) -> bool {
    (addr >> 47).wrapping_add(1) & !1 == 0
}

/// Parse a hex token captured from dump text. Accepts the token with or
/// without its `0x` prefix, since the dump format is inconsistent about
/// which side of the label carries it.
pub fn parse_hex(token: &str) -> Option<u64> {
    let digits = token.strip_prefix("0x").unwrap_or(token);
    u64::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_half_is_canonical() {
        assert!(is_canonical(0x0));
        assert!(is_canonical(0x7f3e_9a41_b210));
        assert!(is_canonical(0x0000_7fff_ffff_ffff));
    }

    #[test]
    fn test_kernel_and_noncanonical_rejected() {
        assert!(!is_canonical(0x0000_8000_0000_0000));
        assert!(!is_canonical(0xffff_8000_0000_0000));
        assert!(!is_canonical(0xffff_ffff_ffff_ffff));
        assert!(!is_canonical(0xdead_beef_dead_beef));
    }

    #[test]
    fn test_parse_hex_with_and_without_prefix() {
        assert_eq!(parse_hex("0x7f3e9a41b210"), Some(0x7f3e_9a41_b210));
        assert_eq!(parse_hex("1d0a0031a2b9"), Some(0x1d0a_0031_a2b9));
        assert_eq!(parse_hex("not hex"), None);
        assert_eq!(parse_hex(""), None);
    }
}
