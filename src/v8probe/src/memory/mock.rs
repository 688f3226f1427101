//! Sparse Mock Memory
//!
//! Word-addressed mock so tests can place synthetic records at scattered
//! addresses without building a contiguous image.

use std::collections::HashMap;

use super::RawMemory;
use crate::error::ProbeError;

#[derive(Default)]
pub struct MockMemory {
    bytes: HashMap<u64, u8>,
}

impl MockMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a little-endian u64 at `addr`.
    pub fn put_word(&mut self, addr: u64, value: u64) {
        for (i, byte) in value.to_le_bytes().iter().enumerate() {
            self.bytes.insert(addr + i as u64, *byte);
        }
    }
}

impl RawMemory for MockMemory {
    fn read_bytes(&self, addr: u64, len: usize) -> Result<Vec<u8>, ProbeError> {
        (0..len as u64)
            .map(|i| self.bytes.get(&(addr + i)).copied())
            .collect::<Option<Vec<u8>>>()
            .ok_or(ProbeError::Unreadable { addr, size: len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_word_round_trip() {
        let mut mem = MockMemory::new();
        mem.put_word(0x7f00_0000_1000, 0xdead_beef_cafe_f00d);
        assert_eq!(mem.read_u64(0x7f00_0000_1000).unwrap(), 0xdead_beef_cafe_f00d);
        assert!(mem.read_u64(0x7f00_0000_2000).is_err());
    }
}
