//! Callback Bundle Reinterpretation
//!
//! The N-API layer wraps every raw native callback in a small heap record:
//! the environment handle, an opaque user-data slot, and the callback
//! function pointer, in that order. The record carries no tag and no length
//! prefix, so nothing here can verify that `addr` really points at one.
//! This is the probe's one raw-structure reinterpretation; if the pipeline
//! that produced the address stopped on the wrong kind of object, the
//! fields come back as silent garbage.

use byteorder::{ByteOrder, LE};

use crate::error::ProbeError;
use crate::memory::RawMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackBundle {
    pub env: u64,
    pub cb_data: u64,
    pub cb: u64,
}

impl CallbackBundle {
    /// Three consecutive machine words.
    pub const SIZE: usize = 24;

    /// Read the bundle at `addr`. The field order is fixed by the record's
    /// declaration; reading out of order corrupts the result with no error.
    pub fn read_from(mem: &dyn RawMemory, addr: u64) -> Result<Self, ProbeError> {
        let bytes = mem.read_bytes(addr, Self::SIZE)?;
        Ok(Self {
            env: LE::read_u64(&bytes[0..8]),
            cb_data: LE::read_u64(&bytes[8..16]),
            cb: LE::read_u64(&bytes[16..24]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemory;

    #[test]
    fn test_field_order() {
        let mut mem = MockMemory::new();
        mem.put_word(0x7f00_0000_0000, 0x1111); // env
        mem.put_word(0x7f00_0000_0008, 0x2222); // cb_data
        mem.put_word(0x7f00_0000_0010, 0x3333); // cb
        let bundle = CallbackBundle::read_from(&mem, 0x7f00_0000_0000).unwrap();
        assert_eq!(bundle.env, 0x1111);
        assert_eq!(bundle.cb_data, 0x2222);
        assert_eq!(bundle.cb, 0x3333);
    }

    #[test]
    fn test_unreadable_bundle() {
        let mem = MockMemory::new();
        assert!(CallbackBundle::read_from(&mem, 0x7f00_0000_0000).is_err());
    }
}
