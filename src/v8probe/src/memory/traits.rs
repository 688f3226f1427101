//! Raw Memory Trait
//!
//! Core abstraction for reading words out of the target address space.

use byteorder::{ByteOrder, LE};

use crate::error::ProbeError;

/// Trait for reading raw memory (in-process, image file, mock).
pub trait RawMemory {
    /// Read bytes from a virtual address
    fn read_bytes(&self, addr: u64, len: usize) -> Result<Vec<u8>, ProbeError>;

    /// Read a u64 from memory
    fn read_u64(&self, addr: u64) -> Result<u64, ProbeError> {
        let bytes = self.read_bytes(addr, 8)?;
        Ok(LE::read_u64(&bytes))
    }
}
