//! Memory Image Source
//!
//! A flat memory capture loaded at a known base address, so recorded
//! sessions can be analyzed without attaching to the live process.

use std::path::Path;

use super::RawMemory;
use crate::error::ProbeError;

pub struct ImageMemory {
    base: u64,
    data: Vec<u8>,
}

impl ImageMemory {
    pub fn new(data: Vec<u8>, base: u64) -> Self {
        Self { base, data }
    }

    /// Load a raw image file captured at `base`.
    pub fn load(path: &Path, base: u64) -> Result<Self, ProbeError> {
        let data = std::fs::read(path).map_err(|source| ProbeError::Artifact {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(data, base))
    }
}

impl RawMemory for ImageMemory {
    fn read_bytes(&self, addr: u64, len: usize) -> Result<Vec<u8>, ProbeError> {
        let offset = addr
            .checked_sub(self.base)
            .ok_or(ProbeError::Unreadable { addr, size: len })? as usize;
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(ProbeError::Unreadable { addr, size: len })?;
        Ok(self.data[offset..end].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds_read() {
        let image = ImageMemory::new(vec![0x41, 0x42, 0x43, 0x44], 0x1000);
        assert_eq!(image.read_bytes(0x1001, 2).unwrap(), vec![0x42, 0x43]);
    }

    #[test]
    fn test_out_of_bounds_read() {
        let image = ImageMemory::new(vec![0; 8], 0x1000);
        assert!(image.read_bytes(0x0fff, 2).is_err());
        assert!(image.read_bytes(0x1004, 8).is_err());
        assert!(image.read_u64(0x2000).is_err());
    }

    #[test]
    fn test_read_u64_little_endian() {
        let image = ImageMemory::new(vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08], 0x1000);
        assert_eq!(image.read_u64(0x1000).unwrap(), 0x0807_0605_0403_0201);
    }
}
