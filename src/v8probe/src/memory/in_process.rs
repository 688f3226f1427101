//! In-Process Memory Source
//!
//! Reads straight out of the probe's own address space, for use when the
//! probe is loaded into the target process.
//!
//! The canonical check is the only guard. An address that passes it but is
//! not mapped still faults, and an address that went stale between two hops
//! (the collector moved the object under us) reads whatever lives there now.
//! Objects are not pinned between hops; that staleness window is accepted.

use super::RawMemory;
use crate::addr::is_canonical;
use crate::error::ProbeError;

pub struct InProcessMemory;

impl RawMemory for InProcessMemory {
    fn read_bytes(&self, addr: u64, len: usize) -> Result<Vec<u8>, ProbeError> {
        if addr == 0 || !is_canonical(addr) {
            return Err(ProbeError::Unreadable { addr, size: len });
        }
        // SAFETY: addr passed the canonical check and was recovered from a
        // dump of a live object. Nothing beyond that is verified; this is
        // the probe's unchecked read boundary (see module docs).
        let slice = unsafe { std::slice::from_raw_parts(addr as *const u8, len) };
        Ok(slice.to_vec())
    }
}
