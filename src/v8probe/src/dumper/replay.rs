//! Recorded-Dump Replay
//!
//! Serves dump text captured from a live session, keyed by address, so a
//! resolution can be reproduced offline from saved artifacts.

use std::collections::HashMap;
use std::path::Path;

use super::ObjectDumper;
use crate::api::parse_handle;
use crate::error::ProbeError;

pub struct ReplayDumper {
    dumps: HashMap<u64, String>,
}

impl ReplayDumper {
    pub fn from_map(dumps: HashMap<u64, String>) -> Self {
        Self { dumps }
    }

    /// Load a record file: a JSON object mapping addresses (decimal or
    /// `0x`-prefixed hex strings) to dump text.
    pub fn load(path: &Path) -> Result<Self, ProbeError> {
        let text = std::fs::read_to_string(path).map_err(|source| ProbeError::Artifact {
            path: path.display().to_string(),
            source,
        })?;
        let raw: HashMap<String, String> =
            serde_json::from_str(&text).map_err(|source| ProbeError::Record {
                path: path.display().to_string(),
                source,
            })?;

        let mut dumps = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let addr = parse_handle(&key)?;
            dumps.insert(addr, value);
        }
        Ok(Self { dumps })
    }

    pub fn len(&self) -> usize {
        self.dumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dumps.is_empty()
    }
}

impl ObjectDumper for ReplayDumper {
    fn dump(&self, addr: u64) -> Option<String> {
        self.dumps.get(&addr).cloned()
    }
}
