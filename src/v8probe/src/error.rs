//! Error types for the probe's entry surface.
//!
//! Resolution misses are not errors: a hop that fails to find its field
//! collapses the pipeline to a sentinel string. `ProbeError` covers the
//! things that are actually wrong: rejected input, a missing dump oracle,
//! unreadable memory, or a broken offline artifact.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Expected a numeric handle, got {0:?}")]
    ExpectedNumber(String),

    #[error("print-object symbol is not exported by this process image")]
    OracleUnavailable,

    #[error("Unreadable memory: {size} bytes at {addr:#x}")]
    Unreadable { addr: u64, size: usize },

    #[error("Failed to load {path}: {source}")]
    Artifact {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dump record file {path}: {source}")]
    Record {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
