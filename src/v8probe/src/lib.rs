//! # v8probe
//!
//! Recovers the native function pointer behind a V8 `JSFunction` by walking
//! the engine's internal object graph through its print-object debug
//! facility and parsing the emitted text.
//!
//! This library provides functionality to:
//! - Resolve fast-call callbacks and their overload tables
//! - Resolve N-API callback bundles (invoke pointer and registered function)
//! - Resolve engine-external values and plain function names
//! - Enumerate every live heap object's identity pointer
//!
//! Resolved addresses are whatever the heap said at dump time: nothing
//! pins objects between hops and nothing verifies the result is callable.
//!
//! ## Example
//!
//! ```no_run
//! use v8probe::{Grammar, ImageMemory, Probe, ReplayDumper};
//!
//! # fn main() -> Result<(), v8probe::ProbeError> {
//! // Offline: recorded dump text plus a memory capture.
//! let dumper = ReplayDumper::load("session/dumps.json".as_ref())?;
//! let memory = ImageMemory::load("session/heap.bin".as_ref(), 0x7f3e_9a40_0000)?;
//! let probe = Probe::new(&dumper, &memory, Grammar::inline_labels());
//!
//! let handle = v8probe::parse_handle("0x1d0a00049c19")?;
//! println!("{}", probe.resolve_callback(handle));
//! println!("{}", probe.resolve_name(handle));
//! # Ok(())
//! # }
//! ```

pub mod addr;
pub mod api;
pub mod bundle;
pub mod dumper;
pub mod grammar;
pub mod heap;
pub mod memory;
pub mod pipeline;

mod error;

// Re-export commonly used items
#[doc(inline)]
pub use api::parse_handle;
#[doc(inline)]
pub use bundle::CallbackBundle;
#[doc(inline)]
pub use dumper::{ObjectDumper, ReplayDumper};
#[cfg(unix)]
#[doc(inline)]
pub use dumper::SymbolDumper;
pub use error::ProbeError;
#[doc(inline)]
pub use grammar::{Grammar, GrammarKind};
#[doc(inline)]
pub use heap::{enumerate_heap_objects, HeapProfiler, HeapSnapshot, NodeKind};
#[doc(inline)]
pub use memory::{ImageMemory, InProcessMemory, RawMemory};
#[doc(inline)]
pub use pipeline::{CallbackReport, Probe, INVALID_ADDRESS, NONE, UNKNOWN};
