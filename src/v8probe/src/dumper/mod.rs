//! Dump Oracle Abstraction
//!
//! Everything the probe learns about the managed heap comes through the
//! engine's print-object debug facility. The capability is injected into
//! each pipeline call rather than held in a process global, so offline and
//! test dumpers slot in the same way the live one does:
//! - `SymbolDumper` binds the engine's exported print symbol (live, unix)
//! - `ReplayDumper` serves dump text recorded from an earlier session
//! - `MockDumper` scripts text per address and logs calls for tests

#[cfg(test)]
mod mock;
mod replay;
#[cfg(unix)]
mod symbol;

#[cfg(test)]
pub use mock::MockDumper;
pub use replay::ReplayDumper;
#[cfg(unix)]
pub use symbol::SymbolDumper;

/// The print-object contract: serialize the object at `addr` to text.
///
/// `None` means the oracle produced nothing for the address. Results are
/// never cached; each call re-serializes the object's current state, which
/// may already be stale if the collector moved it since the address was
/// extracted.
pub trait ObjectDumper {
    fn dump(&self, addr: u64) -> Option<String>;
}
