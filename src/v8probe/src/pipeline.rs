//! Resolution Pipelines
//!
//! Each pipeline is a fixed sequence of dump-and-extract hops over the
//! injected oracle. A hop that fails to find its field collapses the rest
//! of the pipeline to the `NONE` sentinel; there are no retries, no
//! backtracking, and no partial results. The hop chains are written as
//! `Option` and-then sequences so the short-circuit is the control flow.

use serde::Serialize;

use crate::addr::is_canonical;
use crate::bundle::CallbackBundle;
use crate::dumper::ObjectDumper;
use crate::grammar::Grammar;
use crate::memory::RawMemory;

/// Sentinel for any pipeline whose hop chain missed.
pub const NONE: &str = "NONE";
/// Sentinel for a single overload entry whose dump does not parse; other
/// entries still resolve independently.
pub const UNKNOWN: &str = "UNKNOWN";
/// Sentinel for a raw-dump request rejected by the canonical check.
pub const INVALID_ADDRESS: &str = "INVALID_ADDRESS";

/// Structured result of the fast-call pipeline.
#[derive(Debug, Serialize)]
pub struct CallbackReport {
    pub callback: String,
    pub overloads: Vec<String>,
}

/// One probe session: the dump oracle, the raw-memory source, and the dump
/// grammar in effect. All three are borrowed per call; the probe itself
/// holds no state.
pub struct Probe<'a> {
    dumper: &'a dyn ObjectDumper,
    memory: &'a dyn RawMemory,
    grammar: &'a Grammar,
}

impl<'a> Probe<'a> {
    pub fn new(
        dumper: &'a dyn ObjectDumper,
        memory: &'a dyn RawMemory,
        grammar: &'a Grammar,
    ) -> Self {
        Self {
            dumper,
            memory,
            grammar,
        }
    }

    /// Dump `addr` and apply one extractor to the text.
    fn hop<T>(&self, addr: u64, extract: impl Fn(&Grammar, &str) -> Option<T>) -> Option<T> {
        let text = self.dumper.dump(addr)?;
        extract(self.grammar, &text)
    }

    fn shared_function_info(&self, func: u64) -> Option<u64> {
        self.hop(func, Grammar::shared_info)
    }

    /// Fast-call callback plus its overload table:
    /// function -> shared_info -> function_data -> template dump, then
    /// callback and (via rare data) the foreign overload addresses.
    /// Serialized as a JSON record.
    pub fn resolve_callback(&self, func: u64) -> String {
        let Some(report) = self.callback_report(func) else {
            return NONE.to_string();
        };
        serde_json::to_string(&report).unwrap_or_else(|_| NONE.to_string())
    }

    fn callback_report(&self, func: u64) -> Option<CallbackReport> {
        let sfi = self.shared_function_info(func)?;
        let fti = self.hop(sfi, Grammar::function_data)?;
        let text = self.dumper.dump(fti)?;
        // A template without a callback still reports its overloads; the
        // field goes to the string sentinel rather than failing the chain.
        let callback = self
            .grammar
            .callback(&text)
            .unwrap_or_else(|| NONE.to_string());
        let overloads = self.overloads(&text);
        Some(CallbackReport { callback, overloads })
    }

    /// Foreign addresses reachable from the template's rare data, in table
    /// order. A missing link anywhere on the rare-data chain is an empty
    /// list, not a pipeline miss; a single entry that dumps but does not
    /// parse becomes `UNKNOWN` in place.
    fn overloads(&self, template_dump: &str) -> Vec<String> {
        let entries = (|| {
            let rare = self.grammar.rare_data(template_dump)?;
            let table = self.hop(rare, Grammar::c_function_overloads)?;
            let table_dump = self.dumper.dump(table)?;
            Some(self.grammar.foreign_entries(&table_dump))
        })();

        entries
            .unwrap_or_default()
            .into_iter()
            .map(|foreign| {
                self.hop(foreign, Grammar::foreign_address)
                    .unwrap_or_else(|| UNKNOWN.to_string())
            })
            .collect()
    }

    /// N-API invoke pointer: the callback bundle's function-pointer field,
    /// decimal-encoded.
    pub fn resolve_napi_invoke(&self, func: u64) -> String {
        self.bundle_for_function(func)
            .map(|bundle| bundle.cb.to_string())
            .unwrap_or_else(|| NONE.to_string())
    }

    /// N-API registered function: the bundle's user-data slot is itself a
    /// pointer whose first word is the module's native entry point, one
    /// indirection below where the invoke pointer lives.
    pub fn resolve_napi(&self, func: u64) -> String {
        self.bundle_for_function(func)
            .and_then(|bundle| self.memory.read_u64(bundle.cb_data).ok())
            .map(|word| word.to_string())
            .unwrap_or_else(|| NONE.to_string())
    }

    /// Same read as [`Self::resolve_napi`], but the caller already has the
    /// callback-data object (getter/setter bindings), so the function and
    /// shared-info hops are skipped.
    pub fn resolve_napi_getset(&self, callback_data: u64) -> String {
        self.bundle_at(callback_data)
            .and_then(|bundle| self.memory.read_u64(bundle.cb_data).ok())
            .map(|word| word.to_string())
            .unwrap_or_else(|| NONE.to_string())
    }

    fn bundle_for_function(&self, func: u64) -> Option<CallbackBundle> {
        let sfi = self.shared_function_info(func)?;
        let data = self.hop(sfi, Grammar::callback_data)?;
        self.bundle_at(data)
    }

    fn bundle_at(&self, callback_data: u64) -> Option<CallbackBundle> {
        let external = self.hop(callback_data, Grammar::external_value)?;
        CallbackBundle::read_from(self.memory, external).ok()
    }

    /// Engine-external value behind an API object: the external value is
    /// the native address itself, stored once with no bundle around it.
    pub fn resolve_nan(&self, func: u64) -> String {
        let chain = (|| {
            let sfi = self.shared_function_info(func)?;
            let data = self.hop(sfi, Grammar::callback_data)?;
            let wrapper = self.hop(data, Grammar::external_object)?;
            self.hop(wrapper, Grammar::external_value)
        })();
        chain
            .map(|value| value.to_string())
            .unwrap_or_else(|| NONE.to_string())
    }

    /// The function's name field, straight off its own dump. No further
    /// hops.
    pub fn resolve_name(&self, func: u64) -> String {
        self.hop(func, Grammar::name)
            .unwrap_or_else(|| NONE.to_string())
    }

    /// Raw dump text for an arbitrary address, gated by the canonical
    /// check; rejected addresses never reach the oracle.
    pub fn dump_raw(&self, addr: u64) -> String {
        if !is_canonical(addr) {
            return INVALID_ADDRESS.to_string();
        }
        self.dumper
            .dump(addr)
            .unwrap_or_else(|| NONE.to_string())
    }

    /// First machine word at the handle's address, decimal-encoded. No
    /// oracle involved; this is the raw tagged-pointer identity of the
    /// value.
    pub fn raw_identity(&self, handle: u64) -> String {
        self.memory
            .read_u64(handle)
            .map(|word| word.to_string())
            .unwrap_or_else(|_| NONE.to_string())
    }
}
