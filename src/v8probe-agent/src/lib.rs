//! In-process agent exposing the probe over a C ABI.
//!
//! Loaded into the target Node/V8 process; the host's module layer calls
//! these exports with numeric handles it has already validated. The print
//! symbol is bound lazily, exactly once, and a process without it aborts on
//! first use rather than limping along with silently empty dumps.
//!
//! Every export returns a heap-allocated C string; hand it back to
//! `v8probe_free_string` when done. The heap-snapshot facility stays on the
//! host side: register a `HeapHooks` vtable and the agent drives it through
//! the same enumeration contract the library tests against.

use std::os::raw::{c_char, c_void};

use once_cell::sync::{Lazy, OnceCell};
use v8probe::{
    enumerate_heap_objects, Grammar, HeapProfiler, HeapSnapshot, InProcessMemory, NodeKind, Probe,
    SymbolDumper,
};

static DUMPER: Lazy<SymbolDumper> = Lazy::new(|| {
    SymbolDumper::resolve()
        .expect("v8probe-agent: print-object symbol not exported by this process")
});

static MEMORY: InProcessMemory = InProcessMemory;

fn probe() -> Probe<'static> {
    Probe::new(&*DUMPER, &MEMORY, Grammar::inline_labels())
}

fn into_c_string(s: String) -> *mut c_char {
    // Dump text can embed NUL when the oracle reads torn memory.
    let sanitized = s.replace('\0', " ");
    std::ffi::CString::new(sanitized)
        .unwrap_or_default()
        .into_raw()
}

/// Release a string returned by any agent export.
///
/// # Safety
/// `s` must have come from this agent and not have been freed already.
#[no_mangle]
pub unsafe extern "C" fn v8probe_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(std::ffi::CString::from_raw(s));
    }
}

#[no_mangle]
pub extern "C" fn v8probe_resolve_callback(handle: u64) -> *mut c_char {
    into_c_string(probe().resolve_callback(handle))
}

#[no_mangle]
pub extern "C" fn v8probe_resolve_napi_invoke(handle: u64) -> *mut c_char {
    into_c_string(probe().resolve_napi_invoke(handle))
}

#[no_mangle]
pub extern "C" fn v8probe_resolve_napi(handle: u64) -> *mut c_char {
    into_c_string(probe().resolve_napi(handle))
}

#[no_mangle]
pub extern "C" fn v8probe_resolve_napi_getset(handle: u64) -> *mut c_char {
    into_c_string(probe().resolve_napi_getset(handle))
}

#[no_mangle]
pub extern "C" fn v8probe_resolve_nan(handle: u64) -> *mut c_char {
    into_c_string(probe().resolve_nan(handle))
}

#[no_mangle]
pub extern "C" fn v8probe_resolve_name(handle: u64) -> *mut c_char {
    into_c_string(probe().resolve_name(handle))
}

#[no_mangle]
pub extern "C" fn v8probe_dump_raw(handle: u64) -> *mut c_char {
    into_c_string(probe().dump_raw(handle))
}

#[no_mangle]
pub extern "C" fn v8probe_raw_identity(handle: u64) -> *mut c_char {
    into_c_string(probe().raw_identity(handle))
}

/// Host-side heap snapshot callbacks. `node_kind` returns the engine's
/// HeapGraphNode type codes; `release` disposes the snapshot.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct HeapHooks {
    pub take_snapshot: unsafe extern "C" fn() -> *mut c_void,
    pub node_count: unsafe extern "C" fn(*mut c_void) -> usize,
    pub node_kind: unsafe extern "C" fn(*mut c_void, usize) -> u32,
    pub node_handle_slot: unsafe extern "C" fn(*mut c_void, usize) -> u64,
    pub release: unsafe extern "C" fn(*mut c_void),
}

static HEAP_HOOKS: OnceCell<HeapHooks> = OnceCell::new();

/// Register the snapshot vtable once; later registrations are ignored.
#[no_mangle]
pub extern "C" fn v8probe_register_heap_hooks(hooks: HeapHooks) {
    let _ = HEAP_HOOKS.set(hooks);
}

struct HookProfiler(HeapHooks);

struct HookSnapshot {
    hooks: HeapHooks,
    raw: *mut c_void,
}

impl HeapProfiler for HookProfiler {
    fn take_snapshot(&self) -> Box<dyn HeapSnapshot + '_> {
        let raw = unsafe { (self.0.take_snapshot)() };
        Box::new(HookSnapshot { hooks: self.0, raw })
    }
}

impl HeapSnapshot for HookSnapshot {
    fn node_count(&self) -> usize {
        unsafe { (self.hooks.node_count)(self.raw) }
    }

    fn node_kind(&self, index: usize) -> NodeKind {
        // HeapGraphNode::Type codes.
        match unsafe { (self.hooks.node_kind)(self.raw, index) } {
            1 => NodeKind::Array,
            2 => NodeKind::String,
            3 => NodeKind::Object,
            4 => NodeKind::Code,
            5 => NodeKind::Closure,
            7 => NodeKind::Number,
            _ => NodeKind::Other,
        }
    }

    fn node_handle_slot(&self, index: usize) -> Option<u64> {
        match unsafe { (self.hooks.node_handle_slot)(self.raw, index) } {
            0 => None,
            slot => Some(slot),
        }
    }
}

impl Drop for HookSnapshot {
    fn drop(&mut self) {
        unsafe { (self.hooks.release)(self.raw) }
    }
}

#[no_mangle]
pub extern "C" fn v8probe_enumerate_heap_objects() -> *mut c_char {
    let Some(hooks) = HEAP_HOOKS.get() else {
        return into_c_string("[]".to_string());
    };
    into_c_string(enumerate_heap_objects(&HookProfiler(*hooks), &MEMORY))
}
