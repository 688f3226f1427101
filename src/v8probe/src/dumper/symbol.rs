//! Symbol-Bound Live Dumper
//!
//! Binds `_v8_internal_Print_Object_To_String` out of the current process
//! image. The symbol is a C++ function returning `std::string` by value;
//! the libstdc++ small-string layout is modeled directly so the return can
//! be unpacked without a C++ shim.

use std::ffi::c_void;

use super::ObjectDumper;
use crate::error::ProbeError;

/// Mangled names the print symbol is exported under. The second is the
/// cxx11-ABI mangling some engine builds use.
const SYMBOL_NAMES: [&[u8]; 2] = [
    b"_Z35_v8_internal_Print_Object_To_StringPv\0",
    b"_Z35_v8_internal_Print_Object_To_StringB5cxx11Pv\0",
];

/// libstdc++ `std::string`: data pointer, length, and a 16-byte union of
/// inline buffer and heap capacity. Returned through a hidden sret pointer,
/// which an `extern "C"` struct return matches on x86-64.
#[repr(C)]
struct CxxString {
    ptr: *const u8,
    len: usize,
    buf: [u8; 16],
}

type PrintObjectFn = unsafe extern "C" fn(*mut c_void) -> CxxString;

pub struct SymbolDumper {
    print_fn: PrintObjectFn,
}

impl SymbolDumper {
    /// Resolve the print symbol once for the current process. Fails closed
    /// when neither mangling is exported (engine built without object
    /// printing); callers must treat that as fatal, not retry per dump.
    pub fn resolve() -> Result<Self, ProbeError> {
        let handle = unsafe { libc::dlopen(std::ptr::null(), libc::RTLD_LAZY) };
        for name in SYMBOL_NAMES {
            let sym = unsafe { libc::dlsym(handle, name.as_ptr().cast()) };
            if !sym.is_null() {
                // SAFETY: the symbol's signature is fixed by the engine ABI.
                let print_fn =
                    unsafe { std::mem::transmute::<*mut c_void, PrintObjectFn>(sym) };
                return Ok(Self { print_fn });
            }
        }
        Err(ProbeError::OracleUnavailable)
    }
}

impl ObjectDumper for SymbolDumper {
    fn dump(&self, addr: u64) -> Option<String> {
        if addr == 0 {
            return None;
        }
        // SAFETY: resolve() bound the symbol; addr sanity is the caller's
        // problem, exactly as it is for the engine's own debug printer.
        let out = unsafe { (self.print_fn)(addr as *mut c_void) };
        if out.ptr.is_null() {
            return None;
        }
        let bytes = unsafe { std::slice::from_raw_parts(out.ptr, out.len) };
        let text = String::from_utf8_lossy(bytes).into_owned();
        // A heap-backed return is leaked on purpose: freeing it would cross
        // into the engine's allocator.
        std::mem::forget(out);
        Some(text)
    }
}
