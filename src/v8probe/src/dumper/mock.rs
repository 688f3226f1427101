//! Scripted Dumper
//!
//! Scripted address -> dump-text map plus a call log, so pipeline tests can
//! assert not just results but which hops actually ran.

use std::cell::RefCell;
use std::collections::HashMap;

use super::ObjectDumper;

#[derive(Default)]
pub struct MockDumper {
    dumps: HashMap<u64, String>,
    calls: RefCell<Vec<u64>>,
}

impl MockDumper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the text returned for `addr`.
    pub fn script(mut self, addr: u64, text: &str) -> Self {
        self.dumps.insert(addr, text.to_string());
        self
    }

    /// Addresses dumped so far, in call order.
    pub fn calls(&self) -> Vec<u64> {
        self.calls.borrow().clone()
    }
}

impl ObjectDumper for MockDumper {
    fn dump(&self, addr: u64) -> Option<String> {
        self.calls.borrow_mut().push(addr);
        self.dumps.get(&addr).cloned()
    }
}
