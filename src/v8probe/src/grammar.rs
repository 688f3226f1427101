//! Dump-text field extraction.
//!
//! Every pattern the probe ever applies to print-object output lives here,
//! behind one `Grammar` value, so an engine-side format change touches this
//! module and nothing else. The patterns are anchored to the literal field
//! labels the engine emits; there is no tolerance for drift.
//!
//! Two grammars are compiled. Engines have been observed printing the
//! fast-call callback family either as inline dashed labels
//! (`- callback: 0x...`) or as paired delimiter markers
//! (`callback = <0x...>`); which one is authoritative depends on the build,
//! so the variant is selectable rather than guessed.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::addr::parse_hex;

/// Which format the engine emits for the callback/overload fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarKind {
    /// Dashed inline labels: `- callback: 0x...`
    InlineLabels,
    /// Paired delimiter markers: `callback = <0x...>`
    MarkerDelimited,
}

/// Compiled extraction patterns for one dump format.
pub struct Grammar {
    kind: GrammarKind,
    shared_info: Regex,
    function_data: Regex,
    callback: Regex,
    rare_data: Regex,
    c_function_overloads: Regex,
    foreign_entry: Regex,
    foreign_address: Regex,
    callback_data: Regex,
    external_value: Regex,
    external_object: Regex,
    name: Regex,
}

static INLINE: Lazy<Grammar> = Lazy::new(|| Grammar::compile(GrammarKind::InlineLabels));
static MARKER: Lazy<Grammar> = Lazy::new(|| Grammar::compile(GrammarKind::MarkerDelimited));

impl Grammar {
    /// The dashed-inline-label grammar (default).
    pub fn inline_labels() -> &'static Grammar {
        &INLINE
    }

    /// The paired-delimiter-marker grammar.
    pub fn marker_delimited() -> &'static Grammar {
        &MARKER
    }

    pub fn get(kind: GrammarKind) -> &'static Grammar {
        match kind {
            GrammarKind::InlineLabels => Self::inline_labels(),
            GrammarKind::MarkerDelimited => Self::marker_delimited(),
        }
    }

    pub fn kind(&self) -> GrammarKind {
        self.kind
    }

    fn compile(kind: GrammarKind) -> Self {
        // The patterns are literals; compilation cannot fail.
        let rx = |pattern: &str| Regex::new(pattern).unwrap();

        // Only the callback/overload family differs between the observed
        // formats; the rest of the labels are stable across both.
        let (callback, rare_data, c_function_overloads, foreign_entry, foreign_address) = match kind
        {
            GrammarKind::InlineLabels => (
                rx(r"-\s*callback:\s*(0x[0-9a-fA-F]+)"),
                rx(r"-\s*rare_data:\s*(0x[0-9a-fA-F]+)"),
                rx(r"-\s*c_function_overloads:\s*(0x[0-9a-fA-F]+)"),
                rx(r"\d+:\s*(0x[0-9a-fA-F]+)\s*<Foreign>"),
                rx(r"foreign address\s*:\s*(0x[0-9a-fA-F]+)"),
            ),
            GrammarKind::MarkerDelimited => (
                rx(r"callback\s*=\s*<(0x[0-9a-fA-F]+)>"),
                rx(r"rare_data\s*=\s*<(0x[0-9a-fA-F]+)>"),
                rx(r"c_function_overloads\s*=\s*<(0x[0-9a-fA-F]+)>"),
                rx(r"\d+\s*=\s*<(0x[0-9a-fA-F]+)>\s*Foreign"),
                rx(r"foreign address\s*=\s*<(0x[0-9a-fA-F]+)>"),
            ),
        };

        Self {
            kind,
            shared_info: rx(r"shared_info:\s*0x([0-9a-fA-F]+)"),
            function_data: rx(r"function_data:\s*0x([0-9a-fA-F]+)\s<FunctionTemplateInfo"),
            callback,
            rare_data,
            c_function_overloads,
            foreign_entry,
            foreign_address,
            callback_data: rx(r"data=\s*0x([0-9a-fA-F]+)"),
            external_value: rx(r"external value:\s*0x([0-9a-fA-F]+)"),
            external_object: rx(r"(0x[0-9a-fA-F]+)\s+<JSExternalObject>"),
            name: rx(r"-\s*name:\s*(.+)"),
        }
    }

    fn capture_addr(pattern: &Regex, dump: &str) -> Option<u64> {
        pattern
            .captures(dump)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_hex(m.as_str()))
    }

    fn capture_token(pattern: &Regex, dump: &str) -> Option<String> {
        pattern
            .captures(dump)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// `shared_info` address from a function dump.
    pub fn shared_info(&self, dump: &str) -> Option<u64> {
        Self::capture_addr(&self.shared_info, dump)
    }

    /// `function_data` address from a SharedFunctionInfo dump, only when the
    /// field is tagged as a FunctionTemplateInfo.
    pub fn function_data(&self, dump: &str) -> Option<u64> {
        Self::capture_addr(&self.function_data, dump)
    }

    /// The fast-call `callback` address, kept as the literal hex token the
    /// dump printed.
    pub fn callback(&self, dump: &str) -> Option<String> {
        Self::capture_token(&self.callback, dump)
    }

    /// `rare_data` address from a FunctionTemplateInfo dump.
    pub fn rare_data(&self, dump: &str) -> Option<u64> {
        Self::capture_addr(&self.rare_data, dump)
    }

    /// `c_function_overloads` address from a rare-data dump.
    pub fn c_function_overloads(&self, dump: &str) -> Option<u64> {
        Self::capture_addr(&self.c_function_overloads, dump)
    }

    /// Every `<Foreign>`-tagged entry of an overload-table dump, in table
    /// order.
    pub fn foreign_entries(&self, dump: &str) -> Vec<u64> {
        self.foreign_entry
            .captures_iter(dump)
            .filter_map(|c| c.get(1))
            .filter_map(|m| parse_hex(m.as_str()))
            .collect()
    }

    /// `foreign address` from a Foreign dump, as the literal hex token.
    pub fn foreign_address(&self, dump: &str) -> Option<String> {
        Self::capture_token(&self.foreign_address, dump)
    }

    /// The generic `data=` address from a SharedFunctionInfo dump. Distinct
    /// label from [`Self::function_data`]: this is the callback-data blob
    /// the bundle conventions hang everything off.
    pub fn callback_data(&self, dump: &str) -> Option<u64> {
        Self::capture_addr(&self.callback_data, dump)
    }

    /// `external value` from a JSExternalObject dump.
    pub fn external_value(&self, dump: &str) -> Option<u64> {
        Self::capture_addr(&self.external_value, dump)
    }

    /// The inline `<JSExternalObject>`-tagged address embedded in an API
    /// object's dump. No extra hop: the address sits in the same text as its
    /// container.
    pub fn external_object(&self, dump: &str) -> Option<u64> {
        Self::capture_addr(&self.external_object, dump)
    }

    /// The `name` field of a function dump, as printed.
    pub fn name(&self, dump: &str) -> Option<String> {
        Self::capture_token(&self.name, dump).map(|s| s.trim_end().to_string())
    }
}
