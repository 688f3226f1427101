//! Heap-Wide Object Enumeration
//!
//! Walks a full heap snapshot, filters to object-kind nodes, and extracts
//! each surviving object's identity pointer. Independent of the dump
//! oracle: the snapshot contract and raw word reads are all it consumes.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::memory::RawMemory;

/// Node classification as reported by the snapshot. Only `Object` nodes are
/// enumerated; numbers, strings, closures without a backing object, and the
/// rest are filtered out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Code,
    Closure,
    Number,
    Other,
}

/// One full heap snapshot.
///
/// Dropping the value releases the underlying snapshot resource, so an
/// enumeration holds it for exactly its own scope no matter how many nodes
/// get skipped along the way.
pub trait HeapSnapshot {
    fn node_count(&self) -> usize;
    fn node_kind(&self, index: usize) -> NodeKind;
    /// Resolve the node to a live handle and return the handle's slot
    /// address, or `None` when the node no longer resolves.
    fn node_handle_slot(&self, index: usize) -> Option<u64>;
}

/// The snapshot facility itself, injected like the other capabilities.
pub trait HeapProfiler {
    fn take_snapshot(&self) -> Box<dyn HeapSnapshot + '_>;
}

/// Enumerate every live object and return its identity pointer as a JSON
/// array of lowercase zero-padded hex strings.
///
/// Per object-kind node: read the handle slot's word (the object's own
/// address), then that object's first word (the engine's per-object
/// metadata pointer), skipping the node when either read yields null.
/// Encounter order is preserved and duplicates are kept. Progress goes to
/// stdout as nodes are visited.
pub fn enumerate_heap_objects(profiler: &dyn HeapProfiler, memory: &dyn RawMemory) -> String {
    let snapshot = profiler.take_snapshot();
    let total = snapshot.node_count();

    let pb = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut addresses: Vec<String> = Vec::new();
    for index in 0..total {
        pb.inc(1);
        if snapshot.node_kind(index) != NodeKind::Object {
            continue;
        }
        let Some(slot) = snapshot.node_handle_slot(index) else {
            continue;
        };
        let Ok(object) = memory.read_u64(slot) else {
            continue;
        };
        if object == 0 {
            continue;
        }
        let Ok(identity) = memory.read_u64(object) else {
            continue;
        };
        if identity == 0 {
            continue;
        }
        addresses.push(format!("{identity:#018x}"));
    }
    pb.finish_with_message(format!("processed {total} nodes"));

    serde_json::to_string(&addresses).unwrap_or_else(|_| "[]".to_string())
    // snapshot dropped here: the release runs on every path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemory;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FakeNode {
        kind: NodeKind,
        slot: Option<u64>,
    }

    struct FakeProfiler {
        nodes: Vec<FakeNode>,
        releases: Arc<AtomicUsize>,
    }

    struct FakeSnapshot<'a> {
        nodes: &'a [FakeNode],
        releases: Arc<AtomicUsize>,
    }

    impl HeapProfiler for FakeProfiler {
        fn take_snapshot(&self) -> Box<dyn HeapSnapshot + '_> {
            Box::new(FakeSnapshot {
                nodes: &self.nodes,
                releases: Arc::clone(&self.releases),
            })
        }
    }

    impl HeapSnapshot for FakeSnapshot<'_> {
        fn node_count(&self) -> usize {
            self.nodes.len()
        }
        fn node_kind(&self, index: usize) -> NodeKind {
            self.nodes[index].kind
        }
        fn node_handle_slot(&self, index: usize) -> Option<u64> {
            self.nodes[index].slot
        }
    }

    impl Drop for FakeSnapshot<'_> {
        fn drop(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn profiler(nodes: Vec<FakeNode>) -> (FakeProfiler, Arc<AtomicUsize>) {
        let releases = Arc::new(AtomicUsize::new(0));
        (
            FakeProfiler {
                nodes,
                releases: Arc::clone(&releases),
            },
            releases,
        )
    }

    #[test]
    fn test_empty_heap_releases_once() {
        let (profiler, releases) = profiler(Vec::new());
        let memory = MockMemory::new();

        assert_eq!(enumerate_heap_objects(&profiler, &memory), "[]");
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_all_nodes_filtered_still_releases_once() {
        let (profiler, releases) = profiler(vec![
            FakeNode { kind: NodeKind::String, slot: Some(0x1000) },
            FakeNode { kind: NodeKind::Number, slot: Some(0x1008) },
            FakeNode { kind: NodeKind::Object, slot: None },
        ]);
        let memory = MockMemory::new();

        assert_eq!(enumerate_heap_objects(&profiler, &memory), "[]");
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_double_dereference_and_order() {
        let mut memory = MockMemory::new();
        // slot -> object -> identity, twice, plus one null object and one
        // null identity that must both be skipped.
        memory.put_word(0x1000, 0x2000);
        memory.put_word(0x2000, 0x7f3e_9a41_0001);
        memory.put_word(0x1008, 0x2010);
        memory.put_word(0x2010, 0x7f3e_9a41_0002);
        memory.put_word(0x1010, 0); // null object
        memory.put_word(0x1018, 0x2020);
        memory.put_word(0x2020, 0); // null identity

        let (profiler, releases) = profiler(vec![
            FakeNode { kind: NodeKind::Object, slot: Some(0x1000) },
            FakeNode { kind: NodeKind::Closure, slot: Some(0x1000) },
            FakeNode { kind: NodeKind::Object, slot: Some(0x1008) },
            FakeNode { kind: NodeKind::Object, slot: Some(0x1010) },
            FakeNode { kind: NodeKind::Object, slot: Some(0x1018) },
        ]);

        let json = enumerate_heap_objects(&profiler, &memory);
        assert_eq!(json, r#"["0x00007f3e9a410001","0x00007f3e9a410002"]"#);
        assert_eq!(releases.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicates_kept() {
        let mut memory = MockMemory::new();
        memory.put_word(0x1000, 0x2000);
        memory.put_word(0x2000, 0x7f3e_9a41_0001);

        let (profiler, _) = profiler(vec![
            FakeNode { kind: NodeKind::Object, slot: Some(0x1000) },
            FakeNode { kind: NodeKind::Object, slot: Some(0x1000) },
        ]);

        let json = enumerate_heap_objects(&profiler, &memory);
        assert_eq!(json, r#"["0x00007f3e9a410001","0x00007f3e9a410001"]"#);
    }
}
