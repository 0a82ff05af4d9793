//! Worklists driving the shared search skeleton.
//!
//! [`PriorityFrontier`] is a min-heap keyed by `(priority, insertion_order)`.
//! Stale duplicates are never removed eagerly: the search discards an
//! entry when it pops a node that is already finalized (lazy deletion).

use std::collections::{BinaryHeap, VecDeque};

/// Heap entry ordered by priority, ties broken by insertion order (FIFO).
#[derive(Debug, Clone, Copy)]
struct Entry {
    idx: usize,
    priority: f64,
    seq: u64,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest priority first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A min-priority worklist of flat node indices.
///
/// The same index may be inserted several times with different priorities;
/// every copy is returned by [`extract_min`](Self::extract_min) in order.
#[derive(Debug, Default)]
pub struct PriorityFrontier {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl PriorityFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `idx` with the given priority.
    pub fn insert(&mut self, idx: usize, priority: f64) {
        self.heap.push(Entry {
            idx,
            priority,
            seq: self.seq,
        });
        self.seq += 1;
    }

    /// Remove and return the index with the lowest priority.
    pub fn extract_min(&mut self) -> Option<usize> {
        self.heap.pop().map(|e| e.idx)
    }

    /// Number of entries, stale duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no entries remain.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Ordering discipline of a search.
#[derive(Debug)]
pub(crate) enum Worklist {
    Priority(PriorityFrontier),
    Fifo(VecDeque<usize>),
    Lifo(Vec<usize>),
}

impl Worklist {
    /// Add `idx`. `priority` is ignored by the FIFO and LIFO disciplines.
    pub(crate) fn push(&mut self, idx: usize, priority: f64) {
        match self {
            Self::Priority(f) => f.insert(idx, priority),
            Self::Fifo(q) => q.push_back(idx),
            Self::Lifo(s) => s.push(idx),
        }
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        match self {
            Self::Priority(f) => f.extract_min(),
            Self::Fifo(q) => q.pop_front(),
            Self::Lifo(s) => s.pop(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Priority(f) => f.len(),
            Self::Fifo(q) => q.len(),
            Self::Lifo(s) => s.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_priority_order() {
        let mut f = PriorityFrontier::new();
        f.insert(1, 3.0);
        f.insert(2, 1.5);
        f.insert(3, 2.0);
        assert_eq!(f.len(), 3);
        assert_eq!(f.extract_min(), Some(2));
        assert_eq!(f.extract_min(), Some(3));
        assert_eq!(f.extract_min(), Some(1));
        assert_eq!(f.extract_min(), None);
        assert!(f.is_empty());
    }

    #[test]
    fn ties_are_fifo() {
        let mut f = PriorityFrontier::new();
        for idx in [7, 4, 9] {
            f.insert(idx, 1.0);
        }
        assert_eq!(f.extract_min(), Some(7));
        assert_eq!(f.extract_min(), Some(4));
        assert_eq!(f.extract_min(), Some(9));
    }

    #[test]
    fn duplicates_are_kept() {
        let mut f = PriorityFrontier::new();
        f.insert(5, 4.0);
        f.insert(5, 2.0);
        assert_eq!(f.len(), 2);
        assert_eq!(f.extract_min(), Some(5));
        assert_eq!(f.extract_min(), Some(5));
    }

    #[test]
    fn worklist_disciplines() {
        let mut fifo = Worklist::Fifo(VecDeque::new());
        let mut lifo = Worklist::Lifo(Vec::new());
        for idx in 0..3 {
            fifo.push(idx, 0.0);
            lifo.push(idx, 0.0);
        }
        assert_eq!(fifo.len(), 3);
        assert_eq!(fifo.pop(), Some(0));
        assert_eq!(lifo.pop(), Some(2));
    }
}
