//! Stable max-priority queue for move ordering.
//!
//! `std::collections::BinaryHeap` is not stable: equal-priority entries pop
//! in an unspecified order, which would make search results depend on heap
//! internals. [`MoveRanker`] restores determinism by stamping every push
//! with a monotonically increasing sequence number and breaking priority
//! ties in favor of the earlier push (FIFO among equals).
//!
//! Priorities are `f64` heuristic scores. NaN priorities are not meaningful
//! here and must not be pushed; ordering uses [`f64::total_cmp`], so a NaN
//! would not poison the queue, but it would sort above every finite score.

use std::collections::BinaryHeap;

struct Entry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Higher priority first; among equal priorities, lower sequence
        // number first (the heap is a max-heap, so the comparison on seq
        // is reversed).
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A max-priority queue with FIFO tie-breaking.
pub struct MoveRanker<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> MoveRanker<T> {
    pub fn new() -> MoveRanker<T> {
        MoveRanker {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Insert an item with the given priority.
    pub fn push(&mut self, priority: f64, item: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
    }

    /// Remove and return the highest-priority item, earliest push first
    /// among equal priorities. `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|entry| entry.item)
    }

    /// Drop all queued items. Sequence numbers keep counting, which is fine:
    /// ordering only ever compares entries that coexist in the queue.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for MoveRanker<T> {
    fn default() -> Self {
        MoveRanker::new()
    }
}
