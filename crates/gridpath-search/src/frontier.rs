//! Discovered-but-not-expanded coordinates, in strategy order.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use gridpath_core::Point;

use crate::strategy::Discipline;

/// A frontier slot: a coordinate and the path cost it was pushed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) pos: Point,
    pub(crate) cost: i32,
}

/// Heap slot ordered by `(key, seq)` so equal keys pop in push order.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct Ranked {
    key: i32,
    seq: u64,
    entry: Entry,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest key, then oldest.
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) enum Frontier {
    Fifo(VecDeque<Entry>),
    Lifo(Vec<Entry>),
    Priority { heap: BinaryHeap<Ranked>, seq: u64 },
}

impl Frontier {
    pub(crate) fn new(discipline: Discipline) -> Self {
        match discipline {
            Discipline::Fifo => Self::Fifo(VecDeque::new()),
            Discipline::Lifo => Self::Lifo(Vec::new()),
            Discipline::MinPriority => Self::Priority {
                heap: BinaryHeap::new(),
                seq: 0,
            },
        }
    }

    /// Push an entry. `key` is ignored by FIFO and LIFO frontiers.
    pub(crate) fn push(&mut self, entry: Entry, key: i32) {
        match self {
            Self::Fifo(q) => q.push_back(entry),
            Self::Lifo(s) => s.push(entry),
            Self::Priority { heap, seq } => {
                heap.push(Ranked {
                    key,
                    seq: *seq,
                    entry,
                });
                *seq += 1;
            }
        }
    }

    pub(crate) fn pop(&mut self) -> Option<Entry> {
        match self {
            Self::Fifo(q) => q.pop_front(),
            Self::Lifo(s) => s.pop(),
            Self::Priority { heap, .. } => heap.pop().map(|r| r.entry),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Fifo(q) => q.len(),
            Self::Lifo(s) => s.len(),
            Self::Priority { heap, .. } => heap.len(),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
