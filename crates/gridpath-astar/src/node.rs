//! Per-cell bookkeeping and the open-set key.

use std::cmp::Ordering;

/// Sentinel cost for cells not reached by the current run.
pub const UNREACHABLE: i32 = i32::MAX;

/// Parent index of the start cell.
pub(crate) const NO_PARENT: usize = usize::MAX;

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    /// Member of the open set.
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: NO_PARENT,
            generation: 0,
            open: false,
        }
    }
}

/// Open-set entry ordered by `(f, seq)` for use in `BinaryHeap`.
///
/// `seq` is unique per run, so the order is total and ties on `f` go to the
/// entry inserted first. The cell index never takes part in the ordering.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) f: i32,
    pub(crate) seq: u64,
    pub(crate) idx: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (f, seq) first.
        (other.f, other.seq).cmp(&(self.f, self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
