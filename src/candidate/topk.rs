//! Bounded Top-K collection of scan candidates.

use std::cmp::Ordering;

/// Raw scan candidate: a placement offset and its dissimilarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    /// X offset (column) of the needle's top-left corner.
    pub x: usize,
    /// Y offset (row) of the needle's top-left corner.
    pub y: usize,
    /// Sum of absolute channel differences; lower is better.
    pub sad: u64,
}

/// Best-first order: lowest dissimilarity, then row-major offset.
pub(crate) fn candidate_cmp(a: &Candidate, b: &Candidate) -> Ordering {
    a.sad
        .cmp(&b.sad)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Sorts candidates best first with deterministic tie-breaking.
pub(crate) fn sort_candidates(candidates: &mut [Candidate]) {
    candidates.sort_by(candidate_cmp);
}

/// Top-K container with worst-replacement and O(k) insertion cost.
///
/// While fewer than `k` entries are held, every candidate is appended. Once
/// full, the entry with the largest dissimilarity (lowest index on ties) is
/// replaced, and only by a strictly smaller one.
#[derive(Debug)]
pub struct TopK {
    k: usize,
    items: Vec<Candidate>,
}

impl TopK {
    /// Creates a collector; `k` is raised to at least 1.
    pub fn new(k: usize) -> Self {
        let k = k.max(1);
        Self {
            k,
            items: Vec::with_capacity(k),
        }
    }

    /// Offers a candidate to the collector.
    pub fn push(&mut self, candidate: Candidate) {
        if self.items.len() < self.k {
            self.items.push(candidate);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if item.sad > self.items[worst_idx].sad {
                worst_idx = idx;
            }
        }

        if candidate.sad < self.items[worst_idx].sad {
            self.items[worst_idx] = candidate;
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the retained candidates, best first.
    pub fn into_sorted(mut self) -> Vec<Candidate> {
        sort_candidates(&mut self.items);
        self.items
    }
}

/// Merges per-slice candidate lists into the global best `k`.
pub(crate) fn merge_topk(lists: Vec<Vec<Candidate>>, k: usize) -> Vec<Candidate> {
    let mut merged: Vec<Candidate> = lists.into_iter().flatten().collect();
    sort_candidates(&mut merged);
    merged.truncate(k.max(1));
    merged
}
