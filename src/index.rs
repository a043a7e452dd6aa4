//! Ordered index implementations.
//!
//! - [`BTreeIndex`]: backed by `std::collections::BTreeMap`; the default.
//! - [`SortedVecIndex`]: a sorted vector searched by bisection. Cheaper to
//!   scan, O(n) to insert in the middle; fine for sets with few runs.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::{Copied, Map, Rev};
use std::ops::Bound::{Included, Unbounded};
use std::slice;

use crate::run::Seq;
use crate::traits::OrderedIndex;

type CopyEntry = fn((&i64, &Seq)) -> (i64, Seq);

fn copy_entry((&start, &seq): (&i64, &Seq)) -> (i64, Seq) {
    (start, seq)
}

/// Ordered index over a `BTreeMap`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BTreeIndex {
    map: BTreeMap<i64, Seq>,
}

impl BTreeIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderedIndex for BTreeIndex {
    type Ascend<'a> = Map<btree_map::Range<'a, i64, Seq>, CopyEntry>;
    type Descend<'a> = Rev<Self::Ascend<'a>>;

    /// The std B-tree has a fixed node size; `degree` is ignored.
    fn with_degree(_degree: usize) -> Self {
        Self::new()
    }

    #[inline]
    fn insert(&mut self, start: i64, seq: Seq) {
        self.map.insert(start, seq);
    }

    #[inline]
    fn remove(&mut self, start: i64) -> Option<Seq> {
        self.map.remove(&start)
    }

    fn ascend(&self, pivot: i64) -> Self::Ascend<'_> {
        self.map
            .range((Included(pivot), Unbounded))
            .map(copy_entry as CopyEntry)
    }

    fn descend(&self, pivot: i64) -> Self::Descend<'_> {
        self.map
            .range((Unbounded, Included(pivot)))
            .map(copy_entry as CopyEntry)
            .rev()
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

/// Ordered index over a sorted `Vec`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortedVecIndex {
    entries: Vec<(i64, Seq)>,
}

impl SortedVecIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn search(&self, start: i64) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&start, |&(key, _)| key)
    }
}

impl OrderedIndex for SortedVecIndex {
    type Ascend<'a> = Copied<slice::Iter<'a, (i64, Seq)>>;
    type Descend<'a> = Copied<Rev<slice::Iter<'a, (i64, Seq)>>>;

    /// `degree` is the initial capacity.
    fn with_degree(degree: usize) -> Self {
        Self {
            entries: Vec::with_capacity(degree),
        }
    }

    fn insert(&mut self, start: i64, seq: Seq) {
        match self.search(start) {
            Ok(pos) => self.entries[pos].1 = seq,
            Err(pos) => self.entries.insert(pos, (start, seq)),
        }
    }

    fn remove(&mut self, start: i64) -> Option<Seq> {
        let pos = self.search(start).ok()?;
        Some(self.entries.remove(pos).1)
    }

    fn ascend(&self, pivot: i64) -> Self::Ascend<'_> {
        let from = self.entries.partition_point(|&(key, _)| key < pivot);
        self.entries[from..].iter().copied()
    }

    fn descend(&self, pivot: i64) -> Self::Descend<'_> {
        let to = self.entries.partition_point(|&(key, _)| key <= pivot);
        self.entries[..to].iter().rev().copied()
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
