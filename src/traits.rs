//! Trait definitions for the ordered index behind a set.

use crate::run::Seq;

/// Ordered map from run start to [`Seq`].
///
/// A set only needs ordered insert and delete plus two directional scans
/// from a pivot key. Any ordered map satisfies this; how it balances itself
/// is its own business.
pub trait OrderedIndex {
    /// Ascending scan over `(start, seq)`.
    type Ascend<'a>: Iterator<Item = (i64, Seq)>
    where
        Self: 'a;

    /// Descending scan over `(start, seq)`.
    type Descend<'a>: Iterator<Item = (i64, Seq)>
    where
        Self: 'a;

    /// Create an empty index.
    ///
    /// `degree` is a performance hint (fan-out or capacity); it never
    /// changes what the index stores.
    fn with_degree(degree: usize) -> Self
    where
        Self: Sized;

    /// Insert or overwrite the entry for `start`.
    fn insert(&mut self, start: i64, seq: Seq);

    /// Remove the entry for `start`, returning it if present.
    fn remove(&mut self, start: i64) -> Option<Seq>;

    /// Entries with key `>= pivot`, in increasing key order.
    fn ascend(&self, pivot: i64) -> Self::Ascend<'_>;

    /// Entries with key `<= pivot`, in decreasing key order.
    fn descend(&self, pivot: i64) -> Self::Descend<'_>;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether the index holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    fn clear(&mut self);
}
