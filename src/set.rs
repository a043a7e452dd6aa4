//! The run set: lookup, insertion, deletion and traversal entry points.
//!
//! Every mutation first locates the candidate run for an ID: the run with
//! the greatest start at or below it, found by a descending scan. Whether
//! the candidate actually holds the ID decides the rest.

use std::fmt;

use log::{debug, log_enabled, trace, Level};

use crate::config::Tuning;
use crate::error::RunSetError;
use crate::index::BTreeIndex;
use crate::iter::{Ids, IdsInRange, Runs};
use crate::run::Run;
use crate::traits::OrderedIndex;

/// A set of `i64` IDs stored as runs of evenly spaced values.
///
/// Runs never share an ID and are kept in start order. Inserting an ID
/// tries to fold it into its neighbors; deleting never re-merges.
///
/// The set has no internal locking. Splits and merges issue several
/// dependent index writes, so concurrent readers need external exclusion.
#[derive(Clone)]
pub struct RunSet<I = BTreeIndex> {
    pub(crate) index: I,
}

impl RunSet<BTreeIndex> {
    /// Create an empty set with default tuning.
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }
}

impl<I: OrderedIndex> RunSet<I> {
    /// Create an empty set.
    pub fn with_tuning(tuning: Tuning) -> Self {
        Self::with_index(I::with_degree(tuning.degree))
    }

    /// Create a set over an existing index.
    pub fn with_index(index: I) -> Self {
        Self { index }
    }

    /// Create a set holding `runs` exactly as given.
    ///
    /// Nothing is validated or merged. Overlapping input breaks every
    /// later operation; use [`RunSet::try_from_runs`] for untrusted input.
    pub fn from_runs(tuning: Tuning, runs: impl IntoIterator<Item = Run>) -> Self {
        let mut set = Self::with_tuning(tuning);
        for run in runs {
            set.index.insert(run.start, run.seq());
        }
        debug!("loaded {} runs", set.index.len());
        set
    }

    /// Create a set from runs, checking that they can be stored together.
    ///
    /// Runs must be individually valid (see [`Run::validate`]), given in
    /// increasing start order, and must not overlap. Runs are not merged.
    pub fn try_from_runs(
        tuning: Tuning,
        runs: impl IntoIterator<Item = Run>,
    ) -> Result<Self, RunSetError> {
        let mut set = Self::with_tuning(tuning);
        let mut previous: Option<Run> = None;
        for run in runs {
            run.validate()
                .and_then(|()| match previous {
                    Some(prev) if prev.start >= run.start => Err(RunSetError::Unordered {
                        previous: prev,
                        next: run,
                    }),
                    Some(prev) if prev.last() >= run.start => Err(RunSetError::Overlapping {
                        previous: prev,
                        next: run,
                    }),
                    _ => Ok(()),
                })
                .inspect_err(|err| debug!("rejected run load: {err}"))?;
            set.index.insert(run.start, run.seq());
            previous = Some(run);
        }
        debug!("loaded {} validated runs", set.index.len());
        Ok(set)
    }

    /// Run with the greatest start at or below `id`, whether or not it
    /// holds `id`.
    #[inline]
    pub(crate) fn candidate(&self, id: i64) -> Option<Run> {
        self.index.descend(id).next().map(Run::from)
    }

    /// Write a run into the index.
    ///
    /// # Panics
    ///
    /// If the run has no members or a non-positive step. Either means the
    /// split or merge arithmetic is broken.
    pub(crate) fn put(&mut self, run: Run) {
        assert!(run.count > 0, "run {run} must have at least one member");
        assert!(run.step > 0, "run {run} must have a positive step");
        self.index.insert(run.start, run.seq());
    }

    /// Whether `id` is in the set.
    pub fn contains(&self, id: i64) -> bool {
        self.candidate(id).is_some_and(|run| run.contains(id))
    }

    /// Add `id` to the set, merging it with neighboring runs where possible.
    ///
    /// Adding an ID that is already present does nothing.
    pub fn insert(&mut self, id: i64) {
        if let Some(run) = self.insert_uncompacted(id) {
            self.compact_around(run);
        }
    }

    /// Add `id` as a single-member run without merging it into neighbors.
    ///
    /// If `id` falls inside the span of an existing run whose step skips
    /// it, that run is split around `id`. Returns the new run, or `None`
    /// if `id` was already present.
    pub fn insert_uncompacted(&mut self, id: i64) -> Option<Run> {
        if let Some(prev) = self.candidate(id) {
            if prev.contains(id) {
                return None;
            }
            if id > prev.start && id < prev.last() {
                let kept = (id - prev.start) / prev.step + 1;
                let left = Run::new(prev.start, prev.step, kept);
                self.put(left);
                self.put(Run::new(
                    left.last() + prev.step,
                    prev.step,
                    prev.count - kept,
                ));
                trace!("split {prev} around {id}");
            }
        }
        let run = Run::singleton(id);
        self.put(run);
        Some(run)
    }

    /// Remove `id` from the set. Returns whether it was present.
    ///
    /// Removing an interior member splits its run in two. Neighbors are not
    /// re-merged afterwards.
    pub fn remove(&mut self, id: i64) -> bool {
        let Some(run) = self.candidate(id).filter(|run| run.contains(id)) else {
            return false;
        };

        if run.is_singleton() {
            self.index.remove(run.start);
        } else if id == run.start {
            self.index.remove(run.start);
            self.put(Run::new(run.start + run.step, run.step, run.count - 1));
        } else if id == run.last() {
            self.put(Run::new(run.start, run.step, run.count - 1));
        } else {
            let index = (id - run.start) / run.step;
            let left = Run::new(run.start, run.step, index);
            self.put(left);
            self.put(Run::new(
                left.last() + 2 * run.step,
                run.step,
                run.count - index - 1,
            ));
        }
        true
    }

    /// Remove every ID `x` with `from <= x <= to`.
    ///
    /// Both bounds are inclusive. An empty interval (`from > to`) removes
    /// nothing. Runs left behind are not re-merged.
    pub fn remove_range(&mut self, from: i64, to: i64) {
        if from > to {
            return;
        }
        if log_enabled!(Level::Trace) {
            trace!("remove_range [{from}, {to}] before: {:?}", self.to_runs());
        }

        let affected: Vec<Run> = self
            .index
            .descend(to)
            .map(Run::from)
            .take_while(|run| run.last() >= from)
            .collect();

        for run in affected {
            let last = run.last();
            if from <= run.start && to >= last {
                self.index.remove(run.start);
                continue;
            }
            if to < run.start || from > last {
                continue;
            }

            // Members below `from`: none if `from` is at or before the start,
            // otherwise every position strictly before it.
            let keep_left = if from <= run.start {
                0
            } else {
                let offset = from - run.start;
                let index = offset / run.step;
                if offset % run.step == 0 {
                    index
                } else {
                    index + 1
                }
            };
            let keep_right = if to >= last {
                0
            } else {
                run.count - (to - run.start) / run.step - 1
            };

            if from > run.start && to < last && keep_left + keep_right == run.count {
                // interval falls between two members
                continue;
            }

            if keep_left > 0 {
                self.put(Run::new(run.start, run.step, keep_left));
            } else {
                self.index.remove(run.start);
            }
            if keep_right > 0 {
                self.put(Run::new(
                    last - run.step * (keep_right - 1),
                    run.step,
                    keep_right,
                ));
            }
        }

        if log_enabled!(Level::Trace) {
            trace!("remove_range [{from}, {to}] after: {:?}", self.to_runs());
        }
    }

    /// All runs in increasing start order.
    pub fn runs(&self) -> Runs<'_, I> {
        Runs::new(self.index.ascend(i64::MIN))
    }

    /// Snapshot of all runs in increasing start order.
    pub fn to_runs(&self) -> Vec<Run> {
        self.runs().collect()
    }

    /// All IDs in increasing order.
    pub fn iter(&self) -> Ids<'_, I> {
        Ids::new(self.runs())
    }

    /// IDs below `to` from runs starting at or after `from`, in increasing
    /// order.
    ///
    /// The scan begins at the first run whose start is `>= from`. Members
    /// `>= from` of a run that starts before `from` are not yielded, even
    /// though [`RunSet::contains`] reports them.
    pub fn iter_from_to(&self, from: i64, to: i64) -> IdsInRange<'_, I> {
        IdsInRange::new(Ids::new(Runs::new(self.index.ascend(from))), to)
    }

    /// Number of stored runs.
    pub fn run_count(&self) -> usize {
        self.index.len()
    }

    /// Number of IDs in the set. Walks every run.
    pub fn len(&self) -> u64 {
        self.runs().map(|run| run.count as u64).sum()
    }

    /// Whether the set holds no IDs.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Remove every ID.
    pub fn clear(&mut self) {
        self.index.clear();
    }
}

impl Default for RunSet<BTreeIndex> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: OrderedIndex> fmt::Debug for RunSet<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.runs()).finish()
    }
}

impl<I: OrderedIndex> Extend<i64> for RunSet<I> {
    fn extend<T: IntoIterator<Item = i64>>(&mut self, ids: T) {
        for id in ids {
            self.insert(id);
        }
    }
}

impl<I: OrderedIndex> FromIterator<i64> for RunSet<I> {
    fn from_iter<T: IntoIterator<Item = i64>>(ids: T) -> Self {
        let mut set = Self::with_tuning(Tuning::default());
        set.extend(ids);
        set
    }
}

impl<'a, I: OrderedIndex> IntoIterator for &'a RunSet<I> {
    type Item = i64;
    type IntoIter = Ids<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
