//! Compaction: folding a freshly inserted run into its neighbors.
//!
//! Two neighboring runs either merge into one, or one member moves from the
//! smaller run to the larger so that a later insert can finish the merge.
//! Moving members toward the larger run also stops a member from bouncing
//! between the same two runs on alternating inserts.
//!
//! The sweep around a run goes left until nothing changes, then right until
//! nothing changes. A change made while sweeping right does not trigger
//! another look to the left, so adjacent mergeable runs can remain until a
//! later insert touches them.

use log::trace;

use crate::run::Run;
use crate::set::RunSet;
use crate::traits::OrderedIndex;

impl<I: OrderedIndex> RunSet<I> {
    /// Run stored immediately before `run`.
    fn left_of(&self, run: &Run) -> Option<Run> {
        let pivot = run.start.checked_sub(1)?;
        self.index.descend(pivot).next().map(Run::from)
    }

    /// Run stored immediately after `run`.
    fn right_of(&self, run: &Run) -> Option<Run> {
        let pivot = run.last().checked_add(1)?;
        self.index.ascend(pivot).next().map(Run::from)
    }

    /// Merge `run` with its neighbors as far as possible.
    pub(crate) fn compact_around(&mut self, run: Run) {
        let mut anchor = run;

        while let Some(left) = self.left_of(&anchor) {
            match self.merge_pair(left, anchor) {
                Some(merged) => anchor = merged,
                None => break,
            }
        }

        while let Some(right) = self.right_of(&anchor) {
            match self.merge_pair(anchor, right) {
                Some(merged) => anchor = merged,
                None => break,
            }
        }
    }

    /// Merge two neighboring runs, or move one member between them.
    ///
    /// `r1` must start before `r2`. Returns the run to continue sweeping
    /// from (always the one stored under `r1.start`), or `None` if the runs
    /// were left untouched.
    pub(crate) fn merge_pair(&mut self, mut r1: Run, mut r2: Run) -> Option<Run> {
        assert!(
            r1.start < r2.start,
            "runs must be ordered: {r1} before {r2}"
        );

        // two single IDs form a run of two, whatever the distance
        if r1.is_singleton() && r2.is_singleton() {
            let merged = Run::new(r1.start, r2.start.checked_sub(r1.start)?, 2);
            self.index.remove(r2.start);
            self.put(merged);
            trace!("merged {r1} and {r2} into {merged}");
            return Some(merged);
        }

        // a single ID has no step of its own yet
        if r2.is_singleton() {
            r2.step = r1.step;
        }
        if r1.is_singleton() {
            r1.step = r2.step;
        }

        let past_r1 = r1.last().checked_add(r1.step);

        if r1.step == r2.step {
            if past_r1 != Some(r2.start) {
                return None;
            }
            self.index.remove(r2.start);
            let merged = Run::new(r1.start, r1.step, r1.count + r2.count);
            self.put(merged);
            trace!("merged {r1} and {r2} into {merged}");
            return Some(merged);
        }

        if r2.count > r1.count {
            // r2 takes the last member of r1
            if r2.start.checked_sub(r2.step) == Some(r1.last()) {
                self.index.remove(r2.start);
                let grown = Run::new(r2.start - r2.step, r2.step, r2.count + 1);
                self.put(grown);
                let shrunk = Run::new(r1.start, r1.step, r1.count - 1);
                self.put(shrunk);
                trace!("moved {} from {r1} to {grown}", grown.start);
                return Some(shrunk);
            }
        } else if past_r1 == Some(r2.start) {
            // r1 takes the first member of r2
            self.index.remove(r2.start);
            let shrunk = Run::new(r2.start + r2.step, r2.step, r2.count - 1);
            self.put(shrunk);
            let grown = Run::new(r1.start, r1.step, r1.count + 1);
            self.put(grown);
            trace!("moved {} from {r2} to {grown}", r2.start);
            return Some(grown);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Tuning;
    use crate::run::Run;
    use crate::set::RunSet;

    fn loaded(runs: &[Run]) -> RunSet {
        RunSet::from_runs(Tuning::default(), runs.iter().copied())
    }

    #[test]
    fn test_merge_singletons() {
        let mut set = loaded(&[Run::singleton(3), Run::singleton(10)]);
        let merged = set.merge_pair(Run::singleton(3), Run::singleton(10));
        assert_eq!(merged, Some(Run::new(3, 7, 2)));
        assert_eq!(set.to_runs(), vec![Run::new(3, 7, 2)]);
    }

    #[test]
    fn test_merge_adjacent_equal_steps() {
        let (a, b) = (Run::new(0, 3, 2), Run::new(6, 3, 4));
        let mut set = loaded(&[a, b]);
        assert_eq!(set.merge_pair(a, b), Some(Run::new(0, 3, 6)));
        assert_eq!(set.to_runs(), vec![Run::new(0, 3, 6)]);
    }

    #[test]
    fn test_singleton_adopts_neighbor_step() {
        let (a, b) = (Run::singleton(-2), Run::new(0, 2, 3));
        let mut set = loaded(&[a, b]);
        assert_eq!(set.merge_pair(a, b), Some(Run::new(-2, 2, 4)));

        let (a, b) = (Run::new(0, 2, 3), Run::new(6, 9, 1));
        let mut set = loaded(&[a, b]);
        assert_eq!(set.merge_pair(a, b), Some(Run::new(0, 2, 4)));
    }

    #[test]
    fn test_equal_steps_not_adjacent() {
        let (a, b) = (Run::new(0, 2, 3), Run::new(7, 2, 3));
        let mut set = loaded(&[a, b]);
        assert_eq!(set.merge_pair(a, b), None);
        assert_eq!(set.to_runs(), vec![a, b]);
    }

    #[test]
    fn test_larger_right_run_takes_last_member() {
        let (a, b) = (Run::new(0, 10, 3), Run::new(21, 1, 4));
        let mut set = loaded(&[a, b]);
        assert_eq!(set.merge_pair(a, b), Some(Run::new(0, 10, 2)));
        assert_eq!(set.to_runs(), vec![Run::new(0, 10, 2), Run::new(20, 1, 5)]);
    }

    #[test]
    fn test_larger_left_run_takes_first_member() {
        let (a, b) = (Run::new(0, 1, 3), Run::new(3, 2, 2));
        let mut set = loaded(&[a, b]);
        assert_eq!(set.merge_pair(a, b), Some(Run::new(0, 1, 4)));
        assert_eq!(set.to_runs(), vec![Run::new(0, 1, 4), Run::new(5, 2, 1)]);
    }

    #[test]
    fn test_no_move_without_contact() {
        let (a, b) = (Run::new(0, 1, 3), Run::new(10, 2, 2));
        let mut set = loaded(&[a, b]);
        assert_eq!(set.merge_pair(a, b), None);

        // right run is larger but does not reach r1's last member
        let (a, b) = (Run::new(0, 1, 2), Run::new(2, 3, 5));
        let mut set = loaded(&[a, b]);
        assert_eq!(set.merge_pair(a, b), None);
        assert_eq!(set.to_runs(), vec![a, b]);
    }

    #[test]
    fn test_right_sweep_does_not_look_left_again() {
        let mut set = loaded(&[Run::new(0, 1, 2), Run::new(3, 2, 2), Run::new(6, 1, 3)]);
        set.insert(2);
        // {5} could join 6..8 but the sweep stopped at it
        assert_eq!(
            set.to_runs(),
            vec![Run::new(0, 1, 4), Run::new(5, 2, 1), Run::new(6, 1, 3)]
        );

        set.insert(4);
        assert_eq!(set.to_runs(), vec![Run::new(0, 1, 9)]);
    }

    #[test]
    fn test_sweep_right_moves_anchor_left() {
        let mut set = loaded(&[Run::new(0, 10, 2), Run::new(21, 1, 4)]);
        set.insert(20);
        assert_eq!(set.to_runs(), vec![Run::new(0, 10, 2), Run::new(20, 1, 5)]);
    }

    #[test]
    fn test_extreme_ids() {
        let mut set = RunSet::new();
        set.insert(i64::MAX);
        set.insert(i64::MIN);
        assert!(set.contains(i64::MAX));
        assert!(set.contains(i64::MIN));
        assert_eq!(set.run_count(), 2);
        set.insert(i64::MAX - 1);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![i64::MIN, i64::MAX - 1, i64::MAX]);
    }

    #[test]
    #[should_panic(expected = "runs must be ordered")]
    fn test_unordered_pair_panics() {
        let mut set = RunSet::new();
        set.merge_pair(Run::singleton(5), Run::singleton(1));
    }
}
