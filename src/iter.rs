//! Lazy traversal over a set.
//!
//! Each iterator borrows the set and walks the ordered index directly; a
//! fresh call starts a fresh scan. Stop early by dropping the iterator.

use std::iter::FusedIterator;

use crate::run::Run;
use crate::traits::OrderedIndex;

/// Runs in increasing start order.
pub struct Runs<'a, I>
where
    I: OrderedIndex + 'a,
{
    inner: I::Ascend<'a>,
}

impl<'a, I> Runs<'a, I>
where
    I: OrderedIndex + 'a,
{
    pub(crate) fn new(inner: I::Ascend<'a>) -> Self {
        Self { inner }
    }
}

impl<'a, I> Iterator for Runs<'a, I>
where
    I: OrderedIndex + 'a,
{
    type Item = Run;

    #[inline]
    fn next(&mut self) -> Option<Run> {
        self.inner.next().map(Run::from)
    }
}

/// IDs in increasing order, expanded run by run.
pub struct Ids<'a, I>
where
    I: OrderedIndex + 'a,
{
    runs: Runs<'a, I>,
    current: Option<Run>,
    position: i64,
}

impl<'a, I> Ids<'a, I>
where
    I: OrderedIndex + 'a,
{
    pub(crate) fn new(runs: Runs<'a, I>) -> Self {
        Self {
            runs,
            current: None,
            position: 0,
        }
    }
}

impl<'a, I> Iterator for Ids<'a, I>
where
    I: OrderedIndex + 'a,
{
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            if let Some(run) = self.current {
                if self.position < run.count {
                    let id = run.start + self.position * run.step;
                    self.position += 1;
                    return Some(id);
                }
            }
            self.current = Some(self.runs.next()?);
            self.position = 0;
        }
    }
}

/// IDs in increasing order that stop at an exclusive upper bound.
pub struct IdsInRange<'a, I>
where
    I: OrderedIndex + 'a,
{
    ids: Ids<'a, I>,
    to: i64,
    done: bool,
}

impl<'a, I> IdsInRange<'a, I>
where
    I: OrderedIndex + 'a,
{
    pub(crate) fn new(ids: Ids<'a, I>, to: i64) -> Self {
        Self {
            ids,
            to,
            done: false,
        }
    }
}

impl<'a, I> Iterator for IdsInRange<'a, I>
where
    I: OrderedIndex + 'a,
{
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.done {
            return None;
        }
        match self.ids.next() {
            Some(id) if id < self.to => Some(id),
            _ => {
                self.done = true;
                None
            }
        }
    }
}

impl<'a, I> FusedIterator for IdsInRange<'a, I> where I: OrderedIndex + 'a {}

#[cfg(test)]
mod tests {
    use crate::config::Tuning;
    use crate::run::Run;
    use crate::set::RunSet;

    fn sample() -> RunSet {
        RunSet::from_runs(
            Tuning::default(),
            [Run::new(-4, 2, 3), Run::singleton(3), Run::new(10, 5, 3)],
        )
    }

    #[test]
    fn test_runs_snapshot() {
        let set = sample();
        let runs: Vec<Run> = set.runs().collect();
        assert_eq!(
            runs,
            vec![Run::new(-4, 2, 3), Run::singleton(3), Run::new(10, 5, 3)]
        );
        // restartable
        assert_eq!(set.runs().count(), 3);
    }

    #[test]
    fn test_ids_expand_every_run() {
        let set = sample();
        let ids: Vec<i64> = set.iter().collect();
        assert_eq!(ids, vec![-4, -2, 0, 3, 10, 15, 20]);
        let expanded: Vec<i64> = set.runs().flat_map(|run| run.ids()).collect();
        assert_eq!(ids, expanded);
    }

    #[test]
    fn test_ids_stop_early() {
        let set = sample();
        let mut seen = Vec::new();
        for id in &set {
            if id > 3 {
                break;
            }
            seen.push(id);
        }
        assert_eq!(seen, vec![-4, -2, 0, 3]);
    }

    #[test]
    fn test_ids_in_range_bound_is_exclusive() {
        let set = sample();
        assert_eq!(set.iter_from_to(-4, 15).collect::<Vec<_>>(), vec![-4, -2, 0, 3, 10]);
        assert_eq!(set.iter_from_to(3, 16).collect::<Vec<_>>(), vec![3, 10, 15]);
        assert_eq!(set.iter_from_to(4, 100).collect::<Vec<_>>(), vec![10, 15, 20]);
        assert_eq!(set.iter_from_to(21, 100).count(), 0);
    }

    #[test]
    fn test_ids_in_range_is_fused() {
        let set = sample();
        let mut ids = set.iter_from_to(10, 11);
        assert_eq!(ids.next(), Some(10));
        assert_eq!(ids.next(), None);
        assert_eq!(ids.next(), None);
    }
}
