//! The run value type.
//!
//! A run is an arithmetic progression of IDs: `start, start + step, ...`,
//! `count` members long. Runs are stored in the ordered index keyed by
//! `start`, with [`Seq`] as the stored value.

use std::fmt;

use crate::error::RunSetError;

/// Step given to a run created standalone with a single member.
///
/// The step of a singleton is not meaningful until it merges with a
/// neighbor; a non-zero placeholder keeps the arithmetic free of zero checks.
pub const DEFAULT_STEP: i64 = 1;

/// Value stored in the ordered index for a run; the key is the run's start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seq {
    /// Distance between consecutive members.
    pub step: i64,
    /// Number of members.
    pub count: i64,
}

impl Seq {
    /// Create a stored value.
    pub const fn new(step: i64, count: i64) -> Self {
        Self { step, count }
    }
}

/// A run of evenly spaced IDs.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// First member, and the index key.
    pub start: i64,
    /// Distance between consecutive members.
    pub step: i64,
    /// Number of members, at least one.
    pub count: i64,
}

impl Run {
    /// Create a run.
    pub const fn new(start: i64, step: i64, count: i64) -> Self {
        Self { start, step, count }
    }

    /// Create a single-member run with [`DEFAULT_STEP`].
    pub const fn singleton(id: i64) -> Self {
        Self::new(id, DEFAULT_STEP, 1)
    }

    /// Rebuild a run from an index entry.
    #[inline]
    pub const fn from_entry(start: i64, seq: Seq) -> Self {
        Self::new(start, seq.step, seq.count)
    }

    /// The value stored under `start` in the index.
    #[inline]
    pub const fn seq(&self) -> Seq {
        Seq::new(self.step, self.count)
    }

    /// Whether the run holds exactly one member.
    #[inline]
    pub const fn is_singleton(&self) -> bool {
        self.count == 1
    }

    /// Last member of the run.
    #[inline]
    pub const fn last(&self) -> i64 {
        if self.step == 0 {
            return self.start;
        }
        self.start + (self.count - 1) * self.step
    }

    /// Whether `id` is a member of this run.
    #[inline]
    pub fn contains(&self, id: i64) -> bool {
        if self.step == 0 {
            return id == self.start;
        }
        id >= self.start
            && id <= self.last()
            && id.abs_diff(self.start) % self.step.unsigned_abs() == 0
    }

    /// Members of this run in increasing order.
    pub fn ids(&self) -> impl Iterator<Item = i64> {
        let Run { start, step, count } = *self;
        (0..count).map(move |i| start + i * step)
    }

    /// Check that this run can be stored as-is.
    ///
    /// A run needs at least one member and a non-negative step; a zero step
    /// is only allowed for a singleton.
    pub fn validate(&self) -> Result<(), RunSetError> {
        let reason = if self.count < 1 {
            "count must be at least 1"
        } else if self.step < 0 {
            "step must not be negative"
        } else if self.step == 0 && self.count > 1 {
            "step must be positive for runs with more than one member"
        } else {
            return Ok(());
        };
        Err(RunSetError::InvalidRun { run: *self, reason })
    }
}

impl From<(i64, Seq)> for Run {
    #[inline]
    fn from((start, seq): (i64, Seq)) -> Self {
        Self::from_entry(start, seq)
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}|{}:{}|{}>",
            self.start,
            self.step,
            self.count,
            self.last()
        )
    }
}

impl fmt::Debug for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
