//! Error types.

use thiserror::Error;

use crate::run::Run;

/// Errors raised while loading runs into a set.
///
/// Mutations on a set never fail; a broken internal invariant panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunSetError {
    /// A run that cannot be stored.
    #[error("invalid run {run}: {reason}")]
    InvalidRun {
        /// The offending run.
        run: Run,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// Runs not given in strictly increasing order of start.
    #[error("runs out of order: {previous} is followed by {next}")]
    Unordered {
        /// Run given first.
        previous: Run,
        /// Run given right after it.
        next: Run,
    },

    /// Two runs share at least one ID span.
    #[error("runs overlap: {previous} reaches into {next}")]
    Overlapping {
        /// Lower run.
        previous: Run,
        /// Higher run.
        next: Run,
    },
}
