//! Integer ID sets stored as strided runs.
//!
//! `runset` keeps a set of distinct `i64` IDs that tend to arrive in long,
//! evenly spaced runs: log offsets, operation IDs, sequence numbers. Instead
//! of one entry per ID it stores one entry per run:
//!
//! - `start`: the first ID, used as the key in an ordered index
//! - `step`: the constant distance between consecutive IDs
//! - `count`: how many IDs the run holds
//!
//! Membership, insertion and deletion touch at most a couple of neighboring
//! runs, found by a scan from a pivot key in the ordered index.
//!
//! # Compaction
//!
//! Inserting an ID creates a single-member run and then sweeps its neighbors:
//! runs with the same step that meet end to start are merged, and where steps
//! differ a member moves from the smaller run to the larger one. Deletion
//! splits runs but never merges them back.
//!
//! # Example
//!
//! ```rust
//! use runset::{Run, RunSet};
//!
//! let mut set = RunSet::new();
//! for id in [0, 100, 200, 300] {
//!     set.insert(id);
//! }
//! assert_eq!(set.to_runs(), vec![Run::new(0, 100, 4)]);
//!
//! // both bounds are inclusive
//! set.remove_range(250, 300);
//! assert!(!set.contains(300));
//! assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 100, 200]);
//! ```
//!
//! # Ordered index
//!
//! The set is generic over [`OrderedIndex`], an ordered map from run start
//! to step and count. [`BTreeIndex`] is the default; [`SortedVecIndex`]
//! trades insert cost for scan speed.
//!
//! # Concurrency
//!
//! None. A set is mutated through `&mut self`; splits and merges perform
//! several index writes that readers must not observe halfway.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod compact;
mod config;
mod error;
mod index;
mod iter;
mod run;
mod set;
mod traits;

pub use config::{Tuning, DEFAULT_DEGREE};
pub use error::RunSetError;
pub use index::{BTreeIndex, SortedVecIndex};
pub use iter::{Ids, IdsInRange, Runs};
pub use run::{Run, Seq, DEFAULT_STEP};
pub use set::RunSet;
pub use traits::OrderedIndex;
