//! The two interchangeable protocols for combining per-worker tallies into
//! one shared result.
//!
//! Both uphold the same contract: after every worker has merged exactly once
//! and been joined, the accumulator holds the fold of all local tallies
//! under the [`Tally::merge`][crate::Tally::merge] operator, and during
//! execution the observable count and maximum only ever rise.

mod atomic;
mod guarded;

pub(crate) use atomic::AtomicTally;
pub(crate) use guarded::GuardedTally;

use crate::Tally;

/// Selects how worker threads merge their partial tallies into the shared
/// accumulator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Merge {
    /// Workers merge under a mutual-exclusion lock.
    Mutex,

    /// Workers merge through lock-free atomic operations: fetch-add for the
    /// count and a compare-and-swap retry loop for the maximum.
    Cas,
}

/// A shared destination that each worker merges its local tally into,
/// exactly once, after finishing its chunk.
///
/// Implementations must tolerate concurrent merges from any number of
/// workers. Extracting the combined result consumes the accumulator and is
/// only meaningful once all workers have been joined; the join is what
/// orders their merges before the final read.
pub(crate) trait MergeTarget: Sync {
    /// Folds one worker's local tally into the shared state.
    fn merge(&self, local: Tally);

    /// Consumes the accumulator, returning the combined tally.
    fn into_tally(self) -> Tally;
}
