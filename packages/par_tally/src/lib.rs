#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Partitioned parallel reduction over a slice of integers, with
//! interchangeable protocols for merging per-worker results.
//!
//! The reduction itself is fixed: count the multiples of five in the input
//! and find the largest one. What varies is how that reduction is executed
//! and, for the parallel strategies, how the per-worker partial results are
//! combined into one:
//!
//! - [`tally_sequential`] - single-threaded baseline pass, the latency floor
//!   and correctness oracle for everything else
//! - [`tally_parallel`] - splits the input into contiguous chunks of
//!   near-equal size, reduces each chunk on a dedicated worker thread, and
//!   merges the partial results through the selected [`Merge`] protocol
//! - [`Merge::Mutex`] - workers merge under a mutual-exclusion lock
//! - [`Merge::Cas`] - workers merge through lock-free atomic operations:
//!   fetch-add for the count, a compare-and-swap loop for the maximum
//! - [`measure`] - wall-clock measurement shell around either strategy,
//!   producing a [`Measurement`] for benchmark reporting
//!
//! Worker threads are created for each call and destroyed before it returns.
//! This is deliberate: the point of the package is to compare end-to-end
//! strategy cost, including thread setup and teardown, so no thread pool is
//! reused across calls.
//!
//! # Determinism
//!
//! The combine operator is commutative and associative with identity
//! "nothing seen", so the final [`Tally`] is deterministic in the input and
//! worker count and equals the sequential result bit-for-bit, no matter how
//! the merges interleave. Only the intermediate state of the shared
//! accumulator is nondeterministic.
//!
//! # Example
//!
//! ```
//! use std::num::NonZero;
//!
//! use par_tally::{Merge, tally_parallel, tally_sequential};
//!
//! # fn main() -> Result<(), par_tally::Error> {
//! let values = vec![5, -10, 3, 0, 25];
//!
//! let baseline = tally_sequential(&values);
//! assert_eq!(baseline.count(), 4);
//! assert_eq!(baseline.max(), Some(25));
//!
//! let workers = NonZero::new(2).unwrap();
//! for merge in [Merge::Mutex, Merge::Cas] {
//!     assert_eq!(tally_parallel(&values, workers, merge)?, baseline);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod measure;
mod merge;
mod partition;
mod run;
mod sequential;
mod tally;

pub use error::*;
pub use measure::*;
pub use merge::Merge;
pub use run::*;
pub use sequential::*;
pub use tally::*;
