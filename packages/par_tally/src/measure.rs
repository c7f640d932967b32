use std::num::NonZero;
use std::time::{Duration, Instant};

use crate::{Merge, Result, Tally, tally_parallel, tally_sequential};

/// Identifies one reduction strategy in a benchmark configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Strategy {
    /// Single-threaded baseline pass over the whole input.
    Sequential,

    /// Partitioned multi-threaded reduction.
    Parallel {
        /// Number of worker threads, one per chunk.
        workers: NonZero<usize>,

        /// How workers merge their partial results.
        merge: Merge,
    },
}

impl Strategy {
    /// The mode label used in benchmark reports.
    #[must_use]
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Sequential => "Linear",
            Self::Parallel {
                merge: Merge::Mutex,
                ..
            } => "Mutex",
            Self::Parallel {
                merge: Merge::Cas, ..
            } => "CAS",
        }
    }

    /// Worker count for parallel strategies, `None` for the sequential
    /// baseline.
    #[must_use]
    pub fn workers(&self) -> Option<NonZero<usize>> {
        match self {
            Self::Sequential => None,
            Self::Parallel { workers, .. } => Some(*workers),
        }
    }
}

/// Wall-clock outcome of executing one strategy over one input.
#[derive(Clone, Copy, Debug)]
pub struct Measurement {
    elapsed: Duration,
    tally: Tally,
}

impl Measurement {
    /// Time from just before the strategy was dispatched until its result
    /// was available, including worker thread setup and teardown for the
    /// parallel strategies.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Difficult to simulate time and therefore set expectations.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Elapsed time in seconds, the unit benchmark reports present.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Difficult to simulate time and therefore set expectations.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// The computed reduction result.
    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }
}

/// Executes one strategy over the input, timing it with the monotonic clock.
///
/// The measurement brackets the whole strategy execution: partitioning,
/// worker creation, reduction, merging, and the join all fall inside it.
///
/// # Errors
///
/// Returns [`Error::SpawnWorker`][crate::Error::SpawnWorker] when a parallel
/// strategy cannot create one of its worker threads. The sequential strategy
/// cannot fail.
///
/// # Examples
///
/// ```
/// use par_tally::{Strategy, measure};
///
/// # fn main() -> Result<(), par_tally::Error> {
/// let values = vec![5, 10, 15];
///
/// let measurement = measure(&values, Strategy::Sequential)?;
///
/// assert_eq!(measurement.tally().count(), 3);
/// println!("took {:.6} seconds", measurement.elapsed_seconds());
/// # Ok(())
/// # }
/// ```
pub fn measure(values: &[i64], strategy: Strategy) -> Result<Measurement> {
    let started = Instant::now();

    let tally = match strategy {
        Strategy::Sequential => tally_sequential(values),
        Strategy::Parallel { workers, merge } => tally_parallel(values, workers, merge)?,
    };

    Ok(Measurement {
        elapsed: started.elapsed(),
        tally,
    })
}
