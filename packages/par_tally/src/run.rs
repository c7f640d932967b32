use std::num::NonZero;
use std::thread;

use crate::merge::{AtomicTally, GuardedTally, MergeTarget};
use crate::partition::chunk_ranges;
use crate::{Error, Merge, Result, Tally, tally_sequential};

/// Reduces the slice across `workers` threads, combining per-worker results
/// through the selected merge protocol.
///
/// The input is split into contiguous chunks of near-equal size, one per
/// worker. Each worker reduces its chunk privately, with no synchronization,
/// then merges its local result into the shared accumulator exactly once.
/// A worker count above the input length is fine; the surplus workers
/// receive empty chunks and contribute nothing.
///
/// Worker threads are created for this call and destroyed before it
/// returns. That cost is intentionally part of what callers measure; a
/// reusable pool would change the meaning of the numbers.
///
/// The result is deterministic in `(values, workers)` and equals
/// [`tally_sequential`] bit-for-bit regardless of the merge protocol.
///
/// # Errors
///
/// Returns [`Error::SpawnWorker`] when the operating system refuses to
/// create a worker thread. Workers that had already started are still
/// joined, and their partial results are discarded.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
///
/// use par_tally::{Merge, tally_parallel};
///
/// # fn main() -> Result<(), par_tally::Error> {
/// let values = vec![5, 10, 15, 20, 25];
/// let workers = NonZero::new(2).unwrap();
///
/// let tally = tally_parallel(&values, workers, Merge::Cas)?;
///
/// assert_eq!(tally.count(), 5);
/// assert_eq!(tally.max(), Some(25));
/// # Ok(())
/// # }
/// ```
pub fn tally_parallel(values: &[i64], workers: NonZero<usize>, merge: Merge) -> Result<Tally> {
    match merge {
        Merge::Mutex => reduce_chunked(values, workers, GuardedTally::default()),
        Merge::Cas => reduce_chunked(values, workers, AtomicTally::default()),
    }
}

/// Runs the partition-reduce-merge cycle against the given accumulator.
///
/// Dropping `target` on the error path is what discards partial results:
/// the scope joins any workers that did start before the error propagates.
fn reduce_chunked<Target>(
    values: &[i64],
    workers: NonZero<usize>,
    target: Target,
) -> Result<Tally>
where
    Target: MergeTarget,
{
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(workers.get());

        for (index, range) in chunk_ranges(values.len(), workers).into_iter().enumerate() {
            let chunk = values
                .get(range)
                .expect("chunk ranges always lie within the slice they partition");
            let target = &target;

            let handle = thread::Builder::new()
                .name(format!("tally-{index}"))
                .spawn_scoped(scope, move || {
                    let local = tally_sequential(chunk);
                    target.merge(local);
                })
                .map_err(|source| Error::SpawnWorker {
                    worker_index: index,
                    source,
                })?;

            handles.push(handle);
        }

        // The join barrier: every worker's merge happens before the result
        // extraction below.
        for handle in handles {
            handle
                .join()
                .expect("worker threads cannot panic - the kernel and the merge protocols are total");
        }

        Ok(())
    })?;

    Ok(target.into_tally())
}

#[cfg(test)]
mod tests {
    use new_zealand::nz;

    use super::*;

    /// Every scenario must hold for both merge protocols.
    fn assert_both_protocols(
        values: &[i64],
        workers: NonZero<usize>,
        expected_count: u64,
        expected_max: Option<i64>,
    ) {
        for merge in [Merge::Mutex, Merge::Cas] {
            let tally = tally_parallel(values, workers, merge)
                .expect("spawning a handful of threads must succeed");

            assert_eq!(tally.count(), expected_count, "{merge:?} count");
            assert_eq!(tally.max(), expected_max, "{merge:?} max");
        }
    }

    #[test]
    fn all_qualifying_two_workers() {
        assert_both_protocols(&[5, 10, 15, 20, 25], nz!(2), 5, Some(25));
    }

    #[test]
    fn no_qualifier_yields_the_identity() {
        assert_both_protocols(&[1, 2, 3, 4, 6, 7], nz!(3), 0, None);
    }

    #[test]
    fn zeros_qualify() {
        assert_both_protocols(&[0, 0, 0], nz!(2), 3, Some(0));
    }

    #[test]
    fn one_worker_per_element() {
        assert_both_protocols(&[5, -5, 10, -10], nz!(4), 4, Some(10));
    }

    #[test]
    fn empty_input() {
        assert_both_protocols(&[], nz!(4), 0, None);
    }

    #[test]
    fn more_workers_than_elements() {
        assert_both_protocols(&[5], nz!(8), 1, Some(5));
    }

    #[test]
    fn uniform_input_many_workers() {
        let values = vec![5_i64; 1_000_000];

        assert_both_protocols(&values, nz!(64), 1_000_000, Some(5));
    }

    #[test]
    fn ascending_input_eight_workers() {
        let values: Vec<i64> = (0..10_000).collect();

        assert_both_protocols(&values, nz!(8), 2_000, Some(9_995));
    }

    #[test]
    fn matches_sequential_on_remainder_heavy_partition() {
        // 10 elements over 4 workers leaves the last worker a double share.
        let values: Vec<i64> = (0..10).map(|i| i * 3 - 7).collect();

        let oracle = tally_sequential(&values);

        for merge in [Merge::Mutex, Merge::Cas] {
            assert_eq!(
                tally_parallel(&values, nz!(4), merge)
                    .expect("spawning a handful of threads must succeed"),
                oracle
            );
        }
    }
}
