use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

use crate::Tally;
use crate::merge::MergeTarget;

/// Stands in for "no qualifying value seen yet" in the atomic maximum cell.
///
/// `i64::MIN` ends in the digit 8, so it is never a multiple of five and
/// cannot collide with a real maximum.
const NO_MAX: i64 = i64::MIN;

/// The lock-free accumulator: an independently atomic count and maximum.
///
/// All atomic operations use relaxed ordering. The combine operator is
/// commutative and associative, so no ordering among merges is needed, and
/// the final read is ordered after every merge by the caller joining the
/// worker threads first.
#[derive(Debug)]
pub(crate) struct AtomicTally {
    count: AtomicU64,
    max: AtomicI64,
}

impl Default for AtomicTally {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            max: AtomicI64::new(NO_MAX),
        }
    }
}

impl MergeTarget for AtomicTally {
    fn merge(&self, local: Tally) {
        self.count.fetch_add(local.count(), Ordering::Relaxed);

        let Some(candidate) = local.max() else {
            return;
        };

        // A blind `if candidate > shared { store }` would race with other
        // writers and lose updates; the exchange loop commits only when the
        // cell still holds the value the comparison was made against, so the
        // cell can only ever rise. The weak exchange may fail spuriously,
        // which the retry absorbs, and each failure hands back the current
        // value so the loop re-decides without a separate load.
        let mut observed = self.max.load(Ordering::Relaxed);

        while candidate > observed {
            match self.max.compare_exchange_weak(
                observed,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return,
                Err(current) => observed = current,
            }
        }
    }

    fn into_tally(self) -> Tally {
        let raw_max = self.max.into_inner();
        let max = (raw_max != NO_MAX).then_some(raw_max);

        Tally::from_parts(self.count.into_inner(), max)
    }
}
