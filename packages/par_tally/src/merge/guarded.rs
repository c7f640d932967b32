use std::sync::Mutex;

use crate::Tally;
use crate::merge::MergeTarget;

/// The mutex-guarded accumulator: one [`Tally`] and the lock that protects
/// it, bundled into a single owning value so the state cannot be reached
/// outside a critical section.
#[derive(Debug, Default)]
pub(crate) struct GuardedTally {
    inner: Mutex<Tally>,
}

impl MergeTarget for GuardedTally {
    fn merge(&self, local: Tally) {
        // The guard releases the lock on every exit path out of the critical
        // section, including an unwinding one.
        self.inner
            .lock()
            .expect("lock cannot be poisoned - the critical section is a field-wise merge that does not panic")
            .merge(local);
    }

    fn into_tally(self) -> Tally {
        self.inner
            .into_inner()
            .expect("lock cannot be poisoned - the critical section is a field-wise merge that does not panic")
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn starts_empty() {
        assert_eq!(GuardedTally::default().into_tally(), Tally::default());
    }

    #[test]
    fn merges_from_one_thread() {
        let target = GuardedTally::default();

        target.merge(Tally::from_parts(2, Some(10)));
        target.merge(Tally::from_parts(1, Some(-5)));

        assert_eq!(target.into_tally(), Tally::from_parts(3, Some(10)));
    }

    #[test]
    fn concurrent_merges_equal_the_sequential_fold() {
        let target = GuardedTally::default();

        thread::scope(|scope| {
            for worker in 0..8_i64 {
                let target = &target;

                scope.spawn(move || {
                    target.merge(Tally::from_parts(1, Some(worker * 5)));
                });
            }
        });

        assert_eq!(target.into_tally(), Tally::from_parts(8, Some(35)));
    }
}
