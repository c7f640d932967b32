//! Compares the sequential baseline against both parallel merge protocols
//! on one mid-sized workload.
//!
//! The interesting relationship is contention on the combine step: the
//! lock-free path should suffer no more of it than the mutex path. The
//! numbers include worker thread setup and teardown, which is the cost
//! model the package is built around.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use new_zealand::nz;
use par_tally::{Merge, tally_parallel, tally_sequential};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const VALUES_LEN: usize = 1_000_000;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let values: Vec<i64> = (0..VALUES_LEN)
        .map(|_| rng.random_range(0..=1_000))
        .collect();

    let mut group = c.benchmark_group("strategies");

    group.bench_function("sequential", |b| {
        b.iter(|| black_box(tally_sequential(black_box(&values))));
    });

    group.bench_function("parallel_mutex", |b| {
        b.iter(|| {
            black_box(
                tally_parallel(black_box(&values), nz!(8), Merge::Mutex)
                    .expect("worker spawn must succeed for the benchmark to be meaningful"),
            );
        });
    });

    group.bench_function("parallel_cas", |b| {
        b.iter(|| {
            black_box(
                tally_parallel(black_box(&values), nz!(8), Merge::Cas)
                    .expect("worker spawn must succeed for the benchmark to be meaningful"),
            );
        });
    });

    group.finish();
}
