//! Benchmark sweep over the reduction strategies of `par_tally`.
//!
//! For each input size, the sweep generates a workload of uniform integers
//! in `[0, 1000]`, measures the single-threaded baseline once, and then
//! measures each parallel merge protocol at every worker count. One
//! tab-separated row is reported per measurement:
//!
//! ```text
//! Matrix Size	Threads	Mode	Time (seconds)	Count	Max Value
//! 1000000	-	Linear	0.003210	199876	1000
//! 1000000	8	Mutex	0.000854	199876	1000
//! 1000000	8	CAS	0.000791	199876	1000
//! ```
//!
//! Sizes and worker counts default to the reference grid and may be
//! overridden by repeating `--size` and `--workers`. A configuration that
//! cannot run - a workload too large to allocate, or a worker count the
//! operating system refuses to serve - is reported on stderr and skipped,
//! so one oversized configuration does not abort the sweep.

use std::num::NonZero;
use std::process::ExitCode;

use argh::FromArgs;
use par_tally::{Measurement, Merge, Strategy, measure};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Input sizes exercised when no `--size` is given. The largest needs
/// around 16 GB of memory and is expected to be skipped on small machines.
const REFERENCE_SIZES: [usize; 4] = [10_000, 1_000_000, 100_000_000, 2_000_000_000];

/// Worker counts exercised when no `--workers` is given.
const REFERENCE_WORKER_COUNTS: [usize; 6] = [8, 16, 32, 64, 128, 256];

/// Measures sequential, mutex-merged and lock-free reduction strategies
/// across a grid of input sizes and worker counts.
#[derive(FromArgs)]
struct Args {
    /// input size to sweep; may be repeated (defaults to the reference grid)
    #[argh(option)]
    size: Vec<usize>,

    /// worker count to sweep; may be repeated (defaults to the reference grid)
    #[argh(option)]
    workers: Vec<usize>,

    /// seed for workload generation (defaults to operating system entropy)
    #[argh(option)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let sizes = if args.size.is_empty() {
        REFERENCE_SIZES.to_vec()
    } else {
        args.size.clone()
    };

    let raw_worker_counts = if args.workers.is_empty() {
        REFERENCE_WORKER_COUNTS.to_vec()
    } else {
        args.workers.clone()
    };

    let mut worker_counts = Vec::with_capacity(raw_worker_counts.len());

    for count in raw_worker_counts {
        let Some(count) = NonZero::new(count) else {
            eprintln!("worker counts must be at least 1");
            return ExitCode::FAILURE;
        };

        worker_counts.push(count);
    }

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    println!();
    println!("Test Results:");
    println!("Matrix Size\tThreads\tMode\tTime (seconds)\tCount\tMax Value");

    for &size in &sizes {
        let Some(values) = generate_workload(&mut rng, size) else {
            eprintln!("skipping size {size}: not enough memory for the workload");
            continue;
        };

        let baseline = measure(&values, Strategy::Sequential)
            .expect("the sequential strategy spawns no threads and cannot fail");
        println!("{}", format_row(size, Strategy::Sequential, &baseline));

        for merge in [Merge::Mutex, Merge::Cas] {
            for &workers in &worker_counts {
                let strategy = Strategy::Parallel { workers, merge };

                match measure(&values, strategy) {
                    Ok(measurement) => println!("{}", format_row(size, strategy, &measurement)),
                    Err(error) => eprintln!(
                        "skipping size {size}, {workers} workers, {}: {error}",
                        strategy.mode()
                    ),
                }
            }
        }

        println!();
    }

    ExitCode::SUCCESS
}

/// Generates `len` uniform values in `[0, 1000]`, or `None` when the
/// allocation cannot be satisfied.
///
/// The top of the reference grid needs tens of gigabytes; `try_reserve`
/// turns that from an abort into a skippable condition.
fn generate_workload(rng: &mut SmallRng, len: usize) -> Option<Vec<i64>> {
    let mut values = Vec::new();
    values.try_reserve_exact(len).ok()?;

    values.extend((0..len).map(|_| rng.random_range(0..=1_000)));

    Some(values)
}

/// Renders one report row: size, worker count or a dash for the baseline,
/// mode label, elapsed seconds to microsecond precision, count, and the
/// maximum or a dash when no value qualified.
fn format_row(size: usize, strategy: Strategy, measurement: &Measurement) -> String {
    let workers = strategy
        .workers()
        .map_or_else(|| "-".to_string(), |workers| workers.to_string());
    let max = measurement
        .tally()
        .max()
        .map_or_else(|| "-".to_string(), |max| max.to_string());

    format!(
        "{size}\t{workers}\t{}\t{:.6}\t{}\t{max}",
        strategy.mode(),
        measurement.elapsed_seconds(),
        measurement.tally().count(),
    )
}
