use std::io;

use thiserror::Error;

/// Errors that can occur when executing a parallel reduction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The operating system refused to create one of the worker threads,
    /// typically at very high worker counts.
    ///
    /// Partial results from workers that did start are discarded. The caller
    /// decides what to do next; there is no automatic retry and no fallback
    /// to a smaller worker count.
    #[error("failed to spawn worker thread {worker_index}: {source}")]
    SpawnWorker {
        /// Zero-based index of the worker that could not be created.
        worker_index: usize,

        /// The underlying operating system error.
        source: io::Error,
    },
}

/// A specialized `Result` type for parallel reduction operations, returning
/// the crate's [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;
