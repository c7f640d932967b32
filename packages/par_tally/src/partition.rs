use std::num::NonZero;
use std::ops::Range;

use num_integer::Integer;

/// Splits `0..len` into `pieces` contiguous, disjoint ranges that cover the
/// whole interval.
///
/// Every range except the last spans exactly `len / pieces` items; the last
/// one absorbs the division remainder. When `len < pieces` the leading
/// ranges are empty and the final range carries everything; consumers must
/// treat an empty range as contributing nothing. The decomposition is
/// deterministic in `(len, pieces)`.
///
/// All arithmetic is `usize`, so lengths beyond the 32-bit range partition
/// correctly on the 64-bit targets that can hold such inputs.
#[expect(
    clippy::arithmetic_side_effects,
    reason = "piece * chunk and start + chunk never exceed len, which fits in usize"
)]
pub(crate) fn chunk_ranges(len: usize, pieces: NonZero<usize>) -> Vec<Range<usize>> {
    let (chunk, _remainder) = len.div_rem(&pieces.get());
    let last = pieces.get() - 1;

    (0..pieces.get())
        .map(|piece| {
            let start = piece * chunk;
            let end = if piece == last { len } else { start + chunk };

            start..end
        })
        .collect()
}
