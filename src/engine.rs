use crate::{
    grid::Grid,
    partition::{row_ranges, RowRange},
};
use tracing::trace;

/// Computes one generation of `current` into `next` using `workers` threads.
///
/// Each worker owns a disjoint band of rows of `next` and reads `current` only.
/// Returns after every worker has finished; a panic in any worker is propagated.
pub fn step_turn(current: &Grid, next: &mut Grid, workers: usize) {
    assert_eq!(current.dimensions(), next.dimensions());
    let width = current.width();
    let ranges = row_ranges(workers, current.height());

    if ranges.len() == 1 {
        update_rows(current, ranges[0], next.as_bytes_mut());
        return;
    }

    let bands = split_bands(next.as_bytes_mut(), &ranges, width);
    std::thread::scope(|s| {
        for (range, band) in ranges.iter().copied().zip(bands) {
            if range.is_empty() {
                continue;
            }
            s.spawn(move || {
                trace!(start = range.start, end = range.end, "worker started");
                update_rows(current, range, band);
            });
        }
    });
}

/// Cuts the row-major buffer into one mutable slice per range.
fn split_bands<'a>(mut rest: &'a mut [u8], ranges: &[RowRange], width: usize) -> Vec<&'a mut [u8]> {
    let mut bands = Vec::with_capacity(ranges.len());
    for range in ranges {
        let (band, tail) = rest.split_at_mut(range.len() * width);
        bands.push(band);
        rest = tail;
    }
    debug_assert!(rest.is_empty());
    bands
}

/// Writes the next state of every cell in `range` into `dst`,
/// which holds exactly those rows.
fn update_rows(current: &Grid, range: RowRange, dst: &mut [u8]) {
    let width = current.width();
    debug_assert_eq!(dst.len(), range.len() * width);
    for (row, y) in dst.chunks_exact_mut(width).zip(range.start..range.end) {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = current.next_cell(x, y);
        }
    }
}
