/// Half-open span of rows `[start, end)` handled by one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowRange {
    pub start: usize,
    pub end: usize,
}

impl RowRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Splits `height` rows into `workers` contiguous ranges.
///
/// The last range absorbs the remainder. When `workers > height` some ranges are empty.
pub fn row_ranges(workers: usize, height: usize) -> Vec<RowRange> {
    assert!(workers >= 1);
    (0..workers)
        .map(|i| RowRange {
            start: i * height / workers,
            end: if i == workers - 1 {
                height
            } else {
                (i + 1) * height / workers
            },
        })
        .collect()
}
