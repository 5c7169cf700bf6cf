//! Path downsampling for export.
//!
//! A run may hold millions of paths; the export keeps at most 50 series.
//! Paths are grouped into consecutive batches and each batch is replaced
//! by its per-step mean.
//!
//! - N ≤ 100: one series per path
//! - N > 100: target = clamp(⌊√N⌋, 15, 50), batch = N / target,
//!   columns = ⌈N / batch⌉ (the last batch may be short, never empty)

use std::fmt;

use super::matrix::PathMatrix;

const MAX_INDIVIDUAL_PATHS: usize = 100;
const MIN_LINES: usize = 15;
const MAX_LINES: usize = 50;

/// Number of series aimed for when exporting `num_paths` paths.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::target_lines;
///
/// assert_eq!(target_lines(42), 42);
/// assert_eq!(target_lines(101), 15);
/// assert_eq!(target_lines(1_000), 31);
/// assert_eq!(target_lines(1_000_000), 50);
/// ```
pub fn target_lines(num_paths: usize) -> usize {
    if num_paths <= MAX_INDIVIDUAL_PATHS {
        num_paths
    } else {
        isqrt(num_paths).clamp(MIN_LINES, MAX_LINES)
    }
}

/// Number of consecutive paths averaged into one series (at least 1).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::batch_size;
///
/// assert_eq!(batch_size(50), 1);
/// assert_eq!(batch_size(101), 6);
/// assert_eq!(batch_size(10_000), 200);
/// ```
pub fn batch_size(num_paths: usize) -> usize {
    match target_lines(num_paths) {
        0 => 1,
        target => (num_paths / target).max(1),
    }
}

fn isqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

/// Column label of one exported series.
///
/// Indices are 0-based; `end` is the last member path (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesLabel {
    /// A single path, rendered `path_<i>`.
    Path(usize),
    /// Mean of paths `start..=end`, rendered `avg_paths_<start>-<end>`.
    Average {
        /// First member path.
        start: usize,
        /// Last member path.
        end: usize,
    },
}

impl fmt::Display for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(i) => write!(f, "path_{}", i),
            Self::Average { start, end } => write!(f, "avg_paths_{}-{}", start, end),
        }
    }
}

/// Downsampled series: one row per time step, one column per batch.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportSeries {
    labels: Vec<SeriesLabel>,
    rows: Vec<Vec<f64>>,
    batch_size: usize,
}

impl ExportSeries {
    /// Column labels, in column order.
    #[inline]
    pub fn labels(&self) -> &[SeriesLabel] {
        &self.labels
    }

    /// Rows in time-step order; `rows()[j][b]` is the mean of batch `b` at step `j`.
    #[inline]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows (M).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of series columns, excluding the time-step column.
    #[inline]
    pub fn num_columns(&self) -> usize {
        self.labels.len()
    }

    /// Paths per batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// CSV header: `time_step` followed by every label.
    pub fn header(&self) -> Vec<String> {
        std::iter::once("time_step".to_string())
            .chain(self.labels.iter().map(ToString::to_string))
            .collect()
    }
}

/// Compresses `matrix` into at most 50 series (or N when N ≤ 100).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{downsample, PathMatrix};
///
/// let matrix = PathMatrix::zeros(10, 10_000);
/// let series = downsample(&matrix);
/// assert_eq!(series.num_rows(), 10);
/// assert_eq!(series.num_columns(), 50);
/// assert_eq!(series.labels()[0].to_string(), "avg_paths_0-199");
/// ```
pub fn downsample(matrix: &PathMatrix) -> ExportSeries {
    let (num_steps, num_paths) = matrix.shape();
    let batch = batch_size(num_paths);
    let num_batches = num_paths.div_ceil(batch);

    let mut labels = Vec::with_capacity(num_batches);
    let mut rows: Vec<Vec<f64>> = (0..num_steps)
        .map(|_| Vec::with_capacity(num_batches))
        .collect();
    let mut acc = vec![0.0; num_steps];

    for b in 0..num_batches {
        let start = b * batch;
        let end = (start + batch).min(num_paths);

        acc.fill(0.0);
        for path in start..end {
            for (sum, &price) in acc.iter_mut().zip(matrix.path(path)) {
                *sum += price;
            }
        }

        let count = (end - start) as f64;
        for (row, &sum) in rows.iter_mut().zip(&acc) {
            row.push(sum / count);
        }

        labels.push(if batch == 1 {
            SeriesLabel::Path(start)
        } else {
            SeriesLabel::Average {
                start,
                end: end - 1,
            }
        });
    }

    ExportSeries {
        labels,
        rows,
        batch_size: batch,
    }
}
