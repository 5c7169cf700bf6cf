//! Simulation storage for price paths and terminal prices.
//!
//! # Memory Layout
//!
//! [`PathMatrix`] is logically an M × N grid indexed `(step, path)`, where
//! cell `(j, i)` holds S_{j+1} of path `i` (the initial spot is not stored).
//! Physically it is path-contiguous: `data[path * M + step]`, so each
//! trajectory is one `&[f64]` of length M and generators can hand out
//! disjoint mutable slices per path.

use std::collections::TryReserveError;
use std::slice::{ChunksExact, ChunksExactMut};

/// Pre-allocated M × N matrix of simulated prices.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::PathMatrix;
///
/// let matrix = PathMatrix::zeros(252, 1_000);
/// assert_eq!(matrix.shape(), (252, 1_000));
/// assert_eq!(matrix.get(251, 999), 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    data: Vec<f64>,
    num_steps: usize,
    num_paths: usize,
}

impl PathMatrix {
    /// Allocates a zero-filled matrix of `num_steps` rows and `num_paths` columns.
    ///
    /// # Panics
    ///
    /// Panics if `num_steps * num_paths` overflows; validated parameters
    /// rule this out.
    pub fn zeros(num_steps: usize, num_paths: usize) -> Self {
        Self {
            data: vec![0.0; num_steps * num_paths],
            num_steps,
            num_paths,
        }
    }

    /// Allocates a zero-filled matrix, reporting allocation failure instead
    /// of aborting.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error when the cell count overflows or the
    /// memory is not available.
    pub fn try_zeros(num_steps: usize, num_paths: usize) -> Result<Self, TryReserveError> {
        Ok(Self {
            data: try_zeroed(num_steps.saturating_mul(num_paths))?,
            num_steps,
            num_paths,
        })
    }

    /// Returns `(num_steps, num_paths)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_steps, self.num_paths)
    }

    /// Returns the number of time steps (rows).
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    /// Returns the number of paths (columns).
    #[inline]
    pub fn num_paths(&self) -> usize {
        self.num_paths
    }

    /// Returns the price at `step` on path `path`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, step: usize, path: usize) -> f64 {
        assert!(step < self.num_steps, "step {} out of range", step);
        self.data[path * self.num_steps + step]
    }

    /// Returns the full trajectory of one path.
    #[inline]
    pub fn path(&self, path: usize) -> &[f64] {
        let start = path * self.num_steps;
        &self.data[start..start + self.num_steps]
    }

    /// Iterates trajectories in path order.
    #[inline]
    pub fn paths(&self) -> ChunksExact<'_, f64> {
        self.data.chunks_exact(self.num_steps.max(1))
    }

    /// Iterates trajectories mutably in path order.
    #[inline]
    pub fn paths_mut(&mut self) -> ChunksExactMut<'_, f64> {
        self.data.chunks_exact_mut(self.num_steps.max(1))
    }

    /// Iterates the prices of every path at `step`.
    pub fn row(&self, step: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(step < self.num_steps, "step {} out of range", step);
        self.paths().map(move |path| path[step])
    }

    /// Returns the raw path-contiguous buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the raw buffer for in-place generation.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Zero-fills every cell, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}

/// Terminal price of every path: `FinalPrices[i] = PathMatrix[M-1][i]`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::FinalPrices;
///
/// let finals = FinalPrices::from(vec![95.0, 105.0]);
/// assert_eq!(finals.len(), 2);
/// assert_eq!(finals.as_slice()[1], 105.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FinalPrices(Vec<f64>);

impl FinalPrices {
    /// Allocates `num_paths` zeroed terminal prices.
    pub fn zeros(num_paths: usize) -> Self {
        Self(vec![0.0; num_paths])
    }

    /// Allocates `num_paths` zeroed terminal prices without aborting on failure.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error when the memory is not available.
    pub fn try_zeros(num_paths: usize) -> Result<Self, TryReserveError> {
        Ok(Self(try_zeroed(num_paths)?))
    }

    /// Copies the last row of `matrix`.
    pub fn from_matrix(matrix: &PathMatrix) -> Self {
        let mut finals = Self::zeros(matrix.num_paths());
        finals.copy_from_matrix(matrix);
        finals
    }

    /// Overwrites these prices with the last row of `matrix`, reusing the allocation.
    pub(crate) fn copy_from_matrix(&mut self, matrix: &PathMatrix) {
        self.0.clear();
        if matrix.num_steps() > 0 {
            self.0.extend(matrix.row(matrix.num_steps() - 1));
        }
    }

    /// Returns the prices as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Returns the number of paths.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no prices are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Zero-fills every price, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.0.fill(0.0);
    }
}

impl From<Vec<f64>> for FinalPrices {
    fn from(prices: Vec<f64>) -> Self {
        Self(prices)
    }
}

fn try_zeroed(len: usize) -> Result<Vec<f64>, TryReserveError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)?;
    data.resize(len, 0.0);
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(num_steps: usize, num_paths: usize) -> PathMatrix {
        let mut matrix = PathMatrix::zeros(num_steps, num_paths);
        for (i, path) in matrix.paths_mut().enumerate() {
            for (j, cell) in path.iter_mut().enumerate() {
                *cell = (i * 100 + j) as f64;
            }
        }
        matrix
    }

    #[test]
    fn test_zeros_shape() {
        let matrix = PathMatrix::zeros(3, 4);
        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.as_slice().len(), 12);
        assert!(matrix.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_try_zeros_matches_zeros() {
        assert_eq!(PathMatrix::try_zeros(3, 4).unwrap(), PathMatrix::zeros(3, 4));
        assert_eq!(FinalPrices::try_zeros(4).unwrap(), FinalPrices::zeros(4));
    }

    #[test]
    fn test_try_zeros_reports_impossible_allocation() {
        assert!(PathMatrix::try_zeros(usize::MAX, 2).is_err());
        assert!(PathMatrix::try_zeros(1_000, usize::MAX / 1_000).is_err());
        assert!(FinalPrices::try_zeros(usize::MAX).is_err());
    }

    #[test]
    fn test_logical_indexing() {
        let matrix = numbered(3, 4);
        assert_eq!(matrix.get(0, 0), 0.0);
        assert_eq!(matrix.get(2, 1), 102.0);
        assert_eq!(matrix.get(1, 3), 301.0);
        assert_eq!(matrix.path(2), &[200.0, 201.0, 202.0]);
    }

    #[test]
    fn test_row() {
        let matrix = numbered(3, 4);
        let row: Vec<f64> = matrix.row(2).collect();
        assert_eq!(row, vec![2.0, 102.0, 202.0, 302.0]);
    }

    #[test]
    fn test_paths_iterator_count() {
        let matrix = numbered(5, 7);
        assert_eq!(matrix.paths().count(), 7);
        assert!(matrix.paths().all(|p| p.len() == 5));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_step_out_of_range() {
        let matrix = PathMatrix::zeros(3, 4);
        matrix.get(3, 0);
    }

    #[test]
    fn test_clear_keeps_allocation() {
        let mut matrix = numbered(3, 4);
        let ptr = matrix.as_slice().as_ptr();

        matrix.clear();

        assert_eq!(matrix.as_slice().as_ptr(), ptr);
        assert_eq!(matrix.shape(), (3, 4));
        assert!(matrix.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_final_prices_from_matrix() {
        let matrix = numbered(3, 4);
        let finals = FinalPrices::from_matrix(&matrix);

        assert_eq!(finals.len(), 4);
        for i in 0..4 {
            assert_eq!(finals.as_slice()[i], matrix.get(2, i));
        }
    }

    #[test]
    fn test_final_prices_clear() {
        let mut finals = FinalPrices::from(vec![1.0, 2.0, 3.0]);
        finals.clear();
        assert_eq!(finals.as_slice(), &[0.0, 0.0, 0.0]);
        assert!(!finals.is_empty());
    }
}
