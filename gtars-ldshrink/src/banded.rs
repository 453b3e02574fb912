//! Band detection and band storage for correlation matrices.
//!
//! Shrinkage zeroes every pair further apart than the cutoff allows, so the
//! correlation matrix is banded. [`BandedMatrix`] stores only the diagonals
//! within that band, column by column, in the usual general-band layout:
//! entry `(i, j)` lives at row `bwd + i - j` of column `j`.

use ndarray::{Array2, ArrayView2};

///
/// Largest `|i - j|` with a nonzero entry. A diagonal matrix has bandwidth 0.
///
pub fn bandwidth(r: &ArrayView2<f64>) -> usize {
    r.indexed_iter()
        .filter(|(_, v)| **v != 0.0)
        .map(|((i, j), _)| i.abs_diff(j))
        .max()
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BandedMatrix {
    bwd: usize,
    n: usize,
    band: Array2<f64>,
}

impl BandedMatrix {
    ///
    /// Pack the entries of a square matrix that lie within `bwd` of the
    /// diagonal. Entries outside the band are dropped.
    ///
    /// # Panics
    /// Panics if `r` is not square.
    ///
    pub fn pack(r: &ArrayView2<f64>, bwd: usize) -> Self {
        assert!(r.is_square(), "banded packing needs a square matrix");
        let n = r.nrows();
        let bwd = bwd.min(n.saturating_sub(1));

        let mut band = Array2::<f64>::zeros((2 * bwd + 1, n));
        for j in 0..n {
            let lo = j.saturating_sub(bwd);
            let hi = (j + bwd).min(n - 1);
            for i in lo..=hi {
                band[(bwd + i - j, j)] = r[(i, j)];
            }
        }
        BandedMatrix { bwd, n, band }
    }

    /// Pack at the matrix's own [`bandwidth`], which is lossless.
    pub fn from_dense(r: &ArrayView2<f64>) -> Self {
        Self::pack(r, bandwidth(r))
    }

    pub fn bandwidth(&self) -> usize {
        self.bwd
    }

    /// Dimension of the (square) matrix this band was packed from.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Raw `(2 * bwd + 1) x n` band storage.
    pub fn band(&self) -> ArrayView2<'_, f64> {
        self.band.view()
    }

    /// Entry `(i, j)`, zero outside the band.
    ///
    /// # Panics
    /// Panics if `i` or `j` is not below [`dim`](Self::dim).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n && j < self.n, "index ({}, {}) out of bounds", i, j);
        if i.abs_diff(j) > self.bwd {
            return 0.0;
        }
        self.band[(self.bwd + i - j, j)]
    }

    pub fn to_dense(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.n, self.n), |(i, j)| self.get(i, j))
    }
}
