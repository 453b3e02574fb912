use ndarray::{Array2, ArrayView2};

use crate::errors::{LdShrinkError, Result};

/// Reference panel: one row per individual (or haplotype), one column per variant.
#[derive(Debug, Clone)]
pub struct Panel {
    data: Array2<f64>,
}

impl Panel {
    ///
    /// Wrap an `n x p` matrix of allele values.
    ///
    /// # Errors
    /// `EmptyInput` if the panel has no variants or fewer than two
    /// individuals, since the unbiased covariance is undefined there.
    ///
    pub fn new(data: Array2<f64>) -> Result<Self> {
        let (n_individuals, n_variants) = data.dim();
        if n_variants == 0 {
            return Err(LdShrinkError::EmptyInput(
                "panel has no variants".to_string(),
            ));
        }
        if n_individuals < 2 {
            return Err(LdShrinkError::EmptyInput(format!(
                "panel needs at least 2 individuals, got {}",
                n_individuals
            )));
        }
        Ok(Panel { data })
    }

    pub fn n_individuals(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_variants(&self) -> usize {
        self.data.ncols()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

impl TryFrom<Array2<f64>> for Panel {
    type Error = LdShrinkError;

    fn try_from(data: Array2<f64>) -> Result<Self> {
        Panel::new(data)
    }
}

/// Cumulative genetic positions (cM) for the panel's variants, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticMap {
    positions: Vec<f64>,
}

impl GeneticMap {
    ///
    /// Build a map from cumulative positions.
    ///
    /// # Errors
    /// `Ordering` at the first position that is smaller than its predecessor
    /// or not finite, `EmptyInput` for an empty map.
    ///
    pub fn new(positions: Vec<f64>) -> Result<Self> {
        if positions.is_empty() {
            return Err(LdShrinkError::EmptyInput(
                "genetic map has no positions".to_string(),
            ));
        }
        if let Some(pos) = positions.iter().position(|p| !p.is_finite()) {
            return Err(LdShrinkError::Ordering {
                index: pos,
                previous: if pos > 0 { positions[pos - 1] } else { f64::NAN },
                next: positions[pos],
            });
        }
        for (i, pair) in positions.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(LdShrinkError::Ordering {
                    index: i + 1,
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }
        Ok(GeneticMap { positions })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Genetic distance in cM between variants `i <= j`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.positions[j] - self.positions[i]
    }
}

impl TryFrom<Vec<f64>> for GeneticMap {
    type Error = LdShrinkError;

    fn try_from(positions: Vec<f64>) -> Result<Self> {
        GeneticMap::new(positions)
    }
}
