//! Genetic-distance shrinkage and coalescent regularization of a covariance matrix.
//!
//! Covariances between variants decay with the genetic distance between them,
//! `exp(-rho / 2m)` with `rho = 4 Ne d / 100`, and weights under the configured
//! cutoff are set to exactly zero. The shrunk matrix is then blended with a
//! scaled identity using the population-scaled mutation rate `theta`.

use log::debug;
use ndarray::Array2;

use crate::config::ShrinkageConfig;
use crate::errors::{LdShrinkError, Result};
use crate::models::GeneticMap;

///
/// Pre-threshold shrinkage weight for two variants `distance_cm` apart.
///
pub fn shrinkage_weight(distance_cm: f64, config: &ShrinkageConfig) -> f64 {
    let rho = 4.0 * config.effective_population_size * distance_cm / 100.0;
    (-rho / (2.0 * config.panel_size as f64)).exp()
}

/// Weights `(j, w)` for every `j > i` that survives the cutoff.
///
/// The map is sorted, so weights only shrink as `j` grows and the scan can
/// stop at the first one under the cutoff.
fn row_weights(map: &GeneticMap, i: usize, config: &ShrinkageConfig) -> Vec<(usize, f64)> {
    let mut row = Vec::new();
    for j in (i + 1)..map.len() {
        let weight = shrinkage_weight(map.distance(i, j), config);
        if weight < config.cutoff {
            break;
        }
        row.push((j, weight));
    }
    row
}

#[cfg(feature = "parallel")]
fn upper_weights(map: &GeneticMap, config: &ShrinkageConfig) -> Vec<Vec<(usize, f64)>> {
    use rayon::prelude::*;

    (0..map.len())
        .into_par_iter()
        .map(|i| row_weights(map, i, config))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn upper_weights(map: &GeneticMap, config: &ShrinkageConfig) -> Vec<Vec<(usize, f64)>> {
    (0..map.len())
        .map(|i| row_weights(map, i, config))
        .collect()
}

///
/// Full symmetric matrix of thresholded shrinkage weights, with ones on the diagonal.
///
pub fn shrinkage_weights(map: &GeneticMap, config: &ShrinkageConfig) -> Array2<f64> {
    let p = map.len();
    let mut upper = Array2::<f64>::zeros((p, p));
    for (i, row) in upper_weights(map, config).into_iter().enumerate() {
        for (j, weight) in row {
            upper[(i, j)] = weight;
        }
    }
    let mut weights = &upper + &upper.t();
    weights.diag_mut().fill(1.0);
    weights
}

///
/// Multiply each off-diagonal covariance by its shrinkage weight.
///
/// The weighted upper triangle is built in a fresh matrix and combined with
/// its transpose; the diagonal of `cov` is carried over unchanged.
///
/// # Arguments
/// * `cov` - `p x p` sample covariance
/// * `map` - genetic positions of the `p` variants
/// * `config` - shrinkage parameters (`m`, `Ne`, `cutoff`)
///
/// # Errors
/// `DimensionMismatch` if `cov` is not `p x p`.
///
pub fn shrink_covariance(
    cov: &Array2<f64>,
    map: &GeneticMap,
    config: &ShrinkageConfig,
) -> Result<Array2<f64>> {
    let p = map.len();
    if cov.dim() != (p, p) {
        return Err(LdShrinkError::DimensionMismatch {
            panel_variants: cov.ncols(),
            map_len: p,
        });
    }

    let mut upper = Array2::<f64>::zeros((p, p));
    let mut n_pairs = 0usize;
    for (i, row) in upper_weights(map, config).into_iter().enumerate() {
        n_pairs += row.len();
        for (j, weight) in row {
            upper[(i, j)] = weight * cov[(i, j)];
        }
    }
    debug!(
        "Shrinkage kept {} of {} variant pairs above cutoff {}",
        n_pairs,
        p * p.saturating_sub(1) / 2,
        config.cutoff
    );

    let mut shrunk = &upper + &upper.t();
    shrunk.diag_mut().assign(&cov.diag());
    Ok(shrunk)
}

///
/// Population-scaled mutation rate `theta` for a panel of `m` individuals.
///
/// `theta = (1/H) / (2m + 1/H)` with `H` the harmonic number of `2m - 1`.
///
pub fn mutation_rate(panel_size: u32) -> f64 {
    let n_haplotypes = 2 * panel_size as u64;
    let harmonic: f64 = (1..n_haplotypes).map(|k| 1.0 / k as f64).sum();
    let inv_harmonic = 1.0 / harmonic;
    inv_harmonic / (n_haplotypes as f64 + inv_harmonic)
}

///
/// Blend a shrunk covariance with a scaled identity:
/// `(1 - theta)^2 S + theta/2 (1 - theta/2) I`.
///
pub fn regularize(shrunk: &Array2<f64>, panel_size: u32) -> Array2<f64> {
    let theta = mutation_rate(panel_size);
    let scale = (1.0 - theta) * (1.0 - theta);
    let ridge = 0.5 * theta * (1.0 - 0.5 * theta);
    debug!("Regularizing with theta = {}", theta);

    let mut sig_hat = shrunk * scale;
    sig_hat.diag_mut().mapv_inplace(|v| v + ridge);
    sig_hat
}
