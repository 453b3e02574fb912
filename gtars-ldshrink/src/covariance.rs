//! Sample covariance of a reference panel.

use ndarray::{Array2, Axis};

use crate::config::PanelKind;
use crate::models::Panel;

/// Scale applied to genotype covariances (random-mating correction).
const GENOTYPE_SCALE: f64 = 0.5;

///
/// Unbiased (`n - 1` denominator) covariance between the panel's columns.
///
/// Genotype dosage panels are scaled by 0.5 so their covariance is on the
/// haplotype scale.
///
/// # Arguments
/// * `panel` - the `n x p` reference panel
/// * `kind` - whether the panel holds haplotypes or genotype dosages
///
/// # Returns
/// A symmetric `p x p` covariance matrix.
///
pub fn sample_covariance(panel: &Panel, kind: PanelKind) -> Array2<f64> {
    let data = panel.view();
    let n = panel.n_individuals() as f64;

    // Panel::new guarantees at least two rows
    let means = data.sum_axis(Axis(0)) / n;
    let centered = &data - &means;

    let mut cov = centered.t().dot(&centered) / (n - 1.0);
    if kind == PanelKind::Genotype {
        cov *= GENOTYPE_SCALE;
    }
    cov
}
