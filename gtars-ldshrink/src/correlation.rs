use ndarray::{Array1, Array2, Zip};

use crate::errors::{LdShrinkError, Result};

///
/// Rescale a covariance matrix to a correlation matrix with a unit diagonal.
///
/// # Errors
/// `DegenerateVariance` for the first diagonal entry that is not strictly
/// positive.
///
pub fn to_correlation(sig_hat: &Array2<f64>) -> Result<Array2<f64>> {
    let variances = sig_hat.diag();
    if let Some((index, &variance)) = variances.iter().enumerate().find(|(_, v)| !(**v > 0.0)) {
        return Err(LdShrinkError::DegenerateVariance { index, variance });
    }
    let sd: Array1<f64> = variances.mapv(f64::sqrt);

    let mut r = Array2::<f64>::zeros(sig_hat.raw_dim());
    Zip::indexed(&mut r)
        .and(sig_hat)
        .for_each(|(i, j), r_ij, &s_ij| *r_ij = s_ij / (sd[i] * sd[j]));
    r.diag_mut().fill(1.0);
    Ok(r)
}
