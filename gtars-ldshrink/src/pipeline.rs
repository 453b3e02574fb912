use log::{debug, info};
use ndarray::Array2;
use sprs::CsMat;

use crate::banded::{BandedMatrix, bandwidth};
use crate::config::{PanelKind, ShrinkageConfig};
use crate::correlation::to_correlation;
use crate::covariance::sample_covariance;
use crate::errors::{LdShrinkError, Result};
use crate::models::{GeneticMap, Panel};
use crate::shrinkage::{regularize, shrink_covariance};
use crate::sparse::to_sparse;

/// Output of one shrinkage run.
#[derive(Debug, Clone)]
pub struct LdShrinkResult {
    /// Shrinkage estimate of the LD correlation matrix.
    pub correlation: Array2<f64>,
    /// Band storage of `correlation`, present only when
    /// [`ShrinkageConfig::banded`] was set.
    pub banded: Option<BandedMatrix>,
    /// `correlation` without its exact zeros.
    pub sparse: CsMat<f64>,
}

/// Computes shrinkage LD matrices for a fixed set of parameters.
#[derive(Debug, Clone, Default)]
pub struct LdShrinker {
    config: ShrinkageConfig,
}

impl LdShrinker {
    ///
    /// # Errors
    /// `InvalidParameter` if the configuration does not validate.
    ///
    pub fn new(config: ShrinkageConfig) -> Result<Self> {
        config.validate()?;
        Ok(LdShrinker { config })
    }

    pub fn config(&self) -> &ShrinkageConfig {
        &self.config
    }

    ///
    /// Estimate the LD correlation matrix of `panel`.
    ///
    /// Runs covariance estimation, distance shrinkage, regularization and
    /// normalization, then packs the result into sparse (and optionally
    /// banded) form.
    ///
    /// # Arguments
    /// * `panel` - reference panel, individuals by variants
    /// * `map` - cumulative genetic positions of the panel's variants
    ///
    /// # Errors
    /// * `DimensionMismatch` if the panel and map disagree on the variant count
    /// * `DegenerateVariance` if a regularized variance is not positive
    ///
    pub fn compute(&self, panel: &Panel, map: &GeneticMap) -> Result<LdShrinkResult> {
        if panel.n_variants() != map.len() {
            return Err(LdShrinkError::DimensionMismatch {
                panel_variants: panel.n_variants(),
                map_len: map.len(),
            });
        }
        info!(
            "Computing shrinkage LD for {} variants from {} {:?} rows",
            panel.n_variants(),
            panel.n_individuals(),
            self.config.panel_kind
        );

        let cov = sample_covariance(panel, self.config.panel_kind);
        let shrunk = shrink_covariance(&cov, map, &self.config)?;
        let sig_hat = regularize(&shrunk, self.config.panel_size);
        let correlation = to_correlation(&sig_hat)?;

        let banded = if self.config.banded {
            let bwd = bandwidth(&correlation.view());
            debug!("Packing correlation matrix at bandwidth {}", bwd);
            Some(BandedMatrix::pack(&correlation.view(), bwd))
        } else {
            None
        };
        let sparse = to_sparse(&correlation.view());
        info!("LD matrix has {} nonzero entries", sparse.nnz());

        Ok(LdShrinkResult {
            correlation,
            banded,
            sparse,
        })
    }
}

///
/// One-call shrinkage LD estimate.
///
/// Builds a [`ShrinkageConfig`] from the arguments and runs [`LdShrinker::compute`].
///
/// # Arguments
/// * `panel` - reference panel, individuals by variants
/// * `ne` - effective population size
/// * `map` - cumulative genetic positions (cM)
/// * `m` - number of individuals the genetic map was estimated from
/// * `cutoff` - shrinkage weights below this are set to zero
/// * `is_genotype` - the panel holds 0/1/2 dosages rather than haplotypes
/// * `banded` - also return the band-packed matrix
///
pub fn compute(
    panel: &Panel,
    ne: f64,
    map: &GeneticMap,
    m: u32,
    cutoff: f64,
    is_genotype: bool,
    banded: bool,
) -> Result<LdShrinkResult> {
    let kind = if is_genotype {
        PanelKind::Genotype
    } else {
        PanelKind::Haplotype
    };
    let config = ShrinkageConfig::default()
        .with_panel_size(m)
        .with_effective_population_size(ne)
        .with_cutoff(cutoff)
        .with_panel_kind(kind)
        .with_banded(banded);
    LdShrinker::new(config)?.compute(panel, map)
}
