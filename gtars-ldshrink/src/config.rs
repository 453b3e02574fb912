use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CUTOFF, DEFAULT_NE, DEFAULT_PANEL_SIZE};
use crate::errors::{LdShrinkError, Result};

/// What the values in a reference panel encode.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// Phased haplotypes, one 0/1 allele per chromosome copy.
    #[default]
    Haplotype,
    /// Unphased allele dosages (0/1/2). The sample covariance is halved
    /// to correct for random mating.
    Genotype,
}

/// Parameters of the shrinkage model.
///
/// Every field has a default, so a TOML file only needs to name the ones
/// it changes:
///
/// ```toml
/// panel_size = 100
/// effective_population_size = 10000.0
/// cutoff = 0.001
/// panel_kind = "genotype"
/// banded = true
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ShrinkageConfig {
    /// Number of individuals the genetic map was estimated from (`m`).
    pub panel_size: u32,
    /// Effective population size (`Ne`).
    pub effective_population_size: f64,
    /// Shrinkage weights below this value are set to exactly zero.
    pub cutoff: f64,
    pub panel_kind: PanelKind,
    /// Also pack the correlation matrix into band storage.
    pub banded: bool,
}

impl Default for ShrinkageConfig {
    fn default() -> Self {
        ShrinkageConfig {
            panel_size: DEFAULT_PANEL_SIZE,
            effective_population_size: DEFAULT_NE,
            cutoff: DEFAULT_CUTOFF,
            panel_kind: PanelKind::default(),
            banded: false,
        }
    }
}

impl ShrinkageConfig {
    pub fn with_panel_size(mut self, m: u32) -> Self {
        self.panel_size = m;
        self
    }

    pub fn with_effective_population_size(mut self, ne: f64) -> Self {
        self.effective_population_size = ne;
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn with_panel_kind(mut self, kind: PanelKind) -> Self {
        self.panel_kind = kind;
        self
    }

    pub fn with_banded(mut self, banded: bool) -> Self {
        self.banded = banded;
        self
    }

    ///
    /// Check that the parameters describe a usable shrinkage model.
    ///
    /// `panel_size` must be positive, `effective_population_size` positive
    /// and finite, and `cutoff` must lie in `[0, 1)`.
    ///
    pub fn validate(&self) -> Result<()> {
        if self.panel_size == 0 {
            return Err(LdShrinkError::InvalidParameter(
                "panel_size (m) must be positive".to_string(),
            ));
        }
        if !(self.effective_population_size.is_finite() && self.effective_population_size > 0.0)
        {
            return Err(LdShrinkError::InvalidParameter(format!(
                "effective_population_size (Ne) must be positive and finite, got {}",
                self.effective_population_size
            )));
        }
        if !(0.0..1.0).contains(&self.cutoff) {
            return Err(LdShrinkError::InvalidParameter(format!(
                "cutoff must lie in [0, 1), got {}",
                self.cutoff
            )));
        }
        Ok(())
    }
}

impl TryFrom<&Path> for ShrinkageConfig {
    type Error = LdShrinkError;

    fn try_from(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)?;
        let config: ShrinkageConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
