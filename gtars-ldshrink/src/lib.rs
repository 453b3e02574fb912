//! # gtars-ldshrink
//!
//! Shrinkage estimation of linkage-disequilibrium (LD) correlation matrices
//! from a reference panel and a genetic map.
//!
//! ## Method
//!
//! The sample covariance of the panel is shrunk toward zero with a weight
//! that decays with the genetic distance between each pair of variants,
//! `exp(-4 Ne d / (100 * 2m))`. Weights under a cutoff are set to exactly
//! zero, which makes the result banded. The shrunk covariance is blended with
//! a scaled identity using the coalescent mutation rate `theta` and finally
//! rescaled to a correlation matrix.
//!
//! ## Main Components
//!
//! - **`Panel`** / **`GeneticMap`**: validated in-memory inputs
//! - **`ShrinkageConfig`**: model parameters, loadable from TOML
//! - **`LdShrinker`**: runs the pipeline and returns an `LdShrinkResult`
//!   holding the dense, sparse and (optionally) banded matrix
//!
//! Progress is reported through the `log` facade; install any logger to see it.
//!
//! ## Example
//!
//! ```rust
//! use gtars_ldshrink::{GeneticMap, LdShrinker, Panel, ShrinkageConfig};
//! use ndarray::array;
//!
//! let panel = Panel::new(array![
//!     [0.0, 1.0, 1.0],
//!     [1.0, 1.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 0.0, 1.0],
//! ])
//! .unwrap();
//! let map = GeneticMap::new(vec![0.0, 0.01, 0.05]).unwrap();
//!
//! let config = ShrinkageConfig::default().with_banded(true);
//! let result = LdShrinker::new(config).unwrap().compute(&panel, &map).unwrap();
//!
//! assert_eq!(result.correlation[(1, 1)], 1.0);
//! assert!(result.banded.is_some());
//! ```
//!
pub mod banded;
pub mod config;
pub mod correlation;
pub mod covariance;
pub mod errors;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod shrinkage;
pub mod sparse;

// re-exports
pub use banded::{BandedMatrix, bandwidth};
pub use config::{PanelKind, ShrinkageConfig};
pub use errors::{LdShrinkError, Result};
pub use models::{GeneticMap, Panel};
pub use pipeline::{LdShrinkResult, LdShrinker, compute};
pub use sparse::to_sparse;

pub mod consts {
    /// Default number of individuals behind the genetic map (`m`).
    pub const DEFAULT_PANEL_SIZE: u32 = 85;
    /// Default effective population size (`Ne`).
    pub const DEFAULT_NE: f64 = 11490.672741;
    pub const DEFAULT_CUTOFF: f64 = 1e-3;
}
