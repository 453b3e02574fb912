use thiserror::Error;

#[derive(Error, Debug)]
pub enum LdShrinkError {
    #[error(
        "Negative recombination distance: genetic map decreases at index {index} ({previous} cM -> {next} cM)"
    )]
    Ordering {
        index: usize,
        previous: f64,
        next: f64,
    },

    #[error("Non-positive variance {variance} on the diagonal at index {index}")]
    DegenerateVariance { index: usize, variance: f64 },

    #[error("Invalid shrinkage parameter: {0}")]
    InvalidParameter(String),

    #[error("Panel has {panel_variants} variants but the genetic map has {map_len} positions")]
    DimensionMismatch {
        panel_variants: usize,
        map_len: usize,
    },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, LdShrinkError>;
