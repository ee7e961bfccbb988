//! Catalog construction errors

use thiserror::Error;

/// Result type for catalog parsing and hierarchy construction
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A malformed catalog entry. Any of these aborts the hierarchy build.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog entry {path} has no name")]
    MissingName { path: String },

    #[error("body '{name}' has no radius")]
    MissingRadius { name: String },

    #[error("body '{name}' has invalid radius {radius} (must be positive and finite)")]
    InvalidRadius { name: String, radius: f64 },

    #[error("body '{name}' has invalid orbital distance {distance} (must be non-negative and finite)")]
    InvalidDistance { name: String, distance: f64 },

    #[error("body '{name}' has a non-finite rotation or orbit rate")]
    NonFiniteRate { name: String },

    #[error("orbit rate law constant must be finite, got {0}")]
    InvalidLaw(f64),

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
