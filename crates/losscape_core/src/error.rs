//! Configuration errors surfaced before any oracle evaluation happens.

use thiserror::Error;

/// Invalid sampler configuration. Surfaced immediately; no partial output is
/// ever produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid resolution must be at least 2, got {0}")]
    Resolution(usize),
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    #[error("duplicate parameter `{0}`")]
    DuplicateParameter(String),
    #[error("bounds [{min}, {max}] are not a valid finite interval")]
    InvalidBounds { min: f64, max: f64 },
    #[error("optimum coordinate {value} is not finite")]
    NonFiniteAnchor { value: f64 },
    #[error("anchor index {index} falls outside the {resolution}-point grid; the optimum violates its declared bounds")]
    AnchorOffGrid { index: i64, resolution: usize },
    #[error("result vector has {got} entries but the parameter space has {expected}")]
    DimensionMismatch { expected: usize, got: usize },
    #[error("at least one parameter pair is required")]
    EmptyPairs,
    #[error("at least one sweep angle is required")]
    EmptyAngles,
}
