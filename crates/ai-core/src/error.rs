//! Configuration errors.
//!
//! The motion math never faults at runtime; degenerate parameters are
//! rejected once, when an agent or grid is constructed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("mass must be > 0, got {0}")]
    NonPositiveMass(f32),

    #[error("{name} must be >= 0, got {value}")]
    NegativeParameter { name: &'static str, value: f32 },

    #[error("node radius must be > 0, got {0}")]
    NonPositiveNodeRadius(f32),

    #[error("world size must be positive on both axes, got {x} x {z}")]
    EmptyWorld { x: f32, z: f32 },

    #[error("grid of {x} x {z} cells exceeds the {limit} cell limit")]
    GridTooLarge { x: f64, z: f64, limit: usize },
}

/// Returns `value` if it is a finite, non-negative number.
pub fn ensure_non_negative(name: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NegativeParameter { name, value })
    }
}

/// Returns `mass` if it can safely be divided by.
pub fn ensure_mass(mass: f32) -> Result<f32, ConfigError> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(ConfigError::NonPositiveMass(mass))
    }
}
