//! Error taxonomy shared by the reflection solver and the wave generator
//!
//! Both components validate up front and return on the first bad input.
//! None of these are transient: retrying the same call gives the same error.

use thiserror::Error;

/// Errors produced while solving the reflection camera or generating waves
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaterError {
    /// Zero-length normal or forward vector, or a matrix that cannot be inverted
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Wave count is zero or above the packed-array capacity
    #[error("Invalid wave count {count}: expected 1..={max}")]
    InvalidCount {
        /// Requested or supplied number of waves
        count: usize,
        /// Largest count the shader contract supports
        max: usize,
    },

    /// Wave authoring data is inconsistent
    #[error("Invalid wave specification: {0}")]
    InvalidSpec(String),
}

/// Result alias used across the crate
pub type WaterResult<T> = Result<T, WaterError>;
