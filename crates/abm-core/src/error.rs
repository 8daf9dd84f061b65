//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so configuration checks written here surface
//! unchanged at every layer.

use thiserror::Error;

/// The base error type shared by the `abm-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{name} must be a probability in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `abm-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reject `value` unless it lies in `[0, 1]` (NaN is rejected too).
pub fn check_probability(name: &'static str, value: f64) -> CoreResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Probability { name, value })
    }
}
