//! Grid-subsystem error type.

use thiserror::Error;

use abm_core::AgentId;

/// Errors produced by `abm-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    /// A spatial operation was attempted on an agent that was never placed.
    /// This is a precondition violation: callers propagate it, never retry.
    #[error("the grid has not been initialized: {agent} cannot {action}")]
    NotPlaced {
        agent:  AgentId,
        action: &'static str,
    },

    #[error("grid dimensions must be non-zero and hold at most u32::MAX cells, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("coordinate ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        x:      u32,
        y:      u32,
        width:  u32,
        height: u32,
    },

    #[error("cannot mark {requested} sport facilities on a grid of {cells} cells")]
    TooManyFacilities { requested: usize, cells: usize },
}

pub type GridResult<T> = Result<T, GridError>;
