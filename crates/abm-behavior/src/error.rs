use abm_core::{AgentId, CoreError};
use abm_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("model configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("agent {0} is not a person")]
    NotAPerson(AgentId),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;

/// Reject populations whose agents cannot all get an `AgentId`.
///
/// `count` is `None` when computing the total already overflowed.
pub(crate) fn check_agent_count(count: Option<usize>) -> BehaviorResult<()> {
    match count.map(AgentId::try_from) {
        Some(Ok(_)) => Ok(()),
        _ => Err(BehaviorError::Config(format!(
            "a population holds at most {} agents",
            u32::MAX
        ))),
    }
}
