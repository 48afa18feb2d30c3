use npc_core::{AgentId, CoreError};
use npc_navigation::NavigationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("npc {0} was added twice")]
    DuplicateNpc(AgentId),

    #[error("invalid navigator parameters: {0}")]
    Navigation(#[from] NavigationError),
}

pub type SimResult<T> = Result<T, SimError>;
