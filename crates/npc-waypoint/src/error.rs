use thiserror::Error;

/// A single trigger failed to apply its effect.
#[derive(Debug, Error, PartialEq)]
pub enum TriggerError {
    #[error("npc is not spawned")]
    NotSpawned,

    #[error("trigger rejected by npc: {0}")]
    Rejected(String),
}

pub type TriggerResult<T> = Result<T, TriggerError>;

#[derive(Debug, Error)]
pub enum WaypointError {
    #[error("route parse error: {0}")]
    Parse(String),

    #[error("route JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type WaypointResult<T> = Result<T, WaypointError>;
