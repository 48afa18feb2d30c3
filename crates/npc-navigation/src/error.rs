use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("cannot navigate along an empty path")]
    EmptyPath,

    #[error("invalid navigator parameter {name}: {reason}")]
    InvalidParameter {
        name:   &'static str,
        reason: String,
    },
}

pub type NavigationResult<T> = Result<T, NavigationError>;
