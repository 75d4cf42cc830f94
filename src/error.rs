use thiserror::Error;

/// Failure taxonomy for the console core.
///
/// `Validation` is raised before any network traffic and carries the
/// user-correctable reason. `NotFound` marks the legitimate empty prompt
/// state and is never surfaced to the user. Everything the gateway can do
/// wrong (transport, decode, non-2xx) collapses into `Gateway`.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found")]
    NotFound,

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ConsoleError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConsoleError::NotFound)
    }
}
