use thiserror::Error;

/// Errors surfaced by session operations
#[derive(Error, Debug)]
pub enum SessionError {
    /// The platform could not start a subscription
    #[error("subscription start failed: {0}")]
    Start(#[from] hal::HalError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
