use thiserror::Error;

use crate::sample::SensorKind;

/// Errors that can occur when starting a sensor subscription
#[derive(Error, Debug)]
pub enum HalError {
    /// The sensor is not present or not usable on this platform
    #[error("{kind} is not available on this platform")]
    Unavailable { kind: SensorKind },

    /// The platform refused to start the subscription
    #[error("failed to start {kind}: {reason}")]
    StartFailed { kind: SensorKind, reason: String },
}

/// Result type for HAL operations
pub type HalResult<T> = Result<T, HalError>;
