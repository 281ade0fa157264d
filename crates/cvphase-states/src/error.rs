//! Error types for Gaussian states and maps

use cvphase_core::TensorError;
use thiserror::Error;

/// Errors raised while building or transforming Gaussian states
#[derive(Error, Debug)]
pub enum StateError {
    /// Physically meaningless parameter (negative photon number, empty mode list, ...)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A map acts on a mode the state does not have
    #[error("Mode {mode} is not part of the state (modes {modes:?})")]
    ModeOutOfRange { mode: usize, modes: Vec<usize> },

    /// Failure inside the block algebra
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateError>;

impl StateError {
    pub fn invalid_parameter(reason: impl Into<String>) -> Self {
        StateError::InvalidParameter(reason.into())
    }
}

impl From<anyhow::Error> for StateError {
    fn from(err: anyhow::Error) -> Self {
        StateError::Tensor(TensorError::Backend(err))
    }
}
