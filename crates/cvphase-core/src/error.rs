//! Error types for block-tensor operations
//!
//! Every failure is a contract violation detected at the call site: nothing
//! is retried and no partial result is produced. Pure operations never
//! mutate their inputs, and the `*_in_place` / `assign_*` variants leave the
//! receiver untouched when they return an error.
//!
//! # Examples
//!
//! ```
//! use cvphase_core::{Likeness, TensorError};
//!
//! let err = Likeness::from_flags(true, true).unwrap_err();
//! assert!(matches!(err, TensorError::InvalidConstruction(_)));
//! ```

use thiserror::Error;

/// Top-level error type for block-tensor operations
#[derive(Error, Debug)]
pub enum TensorError {
    /// Likeness flags or mode lists that cannot describe a block tensor
    #[error("Invalid construction: {0}")]
    InvalidConstruction(String),

    /// Operation not defined for the operand kinds (e.g. transposing a vector)
    #[error("{operation}: invalid operation: {reason}")]
    InvalidOperation {
        operation: &'static str,
        reason: String,
    },

    /// Algebraically meaningful, but not representable as a single
    /// zero-like or one-like placeholder
    #[error("{operation}: unsupported combination: {reason}")]
    Unsupported {
        operation: &'static str,
        reason: String,
    },

    /// Mode counts that are not integer multiples of each other
    #[error("Size mismatch: no multiple of {unit} modes fits into {target} modes")]
    SizeMismatch { unit: usize, target: usize },

    /// An operation produced repeated or partially overlapping mode indices
    #[error("{operation}: mode conflict: {reason} (modes {modes:?})")]
    ModeConflict {
        operation: &'static str,
        modes: Vec<usize>,
        reason: String,
    },

    /// Failure reported by the array backend
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Result type for block-tensor operations
pub type Result<T> = std::result::Result<T, TensorError>;

impl TensorError {
    /// Create an invalid-construction error
    pub fn invalid_construction(reason: impl Into<String>) -> Self {
        TensorError::InvalidConstruction(reason.into())
    }

    /// Create an invalid-operation error
    pub fn invalid_operation(operation: &'static str, reason: impl Into<String>) -> Self {
        TensorError::InvalidOperation {
            operation,
            reason: reason.into(),
        }
    }

    /// Create an unsupported-combination error
    pub fn unsupported(operation: &'static str, reason: impl Into<String>) -> Self {
        TensorError::Unsupported {
            operation,
            reason: reason.into(),
        }
    }

    /// Create a mode-conflict error
    pub fn mode_conflict(
        operation: &'static str,
        modes: &[usize],
        reason: impl Into<String>,
    ) -> Self {
        TensorError::ModeConflict {
            operation,
            modes: modes.to_vec(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TensorError::invalid_operation("transpose", "cannot transpose a vector");
        assert_eq!(
            err.to_string(),
            "transpose: invalid operation: cannot transpose a vector"
        );

        let err = TensorError::SizeMismatch { unit: 2, target: 5 };
        assert_eq!(
            err.to_string(),
            "Size mismatch: no multiple of 2 modes fits into 5 modes"
        );
    }

    #[test]
    fn test_backend_errors_convert() {
        fn fails() -> Result<()> {
            Err(anyhow::anyhow!("reshape failed"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, TensorError::Backend(_)));
        assert_eq!(err.to_string(), "reshape failed");
    }
}
