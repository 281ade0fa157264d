//! State-layer configuration

use crate::error::{Result, StateError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default value of ħ (`x` and `p` quadratures with vacuum variance 1)
pub const DEFAULT_HBAR: f64 = 2.0;

/// Environment variable overriding ħ
pub const HBAR_ENV: &str = "CVPHASE_HBAR";

/// Configuration shared by state constructors
///
/// # Examples
///
/// ```
/// use cvphase_states::StateConfig;
///
/// let config = StateConfig::new().hbar(1.0);
/// assert_eq!(config.hbar, 1.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateConfig {
    /// Value of ħ used for covariances and photon-number statistics
    pub hbar: f64,
}

impl Default for StateConfig {
    fn default() -> Self {
        let hbar = match std::env::var(HBAR_ENV) {
            Ok(raw) => match raw.trim().parse::<f64>() {
                Ok(hbar) if hbar.is_finite() && hbar > 0.0 => hbar,
                _ => {
                    tracing::warn!(value = %raw, "ignoring invalid {}", HBAR_ENV);
                    DEFAULT_HBAR
                }
            },
            Err(_) => DEFAULT_HBAR,
        };
        Self { hbar }
    }
}

impl StateConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set ħ
    pub fn hbar(mut self, hbar: f64) -> Self {
        self.hbar = hbar;
        self
    }

    /// Check that ħ is positive and finite
    pub fn validate(&self) -> Result<()> {
        if !(self.hbar.is_finite() && self.hbar > 0.0) {
            return Err(StateError::invalid_parameter(format!(
                "hbar must be positive and finite, got {}",
                self.hbar
            )));
        }
        Ok(())
    }
}
