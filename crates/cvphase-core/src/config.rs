//! Numeric comparison settings

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute and relative tolerance for approximate comparisons.
///
/// Two entries `a` and `b` are close when `|a - b| <= atol + rtol * |b|`.
///
/// # Examples
///
/// ```
/// use cvphase_core::Tolerance;
///
/// let tol = Tolerance::new().atol(1e-12).rtol(0.0);
/// assert_eq!(tol.atol, 1e-12);
/// assert_eq!(Tolerance::default().rtol, 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tolerance {
    /// Absolute tolerance
    pub atol: f64,
    /// Relative tolerance
    pub rtol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            atol: 1e-8,
            rtol: 1e-5,
        }
    }
}

impl Tolerance {
    /// Create the default tolerance
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact comparison
    pub fn exact() -> Self {
        Self {
            atol: 0.0,
            rtol: 0.0,
        }
    }

    /// Set the absolute tolerance
    pub fn atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// Set the relative tolerance
    pub fn rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    /// Check two scalars with this tolerance
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }
}
