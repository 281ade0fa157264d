//! Core metadata types: likeness, payload kind, external layouts and the
//! scalar bound shared by every block-tensor operation.

use crate::error::{Result, TensorError};
use scirs2_core::numeric::Float;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Element types usable as block-tensor entries
pub trait Scalar: Float + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> Scalar for T where T: Float + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// Implicit algebraic role of a tensor outside its defined block.
///
/// A zero-like tensor is the additive identity wherever it has no payload;
/// a one-like tensor is the multiplicative identity there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Likeness {
    /// Additive identity outside the defined block
    Zero,
    /// Multiplicative identity outside the defined block
    One,
}

impl Likeness {
    /// Build a likeness from the pair of boolean flags `(zero_like, one_like)`.
    ///
    /// Exactly one flag must be set.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::Likeness;
    ///
    /// assert_eq!(Likeness::from_flags(false, true).unwrap(), Likeness::One);
    /// assert!(Likeness::from_flags(false, false).is_err());
    /// ```
    pub fn from_flags(zero_like: bool, one_like: bool) -> Result<Self> {
        match (zero_like, one_like) {
            (true, false) => Ok(Likeness::Zero),
            (false, true) => Ok(Likeness::One),
            (true, true) => Err(TensorError::invalid_construction(
                "a tensor cannot be both zero-like and one-like",
            )),
            (false, false) => Err(TensorError::invalid_construction(
                "a tensor must be either zero-like or one-like",
            )),
        }
    }

    pub fn is_zero_like(self) -> bool {
        self == Likeness::Zero
    }

    pub fn is_one_like(self) -> bool {
        self == Likeness::One
    }

    /// Likeness of a product: one-like iff both factors are one-like
    pub fn product(self, other: Likeness) -> Likeness {
        if self.is_one_like() && other.is_one_like() {
            Likeness::One
        } else {
            Likeness::Zero
        }
    }

    /// Likeness of a sum: one-like iff either term is one-like
    pub fn sum(self, other: Likeness) -> Likeness {
        if self.is_one_like() || other.is_one_like() {
            Likeness::One
        } else {
            Likeness::Zero
        }
    }
}

impl fmt::Display for Likeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Likeness::Zero => write!(f, "zero-like"),
            Likeness::One => write!(f, "one-like"),
        }
    }
}

/// Payload kind, derived from the payload rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Kind {
    /// Canonical shape `(out, 2)`
    Vector,
    /// Canonical shape `(out, in, 2, 2)`
    Matrix,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Vector => write!(f, "vector"),
            Kind::Matrix => write!(f, "matrix"),
        }
    }
}

/// Flattened external phase-space layouts
///
/// For `N` modes with coordinates `(x_n, p_n)`:
///
/// | Layout | Row index of `(n, a)` | Ordering |
/// |---|---|---|
/// | `Interleaved` (`xpxp`) | `2n + a` | `x0 p0 x1 p1 ...` |
/// | `Grouped` (`xxpp`) | `a·N + n` | `x0 x1 ... p0 p1 ...` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Layout {
    Interleaved,
    Grouped,
}
