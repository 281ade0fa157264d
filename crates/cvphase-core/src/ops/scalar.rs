//! Scalar multiplication and its derived forms

use crate::error::{Result, TensorError};
use crate::tensor::{Block, PhaseTensor};
use crate::types::{Likeness, Scalar};

impl<T: Scalar> Block<T> {
    pub(crate) fn with_data(&self, data: cvphase_array::DenseArray<T>) -> Self {
        Self {
            data,
            out_modes: self.out_modes.clone(),
            in_modes: self.in_modes.clone(),
            kind: self.kind,
            likeness: self.likeness,
        }
    }
}

impl<T: Scalar> PhaseTensor<T> {
    /// Multiply by a scalar.
    ///
    /// An undefined zero-like tensor stays zero-like. Scaling an implicit
    /// identity has no single-placeholder representation.
    ///
    /// # Errors
    ///
    /// [`TensorError::Unsupported`] for an undefined one-like tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::{Likeness, PhaseTensor};
    ///
    /// let id = PhaseTensor::<f64>::identity(&[0], Likeness::One).unwrap();
    /// let half = id.scale(0.5).unwrap();
    /// assert_eq!(half.payload().unwrap()[&[0, 0, 1, 1][..]], 0.5);
    ///
    /// assert!(PhaseTensor::<f64>::one_like().scale(2.0).is_err());
    /// ```
    pub fn scale(&self, scalar: T) -> Result<Self> {
        match self {
            PhaseTensor::Undefined(Likeness::One) => Err(undefined_identity("scale")),
            PhaseTensor::Undefined(Likeness::Zero) => Ok(PhaseTensor::zero_like()),
            PhaseTensor::Defined(block) => {
                Ok(PhaseTensor::Defined(block.with_data(block.data.scale(scalar))))
            }
        }
    }

    /// Multiply by a scalar, mutating the payload in place.
    ///
    /// Fails under the same conditions as [`scale`](Self::scale), leaving
    /// `self` untouched.
    pub fn scale_in_place(&mut self, scalar: T) -> Result<()> {
        match self {
            PhaseTensor::Undefined(Likeness::One) => Err(undefined_identity("scale_in_place")),
            PhaseTensor::Undefined(Likeness::Zero) => Ok(()),
            PhaseTensor::Defined(block) => {
                block.data.scale_in_place(scalar);
                Ok(())
            }
        }
    }

    /// Additive inverse
    pub fn neg(&self) -> Result<Self> {
        self.scale(-T::one())
    }

    /// Divide by a nonzero scalar
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidOperation`] when `divisor` is zero, otherwise as
    /// [`scale`](Self::scale).
    pub fn div_scalar(&self, divisor: T) -> Result<Self> {
        if divisor.is_zero() {
            return Err(TensorError::invalid_operation(
                "div_scalar",
                "division by zero",
            ));
        }
        self.scale(T::one() / divisor)
    }

    /// `self + (-1) * other`
    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.add(&other.neg()?)
    }
}

fn undefined_identity(operation: &'static str) -> TensorError {
    TensorError::unsupported(
        operation,
        "an undefined one-like tensor cannot be scaled",
    )
}
