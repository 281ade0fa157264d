//! The block tensor type
//!
//! A [`PhaseTensor`] is either an *undefined* placeholder that stands for an
//! implicit zero or identity everywhere, or a *defined* [`Block`] carrying a
//! dense payload for a few modes. Outside its modes a defined block is still
//! implicitly zero or identity, according to its [`Likeness`].
//!
//! Canonical payload shapes:
//!
//! - matrix: `(out, in, 2, 2)`, entry `[o, i, a, b]` couples coordinate `a`
//!   of mode `out_modes[o]` with coordinate `b` of mode `in_modes[i]`
//! - vector: `(out, 2)`

use crate::config::Tolerance;
use crate::error::{Result, TensorError};
use crate::modes::{self, ModeList, ModeSpec};
use crate::types::{Kind, Likeness, Scalar};
use cvphase_array::DenseArray;
use std::fmt;

/// Defined part of a block tensor
#[derive(Debug, Clone, PartialEq)]
pub struct Block<T> {
    pub(crate) data: DenseArray<T>,
    pub(crate) out_modes: ModeList,
    pub(crate) in_modes: ModeList,
    pub(crate) kind: Kind,
    pub(crate) likeness: Likeness,
}

impl<T: Scalar> Block<T> {
    /// Wrap a canonical payload, validating the caller's mode labels.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidConstruction`] if the payload is not
    /// `(out, in, 2, 2)` or `(out, 2)`, or the modes do not fit it.
    pub fn new(
        data: DenseArray<T>,
        modes: impl Into<ModeSpec>,
        likeness: Likeness,
    ) -> Result<Self> {
        let kind = canonical_kind(data.shape())?;
        let n_in = match kind {
            Kind::Matrix => data.shape()[1],
            Kind::Vector => 0,
        };
        let (out_modes, in_modes) = modes.into().resolve(kind, data.shape()[0], n_in)?;
        modes::validate_pair(&out_modes, &in_modes)?;
        Ok(Self {
            data,
            out_modes,
            in_modes,
            kind,
            likeness,
        })
    }

    /// Wrap the payload of an operation result, re-validating its modes
    pub(crate) fn from_result(
        operation: &'static str,
        data: DenseArray<T>,
        out_modes: ModeList,
        in_modes: ModeList,
        kind: Kind,
        likeness: Likeness,
    ) -> Result<Self> {
        modes::validate_result(operation, &out_modes, &in_modes)?;
        debug_assert_eq!(data.shape()[0], out_modes.len());
        Ok(Self {
            data,
            out_modes,
            in_modes,
            kind,
            likeness,
        })
    }

    /// Canonical payload
    pub fn data(&self) -> &DenseArray<T> {
        &self.data
    }

    pub fn into_data(self) -> DenseArray<T> {
        self.data
    }

    pub fn out_modes(&self) -> &[usize] {
        &self.out_modes
    }

    /// In-modes (empty for vectors)
    pub fn in_modes(&self) -> &[usize] {
        &self.in_modes
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn likeness(&self) -> Likeness {
        self.likeness
    }

    pub fn is_vector(&self) -> bool {
        self.kind == Kind::Vector
    }

    pub fn is_matrix(&self) -> bool {
        self.kind == Kind::Matrix
    }

    /// `true` for a matrix relating two disjoint mode sets
    pub fn is_coherence(&self) -> bool {
        self.is_matrix() && !modes::same_set(&self.out_modes, &self.in_modes)
    }

    /// Number of out-modes
    pub fn mode_count(&self) -> usize {
        self.out_modes.len()
    }

    pub(crate) fn transposed(&self) -> Result<Self> {
        if self.is_vector() {
            return Err(TensorError::invalid_operation(
                "transpose",
                "a vector cannot be transposed",
            ));
        }
        Ok(Self {
            data: self.data.permute(&[1, 0, 3, 2])?,
            out_modes: self.in_modes.clone(),
            in_modes: self.out_modes.clone(),
            kind: Kind::Matrix,
            likeness: self.likeness,
        })
    }
}

/// Payload kind of a canonical array shape
pub(crate) fn canonical_kind(shape: &[usize]) -> Result<Kind> {
    match shape {
        [_, 2] => Ok(Kind::Vector),
        [_, _, 2, 2] => Ok(Kind::Matrix),
        _ => Err(TensorError::invalid_construction(format!(
            "canonical payload must have shape (out, 2) or (out, in, 2, 2), got {:?}",
            shape
        ))),
    }
}

/// Phase-space block tensor with implicit zero/identity regions.
///
/// # Examples
///
/// ```
/// use cvphase_core::{Likeness, PhaseTensor};
/// use cvphase_array::DenseArray;
///
/// // Two-mode vector in xpxp order: (x0, p0, x1, p1)
/// let data = DenseArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4]).unwrap();
/// let v = PhaseTensor::from_interleaved(data, vec![3, 5], Likeness::Zero).unwrap();
///
/// assert_eq!(v.out_modes(), &[3, 5]);
/// assert_eq!(v.is_vector(), Some(true));
/// assert!(PhaseTensor::<f64>::one_like().is_one_like());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseTensor<T> {
    /// No payload: implicit zero or identity everywhere
    Undefined(Likeness),
    /// Dense payload on explicit modes
    Defined(Block<T>),
}

impl<T: Scalar> PhaseTensor<T> {
    /// Undefined additive identity
    pub fn zero_like() -> Self {
        PhaseTensor::Undefined(Likeness::Zero)
    }

    /// Undefined multiplicative identity
    pub fn one_like() -> Self {
        PhaseTensor::Undefined(Likeness::One)
    }

    /// Wrap an array already in canonical `(out, in, 2, 2)` / `(out, 2)` shape
    pub fn from_canonical(
        data: DenseArray<T>,
        modes: impl Into<ModeSpec>,
        likeness: Likeness,
    ) -> Result<Self> {
        Ok(PhaseTensor::Defined(Block::new(data, modes, likeness)?))
    }

    /// Identity matrix on `modes`
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::{Likeness, PhaseTensor};
    ///
    /// let id = PhaseTensor::<f64>::identity(&[0, 2], Likeness::One).unwrap();
    /// let flat = id.to_interleaved().unwrap().unwrap();
    /// assert_eq!(flat.shape(), &[4, 4]);
    /// assert_eq!(flat[&[3, 3][..]], 1.0);
    /// assert_eq!(flat[&[0, 1][..]], 0.0);
    /// ```
    pub fn identity(modes: &[usize], likeness: Likeness) -> Result<Self> {
        let n = modes.len();
        let mut entries = Vec::with_capacity(n * n * 4);
        for o in 0..n {
            for i in 0..n {
                for a in 0..2 {
                    for b in 0..2 {
                        entries.push(if o == i && a == b { T::one() } else { T::zero() });
                    }
                }
            }
        }
        let data = DenseArray::from_vec(entries, &[n, n, 2, 2])?;
        Self::from_canonical(data, modes, likeness)
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, PhaseTensor::Defined(_))
    }

    pub fn likeness(&self) -> Likeness {
        match self {
            PhaseTensor::Undefined(likeness) => *likeness,
            PhaseTensor::Defined(block) => block.likeness,
        }
    }

    pub fn is_zero_like(&self) -> bool {
        self.likeness().is_zero_like()
    }

    pub fn is_one_like(&self) -> bool {
        self.likeness().is_one_like()
    }

    /// Payload kind; `None` while undefined
    pub fn kind(&self) -> Option<Kind> {
        self.as_block().map(Block::kind)
    }

    pub fn is_vector(&self) -> Option<bool> {
        self.as_block().map(Block::is_vector)
    }

    pub fn is_matrix(&self) -> Option<bool> {
        self.as_block().map(Block::is_matrix)
    }

    /// `true` for a defined matrix relating two disjoint mode sets
    pub fn is_coherence(&self) -> bool {
        self.as_block().is_some_and(Block::is_coherence)
    }

    /// Out-modes (empty while undefined)
    pub fn out_modes(&self) -> &[usize] {
        self.as_block().map_or(&[][..], Block::out_modes)
    }

    /// In-modes (empty while undefined and for vectors)
    pub fn in_modes(&self) -> &[usize] {
        self.as_block().map_or(&[][..], Block::in_modes)
    }

    /// Canonical payload, if defined
    pub fn payload(&self) -> Option<&DenseArray<T>> {
        self.as_block().map(Block::data)
    }

    pub fn as_block(&self) -> Option<&Block<T>> {
        match self {
            PhaseTensor::Defined(block) => Some(block),
            PhaseTensor::Undefined(_) => None,
        }
    }

    pub fn into_block(self) -> Option<Block<T>> {
        match self {
            PhaseTensor::Defined(block) => Some(block),
            PhaseTensor::Undefined(_) => None,
        }
    }

    /// Swap the roles of out and in modes.
    ///
    /// Undefined tensors are returned unchanged.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidOperation`] for vectors.
    pub fn transpose(&self) -> Result<Self> {
        match self {
            PhaseTensor::Undefined(likeness) => Ok(PhaseTensor::Undefined(*likeness)),
            PhaseTensor::Defined(block) => Ok(PhaseTensor::Defined(block.transposed()?)),
        }
    }

    /// Approximate equality: same structure, likeness and mode lists, and
    /// payloads close within `tol`.
    pub fn allclose(&self, other: &Self, tol: &Tolerance) -> bool {
        match (self, other) {
            (PhaseTensor::Undefined(a), PhaseTensor::Undefined(b)) => a == b,
            (PhaseTensor::Defined(a), PhaseTensor::Defined(b)) => {
                let (Some(atol), Some(rtol)) = (T::from(tol.atol), T::from(tol.rtol)) else {
                    return false;
                };
                a.kind == b.kind
                    && a.likeness == b.likeness
                    && a.out_modes == b.out_modes
                    && a.in_modes == b.in_modes
                    && a.data.allclose(&b.data, atol, rtol)
            }
            _ => false,
        }
    }
}

impl<T: Scalar> From<Block<T>> for PhaseTensor<T> {
    fn from(block: Block<T>) -> Self {
        PhaseTensor::Defined(block)
    }
}

impl<T: Scalar> fmt::Display for PhaseTensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseTensor::Undefined(likeness) => {
                write!(f, "PhaseTensor(undefined, {})", likeness)
            }
            PhaseTensor::Defined(block) => {
                let structure = if block.is_vector() {
                    ""
                } else if block.is_coherence() {
                    ", coherence"
                } else {
                    ", diagonal"
                };
                writeln!(
                    f,
                    "PhaseTensor({}{}, {}, out_modes={:?}, in_modes={:?})",
                    block.kind,
                    structure,
                    block.likeness,
                    block.out_modes.as_slice(),
                    block.in_modes.as_slice()
                )?;
                let flat = self.to_interleaved().map_err(|_| fmt::Error)?;
                match flat {
                    Some(array) => write!(f, "{}", array.as_array()),
                    None => Ok(()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(out: usize, inp: usize) -> DenseArray<f64> {
        let n = out * inp * 4;
        DenseArray::from_vec((0..n).map(|x| x as f64).collect(), &[out, inp, 2, 2]).unwrap()
    }

    #[test]
    fn test_canonical_construction() {
        let t = PhaseTensor::from_canonical(matrix(2, 2), vec![7, 3], Likeness::Zero).unwrap();
        // caller order is preserved verbatim
        assert_eq!(t.out_modes(), &[7, 3]);
        assert_eq!(t.in_modes(), &[7, 3]);
        assert_eq!(t.kind(), Some(Kind::Matrix));
        assert!(!t.is_coherence());
    }

    #[test]
    fn test_coherence_block() {
        let t = PhaseTensor::from_canonical(matrix(1, 2), (vec![0], vec![1, 2]), Likeness::Zero)
            .unwrap();
        assert!(t.is_coherence());
        assert_eq!(t.in_modes(), &[1, 2]);
    }

    #[test]
    fn test_rejects_partial_overlap_and_bad_shapes() {
        let err = PhaseTensor::from_canonical(matrix(2, 2), (vec![0, 1], vec![1, 2]), Likeness::Zero)
            .unwrap_err();
        assert!(matches!(err, TensorError::InvalidConstruction(_)));

        let bad = DenseArray::<f64>::zeros(&[2, 3]);
        assert!(PhaseTensor::from_canonical(bad, ModeSpec::Inferred, Likeness::Zero).is_err());
    }

    #[test]
    fn test_undefined_accessors() {
        let z = PhaseTensor::<f64>::zero_like();
        assert!(!z.is_defined());
        assert!(z.is_zero_like());
        assert_eq!(z.kind(), None);
        assert_eq!(z.is_vector(), None);
        assert!(z.out_modes().is_empty());
        assert!(z.payload().is_none());
    }

    #[test]
    fn test_transpose_swaps_modes() {
        let t = PhaseTensor::from_canonical(matrix(1, 2), (vec![0], vec![1, 2]), Likeness::Zero)
            .unwrap();
        let tt = t.transpose().unwrap();
        assert_eq!(tt.out_modes(), &[1, 2]);
        assert_eq!(tt.in_modes(), &[0]);
        let data = tt.payload().unwrap();
        assert_eq!(data.shape(), &[2, 1, 2, 2]);
        assert_eq!(data[&[1, 0, 0, 1][..]], t.payload().unwrap()[&[0, 1, 1, 0][..]]);
    }

    #[test]
    fn test_transpose_vector_fails() {
        let v = DenseArray::from_vec(vec![1.0, 2.0], &[1, 2]).unwrap();
        let v = PhaseTensor::from_canonical(v, ModeSpec::Inferred, Likeness::Zero).unwrap();
        assert!(matches!(
            v.transpose(),
            Err(TensorError::InvalidOperation { .. })
        ));
        assert_eq!(
            PhaseTensor::<f64>::one_like().transpose().unwrap(),
            PhaseTensor::one_like()
        );
    }

    #[test]
    fn test_allclose_compares_metadata() {
        let a = PhaseTensor::from_canonical(matrix(1, 1), vec![0], Likeness::Zero).unwrap();
        let b = PhaseTensor::from_canonical(matrix(1, 1), vec![1], Likeness::Zero).unwrap();
        let tol = Tolerance::default();
        assert!(a.allclose(&a.clone(), &tol));
        assert!(!a.allclose(&b, &tol));
        assert!(!a.allclose(&PhaseTensor::zero_like(), &tol));
    }

    #[test]
    fn test_display() {
        let z = PhaseTensor::<f64>::zero_like();
        assert_eq!(z.to_string(), "PhaseTensor(undefined, zero-like)");
        let id = PhaseTensor::<f64>::identity(&[0], Likeness::One).unwrap();
        assert!(id
            .to_string()
            .starts_with("PhaseTensor(matrix, diagonal, one-like, out_modes=[0], in_modes=[0])"));
    }
}
