//! # cvphase-core
//!
//! Sparse, mode-aware block tensors for continuous-variable phase space.
//!
//! Gaussian states and transformations on `N` bosonic modes are described by
//! `2N × 2N` matrices and `2N` vectors. A gate usually touches one or two
//! modes, so materializing the full matrix for every operation is wasteful.
//! [`PhaseTensor`] stores only the blocks of the modes it actually defines
//! and treats everything else as an implicit zero or identity:
//!
//! - **Undefined placeholders**: [`PhaseTensor::zero_like`] and
//!   [`PhaseTensor::one_like`] stand for a zero or identity on *any* mode set
//! - **Defined blocks** ([`Block`]): a dense payload in canonical
//!   `(out, in, 2, 2)` / `(out, 2)` shape labelled by out- and in-mode ids,
//!   still zero-like or one-like outside those modes
//! - **Mode-aware algebra**: products contract only the shared modes and
//!   pass the rest through according to each operand's [`Likeness`]; sums
//!   work on the union of modes
//!
//! ## Quick Start
//!
//! ```
//! use cvphase_core::{Likeness, ModeSpec, PhaseTensor};
//! use cvphase_array::DenseArray;
//!
//! // A 2-mode covariance matrix in xpxp order
//! let cov = PhaseTensor::<f64>::identity(&[0, 1], Likeness::Zero).unwrap();
//!
//! // A single-mode squeezer, defined only on mode 1
//! let s = DenseArray::from_vec(vec![0.5, 0.0, 0.0, 2.0], &[2, 2]).unwrap();
//! let gate = PhaseTensor::from_interleaved(s, vec![1], Likeness::One).unwrap();
//!
//! // S · cov · Sᵀ without ever building a 4x4 symplectic matrix
//! let out = gate.apply(&cov).unwrap().apply(&gate.transpose().unwrap()).unwrap();
//! assert_eq!(out.out_modes(), &[0, 1]);
//!
//! let flat = out.to_interleaved().unwrap().unwrap();
//! assert_eq!(flat[&[0, 0][..]], 1.0);   // mode 0 untouched
//! assert_eq!(flat[&[2, 2][..]], 0.25);  // x of mode 1 squeezed
//! assert_eq!(flat[&[3, 3][..]], 4.0);   // p of mode 1 anti-squeezed
//! ```
//!
//! ## Layouts
//!
//! Flat arrays are accepted and produced in two orderings ([`Layout`]):
//! `xpxp` ([`PhaseTensor::from_interleaved`]) and `xxpp`
//! ([`PhaseTensor::from_grouped`]). Round trips are lossless.
//!
//! ## Mode Invariants
//!
//! The out- and in-mode lists of a matrix must name the same set of modes
//! (a diagonal block) or disjoint sets (a coherence block). Caller-supplied
//! lists violating this fail with [`TensorError::InvalidConstruction`];
//! operations whose result would violate it fail with
//! [`TensorError::ModeConflict`]. Results of products, replication and
//! mismatched-mode sums always carry ascending mode lists; construction keeps
//! the caller's order.
//!
//! The same rule applies to slicing. [`PhaseTensor::mode`] on a diagonal
//! matrix over several modes would leave one out-mode against all of its
//! in-modes, so it fails with [`TensorError::ModeConflict`]. Take the
//! single-mode diagonal block with [`PhaseTensor::block`] instead, or keep
//! every out-mode with [`PhaseTensor::rows`]:
//!
//! ```
//! use cvphase_core::{Likeness, PhaseTensor, TensorError};
//!
//! let cov = PhaseTensor::<f64>::identity(&[0, 1], Likeness::Zero).unwrap();
//! assert!(matches!(cov.mode(0), Err(TensorError::ModeConflict { .. })));
//!
//! let first = cov.block(&[0], &[0]).unwrap();
//! assert_eq!(first, PhaseTensor::identity(&[0], Likeness::Zero).unwrap());
//! assert_eq!(cov.rows(&[0, 1]).unwrap(), cov);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use cvphase_core::{PhaseTensor, TensorError};
//!
//! // An implicit identity has no scaled single-placeholder form
//! let err = PhaseTensor::<f64>::one_like().scale(2.0).unwrap_err();
//! assert!(matches!(err, TensorError::Unsupported { .. }));
//! ```
//!
//! ## Mutation
//!
//! Every operation returns a new tensor except [`PhaseTensor::scale_in_place`],
//! [`PhaseTensor::add_in_place`], [`PhaseTensor::assign_rows`] and
//! [`PhaseTensor::assign_block`], which take `&mut self` and leave it
//! unchanged when they fail.

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod indexing;
pub mod layout;
pub mod modes;
pub mod ops;
pub mod tensor;
pub mod tracing_support;
pub mod types;


pub use config::Tolerance;
pub use error::{Result, TensorError};
pub use modes::{ModeList, ModeSpec};
pub use ops::Product;
pub use tensor::{Block, PhaseTensor};
pub use types::{Kind, Layout, Likeness, Scalar};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PhaseTensor<f64>>();
        assert_send_sync::<TensorError>();
    }
}
