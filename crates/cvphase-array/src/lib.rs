//! # cvphase-array
//!
//! Dense N-dimensional array backend for the cvphase block-tensor algebra.
//!
//! The block tensors in `cvphase-core` only carry *semantics* (mode
//! bookkeeping, implicit zero/identity regions, mode-partial contraction).
//! Every numeric primitive they need lives here:
//!
//! - **Creation**: zeros, fill, from a flat vector
//! - **Shape operations**: row-major reshape, axis permutation, expand dims
//! - **Gather / scatter**: select along an axis, scatter-add and
//!   scatter-assign at prefix multi-indices
//! - **Combining**: concatenate, tile, 2D block assembly
//! - **Arithmetic**: elementwise add/multiply, scalar scaling, sum
//! - **Contraction**: [`tensordot`] over arbitrary axis pairs
//!
//! ## SciRS2 Integration
//!
//! All array storage goes through `scirs2_core::ndarray_ext`; numeric traits
//! come from `scirs2_core::numeric`.
//!
//! ## Quick Start
//!
//! ```
//! use cvphase_array::DenseArray;
//!
//! // (out, in, 2, 2) layout for a single-mode block
//! let block = DenseArray::from_vec(vec![1.0, 0.0, 0.0, 1.0], &[1, 1, 2, 2]).unwrap();
//! assert_eq!(block.shape(), &[1, 1, 2, 2]);
//!
//! // Tile three copies along the mode axis
//! let tiled = block.tile(0, 3).unwrap();
//! assert_eq!(tiled.shape(), &[3, 1, 2, 2]);
//! ```
//!
//! ## Error Handling
//!
//! Operations return `anyhow::Result` with descriptive messages:
//!
//! ```
//! use cvphase_array::DenseArray;
//!
//! let array = DenseArray::<f64>::zeros(&[2, 3]);
//! assert!(array.reshape(&[7]).is_err());
//! assert!(array.gather(0, &[5]).is_err());
//! ```

#![deny(warnings)]

pub mod contract;
pub mod dense;


pub use contract::tensordot;
pub use dense::DenseArray;
