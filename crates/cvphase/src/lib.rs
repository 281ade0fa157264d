//! # cvphase
//!
//! Mode-aware phase-space block tensors for continuous-variable quantum
//! optics.
//!
//! This is the **meta crate** re-exporting the cvphase components.
//!
//! ## Quick Start
//!
//! ```
//! use cvphase::prelude::*;
//!
//! let config = StateConfig::new().hbar(2.0);
//! let vacuum = GaussianState::vacuum(4, &config).unwrap();
//! let squeezed = GaussianMap::squeezing(3, 0.5, 0.0).unwrap().apply(&vacuum).unwrap();
//! let n = squeezed.number_means().unwrap();
//! assert!((n[3] - 0.5f64.sinh().powi(2)).abs() < 1e-12);
//! ```
//!
//! ## Components
//!
//! ### Dense Arrays ([`array`])
//!
//! Owned n-dimensional arrays with the reshape, permute, gather and scatter
//! primitives the block algebra is built on.
//!
//! ### Block Tensors ([`core`])
//!
//! [`PhaseTensor`](core::PhaseTensor): labelled covariance-style matrices and
//! means-style vectors with zero-like / one-like placeholders, mode-aware
//! products and sums, replication and `xpxp` / `xxpp` layout conversion.
//!
//! ```
//! use cvphase::core::{Likeness, PhaseTensor};
//!
//! let id = PhaseTensor::<f64>::identity(&[0], Likeness::One).unwrap();
//! let id3 = id.replicate(3, vec![0, 1, 2]).unwrap();
//! assert_eq!(id3.out_modes(), &[0, 1, 2]);
//! ```
//!
//! ### Gaussian States ([`states`])
//!
//! Vacuum, coherent, squeezed and thermal states, Gaussian maps and
//! photon-number statistics.
//!
//! ## Features
//!
//! - `serde`: serialization of the plain value types
//! - `subscriber`: [`init_tracing`](core::tracing_support::init_tracing)
//!   through `tracing-subscriber`

#![deny(warnings)]

pub use cvphase_array as array;
pub use cvphase_core as core;
pub use cvphase_states as states;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use cvphase::prelude::*;
    //!
    //! let v = PhaseTensor::<f64>::zero_like();
    //! assert!(v.is_zero_like());
    //! ```

    pub use crate::array::DenseArray;
    pub use crate::core::{
        Kind, Layout, Likeness, ModeSpec, PhaseTensor, Product, TensorError, Tolerance,
    };
    pub use crate::states::{GaussianMap, GaussianState, StateConfig, StateError};
}
