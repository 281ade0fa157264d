//! # cvphase-states
//!
//! Gaussian states and Gaussian unitaries expressed through cvphase block
//! tensors.
//!
//! A [`GaussianState`] holds a covariance matrix and a means vector as
//! [`PhaseTensor`](cvphase_core::PhaseTensor)s. A [`GaussianMap`] holds a
//! one-like symplectic matrix and a zero-like displacement, so a gate defined
//! on one or two modes transforms an `N`-mode state without ever building an
//! `N`-mode symplectic matrix.
//!
//! ```
//! use cvphase_states::{GaussianMap, GaussianState, StateConfig};
//!
//! let config = StateConfig::new().hbar(2.0);
//! let state = GaussianState::coherent(&[2.0, 0.0, 0.0], &[0.0; 3], &config).unwrap();
//!
//! // split the photons of mode 0 evenly with mode 2
//! let bs = GaussianMap::beamsplitter([0, 2], std::f64::consts::FRAC_PI_4, 0.0).unwrap();
//! let n = bs.apply(&state).unwrap().number_means().unwrap();
//! assert!((n[0] - 0.5).abs() < 1e-12);
//! assert!(n[1].abs() < 1e-12);
//! assert!((n[2] - 0.5).abs() < 1e-12);
//! ```
//!
//! ## Configuration
//!
//! [`StateConfig`] carries ħ (default `2.0`, overridable through the
//! `CVPHASE_HBAR` environment variable). Comparisons take an explicit
//! [`Tolerance`](cvphase_core::Tolerance), see [`GaussianState::allclose`].

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod map;
pub mod state;

pub use config::StateConfig;
pub use error::{Result, StateError};
pub use map::GaussianMap;
pub use state::GaussianState;
