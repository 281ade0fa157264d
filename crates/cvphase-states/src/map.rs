//! Gaussian maps: a symplectic matrix followed by a displacement

use crate::error::{Result, StateError};
use crate::state::GaussianState;
use cvphase_array::DenseArray;
use cvphase_core::{Layout, Likeness, PhaseTensor};

/// A Gaussian unitary `x ↦ S x + d`.
///
/// `S` is one-like, so a gate defined on a few modes acts as the identity on
/// every other mode of the state it is applied to. `d` is zero-like.
///
/// # Examples
///
/// ```
/// use cvphase_states::{GaussianMap, GaussianState, StateConfig};
///
/// let config = StateConfig::new();
/// let vacuum = GaussianState::vacuum(2, &config).unwrap();
/// let displaced = GaussianMap::displacement(1, 2.0, 0.0).unwrap().apply(&vacuum).unwrap();
/// let rotation = GaussianMap::rotation(1, std::f64::consts::FRAC_PI_2).unwrap();
/// let out = rotation.apply(&displaced).unwrap();
/// let n = out.number_means().unwrap();
/// assert!(n[0].abs() < 1e-12);
/// assert!((n[1] - 4.0 / (2.0 * config.hbar)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianMap {
    symplectic: PhaseTensor<f64>,
    displacement: PhaseTensor<f64>,
}

impl Default for GaussianMap {
    fn default() -> Self {
        Self::identity()
    }
}

impl GaussianMap {
    /// The identity map on any set of modes
    pub fn identity() -> Self {
        Self {
            symplectic: PhaseTensor::one_like(),
            displacement: PhaseTensor::zero_like(),
        }
    }

    /// Build a map from its parts.
    ///
    /// `symplectic` must be a one-like matrix or the undefined one-like
    /// placeholder; `displacement` a vector or the undefined zero-like
    /// placeholder.
    pub fn new(symplectic: PhaseTensor<f64>, displacement: PhaseTensor<f64>) -> Result<Self> {
        if !symplectic.is_one_like() || symplectic.is_vector() == Some(true) {
            return Err(StateError::invalid_parameter(
                "the symplectic part must be a one-like matrix",
            ));
        }
        if !displacement.is_zero_like() || displacement.is_matrix() == Some(true) {
            return Err(StateError::invalid_parameter(
                "the displacement must be a zero-like vector",
            ));
        }
        Ok(Self {
            symplectic,
            displacement,
        })
    }

    /// Phase rotation by `phi` on `mode`
    pub fn rotation(mode: usize, phi: f64) -> Result<Self> {
        let (c, s) = (phi.cos(), phi.sin());
        Self::single_mode(mode, [c, -s, s, c])
    }

    /// Single-mode squeezing with magnitude `r` along angle `phi`
    pub fn squeezing(mode: usize, r: f64, phi: f64) -> Result<Self> {
        let (ch, sh) = (r.cosh(), r.sinh());
        let (c, s) = (phi.cos(), phi.sin());
        Self::single_mode(mode, [ch - sh * c, -sh * s, -sh * s, ch + sh * c])
    }

    /// Displacement of `mode` by `(x, y)` in phase space
    pub fn displacement(mode: usize, x: f64, y: f64) -> Result<Self> {
        let d = DenseArray::from_vec(vec![x, y], &[2])?;
        Ok(Self {
            symplectic: PhaseTensor::one_like(),
            displacement: PhaseTensor::from_interleaved(d, vec![mode], Likeness::Zero)?,
        })
    }

    /// Two-mode beamsplitter with transmissivity angle `theta` and phase `phi`
    pub fn beamsplitter(modes: [usize; 2], theta: f64, phi: f64) -> Result<Self> {
        if modes[0] == modes[1] {
            return Err(StateError::invalid_parameter(format!(
                "a beamsplitter needs two distinct modes, got {:?}",
                modes
            )));
        }
        let (ct, st) = (theta.cos(), theta.sin());
        let (cp, sp) = (phi.cos(), phi.sin());
        // xxpp order: x_a, x_b, p_a, p_b
        #[rustfmt::skip]
        let entries = vec![
            ct,      -cp * st, 0.0,      -sp * st,
            cp * st, ct,       -sp * st, 0.0,
            0.0,     sp * st,  ct,       -cp * st,
            sp * st, 0.0,      cp * st,  ct,
        ];
        let data = DenseArray::from_vec(entries, &[4, 4])?;
        Ok(Self {
            symplectic: PhaseTensor::from_layout(data, Layout::Grouped, modes, Likeness::One)?,
            displacement: PhaseTensor::zero_like(),
        })
    }

    fn single_mode(mode: usize, entries: [f64; 4]) -> Result<Self> {
        let data = DenseArray::from_vec(entries.to_vec(), &[2, 2])?;
        Ok(Self {
            symplectic: PhaseTensor::from_interleaved(data, vec![mode], Likeness::One)?,
            displacement: PhaseTensor::zero_like(),
        })
    }

    pub fn symplectic(&self) -> &PhaseTensor<f64> {
        &self.symplectic
    }

    pub fn displacement_vector(&self) -> &PhaseTensor<f64> {
        &self.displacement
    }

    /// Modes the map acts on non-trivially, ascending
    pub fn modes(&self) -> Vec<usize> {
        let mut modes: Vec<usize> = self
            .symplectic
            .out_modes()
            .iter()
            .chain(self.symplectic.in_modes())
            .chain(self.displacement.out_modes())
            .copied()
            .collect();
        modes.sort_unstable();
        modes.dedup();
        modes
    }

    /// Transform a state: `V ↦ S V Sᵀ`, `μ ↦ S μ + d`.
    ///
    /// # Errors
    ///
    /// [`StateError::ModeOutOfRange`] if the map touches a mode the state
    /// does not have.
    pub fn apply(&self, state: &GaussianState) -> Result<GaussianState> {
        if let Some(mode) = self
            .modes()
            .into_iter()
            .find(|m| !state.modes().contains(m))
        {
            return Err(StateError::ModeOutOfRange {
                mode,
                modes: state.modes().to_vec(),
            });
        }
        tracing::debug!(
            map_modes = ?self.modes(),
            state_modes = ?state.modes(),
            "applying gaussian map"
        );

        let cov = self
            .symplectic
            .apply(&state.cov)?
            .apply(&self.symplectic.transpose()?)?;
        let means = self.symplectic.apply(&state.means)?.add(&self.displacement)?;
        Ok(GaussianState {
            cov,
            means,
            hbar: state.hbar,
            mixed: state.mixed,
        })
    }
}
