//! Gaussian states: covariance matrix plus means vector

use crate::config::StateConfig;
use crate::error::{Result, StateError};
use cvphase_array::DenseArray;
use cvphase_core::{Layout, Likeness, ModeSpec, PhaseTensor, Tolerance};

/// 2×2 block of one mode pair, `[[xx, xp], [px, pp]]`
pub(crate) type Block2 = [[f64; 2]; 2];

/// A Gaussian state on a set of modes.
///
/// The covariance is a defined, zero-like diagonal [`PhaseTensor`] over all
/// modes of the state. The means vector may stay an undefined zero-like
/// placeholder (all means zero) or define only some of the modes.
///
/// # Examples
///
/// ```
/// use cvphase_states::{GaussianState, StateConfig};
///
/// let config = StateConfig::new().hbar(2.0);
/// let state = GaussianState::thermal(&[0.5, 2.0], &config).unwrap();
/// let n = state.number_means().unwrap();
/// assert!((n[0] - 0.5).abs() < 1e-12);
/// assert!((n[1] - 2.0).abs() < 1e-12);
/// assert!(state.is_mixed());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianState {
    pub(crate) cov: PhaseTensor<f64>,
    pub(crate) means: PhaseTensor<f64>,
    pub(crate) hbar: f64,
    pub(crate) mixed: bool,
}

impl GaussianState {
    /// Vacuum on modes `0..num_modes`, covariance `ħ/2 · I`
    pub fn vacuum(num_modes: usize, config: &StateConfig) -> Result<Self> {
        config.validate()?;
        let half = config.hbar / 2.0;
        let cov = diagonal_covariance(&vec![[[half, 0.0], [0.0, half]]; num_modes])?;
        Ok(Self {
            cov,
            means: PhaseTensor::zero_like(),
            hbar: config.hbar,
            mixed: false,
        })
    }

    /// Coherent state with quadrature means `(x[i], y[i])` on mode `i`
    pub fn coherent(x: &[f64], y: &[f64], config: &StateConfig) -> Result<Self> {
        check_lengths("coherent", x.len(), y.len())?;
        let mut state = Self::vacuum(x.len(), config)?;
        let entries: Vec<f64> = x.iter().zip(y).flat_map(|(&x, &y)| [x, y]).collect();
        let means = DenseArray::from_vec(entries, &[2 * x.len()])?;
        state.means = PhaseTensor::from_interleaved(means, ModeSpec::Inferred, Likeness::Zero)?;
        Ok(state)
    }

    /// Squeezed vacuum with squeezing magnitude `r[i]` and angle `phi[i]` on mode `i`
    pub fn squeezed_vacuum(r: &[f64], phi: &[f64], config: &StateConfig) -> Result<Self> {
        check_lengths("squeezed_vacuum", r.len(), phi.len())?;
        config.validate()?;
        let half = config.hbar / 2.0;
        let blocks: Vec<Block2> = r
            .iter()
            .zip(phi)
            .map(|(&r, &phi)| {
                let (ch, sh) = ((2.0 * r).cosh(), (2.0 * r).sinh());
                let (c, s) = (phi.cos(), phi.sin());
                [
                    [half * (ch - sh * c), -half * sh * s],
                    [-half * sh * s, half * (ch + sh * c)],
                ]
            })
            .collect();
        Ok(Self {
            cov: diagonal_covariance(&blocks)?,
            means: PhaseTensor::zero_like(),
            hbar: config.hbar,
            mixed: false,
        })
    }

    /// Thermal state with mean photon number `nbar[i]` on mode `i`
    pub fn thermal(nbar: &[f64], config: &StateConfig) -> Result<Self> {
        config.validate()?;
        if let Some(bad) = nbar.iter().find(|n| !(n.is_finite() && **n >= 0.0)) {
            return Err(StateError::invalid_parameter(format!(
                "thermal photon numbers must be finite and non-negative, got {}",
                bad
            )));
        }
        let blocks: Vec<Block2> = nbar
            .iter()
            .map(|&n| {
                let v = config.hbar / 2.0 * (2.0 * n + 1.0);
                [[v, 0.0], [0.0, v]]
            })
            .collect();
        Ok(Self {
            cov: diagonal_covariance(&blocks)?,
            means: PhaseTensor::zero_like(),
            hbar: config.hbar,
            mixed: nbar.iter().any(|&n| n > 0.0),
        })
    }

    /// Mode ids of the state, ascending
    pub fn modes(&self) -> &[usize] {
        self.cov.out_modes()
    }

    pub fn num_modes(&self) -> usize {
        self.modes().len()
    }

    pub fn hbar(&self) -> f64 {
        self.hbar
    }

    pub fn is_mixed(&self) -> bool {
        self.mixed
    }

    pub fn is_pure(&self) -> bool {
        !self.mixed
    }

    pub fn cov(&self) -> &PhaseTensor<f64> {
        &self.cov
    }

    pub fn means(&self) -> &PhaseTensor<f64> {
        &self.means
    }

    /// Dense `2N × 2N` covariance in the requested layout
    pub fn covariance(&self, layout: Layout) -> Result<DenseArray<f64>> {
        self.cov
            .to_layout(layout)?
            .ok_or_else(|| StateError::invalid_parameter("covariance is undefined"))
    }

    /// Dense `2N` means vector in the requested layout, zeros where undefined
    pub fn mean_vector(&self, layout: Layout) -> Result<DenseArray<f64>> {
        self.full_means()?
            .to_layout(layout)?
            .ok_or_else(|| StateError::invalid_parameter("means are undefined"))
    }

    /// Mean photon number of every mode, in [`modes`](Self::modes) order.
    ///
    /// `⟨n_i⟩ = (tr V_ii + |μ_i|²) / (2ħ) − 1/2`
    pub fn number_means(&self) -> Result<Vec<f64>> {
        let means = self.full_means()?;
        self.modes()
            .iter()
            .map(|&mode| {
                let v = pair_block(&self.cov, mode, mode)?;
                let mu = mode_means(&means, mode)?;
                let trace = v[0][0] + v[1][1];
                let norm = mu[0] * mu[0] + mu[1] * mu[1];
                Ok((trace + norm) / (2.0 * self.hbar) - 0.5)
            })
            .collect()
    }

    /// Photon-number covariance matrix `Cov(n_i, n_j)`, shape `(N, N)`.
    pub fn number_cov(&self) -> Result<DenseArray<f64>> {
        let means = self.full_means()?;
        let modes = self.modes();
        let mu: Vec<[f64; 2]> = modes
            .iter()
            .map(|&mode| mode_means(&means, mode))
            .collect::<Result<_>>()?;
        let hbar2 = self.hbar * self.hbar;

        let n = modes.len();
        let mut entries = Vec::with_capacity(n * n);
        for (i, &row) in modes.iter().enumerate() {
            for (j, &col) in modes.iter().enumerate() {
                let v = pair_block(&self.cov, row, col)?;
                let value = if i == j {
                    let trace = v[0][0] + v[1][1];
                    let det = v[0][0] * v[1][1] - v[0][1] * v[1][0];
                    (trace * trace / 2.0 - det + quadratic(&mu[i], &v, &mu[i])) / hbar2 - 0.25
                } else {
                    let frobenius: f64 = v.iter().flatten().map(|x| x * x).sum();
                    (frobenius + 2.0 * quadratic(&mu[i], &v, &mu[j])) / (2.0 * hbar2)
                };
                entries.push(value);
            }
        }
        Ok(DenseArray::from_vec(entries, &[n, n])?)
    }

    /// Same ħ, same modes, covariances and means close within `tol`
    pub fn allclose(&self, other: &Self, tol: &Tolerance) -> bool {
        if self.hbar != other.hbar || self.modes() != other.modes() {
            return false;
        }
        match (self.full_means(), other.full_means()) {
            (Ok(a), Ok(b)) => self.cov.allclose(&other.cov, tol) && a.allclose(&b, tol),
            _ => false,
        }
    }

    /// Means defined on every mode of the state
    fn full_means(&self) -> Result<PhaseTensor<f64>> {
        let zeros = PhaseTensor::from_canonical(
            DenseArray::zeros(&[self.num_modes(), 2]),
            self.modes(),
            Likeness::Zero,
        )?;
        Ok(zeros.add(&self.means)?)
    }
}

/// Block-diagonal covariance over modes `0..blocks.len()`.
///
/// Identical blocks are built once and replicated.
fn diagonal_covariance(blocks: &[Block2]) -> Result<PhaseTensor<f64>> {
    let first = blocks
        .first()
        .ok_or_else(|| StateError::invalid_parameter("a state needs at least one mode"))?;
    if blocks.iter().all(|b| b == first) {
        let single = single_mode(first, 0)?;
        return Ok(single.replicate(blocks.len(), ModeSpec::Inferred)?);
    }
    let mut cov = PhaseTensor::zero_like();
    for (mode, block) in blocks.iter().enumerate() {
        cov.add_in_place(&single_mode(block, mode)?)?;
    }
    Ok(cov)
}

fn single_mode(block: &Block2, mode: usize) -> Result<PhaseTensor<f64>> {
    let data = DenseArray::from_vec(block.iter().flatten().copied().collect(), &[2, 2])?;
    Ok(PhaseTensor::from_interleaved(data, vec![mode], Likeness::Zero)?)
}

pub(crate) fn pair_block(t: &PhaseTensor<f64>, row: usize, col: usize) -> Result<Block2> {
    let sub = t.block(&[row], &[col])?;
    let data = sub
        .payload()
        .ok_or_else(|| StateError::invalid_parameter("covariance is undefined"))?;
    let at = |a: usize, b: usize| data[&[0, 0, a, b][..]];
    Ok([[at(0, 0), at(0, 1)], [at(1, 0), at(1, 1)]])
}

fn mode_means(means: &PhaseTensor<f64>, mode: usize) -> Result<[f64; 2]> {
    let sub = means.mode(mode)?;
    let data = sub
        .payload()
        .ok_or_else(|| StateError::invalid_parameter("means are undefined"))?;
    Ok([data[&[0, 0][..]], data[&[0, 1][..]]])
}

fn quadratic(left: &[f64; 2], v: &Block2, right: &[f64; 2]) -> f64 {
    (0..2)
        .flat_map(|a| (0..2).map(move |b| (a, b)))
        .map(|(a, b)| left[a] * v[a][b] * right[b])
        .sum()
}

fn check_lengths(operation: &str, a: usize, b: usize) -> Result<()> {
    if a != b {
        return Err(StateError::invalid_parameter(format!(
            "{}: parameter lists differ in length ({} vs {})",
            operation, a, b
        )));
    }
    Ok(())
}
