//! Replication of single-subsystem blocks across many modes
//!
//! A block on `N` modes replicated `times` times covers `N * times` modes.
//! Copy `t` of mode position `n` lands at position `t * N + n`: vectors are
//! tiled, matrices become block-diagonal with exactly zero cross blocks.
//! This copy-major order is not the mode-major `n * times + t` order, so
//! `[1, 2, 3, 4]` on modes `[0, 1]` replicated twice reads
//! `[1, 2, 3, 4, 1, 2, 3, 4]`, not `[1, 2, 1, 2, 3, 4, 3, 4]`.
//!
//! The supplied labels are attached in copy-major order and the result is
//! then sorted so its mode lists ascend, like every other operation result.

use super::product::sort_modes;
use crate::error::{Result, TensorError};
use crate::modes::{ModeList, ModeSpec};
use crate::tensor::{Block, PhaseTensor};
use crate::types::{Kind, Scalar};
use cvphase_array::DenseArray;

impl<T: Scalar> PhaseTensor<T> {
    /// Replicate the block `times` times.
    ///
    /// `modes` labels the result (`ModeSpec::Inferred` gives `0..N*times`).
    /// Labels are matched to positions copy-major (`t * N + n`, not the
    /// mode-major `n * times + t`) and the result is reordered so its mode
    /// lists ascend. Undefined tensors replicate to themselves.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidOperation`] for coherence blocks or `times == 0`
    /// - [`TensorError::InvalidConstruction`] if `modes` does not fit the result
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::{Likeness, ModeSpec, PhaseTensor};
    ///
    /// let single = PhaseTensor::<f64>::identity(&[0], Likeness::Zero).unwrap();
    /// let triple = single.replicate(3, ModeSpec::Inferred).unwrap();
    /// assert_eq!(triple.out_modes(), &[0, 1, 2]);
    /// assert_eq!(triple, PhaseTensor::identity(&[0, 1, 2], Likeness::Zero).unwrap());
    /// ```
    pub fn replicate(&self, times: usize, modes: impl Into<ModeSpec>) -> Result<Self> {
        let block = match self {
            PhaseTensor::Undefined(_) => return Ok(self.clone()),
            PhaseTensor::Defined(block) => block,
        };
        if times == 0 {
            return Err(TensorError::invalid_operation(
                "replicate",
                "cannot replicate zero times",
            ));
        }
        if block.is_coherence() {
            return Err(TensorError::invalid_operation(
                "replicate",
                "cross-mode blocks cannot be replicated",
            ));
        }
        tracing::debug!(times, kind = %block.kind, "replicate");

        let n = block.mode_count();
        let data = match block.kind {
            Kind::Vector => block.data.tile(0, times)?,
            Kind::Matrix => {
                let total = n * times;
                let mut data = DenseArray::zeros(&[total, total, 2, 2]);
                let values = block.data.reshape(&[n * n, 2, 2])?;
                for t in 0..times {
                    let offset = t * n;
                    let indices: Vec<Vec<usize>> = (0..n)
                        .flat_map(|o| (0..n).map(move |i| vec![offset + o, offset + i]))
                        .collect();
                    data.scatter_assign(&indices, &values)?;
                }
                data
            }
        };

        let labelled = Block::new(data, modes, block.likeness)?;
        let (data, out_modes, in_modes) = sort_modes(
            labelled.data,
            labelled.out_modes,
            labelled.in_modes,
            labelled.kind,
        )?;
        let block = Block::from_result(
            "replicate",
            data,
            out_modes,
            in_modes,
            labelled.kind,
            labelled.likeness,
        )?;
        Ok(PhaseTensor::Defined(block))
    }

    /// Replicate so that the result covers `other`'s modes.
    ///
    /// The number of copies is `other.mode_count / self.mode_count` and the
    /// result takes `other`'s mode labels, sorted ascending. Undefined tensors
    /// replicate to themselves.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidOperation`] if `other` is undefined, `self` is a
    ///   coherence block, or the kinds differ
    /// - [`TensorError::SizeMismatch`] if the mode counts do not divide
    pub fn replicate_like(&self, other: &Self) -> Result<Self> {
        let block = match self {
            PhaseTensor::Undefined(_) => return Ok(self.clone()),
            PhaseTensor::Defined(block) => block,
        };
        let Some(target) = other.as_block() else {
            return Err(TensorError::invalid_operation(
                "replicate_like",
                "cannot infer a replication count from an undefined tensor",
            ));
        };
        if block.is_coherence() {
            return Err(TensorError::invalid_operation(
                "replicate_like",
                "cross-mode blocks cannot be replicated",
            ));
        }
        if block.kind != target.kind {
            return Err(TensorError::invalid_operation(
                "replicate_like",
                format!("cannot replicate a {} like a {}", block.kind, target.kind),
            ));
        }
        let unit = block.mode_count();
        let count = target.mode_count();
        if unit == 0 || count % unit != 0 {
            return Err(TensorError::SizeMismatch {
                unit,
                target: count,
            });
        }

        let modes = ModeSpec::Split {
            out: target.out_modes.clone(),
            inp: match target.kind {
                Kind::Matrix => target.in_modes.clone(),
                Kind::Vector => ModeList::new(),
            },
        };
        self.replicate(count / unit, modes)
    }
}
