//! Conversions between the canonical payload and flat phase-space layouts
//!
//! External code hands over covariance matrices and mean vectors as flat
//! `(2N, 2M)` / `(2N,)` arrays in one of two orderings (see [`Layout`]).
//! Internally every payload is stored in the canonical block shape so that
//! mode-wise gather/scatter is a plain axis operation.

use crate::error::{Result, TensorError};
use crate::modes::ModeSpec;
use crate::tensor::{Block, PhaseTensor};
use crate::types::{Kind, Layout, Likeness, Scalar};
use cvphase_array::DenseArray;

impl<T: Scalar> PhaseTensor<T> {
    /// Build a tensor from a flat array in the given layout.
    ///
    /// Rank-1 arrays become vectors, rank-2 arrays become matrices.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidConstruction`] if the rank is not 1 or 2, an axis
    /// has odd length, or the modes do not fit the payload.
    pub fn from_layout(
        array: DenseArray<T>,
        layout: Layout,
        modes: impl Into<ModeSpec>,
        likeness: Likeness,
    ) -> Result<Self> {
        let canonical = to_canonical(&array, layout)?;
        Self::from_canonical(canonical, modes, likeness)
    }

    /// Build from an `xpxp`-ordered array
    pub fn from_interleaved(
        array: DenseArray<T>,
        modes: impl Into<ModeSpec>,
        likeness: Likeness,
    ) -> Result<Self> {
        Self::from_layout(array, Layout::Interleaved, modes, likeness)
    }

    /// Build from an `xxpp`-ordered array
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::{Likeness, ModeSpec, PhaseTensor};
    /// use cvphase_array::DenseArray;
    ///
    /// // (x0, x1, p0, p1)
    /// let flat = DenseArray::from_vec(vec![1.0, 2.0, 10.0, 20.0], &[4]).unwrap();
    /// let v = PhaseTensor::from_grouped(flat, ModeSpec::Inferred, Likeness::Zero).unwrap();
    ///
    /// // back out as (x0, p0, x1, p1)
    /// let xpxp = v.to_interleaved().unwrap().unwrap();
    /// assert_eq!(xpxp.to_vec(), vec![1.0, 10.0, 2.0, 20.0]);
    /// ```
    pub fn from_grouped(
        array: DenseArray<T>,
        modes: impl Into<ModeSpec>,
        likeness: Likeness,
    ) -> Result<Self> {
        Self::from_layout(array, Layout::Grouped, modes, likeness)
    }

    /// Flatten the payload into `layout`; `None` while undefined
    pub fn to_layout(&self, layout: Layout) -> Result<Option<DenseArray<T>>> {
        self.as_block().map(|block| block.to_layout(layout)).transpose()
    }

    /// `xpxp` view of the payload
    pub fn to_interleaved(&self) -> Result<Option<DenseArray<T>>> {
        self.to_layout(Layout::Interleaved)
    }

    /// `xxpp` view of the payload
    pub fn to_grouped(&self) -> Result<Option<DenseArray<T>>> {
        self.to_layout(Layout::Grouped)
    }

    /// Payload with the coordinate axes first: `(2, 2, out, in)` / `(2, out)`
    pub fn modes_last(&self) -> Result<Option<DenseArray<T>>> {
        self.as_block().map(Block::modes_last).transpose()
    }
}

impl<T: Scalar> Block<T> {
    /// Flatten into `layout`
    pub fn to_layout(&self, layout: Layout) -> Result<DenseArray<T>> {
        let n = self.out_modes.len();
        let flat = match (self.kind, layout) {
            (Kind::Vector, Layout::Interleaved) => self.data.reshape(&[2 * n])?,
            (Kind::Vector, Layout::Grouped) => self.data.permute(&[1, 0])?.reshape(&[2 * n])?,
            (Kind::Matrix, Layout::Interleaved) => {
                let m = self.in_modes.len();
                self.data.permute(&[0, 2, 1, 3])?.reshape(&[2 * n, 2 * m])?
            }
            (Kind::Matrix, Layout::Grouped) => {
                let m = self.in_modes.len();
                self.data.permute(&[2, 0, 3, 1])?.reshape(&[2 * n, 2 * m])?
            }
        };
        Ok(flat)
    }

    pub fn modes_last(&self) -> Result<DenseArray<T>> {
        let axes: &[usize] = match self.kind {
            Kind::Vector => &[1, 0],
            Kind::Matrix => &[2, 3, 0, 1],
        };
        Ok(self.data.permute(axes)?)
    }
}

fn to_canonical<T: Scalar>(array: &DenseArray<T>, layout: Layout) -> Result<DenseArray<T>> {
    let shape = array.shape();
    if shape.iter().any(|len| len % 2 != 0) {
        return Err(TensorError::invalid_construction(format!(
            "phase-space axes must have even length, got shape {:?}",
            shape
        )));
    }
    let canonical = match (shape, layout) {
        (&[len], Layout::Interleaved) => array.reshape(&[len / 2, 2])?,
        (&[len], Layout::Grouped) => array.reshape(&[2, len / 2])?.permute(&[1, 0])?,
        (&[rows, cols], Layout::Interleaved) => array
            .reshape(&[rows / 2, 2, cols / 2, 2])?
            .permute(&[0, 2, 1, 3])?,
        (&[rows, cols], Layout::Grouped) => array
            .reshape(&[2, rows / 2, 2, cols / 2])?
            .permute(&[1, 3, 0, 2])?,
        _ => {
            return Err(TensorError::invalid_construction(format!(
                "flat phase-space arrays must have rank 1 or 2, got shape {:?}",
                shape
            )))
        }
    };
    Ok(canonical)
}
