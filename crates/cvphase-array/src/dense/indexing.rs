//! Gather and scatter operations
//!
//! Gather selects hyperplanes along one axis by an index list. Scatter
//! operations write (or accumulate) sub-arrays at *prefix* multi-indices:
//! an index `[i, j]` into a rank-4 array addresses the trailing `(2, 2)`
//! sub-array `a[i, j, .., ..]`.

use super::types::DenseArray;
use scirs2_core::ndarray_ext::{ArrayView, ArrayViewMut, Axis, IxDyn};
use scirs2_core::numeric::Num;

impl<T> DenseArray<T>
where
    T: Clone + Num,
{
    /// Select entries along `axis` by index list (indices may repeat).
    ///
    /// # Errors
    ///
    /// Returns an error if `axis` or any index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let a = DenseArray::from_vec(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &[3, 2]).unwrap();
    /// let rows = a.gather(0, &[2, 0]).unwrap();
    /// assert_eq!(rows.to_vec(), vec![4.0, 5.0, 0.0, 1.0]);
    /// ```
    pub fn gather(&self, axis: usize, indices: &[usize]) -> anyhow::Result<Self> {
        if axis >= self.rank() {
            anyhow::bail!("Axis {} out of bounds for rank {}", axis, self.rank());
        }
        let len = self.shape()[axis];
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            anyhow::bail!(
                "Gather index {} out of bounds for axis {} of length {}",
                bad,
                axis,
                len
            );
        }
        Ok(Self {
            data: self.data.select(Axis(axis), indices),
        })
    }

    /// Accumulate `values[k]` into the sub-array at prefix index `indices[k]`.
    ///
    /// `values` must have shape `(indices.len(), trailing...)` where
    /// `trailing` is the shape of `self` after the prefix axes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let mut acc = DenseArray::<f64>::zeros(&[3, 2]);
    /// let values = DenseArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// acc.scatter_add(&[vec![2], vec![2]], &values).unwrap();
    /// assert_eq!(acc.to_vec(), vec![0.0, 0.0, 0.0, 0.0, 4.0, 6.0]);
    /// ```
    pub fn scatter_add(&mut self, indices: &[Vec<usize>], values: &Self) -> anyhow::Result<()> {
        self.scatter_with(indices, values, |mut target, source| {
            target.zip_mut_with(&source, |t, s| *t = t.clone() + s.clone());
        })
    }

    /// Overwrite the sub-array at prefix index `indices[k]` with `values[k]`.
    ///
    /// Same shape contract as [`scatter_add`](Self::scatter_add). When an
    /// index repeats, the last write wins.
    pub fn scatter_assign(
        &mut self,
        indices: &[Vec<usize>],
        values: &Self,
    ) -> anyhow::Result<()> {
        self.scatter_with(indices, values, |mut target, source| {
            target.assign(&source);
        })
    }

    fn scatter_with<F>(
        &mut self,
        indices: &[Vec<usize>],
        values: &Self,
        mut write: F,
    ) -> anyhow::Result<()>
    where
        F: FnMut(ArrayViewMut<'_, T, IxDyn>, ArrayView<'_, T, IxDyn>),
    {
        self.validate_scatter(indices, values)?;
        for (k, prefix) in indices.iter().enumerate() {
            let source = values.data.index_axis(Axis(0), k);
            let mut target = self.data.view_mut();
            for &p in prefix {
                target = target.index_axis_move(Axis(0), p);
            }
            write(target, source);
        }
        Ok(())
    }

    fn validate_scatter(&self, indices: &[Vec<usize>], values: &Self) -> anyhow::Result<()> {
        if values.rank() == 0 || values.shape()[0] != indices.len() {
            anyhow::bail!(
                "Scatter expects {} value slices, got values of shape {:?}",
                indices.len(),
                values.shape()
            );
        }
        let Some(prefix_len) = indices.first().map(Vec::len) else {
            return Ok(());
        };
        if prefix_len > self.rank() {
            anyhow::bail!(
                "Scatter prefix of length {} exceeds rank {}",
                prefix_len,
                self.rank()
            );
        }
        let trailing = &self.shape()[prefix_len..];
        if &values.shape()[1..] != trailing {
            anyhow::bail!(
                "Scatter value slices have shape {:?}, target slices have shape {:?}",
                &values.shape()[1..],
                trailing
            );
        }
        for prefix in indices {
            if prefix.len() != prefix_len {
                anyhow::bail!("Scatter indices have inconsistent lengths");
            }
            for (axis, (&i, &n)) in prefix.iter().zip(self.shape()).enumerate() {
                if i >= n {
                    anyhow::bail!(
                        "Scatter index {} out of bounds for axis {} of length {}",
                        i,
                        axis,
                        n
                    );
                }
            }
        }
        Ok(())
    }
}
