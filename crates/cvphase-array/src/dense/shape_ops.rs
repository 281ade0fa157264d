//! Shape manipulation: reshape and permute

use super::types::DenseArray;
use scirs2_core::ndarray_ext::IxDyn;
use scirs2_core::numeric::Num;

impl<T> DenseArray<T>
where
    T: Clone + Num,
{
    /// Reshape the array, reading elements in logical row-major order
    ///
    /// Zero-copy reinterpretation is attempted first; arrays whose strides do
    /// not allow it (e.g. after [`permute`](Self::permute)) are copied in
    /// logical order, so `permute` followed by `reshape` always behaves like
    /// numpy's C-order reshape of the transposed array.
    ///
    /// # Errors
    ///
    /// Returns an error if the total size doesn't match.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let array = DenseArray::<f64>::zeros(&[4, 4]);
    /// let blocks = array.reshape(&[2, 2, 2, 2]).unwrap();
    /// assert_eq!(blocks.shape(), &[2, 2, 2, 2]);
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> anyhow::Result<Self> {
        let new_size: usize = new_shape.iter().product();
        let old_size = self.len();
        if new_size != old_size {
            anyhow::bail!(
                "Cannot reshape array of size {} into shape {:?} (size {})",
                old_size,
                new_shape,
                new_size
            );
        }
        if self.data.is_standard_layout() {
            if let Ok(reshaped) = self.data.view().into_shape_with_order(IxDyn(new_shape)) {
                return Ok(Self {
                    data: reshaped.to_owned(),
                });
            }
        }
        let flat: Vec<T> = self.data.iter().cloned().collect();
        Self::from_vec(flat, new_shape)
    }

    /// Permute the axes of the array
    ///
    /// `axes[k]` is the source axis that becomes axis `k` of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if `axes` is not a permutation of `0..rank`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let array = DenseArray::<f64>::zeros(&[3, 1, 2, 2]);
    /// let swapped = array.permute(&[1, 0, 3, 2]).unwrap();
    /// assert_eq!(swapped.shape(), &[1, 3, 2, 2]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> anyhow::Result<Self> {
        if axes.len() != self.rank() {
            anyhow::bail!(
                "Permutation axes length {} does not match array rank {}",
                axes.len(),
                self.rank()
            );
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                anyhow::bail!("Invalid axis {} for rank {}", axis, self.rank());
            }
            if seen[axis] {
                anyhow::bail!("Duplicate axis {} in permutation", axis);
            }
            seen[axis] = true;
        }
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(shape: &[usize]) -> DenseArray<f64> {
        let n: usize = shape.iter().product();
        DenseArray::from_vec((0..n).map(|x| x as f64).collect(), shape).unwrap()
    }

    #[test]
    fn test_reshape_size_mismatch() {
        let array = iota(&[2, 3]);
        assert!(array.reshape(&[4]).is_err());
    }

    #[test]
    fn test_reshape_after_permute_is_row_major() {
        // [[0, 1, 2], [3, 4, 5]]^T flattened is [0, 3, 1, 4, 2, 5]
        let array = iota(&[2, 3]);
        let flat = array.permute(&[1, 0]).unwrap().reshape(&[6]).unwrap();
        assert_eq!(flat.to_vec(), vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
    }

    #[test]
    fn test_permute_rejects_invalid() {
        let array = iota(&[2, 3]);
        assert!(array.permute(&[0]).is_err());
        assert!(array.permute(&[0, 0]).is_err());
        assert!(array.permute(&[0, 2]).is_err());
    }

    #[test]
    fn test_permute_values() {
        let array = iota(&[2, 3, 4]);
        let permuted = array.permute(&[2, 0, 1]).unwrap();
        assert_eq!(permuted.shape(), &[4, 2, 3]);
        assert_eq!(permuted[&[3, 1, 2][..]], array[&[1, 2, 3][..]]);
    }
}
