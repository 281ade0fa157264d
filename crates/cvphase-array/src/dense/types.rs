//! Dense array type definition and basic accessors

use scirs2_core::ndarray_ext::{Array, ArrayView, IxDyn};
use scirs2_core::numeric::Num;
use std::fmt;

/// Dense N-dimensional array backed by scirs2_core's ndarray
///
/// This is the payload type of every defined block tensor. Block tensors use
/// it in two canonical layouts: `(out, in, 2, 2)` for matrices and
/// `(out, 2)` for vectors, but the array itself is rank-agnostic.
///
/// # Memory Layout
///
/// Arrays are C-contiguous (row-major) after every operation that copies;
/// [`reshape`](DenseArray::reshape) always interprets elements in logical
/// row-major order, regardless of the underlying strides.
///
/// # Examples
///
/// ```
/// use cvphase_array::DenseArray;
///
/// let array = DenseArray::<f64>::zeros(&[3, 3, 2, 2]);
/// assert_eq!(array.shape(), &[3, 3, 2, 2]);
/// assert_eq!(array.rank(), 4);
/// ```
#[derive(Clone)]
pub struct DenseArray<T> {
    /// Underlying ndarray storage (via scirs2_core)
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> DenseArray<T>
where
    T: Clone + Num,
{
    /// Wrap an existing dynamic-rank ndarray
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::{Array, IxDyn};
    /// use cvphase_array::DenseArray;
    ///
    /// let arr = Array::<f64, _>::zeros(IxDyn(&[2, 2]));
    /// let array = DenseArray::from_array(arr);
    /// assert_eq!(array.shape(), &[2, 2]);
    /// ```
    pub fn from_array(array: Array<T, IxDyn>) -> Self {
        Self { data: array }
    }

    /// Create an array from a flat vector in row-major order
    ///
    /// # Errors
    ///
    /// Returns an error if `vec.len()` does not match the product of `shape`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let array = DenseArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(array[&[1, 0][..]], 3.0);
    ///
    /// assert!(DenseArray::from_vec(vec![1.0, 2.0], &[3]).is_err());
    /// ```
    pub fn from_vec(vec: Vec<T>, shape: &[usize]) -> anyhow::Result<Self> {
        let total: usize = shape.iter().product();
        if vec.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} elements, but got {}",
                shape,
                total,
                vec.len()
            );
        }
        let array = Array::from_shape_vec(IxDyn(shape), vec)?;
        Ok(Self { data: array })
    }

    /// Create an array of zeros
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    /// Create an array of ones
    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// Create an array filled with `value`
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// Number of axes
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    /// Axis lengths
    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Immutable reference to the underlying ndarray
    pub fn as_array(&self) -> &Array<T, IxDyn> {
        &self.data
    }

    /// Immutable view of the array
    pub fn view(&self) -> ArrayView<'_, T, IxDyn> {
        self.data.view()
    }

    /// Unwrap into the underlying ndarray
    pub fn into_array(self) -> Array<T, IxDyn> {
        self.data
    }

    /// Elements in logical row-major order
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let array = DenseArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// let transposed = array.permute(&[1, 0]).unwrap();
    /// assert_eq!(transposed.to_vec(), vec![1.0, 3.0, 2.0, 4.0]);
    /// ```
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    /// Element at a full multi-index, `None` when out of bounds
    pub fn get(&self, index: &[usize]) -> Option<&T> {
        if index.len() != self.rank() {
            return None;
        }
        if index.iter().zip(self.shape()).any(|(&i, &n)| i >= n) {
            return None;
        }
        self.data.get(IxDyn(index))
    }
}

impl<T> std::ops::Index<&[usize]> for DenseArray<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        &self.data[IxDyn(index)]
    }
}

impl<T> std::ops::IndexMut<&[usize]> for DenseArray<T> {
    fn index_mut(&mut self, index: &[usize]) -> &mut Self::Output {
        &mut self.data[IxDyn(index)]
    }
}

impl<T: PartialEq> PartialEq for DenseArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: fmt::Debug> fmt::Debug for DenseArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseArray")
            .field("shape", &self.data.shape())
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_zeros() {
        let array = DenseArray::<f64>::zeros(&[2, 3, 2, 2]);
        assert_eq!(array.shape(), &[2, 3, 2, 2]);
        assert_eq!(array.rank(), 4);
        assert_eq!(array.len(), 24);
        assert_eq!(array[&[1, 2, 1, 1][..]], 0.0);
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let result = DenseArray::from_vec(vec![1.0, 2.0, 3.0], &[2, 2]);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_bounds() {
        let array = DenseArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        assert_eq!(array.get(&[0, 1]), Some(&2.0));
        assert_eq!(array.get(&[2, 0]), None);
        assert_eq!(array.get(&[0]), None);
    }

    #[test]
    fn test_index_mut() {
        let mut array = DenseArray::<f64>::zeros(&[2, 2]);
        array[&[0, 1][..]] = 5.0;
        assert_eq!(array.to_vec(), vec![0.0, 5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_equality_checks_shape() {
        let a = DenseArray::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let b = DenseArray::from_vec(vec![1.0, 2.0], &[1, 2]).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
