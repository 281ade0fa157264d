//! Combining operations: concatenate, tile, block assembly

use super::types::DenseArray;
use scirs2_core::ndarray_ext::Axis;
use scirs2_core::numeric::Num;

impl<T> DenseArray<T>
where
    T: Clone + Num,
{
    /// Concatenate arrays along an existing axis.
    ///
    /// All arrays must have the same shape except along `axis`.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, ranks differ, the axis is out of
    /// bounds, or the non-concatenated dimensions disagree.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let a = DenseArray::<f64>::zeros(&[2, 3, 2, 2]);
    /// let b = DenseArray::<f64>::zeros(&[1, 3, 2, 2]);
    /// let c = DenseArray::concatenate(&[a, b], 0).unwrap();
    /// assert_eq!(c.shape(), &[3, 3, 2, 2]);
    /// ```
    pub fn concatenate(arrays: &[Self], axis: usize) -> anyhow::Result<Self> {
        if arrays.is_empty() {
            anyhow::bail!("Cannot concatenate empty array list");
        }

        let rank = arrays[0].rank();
        if axis >= rank {
            anyhow::bail!("Axis {} out of bounds for rank {}", axis, rank);
        }

        let reference_shape = arrays[0].shape();
        for (i, array) in arrays.iter().enumerate().skip(1) {
            if array.rank() != rank {
                anyhow::bail!("Array {} has rank {}, expected {}", i, array.rank(), rank);
            }
            for (dim, (&s1, &s2)) in reference_shape.iter().zip(array.shape()).enumerate() {
                if dim != axis && s1 != s2 {
                    anyhow::bail!("Shape mismatch at dimension {}: {} vs {}", dim, s1, s2);
                }
            }
        }

        let views: Vec<_> = arrays.iter().map(|a| a.data.view()).collect();
        let concatenated = scirs2_core::ndarray::concatenate(Axis(axis), &views)?;

        Ok(Self { data: concatenated })
    }

    /// Repeat the whole array `times` times along `axis`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let v = DenseArray::from_vec(vec![1.0, 2.0], &[1, 2]).unwrap();
    /// let tiled = v.tile(0, 3).unwrap();
    /// assert_eq!(tiled.shape(), &[3, 2]);
    /// assert_eq!(tiled.to_vec(), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
    /// ```
    pub fn tile(&self, axis: usize, times: usize) -> anyhow::Result<Self> {
        if times == 0 {
            anyhow::bail!("Cannot tile an array zero times");
        }
        let copies = vec![self.clone(); times];
        Self::concatenate(&copies, axis)
    }

    /// Assemble a 2D arrangement of arrays along axes 0 (rows) and 1 (columns).
    ///
    /// Every row is concatenated along axis 1, then the rows are concatenated
    /// along axis 0. Arrays in the same row must agree on axis 0, arrays in the
    /// same column on axis 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let a = DenseArray::<f64>::ones(&[1, 1, 2, 2]);
    /// let b = DenseArray::<f64>::zeros(&[1, 2, 2, 2]);
    /// let c = DenseArray::<f64>::zeros(&[2, 1, 2, 2]);
    /// let d = DenseArray::<f64>::ones(&[2, 2, 2, 2]);
    /// let full = DenseArray::block(&[vec![a, b], vec![c, d]]).unwrap();
    /// assert_eq!(full.shape(), &[3, 3, 2, 2]);
    /// ```
    pub fn block(rows: &[Vec<Self>]) -> anyhow::Result<Self> {
        if rows.is_empty() {
            anyhow::bail!("Cannot assemble an empty block arrangement");
        }
        let assembled_rows = rows
            .iter()
            .map(|row| Self::concatenate(row, 1))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::concatenate(&assembled_rows, 0)
    }
}
