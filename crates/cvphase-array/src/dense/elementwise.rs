//! Elementwise arithmetic, reductions and approximate comparison

use super::types::DenseArray;
use scirs2_core::numeric::{Float, Num};

impl<T> DenseArray<T>
where
    T: Clone + Num,
{
    /// Elementwise sum of two arrays of identical shape
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes differ (no broadcasting).
    pub fn add(&self, other: &Self) -> anyhow::Result<Self> {
        self.check_same_shape(other, "add")?;
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    /// In-place elementwise sum
    pub fn add_assign(&mut self, other: &Self) -> anyhow::Result<()> {
        self.check_same_shape(other, "add_assign")?;
        self.data
            .zip_mut_with(&other.data, |a, b| *a = a.clone() + b.clone());
        Ok(())
    }

    /// Elementwise (Hadamard) product of two arrays of identical shape
    pub fn hadamard(&self, other: &Self) -> anyhow::Result<Self> {
        self.check_same_shape(other, "hadamard")?;
        Ok(Self {
            data: &self.data * &other.data,
        })
    }

    /// Multiply every element by `scalar`
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let a = DenseArray::from_vec(vec![1.0, -2.0], &[2]).unwrap();
    /// assert_eq!(a.scale(3.0).to_vec(), vec![3.0, -6.0]);
    /// ```
    pub fn scale(&self, scalar: T) -> Self {
        Self {
            data: self.data.mapv(|x| x * scalar.clone()),
        }
    }

    /// Multiply every element by `scalar` in place
    pub fn scale_in_place(&mut self, scalar: T) {
        self.data.mapv_inplace(|x| x * scalar.clone());
    }

    /// Sum of all elements
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, x| acc + x.clone())
    }

    fn check_same_shape(&self, other: &Self, op: &str) -> anyhow::Result<()> {
        if self.shape() != other.shape() {
            anyhow::bail!(
                "{}: shape mismatch {:?} vs {:?}",
                op,
                self.shape(),
                other.shape()
            );
        }
        Ok(())
    }
}

impl<T> DenseArray<T>
where
    T: Float,
{
    /// Check `|a - b| <= atol + rtol * |b|` elementwise (numpy convention).
    ///
    /// Arrays of different shape are never close.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_array::DenseArray;
    ///
    /// let a = DenseArray::from_vec(vec![1.0, 2.0], &[2]).unwrap();
    /// let b = DenseArray::from_vec(vec![1.0, 2.0 + 1e-12], &[2]).unwrap();
    /// assert!(a.allclose(&b, 1e-8, 1e-5));
    /// ```
    pub fn allclose(&self, other: &Self, atol: T, rtol: T) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| (a - b).abs() <= atol + rtol * b.abs())
    }

    /// Largest absolute element (zero for empty arrays)
    pub fn max_abs(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| if x.abs() > acc { x.abs() } else { acc })
    }
}
