//! Pairwise tensor contraction
//!
//! [`tensordot`] contracts pairs of axes between two arrays. It is the only
//! multiplicative primitive the block tensors need: matrix products of
//! `(out, in, 2, 2)` payloads contract axes `(1, 3)` of the left operand with
//! axes `(0, 2)` of the right one.

use crate::dense::DenseArray;
use scirs2_core::ndarray_ext::Ix2;
use scirs2_core::numeric::Float;

/// Contract `a` and `b` over the axis pairs `(axes_a[k], axes_b[k])`.
///
/// The result axes are the free axes of `a` (in order) followed by the free
/// axes of `b` (in order), matching numpy's `tensordot`. A full contraction
/// yields a rank-0 array holding the scalar.
///
/// # Errors
///
/// Returns an error if:
/// - `axes_a` and `axes_b` differ in length
/// - an axis is out of bounds or repeated
/// - paired axes have different lengths
///
/// # Complexity
///
/// Time: O(∏(free_a) × ∏(free_b) × ∏(contracted))
///
/// # Examples
///
/// ```
/// use cvphase_array::{tensordot, DenseArray};
///
/// let a = DenseArray::from_vec((0..6).map(|x| x as f64).collect(), &[2, 3]).unwrap();
/// let b = DenseArray::from_vec((0..12).map(|x| x as f64).collect(), &[3, 4]).unwrap();
///
/// // Matrix multiplication as a contraction of axis 1 of A with axis 0 of B
/// let c = tensordot(&a, &b, &[1], &[0]).unwrap();
/// assert_eq!(c.shape(), &[2, 4]);
/// assert_eq!(c[&[0, 0][..]], 20.0);
/// ```
pub fn tensordot<T>(
    a: &DenseArray<T>,
    b: &DenseArray<T>,
    axes_a: &[usize],
    axes_b: &[usize],
) -> anyhow::Result<DenseArray<T>>
where
    T: Float + 'static,
{
    if axes_a.len() != axes_b.len() {
        anyhow::bail!(
            "tensordot: number of contracted axes must match: {} vs {}",
            axes_a.len(),
            axes_b.len()
        );
    }
    validate_axes(a.shape(), axes_a, "a")?;
    validate_axes(b.shape(), axes_b, "b")?;
    for (&ax_a, &ax_b) in axes_a.iter().zip(axes_b) {
        if a.shape()[ax_a] != b.shape()[ax_b] {
            anyhow::bail!(
                "tensordot: contracted dimensions must match: a[{}] = {} vs b[{}] = {}",
                ax_a,
                a.shape()[ax_a],
                ax_b,
                b.shape()[ax_b]
            );
        }
    }

    let free_a: Vec<usize> = (0..a.rank()).filter(|m| !axes_a.contains(m)).collect();
    let free_b: Vec<usize> = (0..b.rank()).filter(|m| !axes_b.contains(m)).collect();

    let free_dims_a: Vec<usize> = free_a.iter().map(|&m| a.shape()[m]).collect();
    let free_dims_b: Vec<usize> = free_b.iter().map(|&m| b.shape()[m]).collect();
    let rows: usize = free_dims_a.iter().product();
    let cols: usize = free_dims_b.iter().product();
    let inner: usize = axes_a.iter().map(|&m| a.shape()[m]).product();

    // Bring both operands to matrix form: a -> (rows, inner), b -> (inner, cols)
    let perm_a: Vec<usize> = free_a.iter().chain(axes_a).copied().collect();
    let perm_b: Vec<usize> = axes_b.iter().chain(&free_b).copied().collect();
    let lhs = a.permute(&perm_a)?.reshape(&[rows, inner])?;
    let rhs = b.permute(&perm_b)?.reshape(&[inner, cols])?;

    let lhs_2d = lhs.view().into_dimensionality::<Ix2>()?;
    let rhs_2d = rhs.view().into_dimensionality::<Ix2>()?;
    let product = DenseArray::from_array(lhs_2d.dot(&rhs_2d).into_dyn());

    let out_shape: Vec<usize> = free_dims_a.into_iter().chain(free_dims_b).collect();
    product.reshape(&out_shape)
}

fn validate_axes(shape: &[usize], axes: &[usize], operand: &str) -> anyhow::Result<()> {
    let mut seen = vec![false; shape.len()];
    for &axis in axes {
        if axis >= shape.len() {
            anyhow::bail!(
                "tensordot: axis {} out of bounds for operand {} of rank {}",
                axis,
                operand,
                shape.len()
            );
        }
        if seen[axis] {
            anyhow::bail!("tensordot: axis {} repeated for operand {}", axis, operand);
        }
        seen[axis] = true;
    }
    Ok(())
}
