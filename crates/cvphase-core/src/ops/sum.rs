//! Addition of block tensors over possibly different mode sets
//!
//! Tensors on different modes are summed on the sorted union of their modes.
//! When one operand already covers the union, the other is scatter-added into
//! a copy of it; otherwise both are scattered into a fresh zero block.

use super::product::lookup;
use crate::error::{Result, TensorError};
use crate::modes::{self, ModeList};
use crate::tensor::{Block, PhaseTensor};
use crate::types::{Kind, Likeness, Scalar};
use cvphase_array::DenseArray;

impl<T: Scalar> PhaseTensor<T> {
    /// Sum of two tensors.
    ///
    /// | `self` | `rhs` | result |
    /// |---|---|---|
    /// | undefined one-like | undefined one-like | unsupported |
    /// | undefined | undefined | undefined, one-like iff either is |
    /// | undefined zero-like | any | `rhs` |
    /// | undefined one-like | defined | unsupported |
    /// | defined | defined | sum on the union of modes |
    ///
    /// A defined result is one-like iff either operand is.
    ///
    /// # Errors
    ///
    /// - [`TensorError::Unsupported`] when an implicit identity would have to
    ///   be added
    /// - [`TensorError::InvalidOperation`] for a vector plus a matrix, or a
    ///   coherence block plus a diagonal block on different modes
    /// - [`TensorError::ModeConflict`] if the mode union partially overlaps
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::{Likeness, PhaseTensor};
    /// use cvphase_array::DenseArray;
    ///
    /// let a = PhaseTensor::from_interleaved(
    ///     DenseArray::from_vec(vec![1.0, 1.0], &[2]).unwrap(), vec![0], Likeness::Zero).unwrap();
    /// let b = PhaseTensor::from_interleaved(
    ///     DenseArray::from_vec(vec![2.0, 2.0], &[2]).unwrap(), vec![1], Likeness::Zero).unwrap();
    ///
    /// let sum = a.add(&b).unwrap();
    /// assert_eq!(sum.out_modes(), &[0, 1]);
    /// assert_eq!(sum.to_interleaved().unwrap().unwrap().to_vec(), vec![1.0, 1.0, 2.0, 2.0]);
    /// ```
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        use PhaseTensor::{Defined, Undefined};

        match (self, rhs) {
            (Undefined(Likeness::One), Undefined(Likeness::One)) => Err(TensorError::unsupported(
                "add",
                "the sum of two undefined one-like tensors is not a single placeholder",
            )),
            (Undefined(a), Undefined(b)) => Ok(Undefined(a.sum(*b))),
            (Undefined(Likeness::Zero), other) | (other, Undefined(Likeness::Zero)) => {
                Ok(other.clone())
            }
            (Undefined(Likeness::One), _) | (_, Undefined(Likeness::One)) => {
                Err(TensorError::unsupported(
                    "add",
                    "an undefined one-like tensor cannot be added to a defined tensor",
                ))
            }
            (Defined(a), Defined(b)) => Ok(Defined(add_blocks(a, b)?)),
        }
    }

    /// Add `rhs` into `self`.
    ///
    /// Operands on identical mode lists are summed directly in the existing
    /// payload; every other case replaces `self` with [`add`](Self::add)'s
    /// result. On error `self` is left untouched.
    pub fn add_in_place(&mut self, rhs: &Self) -> Result<()> {
        if let (PhaseTensor::Defined(a), PhaseTensor::Defined(b)) = (&mut *self, rhs) {
            if a.kind == b.kind && a.out_modes == b.out_modes && a.in_modes == b.in_modes {
                a.data.add_assign(&b.data)?;
                a.likeness = a.likeness.sum(b.likeness);
                return Ok(());
            }
        }
        let sum = self.add(rhs)?;
        *self = sum;
        Ok(())
    }
}

fn add_blocks<T: Scalar>(a: &Block<T>, b: &Block<T>) -> Result<Block<T>> {
    if a.kind != b.kind {
        return Err(TensorError::invalid_operation(
            "add",
            format!("cannot add a {} and a {}", a.kind, b.kind),
        ));
    }
    let likeness = a.likeness.sum(b.likeness);

    if a.out_modes == b.out_modes && a.in_modes == b.in_modes {
        tracing::debug!("add: identical modes, elementwise sum");
        let mut sum = a.with_data(a.data.add(&b.data)?);
        sum.likeness = likeness;
        return Ok(sum);
    }
    if a.is_coherence() != b.is_coherence() {
        return Err(TensorError::invalid_operation(
            "add",
            "cannot add a coherence block and a diagonal block on different modes",
        ));
    }

    let out_modes = modes::sorted_union(&a.out_modes, &b.out_modes);
    let in_modes = match a.kind {
        Kind::Matrix => modes::sorted_union(&a.in_modes, &b.in_modes),
        Kind::Vector => ModeList::new(),
    };
    modes::validate_result("add", &out_modes, &in_modes)?;

    let covers = |sup: &Block<T>, sub: &Block<T>| {
        modes::contains_all(&sup.out_modes, &sub.out_modes)
            && modes::contains_all(&sup.in_modes, &sub.in_modes)
    };
    let data = if covers(a, b) {
        tracing::debug!("add: left operand covers the union");
        let mut base = reorder(a, &out_modes, &in_modes)?;
        scatter_add(&mut base, b, &out_modes, &in_modes)?;
        base
    } else if covers(b, a) {
        tracing::debug!("add: right operand covers the union");
        let mut base = reorder(b, &out_modes, &in_modes)?;
        scatter_add(&mut base, a, &out_modes, &in_modes)?;
        base
    } else {
        tracing::debug!("add: scattering both operands into a zero block");
        let shape: Vec<usize> = match a.kind {
            Kind::Matrix => vec![out_modes.len(), in_modes.len(), 2, 2],
            Kind::Vector => vec![out_modes.len(), 2],
        };
        let mut base = DenseArray::zeros(&shape);
        scatter_add(&mut base, a, &out_modes, &in_modes)?;
        scatter_add(&mut base, b, &out_modes, &in_modes)?;
        base
    };
    tracing::trace!(out = ?out_modes.as_slice(), inp = ?in_modes.as_slice(), "add: union modes");

    Block::from_result("add", data, out_modes, in_modes, a.kind, likeness)
}

/// Copy of `block`'s payload with rows/columns in the order of `out`/`inp`
fn reorder<T: Scalar>(block: &Block<T>, out: &[usize], inp: &[usize]) -> Result<DenseArray<T>> {
    let mut data = block.data.gather(0, &lookup(&block.out_modes, out)?)?;
    if block.is_matrix() {
        data = data.gather(1, &lookup(&block.in_modes, inp)?)?;
    }
    Ok(data)
}

/// Accumulate `block` into `target`, whose axes are labelled by `out`/`inp`
fn scatter_add<T: Scalar>(
    target: &mut DenseArray<T>,
    block: &Block<T>,
    out: &[usize],
    inp: &[usize],
) -> Result<()> {
    let rows = lookup(out, &block.out_modes)?;
    match block.kind {
        Kind::Vector => {
            let indices: Vec<Vec<usize>> = rows.iter().map(|&r| vec![r]).collect();
            target.scatter_add(&indices, &block.data)?;
        }
        Kind::Matrix => {
            let cols = lookup(inp, &block.in_modes)?;
            let indices: Vec<Vec<usize>> = rows
                .iter()
                .flat_map(|&r| cols.iter().map(move |&c| vec![r, c]))
                .collect();
            let values = block.data.reshape(&[indices.len(), 2, 2])?;
            target.scatter_add(&indices, &values)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(values: &[f64], modes: Vec<usize>, likeness: Likeness) -> PhaseTensor<f64> {
        PhaseTensor::from_interleaved(
            DenseArray::from_vec(values.to_vec(), &[values.len()]).unwrap(),
            modes,
            likeness,
        )
        .unwrap()
    }

    fn flat(t: &PhaseTensor<f64>) -> Vec<f64> {
        t.to_interleaved().unwrap().unwrap().to_vec()
    }

    #[test]
    fn test_undefined_rules() {
        let one = PhaseTensor::<f64>::one_like();
        let zero = PhaseTensor::<f64>::zero_like();
        let v = vector(&[1.0, 2.0], vec![0], Likeness::Zero);

        assert!(matches!(one.add(&one), Err(TensorError::Unsupported { .. })));
        assert_eq!(one.add(&zero).unwrap(), one);
        assert_eq!(zero.add(&zero).unwrap(), zero);
        assert_eq!(zero.add(&v).unwrap(), v);
        assert_eq!(v.add(&zero).unwrap(), v);
        assert!(matches!(v.add(&one), Err(TensorError::Unsupported { .. })));
        assert!(matches!(one.add(&v), Err(TensorError::Unsupported { .. })));
    }

    #[test]
    fn test_identical_modes_keep_caller_order() {
        let a = vector(&[1.0, 2.0, 3.0, 4.0], vec![5, 2], Likeness::Zero);
        let sum = a.add(&a).unwrap();
        assert_eq!(sum.out_modes(), &[5, 2]);
        assert_eq!(flat(&sum), vec![2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_superset_with_reordering() {
        // superset given in unsorted order, result comes out sorted
        let a = vector(&[1.0, 1.0, 2.0, 2.0], vec![1, 0], Likeness::Zero);
        let b = vector(&[10.0, 20.0], vec![1], Likeness::Zero);
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.out_modes(), &[0, 1]);
        assert_eq!(flat(&sum), vec![2.0, 2.0, 11.0, 21.0]);
        // symmetric
        assert_eq!(b.add(&a).unwrap(), sum);
    }

    #[test]
    fn test_disjoint_matrices_fill_cross_blocks_with_zero() {
        let a = PhaseTensor::<f64>::identity(&[0], Likeness::Zero).unwrap();
        let b = PhaseTensor::<f64>::identity(&[1], Likeness::One).unwrap();
        let sum = a.add(&b).unwrap();
        assert!(sum.is_one_like());
        assert_eq!(sum.out_modes(), &[0, 1]);
        let expected = PhaseTensor::<f64>::identity(&[0, 1], Likeness::One).unwrap();
        assert_eq!(sum, expected);
    }

    #[test]
    fn test_kind_and_structure_mismatch() {
        let v = vector(&[1.0, 2.0], vec![0], Likeness::Zero);
        let m = PhaseTensor::<f64>::identity(&[0], Likeness::Zero).unwrap();
        assert!(matches!(v.add(&m), Err(TensorError::InvalidOperation { .. })));

        let coherence = PhaseTensor::from_canonical(
            DenseArray::<f64>::ones(&[1, 1, 2, 2]),
            (vec![0], vec![1]),
            Likeness::Zero,
        )
        .unwrap();
        let diagonal = PhaseTensor::<f64>::identity(&[2], Likeness::Zero).unwrap();
        assert!(matches!(
            coherence.add(&diagonal),
            Err(TensorError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_coherence_union_partial_overlap_is_mode_conflict() {
        let a = PhaseTensor::from_canonical(
            DenseArray::<f64>::ones(&[1, 1, 2, 2]),
            (vec![0], vec![1]),
            Likeness::Zero,
        )
        .unwrap();
        let b = PhaseTensor::from_canonical(
            DenseArray::<f64>::ones(&[1, 1, 2, 2]),
            (vec![2], vec![0]),
            Likeness::Zero,
        )
        .unwrap();
        // out union [0, 2], in union [0, 1]
        assert!(matches!(a.add(&b), Err(TensorError::ModeConflict { .. })));
    }

    #[test]
    fn test_add_in_place() {
        let mut a = vector(&[1.0, 2.0], vec![0], Likeness::Zero);
        let b = vector(&[1.0, 1.0], vec![0], Likeness::One);
        a.add_in_place(&b).unwrap();
        assert_eq!(flat(&a), vec![2.0, 3.0]);
        assert!(a.is_one_like());

        let c = vector(&[5.0, 5.0], vec![3], Likeness::Zero);
        a.add_in_place(&c).unwrap();
        assert_eq!(a.out_modes(), &[0, 3]);

        // failure leaves the receiver untouched
        let before = a.clone();
        assert!(a.add_in_place(&PhaseTensor::one_like()).is_err());
        assert_eq!(a, before);
    }
}
