//! Mode-aware products
//!
//! `A @ B` contracts the in-modes of `A` against the out-modes of `B`. Modes
//! that only one operand defines are handled through the operands' implicit
//! regions:
//!
//! - if `A` is one-like, `A` is the identity on `B`'s uncontracted out-modes,
//!   so those rows of `B` pass through unchanged
//! - if `B` is one-like, `B` is the identity on `A`'s uncontracted in-modes,
//!   so those columns of `A` pass through unchanged
//! - otherwise the uncontracted modes meet an implicit zero and drop out
//!
//! The result is assembled as
//!
//! ```text
//!              B.in         uA
//!        ┌─────────────┬──────────┐
//! A.out  │ A[:,c]B[c,:] │ A[:,uA]  │
//!        ├─────────────┼──────────┤
//!   uB   │   B[uB,:]    │    0     │
//!        └─────────────┴──────────┘
//! ```
//!
//! where absent pass-throughs drop their row/column band, then rows and
//! columns are sorted by mode id.

use crate::error::{Result, TensorError};
use crate::modes::{self, ModeList};
use crate::tensor::{Block, PhaseTensor};
use crate::types::{Kind, Likeness, Scalar};
use cvphase_array::{tensordot, DenseArray};

/// Result of [`PhaseTensor::matmul`]
#[derive(Debug, Clone, PartialEq)]
pub enum Product<T> {
    /// Matrix or vector result
    Tensor(PhaseTensor<T>),
    /// Inner product of two vectors
    Scalar(T),
}

impl<T> Product<T> {
    pub fn into_tensor(self) -> Option<PhaseTensor<T>> {
        match self {
            Product::Tensor(t) => Some(t),
            Product::Scalar(_) => None,
        }
    }

    pub fn into_scalar(self) -> Option<T> {
        match self {
            Product::Scalar(s) => Some(s),
            Product::Tensor(_) => None,
        }
    }
}

impl<T: Scalar> PhaseTensor<T> {
    /// Mode-aware product `self @ rhs`.
    ///
    /// | `self` | `rhs` | result |
    /// |---|---|---|
    /// | undefined | undefined | undefined, one-like iff both are |
    /// | undefined zero-like | any | undefined zero-like |
    /// | any | undefined zero-like | undefined zero-like |
    /// | undefined one-like | any | `rhs` |
    /// | any | undefined one-like | `self` |
    /// | matrix | matrix / vector | mode-aware contraction |
    /// | vector | matrix | `rhs^T @ self` |
    /// | vector | vector | inner product over common modes |
    ///
    /// # Errors
    ///
    /// [`TensorError::ModeConflict`] if the result would repeat a mode or
    /// mix out- and in-modes that only partially overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::{Likeness, PhaseTensor, Product};
    ///
    /// // A gate on mode 1 acting on a two-mode identity
    /// let gate = PhaseTensor::<f64>::identity(&[1], Likeness::One).unwrap().scale(2.0).unwrap();
    /// let global = PhaseTensor::<f64>::identity(&[0, 1], Likeness::One).unwrap();
    ///
    /// let Product::Tensor(out) = gate.matmul(&global).unwrap() else { panic!() };
    /// assert_eq!(out.out_modes(), &[0, 1]);
    /// assert_eq!(out.in_modes(), &[0, 1]);
    /// assert!(out.is_one_like());
    /// ```
    pub fn matmul(&self, rhs: &Self) -> Result<Product<T>> {
        use PhaseTensor::{Defined, Undefined};

        let product = match (self, rhs) {
            (Undefined(a), Undefined(b)) => Undefined(a.product(*b)),
            (Undefined(Likeness::Zero), _) | (_, Undefined(Likeness::Zero)) => {
                tracing::debug!("matmul: annihilated by undefined zero-like operand");
                PhaseTensor::zero_like()
            }
            (Undefined(Likeness::One), other) | (other, Undefined(Likeness::One)) => other.clone(),
            (Defined(a), Defined(b)) => match (a.kind, b.kind) {
                (Kind::Matrix, _) => contract(a, b)?,
                (Kind::Vector, Kind::Matrix) => {
                    tracing::debug!("matmul: vector @ matrix via transposed matrix");
                    contract(&b.transposed()?, a)?
                }
                (Kind::Vector, Kind::Vector) => return Ok(Product::Scalar(inner(a, b)?)),
            },
        };
        Ok(Product::Tensor(product))
    }

    /// Inner product of two vectors over their common modes.
    ///
    /// An undefined zero-like operand gives zero.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidOperation`] if either operand is a matrix or an
    /// undefined one-like tensor.
    pub fn dot(&self, rhs: &Self) -> Result<T> {
        match (self, rhs) {
            (PhaseTensor::Defined(a), PhaseTensor::Defined(b))
                if a.is_vector() && b.is_vector() =>
            {
                inner(a, b)
            }
            (PhaseTensor::Undefined(Likeness::Zero), other)
            | (other, PhaseTensor::Undefined(Likeness::Zero))
                if other.is_matrix() != Some(true) =>
            {
                Ok(T::zero())
            }
            _ => Err(TensorError::invalid_operation(
                "dot",
                "inner products need two vectors",
            )),
        }
    }

    /// Apply `self` to `rhs` and return the tensor-valued product.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidOperation`] if the product is a scalar.
    pub fn apply(&self, rhs: &Self) -> Result<Self> {
        self.matmul(rhs)?.into_tensor().ok_or_else(|| {
            TensorError::invalid_operation("apply", "product of two vectors is a scalar")
        })
    }
}

/// `a @ b` for a matrix `a` and a matrix or vector `b`
fn contract<T: Scalar>(a: &Block<T>, b: &Block<T>) -> Result<PhaseTensor<T>> {
    let contracted: ModeList = a
        .in_modes
        .iter()
        .copied()
        .filter(|m| b.out_modes.contains(m))
        .collect();
    let rows_b: ModeList = b
        .out_modes
        .iter()
        .copied()
        .filter(|m| !contracted.contains(m))
        .collect();
    let cols_a: ModeList = a
        .in_modes
        .iter()
        .copied()
        .filter(|m| !contracted.contains(m))
        .collect();

    let b_is_matrix = b.is_matrix();
    let pass_rows = a.likeness.is_one_like() && !rows_b.is_empty();
    let pass_cols = b_is_matrix && b.likeness.is_one_like() && !cols_a.is_empty();
    let likeness = a.likeness.product(b.likeness);

    if contracted.is_empty() && !pass_rows && !pass_cols {
        tracing::debug!(
            a_in = ?a.in_modes.as_slice(),
            b_out = ?b.out_modes.as_slice(),
            "matmul: no shared modes and no pass-through"
        );
        return Ok(PhaseTensor::zero_like());
    }

    let mut out_modes = a.out_modes.clone();
    if pass_rows {
        out_modes.extend(rows_b.iter().copied());
    }
    let mut in_modes = ModeList::new();
    if b_is_matrix {
        in_modes.extend(b.in_modes.iter().copied());
        if pass_cols {
            in_modes.extend(cols_a.iter().copied());
        }
    }
    for (axis, list) in [("out", &out_modes), ("in", &in_modes)] {
        let dups = modes::duplicates(list);
        if !dups.is_empty() {
            return Err(TensorError::mode_conflict(
                "matmul",
                &dups,
                format!("pass-through {}-modes collide with existing result modes", axis),
            ));
        }
    }
    tracing::trace!(
        contracted = ?contracted.as_slice(),
        out = ?out_modes.as_slice(),
        inp = ?in_modes.as_slice(),
        pass_rows,
        pass_cols,
        "matmul: contraction plan"
    );

    let n = a.out_modes.len();
    let blue = if contracted.is_empty() {
        let shape: Vec<usize> = if b_is_matrix {
            vec![n, b.in_modes.len(), 2, 2]
        } else {
            vec![n, 2]
        };
        DenseArray::zeros(&shape)
    } else {
        let pos_a = lookup(&a.in_modes, &contracted)?;
        let pos_b = lookup(&b.out_modes, &contracted)?;
        let lhs = a.data.gather(1, &pos_a)?;
        let rhs = b.data.gather(0, &pos_b)?;
        if b_is_matrix {
            // (n, 2, m, 2) -> (n, m, 2, 2)
            tensordot(&lhs, &rhs, &[1, 3], &[0, 2])?.permute(&[0, 2, 1, 3])?
        } else {
            tensordot(&lhs, &rhs, &[1, 3], &[0, 1])?
        }
    };

    let green = if pass_rows {
        Some(b.data.gather(0, &lookup(&b.out_modes, &rows_b)?)?)
    } else {
        None
    };
    let purple = if pass_cols {
        Some(a.data.gather(1, &lookup(&a.in_modes, &cols_a)?)?)
    } else {
        None
    };

    let data = if b_is_matrix {
        let mut top = vec![blue];
        top.extend(purple);
        let mut grid = vec![top];
        if let Some(green) = green {
            let mut bottom = vec![green];
            if pass_cols {
                bottom.push(DenseArray::zeros(&[rows_b.len(), cols_a.len(), 2, 2]));
            }
            grid.push(bottom);
        }
        DenseArray::block(&grid)?
    } else {
        let mut parts = vec![blue];
        parts.extend(green);
        DenseArray::concatenate(&parts, 0)?
    };

    let kind = b.kind;
    let (data, out_modes, in_modes) = sort_modes(data, out_modes, in_modes, kind)?;
    let block = Block::from_result("matmul", data, out_modes, in_modes, kind, likeness)?;
    Ok(PhaseTensor::Defined(block))
}

/// Inner product of two vectors over their common out-modes
fn inner<T: Scalar>(a: &Block<T>, b: &Block<T>) -> Result<T> {
    if a.out_modes == b.out_modes {
        return Ok(a.data.hadamard(&b.data)?.sum());
    }
    let common: ModeList = a
        .out_modes
        .iter()
        .copied()
        .filter(|m| b.out_modes.contains(m))
        .collect();
    let lhs = a.data.gather(0, &lookup(&a.out_modes, &common)?)?;
    let rhs = b.data.gather(0, &lookup(&b.out_modes, &common)?)?;
    Ok(lhs.hadamard(&rhs)?.sum())
}

/// Reorder rows (and columns for matrices) so both mode lists ascend
pub(crate) fn sort_modes<T: Scalar>(
    data: DenseArray<T>,
    mut out_modes: ModeList,
    mut in_modes: ModeList,
    kind: Kind,
) -> Result<(DenseArray<T>, ModeList, ModeList)> {
    let mut data = data;
    let row_order = modes::argsort(&out_modes);
    if row_order.iter().enumerate().any(|(i, &p)| i != p) {
        data = data.gather(0, &row_order)?;
        out_modes = row_order.iter().map(|&p| out_modes[p]).collect();
    }
    if kind == Kind::Matrix {
        let col_order = modes::argsort(&in_modes);
        if col_order.iter().enumerate().any(|(i, &p)| i != p) {
            data = data.gather(1, &col_order)?;
            in_modes = col_order.iter().map(|&p| in_modes[p]).collect();
        }
    }
    Ok((data, out_modes, in_modes))
}

/// Positions of `wanted` within `modes`; a miss is an internal bookkeeping bug
pub(crate) fn lookup(modes: &[usize], wanted: &[usize]) -> Result<Vec<usize>> {
    modes::positions(modes, wanted).map_err(|missing| {
        TensorError::Backend(anyhow::anyhow!(
            "mode {} missing from {:?} during index lookup",
            missing,
            modes
        ))
    })
}
