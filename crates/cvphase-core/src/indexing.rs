//! Selecting and overwriting sub-blocks by mode id

use crate::error::{Result, TensorError};
use crate::modes::{self, ModeList};
use crate::tensor::{Block, PhaseTensor};
use crate::types::{Kind, Scalar};

impl<T: Scalar> PhaseTensor<T> {
    /// Slice out the rows of a single out-mode.
    ///
    /// The result has `out_modes = [mode]` and keeps the in-modes and the
    /// likeness. Undefined tensors are returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`TensorError::InvalidOperation`] if `mode` is not an out-mode
    /// - [`TensorError::ModeConflict`] if the slice of a diagonal matrix would
    ///   partially overlap its in-modes (slice the diagonal with
    ///   [`block`](Self::block) instead)
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::{Likeness, PhaseTensor};
    /// use cvphase_array::DenseArray;
    ///
    /// let v = PhaseTensor::from_interleaved(
    ///     DenseArray::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4]).unwrap(),
    ///     vec![0, 1],
    ///     Likeness::Zero,
    /// ).unwrap();
    /// let m1 = v.mode(1).unwrap();
    /// assert_eq!(m1.out_modes(), &[1]);
    /// assert_eq!(m1.payload().unwrap().to_vec(), vec![3.0, 4.0]);
    /// ```
    pub fn mode(&self, mode: usize) -> Result<Self> {
        self.select_rows("mode", &[mode])
    }

    /// Rows of several out-modes, in the order given
    pub fn rows(&self, modes: &[usize]) -> Result<Self> {
        self.select_rows("rows", modes)
    }

    /// Sub-block of a matrix with the given row and column modes.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidOperation`] for vectors or unknown modes.
    pub fn block(&self, rows: &[usize], cols: &[usize]) -> Result<Self> {
        let block = match self {
            PhaseTensor::Undefined(_) => return Ok(self.clone()),
            PhaseTensor::Defined(block) => block,
        };
        if block.is_vector() {
            return Err(TensorError::invalid_operation(
                "block",
                "a vector has no column modes",
            ));
        }
        let data = block
            .data
            .gather(0, &find("block", &block.out_modes, rows)?)?
            .gather(1, &find("block", &block.in_modes, cols)?)?;
        let block = Block::from_result(
            "block",
            data,
            rows.iter().copied().collect(),
            cols.iter().copied().collect(),
            Kind::Matrix,
            block.likeness,
        )?;
        Ok(PhaseTensor::Defined(block))
    }

    /// Overwrite the rows of `rows` with the matching entries of `value`.
    ///
    /// For matrices `value` must define every in-mode of `self`. `self`
    /// keeps its modes and likeness and is left untouched on error.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidOperation`] if either tensor is undefined, the
    /// kinds differ, or a mode is missing from either side.
    pub fn assign_rows(&mut self, rows: &[usize], value: &Self) -> Result<()> {
        let (target, source) = defined_pair("assign_rows", self, value)?;
        if target.kind != source.kind {
            return Err(TensorError::invalid_operation(
                "assign_rows",
                format!("cannot write {} rows into a {}", source.kind, target.kind),
            ));
        }
        let target_rows = find("assign_rows", &target.out_modes, rows)?;
        let mut values = source
            .data
            .gather(0, &find("assign_rows", &source.out_modes, rows)?)?;
        if target.is_matrix() {
            values = values.gather(1, &find("assign_rows", &source.in_modes, &target.in_modes)?)?;
        }
        let indices: Vec<Vec<usize>> = target_rows.iter().map(|&r| vec![r]).collect();
        target.data.scatter_assign(&indices, &values)?;
        Ok(())
    }

    /// Overwrite the `(rows, cols)` sub-block of a matrix with the matching
    /// entries of `value`.
    ///
    /// # Errors
    ///
    /// [`TensorError::InvalidOperation`] if either tensor is undefined or not a
    /// matrix, or a mode is missing from either side.
    ///
    /// # Examples
    ///
    /// ```
    /// use cvphase_core::{Likeness, PhaseTensor};
    ///
    /// let mut cov = PhaseTensor::<f64>::identity(&[0, 1], Likeness::Zero).unwrap();
    /// let doubled = PhaseTensor::<f64>::identity(&[1], Likeness::Zero).unwrap().scale(2.0).unwrap();
    /// cov.assign_block(&[1], &[1], &doubled).unwrap();
    ///
    /// let flat = cov.to_interleaved().unwrap().unwrap();
    /// assert_eq!(flat[&[0, 0][..]], 1.0);
    /// assert_eq!(flat[&[2, 2][..]], 2.0);
    /// ```
    pub fn assign_block(&mut self, rows: &[usize], cols: &[usize], value: &Self) -> Result<()> {
        let (target, source) = defined_pair("assign_block", self, value)?;
        if !target.is_matrix() || !source.is_matrix() {
            return Err(TensorError::invalid_operation(
                "assign_block",
                "sub-block assignment needs two matrices",
            ));
        }
        let target_rows = find("assign_block", &target.out_modes, rows)?;
        let target_cols = find("assign_block", &target.in_modes, cols)?;
        let values = source
            .data
            .gather(0, &find("assign_block", &source.out_modes, rows)?)?
            .gather(1, &find("assign_block", &source.in_modes, cols)?)?
            .reshape(&[rows.len() * cols.len(), 2, 2])?;
        let indices: Vec<Vec<usize>> = target_rows
            .iter()
            .flat_map(|&r| target_cols.iter().map(move |&c| vec![r, c]))
            .collect();
        target.data.scatter_assign(&indices, &values)?;
        Ok(())
    }

    fn select_rows(&self, operation: &'static str, modes: &[usize]) -> Result<Self> {
        let block = match self {
            PhaseTensor::Undefined(_) => return Ok(self.clone()),
            PhaseTensor::Defined(block) => block,
        };
        let data = block.data.gather(0, &find(operation, &block.out_modes, modes)?)?;
        let out_modes: ModeList = modes.iter().copied().collect();
        let block = Block::from_result(
            operation,
            data,
            out_modes,
            block.in_modes.clone(),
            block.kind,
            block.likeness,
        )?;
        Ok(PhaseTensor::Defined(block))
    }
}

fn defined_pair<'a, T: Scalar>(
    operation: &'static str,
    target: &'a mut PhaseTensor<T>,
    value: &'a PhaseTensor<T>,
) -> Result<(&'a mut Block<T>, &'a Block<T>)> {
    match (target, value) {
        (PhaseTensor::Defined(target), PhaseTensor::Defined(source)) => Ok((target, source)),
        _ => Err(TensorError::invalid_operation(
            operation,
            "cannot assign to or from an undefined tensor",
        )),
    }
}

fn find(operation: &'static str, modes: &[usize], wanted: &[usize]) -> Result<Vec<usize>> {
    modes::positions(modes, wanted).map_err(|missing| {
        TensorError::invalid_operation(
            operation,
            format!("mode {} is not among {:?}", missing, modes),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Likeness;
    use cvphase_array::DenseArray;

    fn iota_matrix(modes: Vec<usize>) -> PhaseTensor<f64> {
        let n = 2 * modes.len();
        PhaseTensor::from_interleaved(
            DenseArray::from_vec((0..n * n).map(|x| x as f64).collect(), &[n, n]).unwrap(),
            modes,
            Likeness::Zero,
        )
        .unwrap()
    }

    #[test]
    fn test_mode_on_undefined_and_unknown() {
        let one = PhaseTensor::<f64>::one_like();
        assert_eq!(one.mode(3).unwrap(), one);
        let m = iota_matrix(vec![0]);
        assert!(matches!(
            m.mode(4),
            Err(TensorError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_mode_of_coherence_block() {
        let c = PhaseTensor::from_canonical(
            DenseArray::from_vec((0..8).map(|x| x as f64).collect(), &[2, 1, 2, 2]).unwrap(),
            (vec![0, 1], vec![2]),
            Likeness::One,
        )
        .unwrap();
        let row = c.mode(1).unwrap();
        assert_eq!(row.out_modes(), &[1]);
        assert_eq!(row.in_modes(), &[2]);
        assert!(row.is_one_like());
        assert_eq!(row.payload().unwrap().to_vec(), vec![4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_mode_of_multi_mode_diagonal_conflicts() {
        let m = iota_matrix(vec![0, 1]);
        assert!(matches!(m.mode(0), Err(TensorError::ModeConflict { .. })));
        assert!(matches!(m.rows(&[1]), Err(TensorError::ModeConflict { .. })));

        // the diagonal sub-block and the full row set are both well formed
        let diag = m.block(&[0], &[0]).unwrap();
        assert_eq!(diag.out_modes(), &[0]);
        assert_eq!(diag.in_modes(), &[0]);
        assert_eq!(
            diag.payload().unwrap().to_vec(),
            m.payload().unwrap().to_vec()[..4].to_vec()
        );
        assert_eq!(m.rows(&[0, 1]).unwrap(), m);
    }

    #[test]
    fn test_block() {
        let m = iota_matrix(vec![0, 1, 2]);
        let cross = m.block(&[2], &[0, 1]).unwrap();
        assert!(cross.is_coherence());
        assert_eq!(cross.payload().unwrap().shape(), &[1, 2, 2, 2]);
        // flat row 4 (mode 2, x), col 2 (mode 1, x)
        let flat = m.to_interleaved().unwrap().unwrap();
        assert_eq!(cross.payload().unwrap()[&[0, 1, 0, 0][..]], flat[&[4, 2][..]]);

        let diag = m.block(&[1], &[1]).unwrap();
        assert!(!diag.is_coherence());

        let v = PhaseTensor::from_canonical(
            DenseArray::<f64>::zeros(&[2, 2]),
            vec![0, 1],
            Likeness::Zero,
        )
        .unwrap();
        assert!(matches!(
            v.block(&[0], &[0]),
            Err(TensorError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn test_assign_rows_vector() {
        let mut v = PhaseTensor::from_interleaved(
            DenseArray::from_vec(vec![0.0; 6], &[6]).unwrap(),
            vec![0, 1, 2],
            Likeness::Zero,
        )
        .unwrap();
        let src = PhaseTensor::from_interleaved(
            DenseArray::from_vec(vec![7.0, 8.0, 9.0, 10.0], &[4]).unwrap(),
            vec![2, 0],
            Likeness::Zero,
        )
        .unwrap();
        v.assign_rows(&[0], &src).unwrap();
        assert_eq!(
            v.to_interleaved().unwrap().unwrap().to_vec(),
            vec![9.0, 10.0, 0.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_assign_rows_matrix_reorders_columns() {
        let mut target = PhaseTensor::<f64>::identity(&[0, 1], Likeness::Zero).unwrap();
        // same modes, listed in the opposite order
        let source = iota_matrix(vec![1, 0]);
        target.assign_rows(&[0], &source).unwrap();
        let t = target.payload().unwrap();
        let s = source.payload().unwrap();
        // target row 0 = mode 0 = source row 1; target col 1 = mode 1 = source col 0
        assert_eq!(t[&[0, 1, 1, 0][..]], s[&[1, 0, 1, 0][..]]);
        // row of mode 1 untouched
        assert_eq!(t[&[1, 1, 0, 0][..]], 1.0);
    }

    #[test]
    fn test_assign_errors_leave_target_untouched() {
        let mut target = PhaseTensor::<f64>::identity(&[0, 1], Likeness::Zero).unwrap();
        let before = target.clone();
        let source = PhaseTensor::<f64>::identity(&[0], Likeness::Zero).unwrap();
        // source lacks column mode 1
        assert!(target.assign_rows(&[0], &source).is_err());
        assert!(target.assign_block(&[0], &[1], &source).is_err());
        assert!(target.assign_block(&[0], &[0], &PhaseTensor::zero_like()).is_err());
        assert_eq!(target, before);

        let mut undefined = PhaseTensor::<f64>::zero_like();
        assert!(undefined.assign_rows(&[0], &source).is_err());
    }
}
