//! Mode lists and their validation
//!
//! A mode is one physical subsystem contributing a conjugate pair `(x, p)`.
//! Block tensors label their out axis and in axis with mode ids. The two
//! lists must either name the same set of modes (a *diagonal* block) or
//! disjoint sets (a *coherence* block); partial overlap cannot be
//! represented.

use crate::error::{Result, TensorError};
use crate::types::Kind;
use smallvec::SmallVec;

/// Ordered list of distinct mode ids
pub type ModeList = SmallVec<[usize; 8]>;

/// Caller-supplied mode labels for a payload.
///
/// Construction preserves the caller's order verbatim; only operations that
/// produce new tensors sort their mode lists.
///
/// # Examples
///
/// ```
/// use cvphase_core::ModeSpec;
///
/// // A flat list labels both axes of a matrix
/// let shared = ModeSpec::from(vec![0, 1]);
/// // A pair labels out and in separately
/// let split = ModeSpec::from((vec![0], vec![3]));
/// assert_ne!(shared, split);
/// assert_eq!(ModeSpec::default(), ModeSpec::Inferred);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModeSpec {
    /// `0..N` on the out axis and `0..M` on the in axis
    #[default]
    Inferred,
    /// Same list on both axes of a matrix, or the out list of a vector
    Shared(ModeList),
    /// Explicit out and in lists
    Split { out: ModeList, inp: ModeList },
}

impl From<Vec<usize>> for ModeSpec {
    fn from(modes: Vec<usize>) -> Self {
        ModeSpec::Shared(modes.into_iter().collect())
    }
}

impl From<&[usize]> for ModeSpec {
    fn from(modes: &[usize]) -> Self {
        ModeSpec::Shared(modes.iter().copied().collect())
    }
}

impl<const N: usize> From<[usize; N]> for ModeSpec {
    fn from(modes: [usize; N]) -> Self {
        ModeSpec::Shared(modes.into_iter().collect())
    }
}

impl From<ModeList> for ModeSpec {
    fn from(modes: ModeList) -> Self {
        ModeSpec::Shared(modes)
    }
}

impl From<(Vec<usize>, Vec<usize>)> for ModeSpec {
    fn from((out, inp): (Vec<usize>, Vec<usize>)) -> Self {
        ModeSpec::Split {
            out: out.into_iter().collect(),
            inp: inp.into_iter().collect(),
        }
    }
}

impl From<(&[usize], &[usize])> for ModeSpec {
    fn from((out, inp): (&[usize], &[usize])) -> Self {
        ModeSpec::Split {
            out: out.iter().copied().collect(),
            inp: inp.iter().copied().collect(),
        }
    }
}

impl ModeSpec {
    /// Resolve into `(out_modes, in_modes)` for a payload of `kind` with
    /// `n_out` rows and `n_in` columns (`n_in` is ignored for vectors).
    ///
    /// Only checks that the lists fit the payload; call [`validate_pair`]
    /// for the structural invariants.
    pub(crate) fn resolve(
        self,
        kind: Kind,
        n_out: usize,
        n_in: usize,
    ) -> Result<(ModeList, ModeList)> {
        let (out, inp) = match (self, kind) {
            (ModeSpec::Inferred, Kind::Vector) => ((0..n_out).collect(), ModeList::new()),
            (ModeSpec::Inferred, Kind::Matrix) => ((0..n_out).collect(), (0..n_in).collect()),
            (ModeSpec::Shared(modes), Kind::Vector) => (modes, ModeList::new()),
            (ModeSpec::Shared(modes), Kind::Matrix) => (modes.clone(), modes),
            (ModeSpec::Split { out, inp }, Kind::Vector) => {
                if !inp.is_empty() {
                    return Err(TensorError::invalid_construction(format!(
                        "a vector has no in-modes, got {:?}",
                        inp.as_slice()
                    )));
                }
                if out.is_empty() {
                    ((0..n_out).collect(), ModeList::new())
                } else {
                    (out, inp)
                }
            }
            (ModeSpec::Split { out, inp }, Kind::Matrix) => {
                if out.is_empty() && inp.is_empty() {
                    ((0..n_out).collect(), (0..n_in).collect())
                } else {
                    (out, inp)
                }
            }
        };

        if out.len() != n_out {
            return Err(TensorError::invalid_construction(format!(
                "{} out-modes given for a payload with {} rows",
                out.len(),
                n_out
            )));
        }
        if kind == Kind::Matrix && inp.len() != n_in {
            return Err(TensorError::invalid_construction(format!(
                "{} in-modes given for a payload with {} columns",
                inp.len(),
                n_in
            )));
        }
        Ok((out, inp))
    }
}

/// Check the structural invariants of an `(out, in)` mode pair.
///
/// On failure returns the offending modes and a reason; callers turn it into
/// an invalid-construction error (caller input) or a mode conflict
/// (operation output).
pub(crate) fn check_pair(
    out: &[usize],
    inp: &[usize],
) -> std::result::Result<(), (Vec<usize>, String)> {
    let dup_out = duplicates(out);
    if !dup_out.is_empty() {
        return Err((dup_out, "repeated out-modes".to_string()));
    }
    let dup_in = duplicates(inp);
    if !dup_in.is_empty() {
        return Err((dup_in, "repeated in-modes".to_string()));
    }
    if !is_disjoint(out, inp) && !same_set(out, inp) {
        let shared: Vec<usize> = out.iter().copied().filter(|m| inp.contains(m)).collect();
        return Err((
            shared,
            "out-modes and in-modes must be identical or disjoint sets".to_string(),
        ));
    }
    Ok(())
}

/// Validate caller-supplied mode lists
pub(crate) fn validate_pair(out: &[usize], inp: &[usize]) -> Result<()> {
    check_pair(out, inp).map_err(|(modes, reason)| {
        TensorError::invalid_construction(format!(
            "{} (out={:?}, in={:?}, offending={:?})",
            reason, out, inp, modes
        ))
    })
}

/// Validate mode lists produced by an operation
pub(crate) fn validate_result(operation: &'static str, out: &[usize], inp: &[usize]) -> Result<()> {
    check_pair(out, inp).map_err(|(modes, reason)| {
        TensorError::mode_conflict(
            operation,
            &modes,
            format!("{} (out={:?}, in={:?})", reason, out, inp),
        )
    })
}

/// Values that occur more than once, in order of first repetition
pub(crate) fn duplicates(modes: &[usize]) -> Vec<usize> {
    let mut seen = Vec::with_capacity(modes.len());
    let mut dups = Vec::new();
    for &m in modes {
        if seen.contains(&m) {
            if !dups.contains(&m) {
                dups.push(m);
            }
        } else {
            seen.push(m);
        }
    }
    dups
}

pub(crate) fn is_disjoint(a: &[usize], b: &[usize]) -> bool {
    a.iter().all(|m| !b.contains(m))
}

pub(crate) fn same_set(a: &[usize], b: &[usize]) -> bool {
    a.len() == b.len() && a.iter().all(|m| b.contains(m))
}

/// `true` if every mode of `sub` is in `sup`
pub(crate) fn contains_all(sup: &[usize], sub: &[usize]) -> bool {
    sub.iter().all(|m| sup.contains(m))
}

/// Positions that sort `modes` ascending
pub(crate) fn argsort(modes: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..modes.len()).collect();
    order.sort_by_key(|&i| modes[i]);
    order
}

/// Position of each of `wanted` within `modes`, or the first missing mode
pub(crate) fn positions(
    modes: &[usize],
    wanted: &[usize],
) -> std::result::Result<Vec<usize>, usize> {
    wanted
        .iter()
        .map(|w| modes.iter().position(|m| m == w).ok_or(*w))
        .collect()
}

/// Sorted union of two mode lists
pub(crate) fn sorted_union(a: &[usize], b: &[usize]) -> ModeList {
    let mut union: ModeList = a.iter().copied().collect();
    union.extend(b.iter().copied().filter(|m| !a.contains(m)));
    union.sort_unstable();
    union
}
