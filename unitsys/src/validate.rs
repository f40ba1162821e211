//! Basis validation
//!
//! A list of candidate quantities forms a valid basis when it touches exactly
//! as many base dimensions as it has members and its dimension vectors are
//! linearly independent. The untouched dimensions are padded with the
//! identity so the change-of-basis matrix is always 8×8.

use num_traits::{CheckedDiv, CheckedMul, CheckedSub, ToPrimitive, Zero};
use tracing::debug;
use unitsys_units::{BaseDimension, DimensionVector, Exponent};
use crate::basis::BasisQuantity;
use crate::error::UnitSystemError;
use crate::matrix::BasisMatrix;

/// Result of a successful validation
#[derive(Debug, Clone, PartialEq)]
pub struct Basis {
    /// Maps custom exponents to SI exponents (rows: slots, columns: candidates then padding)
    pub matrix: BasisMatrix,
    /// Maps SI exponents (in slot order) to custom exponents
    pub inverse: BasisMatrix,
    /// Dimensions touched by at least one candidate, canonical order
    pub spanned: Vec<BaseDimension>,
    /// The remaining dimensions, canonical order
    pub unspanned: Vec<BaseDimension>,
}

impl Basis {
    /// Row order of the matrix: spanned dimensions, then unspanned ones
    pub fn slots(&self) -> Vec<BaseDimension> {
        self.spanned.iter().chain(&self.unspanned).copied().collect()
    }
}

/// Validate candidates and build the change-of-basis matrix and its inverse
pub fn validate(candidates: &[BasisQuantity]) -> Result<Basis, UnitSystemError> {
    let dims: Vec<DimensionVector> = candidates.iter().map(BasisQuantity::dimension).collect();

    let (spanned, unspanned): (Vec<BaseDimension>, Vec<BaseDimension>) = BaseDimension::ALL
        .into_iter()
        .partition(|&dim| dims.iter().any(|v| !v.get(dim).is_zero()));

    debug!(
        candidates = candidates.len(),
        spanned = ?spanned,
        unspanned = ?unspanned,
        "Validating basis"
    );

    if spanned.len() != candidates.len() {
        return Err(UnitSystemError::InconsistentSystem {
            candidates: candidates.len(),
            spanned: spanned.len(),
        });
    }

    let degenerate = || UnitSystemError::DegenerateBasis {
        quantities: candidates.iter().map(|c| c.label().to_string()).collect(),
    };

    // overflow falls through to the float inversion below
    if independent(&dims, &spanned) == Some(false) {
        return Err(degenerate());
    }

    let n = spanned.len();
    let matrix = BasisMatrix::from_fn(|i, j| {
        if i < n && j < n {
            dims[j].get(spanned[i]).to_f64().unwrap_or(f64::NAN)
        } else if i == j {
            1.0
        } else {
            0.0
        }
    });

    debug!(determinant = matrix.determinant(), "Basis matrix built");

    let inverse = matrix.try_inverse().ok_or_else(degenerate)?;

    Ok(Basis { matrix, inverse, spanned, unspanned })
}

/// Exact rank test of the spanned block by Gaussian elimination over the
/// rational exponents. `None` if an intermediate overflows `i64`.
fn independent(dims: &[DimensionVector], spanned: &[BaseDimension]) -> Option<bool> {
    let n = spanned.len();
    let mut rows: Vec<Vec<Exponent>> = spanned
        .iter()
        .map(|&dim| dims.iter().map(|v| v.get(dim)).collect())
        .collect();

    for col in 0..n {
        let Some(pivot) = (col..n).find(|&r| !rows[r][col].is_zero()) else {
            return Some(false);
        };
        rows.swap(col, pivot);
        for r in col + 1..n {
            if rows[r][col].is_zero() {
                continue;
            }
            let factor = rows[r][col].checked_div(&rows[col][col])?;
            for c in col..n {
                let delta = factor.checked_mul(&rows[col][c])?;
                rows[r][c] = rows[r][c].checked_sub(&delta)?;
            }
        }
    }
    Some(true)
}
