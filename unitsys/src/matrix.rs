//! The 8×8 change-of-basis matrix
//!
//! Wraps a statically sized nalgebra matrix. Entries are exponents, so
//! they are small rationals in practice; results of `apply` are snapped back
//! to rationals by the caller.

use nalgebra::{SMatrix, SVector};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unitsys_units::BASE_COUNT;

type Matrix8 = SMatrix<f64, BASE_COUNT, BASE_COUNT>;
type Vector8 = SVector<f64, BASE_COUNT>;

/// Matrices with |det| below this fraction of the product of their column
/// norms are treated as singular
pub const SINGULAR_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasisMatrix {
    data: Matrix8,
}

impl BasisMatrix {
    pub fn identity() -> Self {
        BasisMatrix { data: Matrix8::identity() }
    }

    /// Build from a function of (row, column)
    pub fn from_fn(f: impl FnMut(usize, usize) -> f64) -> Self {
        BasisMatrix { data: Matrix8::from_fn(f) }
    }

    /// Build from 64 values in row-major order
    pub fn from_row_major(values: &[f64]) -> Option<Self> {
        if values.len() != BASE_COUNT * BASE_COUNT {
            return None;
        }
        Some(Self::from_fn(|i, j| values[i * BASE_COUNT + j]))
    }

    /// The 64 entries in row-major order
    pub fn to_row_major(&self) -> Vec<f64> {
        let mut values = Vec::with_capacity(BASE_COUNT * BASE_COUNT);
        for i in 0..BASE_COUNT {
            for j in 0..BASE_COUNT {
                values.push(self.data[(i, j)]);
            }
        }
        values
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[(row, col)]
    }

    pub fn row(&self, row: usize) -> [f64; BASE_COUNT] {
        std::array::from_fn(|j| self.data[(row, j)])
    }

    pub fn column(&self, col: usize) -> [f64; BASE_COUNT] {
        std::array::from_fn(|i| self.data[(i, col)])
    }

    pub fn determinant(&self) -> f64 {
        self.data.determinant()
    }

    /// Inverse, or `None` if the matrix is singular.
    ///
    /// The determinant is compared against the product of the column norms
    /// (its Hadamard bound), so uniformly small exponents are not mistaken for
    /// dependence. A zero column, failed inversion or non-finite inverse is
    /// also singular. No pseudo-inverse fallback.
    pub fn try_inverse(&self) -> Option<BasisMatrix> {
        let bound: f64 = self.data.column_iter().map(|col| col.norm()).product();
        if bound == 0.0 || self.determinant().abs() < SINGULAR_TOLERANCE * bound {
            return None;
        }
        let inverse = self.data.try_inverse()?;
        if inverse.iter().any(|x| !x.is_finite()) {
            return None;
        }
        Some(BasisMatrix { data: inverse })
    }

    /// Matrix-vector product
    pub fn apply(&self, vector: &[f64; BASE_COUNT]) -> [f64; BASE_COUNT] {
        let v = Vector8::from_fn(|i, _| vector[i]);
        let out = self.data * v;
        std::array::from_fn(|i| out[i])
    }

    /// Matrix product `self · other`
    pub fn multiply(&self, other: &BasisMatrix) -> BasisMatrix {
        BasisMatrix { data: self.data * other.data }
    }

    /// Entry-wise comparison within an absolute tolerance
    pub fn approx_eq(&self, other: &BasisMatrix, tol: f64) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() <= tol)
    }

    pub fn is_identity(&self, tol: f64) -> bool {
        self.approx_eq(&BasisMatrix::identity(), tol)
    }
}

impl Default for BasisMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Serialize for BasisMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.to_row_major())
    }
}

impl<'de> Deserialize<'de> for BasisMatrix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        BasisMatrix::from_row_major(&values).ok_or_else(|| {
            D::Error::custom(format!(
                "expected {} matrix entries, found {}",
                BASE_COUNT * BASE_COUNT,
                values.len()
            ))
        })
    }
}
