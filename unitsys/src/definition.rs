//! The persisted description of a custom unit system

use std::path::Path;
use serde::{Deserialize, Serialize};
use unitsys_units::{BaseDimension, BASE_COUNT};
use crate::basis::{BasisQuantity, BasisSource};
use crate::error::UnitSystemError;
use crate::matrix::BasisMatrix;

/// Version of the JSON layout written by `to_json`
pub const FORMAT_VERSION: u32 = 1;

/// Tolerance for `matrix · inverse == I` when checking a loaded definition
const INVERSE_TOLERANCE: f64 = 1e-6;

/// A complete, validated unit system
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSystemDefinition {
    pub name: String,
    /// Constant-role quantities, in order
    pub constants: Vec<BasisQuantity>,
    /// Unit-role quantities, including appended SI base units
    pub units: Vec<BasisQuantity>,
    /// One label per constant
    pub labels: Vec<String>,
    /// Row order of the matrices
    pub si_basis: Vec<BaseDimension>,
    /// custom exponents -> SI exponents
    pub matrix: BasisMatrix,
    /// SI exponents -> custom exponents
    pub inverse: BasisMatrix,
}

#[derive(Serialize, Deserialize)]
struct StoredDefinition {
    format: u32,
    name: String,
    constants: Vec<BasisSource>,
    units: Vec<BasisSource>,
    labels: Vec<String>,
    /// Absent in files written before unit labels were stored
    #[serde(default)]
    unit_labels: Vec<String>,
    si_basis: Vec<BaseDimension>,
    matrix: BasisMatrix,
    inverse: BasisMatrix,
}

impl UnitSystemDefinition {
    /// Constants then units, the column order of `matrix`
    pub fn quantities(&self) -> impl Iterator<Item = &BasisQuantity> {
        self.constants.iter().chain(&self.units)
    }

    /// Constant labels followed by unit labels
    pub fn basis_labels(&self) -> Vec<String> {
        self.labels
            .iter()
            .cloned()
            .chain(self.units.iter().map(|u| u.label().to_string()))
            .collect()
    }

    /// Check the structural invariants
    pub fn check(&self) -> Result<(), String> {
        let total = self.constants.len() + self.units.len();
        if total != BASE_COUNT {
            return Err(format!("expected {} basis quantities, found {}", BASE_COUNT, total));
        }
        if self.labels.len() != self.constants.len() {
            return Err(format!(
                "{} labels for {} constants",
                self.labels.len(),
                self.constants.len()
            ));
        }
        let mut slots = self.si_basis.clone();
        slots.sort();
        slots.dedup();
        if slots.len() != BASE_COUNT || self.si_basis.len() != BASE_COUNT {
            return Err("si_basis is not an ordering of the base dimensions".to_string());
        }
        if !self.matrix.multiply(&self.inverse).is_identity(INVERSE_TOLERANCE) {
            return Err("stored inverse does not invert the stored matrix".to_string());
        }
        Ok(())
    }

    /// Serialize to the pretty-printed JSON artifact
    pub fn to_json(&self) -> Result<String, UnitSystemError> {
        let stored = StoredDefinition {
            format: FORMAT_VERSION,
            name: self.name.clone(),
            constants: self.constants.iter().map(|c| c.source().clone()).collect(),
            units: self.units.iter().map(|u| u.source().clone()).collect(),
            labels: self.labels.clone(),
            unit_labels: self.units.iter().map(|u| u.label().to_string()).collect(),
            si_basis: self.si_basis.clone(),
            matrix: self.matrix,
            inverse: self.inverse,
        };
        serde_json::to_string_pretty(&stored)
            .map_err(|e| UnitSystemError::InvalidDefinition(e.to_string()))
    }

    /// Parse an artifact read from `path`.
    ///
    /// Constants are resolved from the registry and literals as written;
    /// the matrices are taken as stored.
    pub fn from_json(text: &str, path: &Path) -> Result<Self, UnitSystemError> {
        let corrupt = |reason: String| UnitSystemError::CorruptDefinition {
            path: path.to_path_buf(),
            reason,
        };

        let stored: StoredDefinition = serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?;
        if stored.format != FORMAT_VERSION {
            return Err(corrupt(format!("unsupported format version {}", stored.format)));
        }
        if stored.labels.len() != stored.constants.len() {
            return Err(corrupt(format!(
                "{} labels for {} constants",
                stored.labels.len(),
                stored.constants.len()
            )));
        }
        if !stored.unit_labels.is_empty() && stored.unit_labels.len() != stored.units.len() {
            return Err(corrupt(format!(
                "{} unit labels for {} units",
                stored.unit_labels.len(),
                stored.units.len()
            )));
        }

        let resolve = |sources: Vec<BasisSource>| -> Result<Vec<BasisQuantity>, UnitSystemError> {
            sources
                .into_iter()
                .map(|source| BasisQuantity::resolve(source).map_err(|e| corrupt(e.to_string())))
                .collect()
        };

        let constants: Vec<BasisQuantity> = resolve(stored.constants)?
            .into_iter()
            .zip(&stored.labels)
            .map(|(constant, label)| constant.with_label(label.clone()))
            .collect();

        let mut units = resolve(stored.units)?;
        for (unit, label) in units.iter_mut().zip(stored.unit_labels) {
            *unit = unit.clone().with_label(label);
        }

        let definition = UnitSystemDefinition {
            name: stored.name,
            constants,
            units,
            labels: stored.labels,
            si_basis: stored.si_basis,
            matrix: stored.matrix,
            inverse: stored.inverse,
        };
        definition.check().map_err(corrupt)?;
        Ok(definition)
    }
}
