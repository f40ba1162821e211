//! Structured errors for unit-system construction, storage and conversion
//!
//! Every failure is local to one call and is never retried. Each variant has
//! a stable machine-readable code and, where one exists, a suggestion the
//! caller can show to the user.

use std::path::PathBuf;
use thiserror::Error;
use unitsys_units::UnitError;
use crate::config::Scope;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INCONSISTENT_SYSTEM: &str = "INCONSISTENT_SYSTEM";
    pub const DEGENERATE_BASIS: &str = "DEGENERATE_BASIS";
    pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CORRUPT_DEFINITION: &str = "CORRUPT_DEFINITION";
    pub const CONVERSION_ERROR: &str = "CONVERSION_ERROR";
    pub const INVALID_NAME: &str = "INVALID_NAME";
    pub const INVALID_DEFINITION: &str = "INVALID_DEFINITION";
    pub const UNIT_ERROR: &str = "UNIT_ERROR";
    pub const IO_ERROR: &str = "IO_ERROR";
}

#[derive(Debug, Error)]
pub enum UnitSystemError {
    /// Candidate count differs from the number of base dimensions they touch
    #[error("inconsistent unit system: {candidates} basis quantities span {spanned} base dimensions")]
    InconsistentSystem { candidates: usize, spanned: usize },

    /// Candidates are linearly dependent in dimension space
    #[error("degenerate basis: [{}] are linearly dependent in dimension space", .quantities.join(", "))]
    DegenerateBasis { quantities: Vec<String> },

    #[error("unit system '{name}' already exists in {scope} scope ({})", .path.display())]
    AlreadyExists { name: String, scope: Scope, path: PathBuf },

    #[error("unit system '{name}' not found in {scope} scope ({})", .path.display())]
    NotFound { name: String, scope: Scope, path: PathBuf },

    /// The artifact exists but cannot be parsed or violates its invariants
    #[error("corrupt unit system definition {}: {reason}", .path.display())]
    CorruptDefinition { path: PathBuf, reason: String },

    /// A re-expression in the resolved target unit is dimensionally impossible
    #[error("cannot express {quantity} in '{target}': {source}")]
    Conversion {
        quantity: String,
        target: String,
        #[source]
        source: UnitError,
    },

    #[error("invalid unit system name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid unit system definition: {0}")]
    InvalidDefinition(String),

    #[error(transparent)]
    Unit(#[from] UnitError),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl UnitSystemError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            UnitSystemError::InconsistentSystem { .. } => codes::INCONSISTENT_SYSTEM,
            UnitSystemError::DegenerateBasis { .. } => codes::DEGENERATE_BASIS,
            UnitSystemError::AlreadyExists { .. } => codes::ALREADY_EXISTS,
            UnitSystemError::NotFound { .. } => codes::NOT_FOUND,
            UnitSystemError::CorruptDefinition { .. } => codes::CORRUPT_DEFINITION,
            UnitSystemError::Conversion { .. } => codes::CONVERSION_ERROR,
            UnitSystemError::InvalidName { .. } => codes::INVALID_NAME,
            UnitSystemError::InvalidDefinition(_) => codes::INVALID_DEFINITION,
            UnitSystemError::Unit(_) => codes::UNIT_ERROR,
            UnitSystemError::Io { .. } => codes::IO_ERROR,
        }
    }

    /// Suggestion for fixing the error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            UnitSystemError::InconsistentSystem { candidates, spanned } if candidates > spanned => Some(format!(
                "remove {} basis quantit{} or replace redundant ones with quantities touching other dimensions",
                candidates - spanned,
                if candidates - spanned == 1 { "y" } else { "ies" },
            )),
            UnitSystemError::InconsistentSystem { candidates, spanned } => Some(format!(
                "add {} basis quantit{} so every touched dimension is covered",
                spanned - candidates,
                if spanned - candidates == 1 { "y" } else { "ies" },
            )),
            UnitSystemError::DegenerateBasis { .. } => {
                Some("replace one of the dependent quantities with a dimensionally independent one".to_string())
            }
            UnitSystemError::AlreadyExists { .. } => {
                Some("use a different name or allow overwriting".to_string())
            }
            UnitSystemError::NotFound { .. } => {
                Some("create the unit system first, or check the name and scope".to_string())
            }
            UnitSystemError::Conversion { .. } => {
                Some("check that the target unit has the dimensions of the original SI quantity".to_string())
            }
            UnitSystemError::InvalidName { .. } => {
                Some("use letters, digits, '-', '_' and '.' only".to_string())
            }
            _ => None,
        }
    }
}
