//! Unitsys - Custom Unit Systems
//!
//! Define a unit system by choosing basis quantities, save it under a name,
//! and convert quantities between SI and the custom system:
//! - Constants (e.g. `c`, `hbar`) become a numeric factor and disappear
//!   from the result
//! - Units (e.g. `eV`) are what results are expressed in
//! - Base dimensions the basis leaves untouched keep their SI base unit
//!
//! Components:
//! - `validate`: spanned-dimension analysis and the 8×8 change-of-basis matrix
//! - `UnitSystemBuilder`: completes, validates and saves a definition
//! - `load_unit_system`: reads a saved definition back
//! - `UnitSystem`: `to_custom`, `from_custom` and `get_factor`

mod error;
mod config;
mod matrix;
mod basis;
mod validate;
mod definition;
mod storage;
mod builder;
mod loader;
mod converter;

pub use error::{codes, UnitSystemError};
pub use config::{Scope, StorageConfig, GLOBAL_DIR_NAME, HOME_ENV, LOCAL_DIR_ENV};
pub use matrix::{BasisMatrix, SINGULAR_TOLERANCE};
pub use basis::{BasisQuantity, BasisSource};
pub use validate::{validate, Basis};
pub use definition::{UnitSystemDefinition, FORMAT_VERSION};
pub use storage::{validate_name, Storage};
pub use builder::{create_unit_system, UnitSystemBuilder};
pub use loader::{load_definition, load_unit_system};
pub use converter::{CustomExponents, Factor, FactorEntry, Role, UnitSystem};

pub use unitsys_units;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        load_unit_system, BasisQuantity, Scope, Storage, StorageConfig, UnitSystem,
        UnitSystemBuilder, UnitSystemError,
    };
    pub use unitsys_units::{dimensions_of, parse_unit, DimensionVector, Quantity, Unit, CONSTANTS, UNITS};
}
