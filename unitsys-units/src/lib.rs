//! Unitsys Units - Physical Quantity and Unit Algebra
//!
//! Provides unit-aware quantities with dimensional analysis over the eight
//! base dimensions (mass, length, time, temperature, current, amount,
//! luminous intensity, plane angle), with rational exponents.
//!
//! Contents:
//! - `DimensionVector`: exponents over the base dimensions
//! - `Unit` / `Quantity`: scale-tagged units and magnitudes, with
//!   multiplication, division, rational powers and re-expression
//! - `UNITS`: registry of SI, CGS, astronomical and particle-physics units
//! - `CONSTANTS`: registry of physical constants (CODATA 2018, IAU 2015)
//! - `parse_unit`: unit expression parser ("kg m^2 s^-2", "s^(1/2)", "eV/c^2")
//! - `to_system`: re-expression in a standard system of base units

mod dimension;
mod unit;
mod quantity;
mod parse;
mod units;
mod constants;
mod system;

pub use dimension::{
    format_exponent, format_power, rationalize, BaseDimension, DimensionVector, Exponent,
    BASE_COUNT,
};
pub use unit::{Unit, UnitError};
pub use quantity::{dimensions_of, Quantity};
pub use units::{UnitRegistry, UNITS};
pub use constants::{ConstantRegistry, PhysicalConstant, CONSTANTS};
pub use parse::{parse_quantity_string, parse_unit};
pub use system::to_system;
