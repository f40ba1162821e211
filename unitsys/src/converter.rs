//! Conversion between SI and a loaded custom unit system
//!
//! For a quantity with SI dimension vector `d`, the custom exponents are
//! `e = M⁻¹ · d` (in slot order). The constant exponents give the numeric
//! factor `Π constantᵢ^eᵢ` and the unit exponents give the unit
//! `Π unitⱼ^eⱼ` results are expressed in.

use std::fmt;
use num_traits::{ToPrimitive, Zero};
use serde::Serialize;
use unitsys_units::{
    dimensions_of, parse_unit, rationalize, BaseDimension, DimensionVector, Exponent, Quantity,
    Unit, UnitError, BASE_COUNT,
};
use crate::definition::UnitSystemDefinition;
use crate::error::UnitSystemError;
use crate::matrix::BasisMatrix;

/// Exponents of a dimension vector in a custom basis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomExponents {
    pub constants: Vec<Exponent>,
    pub units: Vec<Exponent>,
}

impl CustomExponents {
    /// Constant exponents followed by unit exponents
    pub fn iter(&self) -> impl Iterator<Item = &Exponent> {
        self.constants.iter().chain(&self.units)
    }

    pub fn to_f64(&self) -> [f64; BASE_COUNT] {
        let mut values = [0.0; BASE_COUNT];
        for (slot, exp) in values.iter_mut().zip(self.iter()) {
            *slot = exp.to_f64().unwrap_or(f64::NAN);
        }
        values
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Constant,
    Unit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorEntry {
    pub label: String,
    pub role: Role,
    pub exponent: f64,
}

/// Exponent of every basis quantity in the factor that takes a quantity
/// from SI to the custom system; constants first, then units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub entries: Vec<FactorEntry>,
}

impl Factor {
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.label == label).map(|e| e.exponent)
    }

    pub fn exponents(&self) -> [f64; BASE_COUNT] {
        let mut values = [0.0; BASE_COUNT];
        for (slot, entry) in values.iter_mut().zip(&self.entries) {
            *slot = entry.exponent;
        }
        values
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.exponent != 0.0)
            .map(|e| format!("{}^{}", e.label, e.exponent))
            .collect();
        if terms.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", terms.join(" "))
        }
    }
}

/// A loaded custom unit system
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSystem {
    definition: UnitSystemDefinition,
}

impl UnitSystem {
    pub fn new(definition: UnitSystemDefinition) -> Self {
        UnitSystem { definition }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &UnitSystemDefinition {
        &self.definition
    }

    /// custom exponents -> SI exponents
    pub fn matrix(&self) -> &BasisMatrix {
        &self.definition.matrix
    }

    /// SI exponents -> custom exponents
    pub fn inverse(&self) -> &BasisMatrix {
        &self.definition.inverse
    }

    /// Row order of both matrices
    pub fn si_basis(&self) -> &[BaseDimension] {
        &self.definition.si_basis
    }

    /// Custom exponents of a quantity's dimensions
    pub fn exponents(&self, quantity: &Quantity) -> Result<CustomExponents, UnitSystemError> {
        self.exponents_of(&dimensions_of(quantity))
    }

    /// Custom exponents of a dimension vector, snapped to rationals
    pub fn exponents_of(&self, dimension: &DimensionVector) -> Result<CustomExponents, UnitSystemError> {
        let mut si = [0.0; BASE_COUNT];
        for (slot, dim) in si.iter_mut().zip(&self.definition.si_basis) {
            *slot = dimension.get(*dim).to_f64().unwrap_or(f64::NAN);
        }

        let custom = self
            .definition
            .inverse
            .apply(&si)
            .iter()
            .map(|&x| {
                rationalize(x).ok_or_else(|| {
                    UnitSystemError::InvalidDefinition(format!(
                        "non-finite exponent for {} in '{}'",
                        dimension,
                        self.name()
                    ))
                })
            })
            .collect::<Result<Vec<Exponent>, _>>()?;

        let split = self.definition.constants.len().min(custom.len());
        let (constants, units) = custom.split_at(split);
        Ok(CustomExponents {
            constants: constants.to_vec(),
            units: units.to_vec(),
        })
    }

    /// Product of the constants raised to their exponents
    fn factor_of(&self, exponents: &CustomExponents) -> Quantity {
        self.definition
            .constants
            .iter()
            .zip(&exponents.constants)
            .filter(|(_, exp)| !exp.is_zero())
            .fold(Quantity::dimensionless(1.0), |acc, (constant, &exp)| {
                acc.mul(&constant.quantity().pow(exp))
            })
    }

    /// Product of the units raised to their exponents
    fn scale_of(&self, exponents: &CustomExponents) -> Unit {
        self.definition
            .units
            .iter()
            .zip(&exponents.units)
            .filter(|(_, exp)| !exp.is_zero())
            .fold(Unit::dimensionless(), |acc, (unit, &exp)| {
                acc.multiply(&unit.as_unit().power(exp))
            })
    }

    /// The unit a quantity of this dimension is expressed in
    pub fn custom_unit(&self, dimension: &DimensionVector) -> Result<Unit, UnitSystemError> {
        Ok(self.scale_of(&self.exponents_of(dimension)?))
    }

    /// Express an SI quantity in the custom system.
    ///
    /// The result is the same physical quantity divided by the constant
    /// factor, written in the product of the unit-role quantities.
    pub fn to_custom(&self, quantity: &Quantity) -> Result<Quantity, UnitSystemError> {
        let exponents = self.exponents(quantity)?;
        let factor = self.factor_of(&exponents);
        let scale = self.scale_of(&exponents);

        quantity
            .div(&factor)
            .convert_to(&scale)
            .map_err(|source| conversion_error(quantity, &scale, source))
    }

    /// Express a custom-system quantity in `target`.
    ///
    /// The exponents come from `target`'s dimensions. A bare number is read
    /// as a magnitude in the custom unit of that dimension.
    pub fn from_custom(&self, quantity: &Quantity, target: &Unit) -> Result<Quantity, UnitSystemError> {
        let exponents = self.exponents_of(&target.dimension)?;
        let factor = self.factor_of(&exponents);
        let scale = self.scale_of(&exponents);

        let quantity = if quantity.is_dimensionless() && !scale.is_dimensionless() {
            Quantity::new(quantity.si_value(), scale)
        } else {
            quantity.clone()
        };

        quantity
            .mul(&factor)
            .convert_to(target)
            .map_err(|source| conversion_error(&quantity, target, source))
    }

    /// `from_custom` with the target given as a unit expression
    pub fn from_custom_to(&self, quantity: &Quantity, target: &str) -> Result<Quantity, UnitSystemError> {
        self.from_custom(quantity, &parse_unit(target)?)
    }

    /// Exponents of the basis quantities that take `quantity` from SI to
    /// the custom system.
    ///
    /// Informational only; `to_custom` does the actual conversion.
    pub fn get_factor(&self, quantity: &Quantity) -> Result<Factor, UnitSystemError> {
        let exponents = self.exponents_of(&dimensions_of(quantity).invert())?;

        let constants = self
            .definition
            .labels
            .iter()
            .zip(&exponents.constants)
            .map(|(label, exp)| (label.clone(), Role::Constant, exp));
        let units = self
            .definition
            .units
            .iter()
            .zip(&exponents.units)
            .map(|(unit, exp)| (unit.label().to_string(), Role::Unit, exp));

        let entries = constants
            .chain(units)
            .map(|(label, role, exp)| FactorEntry {
                label,
                role,
                exponent: exp.to_f64().unwrap_or(f64::NAN),
            })
            .collect();
        Ok(Factor { entries })
    }
}

fn conversion_error(quantity: &Quantity, target: &Unit, source: UnitError) -> UnitSystemError {
    UnitSystemError::Conversion {
        quantity: quantity.to_string(),
        target: if target.symbol.is_empty() { "1".to_string() } else { target.symbol.clone() },
        source,
    }
}
