//! Unit representation with SI scale factors

use std::fmt;
use num_rational::Rational64;
use num_traits::{One, ToPrimitive, Zero};
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::dimension::{format_power, BaseDimension, Exponent};
use crate::{DimensionVector, Quantity};

/// Represents a physical unit with its dimension and conversion factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "eV")
    pub symbol: String,
    /// The unit name (e.g., "meter", "kilogram", "electronvolt")
    pub name: String,
    /// The dimensional signature
    pub dimension: DimensionVector,
    /// Factor to convert to SI (value_si = value * scale)
    pub scale: f64,
    /// Category for organization (e.g., "length", "energy")
    pub category: String,
}

impl Unit {
    /// Create a new unit
    pub fn new(
        symbol: &str,
        name: &str,
        dimension: DimensionVector,
        scale: f64,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            scale,
            category: category.to_string(),
        }
    }

    /// The dimensionless unit
    pub fn dimensionless() -> Self {
        Unit::new("", "dimensionless", DimensionVector::DIMENSIONLESS, 1.0, "dimensionless")
    }

    /// The SI base unit of one base dimension (kg, m, s, K, A, mol, cd, rad)
    pub fn si_base(dim: BaseDimension) -> Self {
        Unit::new(dim.si_symbol(), dim.name(), DimensionVector::of(dim), 1.0, dim.name())
    }

    /// The coherent SI unit for a dimension, e.g. "kg m^2 s^-2" for energy
    pub fn si(dimension: DimensionVector) -> Self {
        let symbol = dimension.si_unit_string();
        let name = dimension.name().map(str::to_string).unwrap_or_else(|| symbol.clone());
        Unit {
            symbol,
            name,
            dimension,
            scale: 1.0,
            category: "si".to_string(),
        }
    }

    /// Define a new unit equal to a quantity (e.g. a unit "soc" worth one speed of light)
    pub fn from_quantity(symbol: &str, name: &str, quantity: &Quantity) -> Self {
        Unit::new(symbol, name, quantity.dimension(), quantity.si_value(), "user")
    }

    /// Check if this unit has scale 1 relative to SI
    pub fn is_si_coherent(&self) -> bool {
        self.scale == 1.0
    }

    /// Check if this is dimensionless
    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Check if two units are dimensionally compatible (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    /// Convert a value from this unit to SI
    pub fn to_si(&self, value: f64) -> f64 {
        value * self.scale
    }

    /// Convert a value from SI to this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        value_si / self.scale
    }

    /// Convert a value from this unit to another unit
    pub fn convert_to(&self, value: f64, target: &Unit) -> Result<f64, UnitError> {
        if !self.is_compatible(target) {
            return Err(UnitError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }

        Ok(target.from_si(self.to_si(value)))
    }

    /// Get the inverse unit (e.g., Hz -> s)
    pub fn inverse(&self) -> Unit {
        self.power(-Rational64::one())
    }

    /// Multiply two units (e.g., m * m -> m^2)
    pub fn multiply(&self, other: &Unit) -> Unit {
        self.product(other, self.dimension.multiply(&other.dimension))
    }

    /// `multiply`, or `None` if a dimension exponent overflows
    pub fn checked_multiply(&self, other: &Unit) -> Option<Unit> {
        Some(self.product(other, self.dimension.checked_multiply(&other.dimension)?))
    }

    fn product(&self, other: &Unit, dimension: DimensionVector) -> Unit {
        let symbol = match (self.symbol.is_empty(), other.symbol.is_empty()) {
            (true, _) => other.symbol.clone(),
            (_, true) => self.symbol.clone(),
            _ if self.symbol.contains('/') => format!("({}) {}", self.symbol, other.symbol),
            _ => format!("{} {}", self.symbol, other.symbol),
        };

        Unit {
            symbol,
            name: format!("{} {}", self.name, other.name),
            dimension,
            scale: self.scale * other.scale,
            category: "derived".to_string(),
        }
    }

    /// Divide two units (e.g., m / s -> m/s)
    pub fn divide(&self, other: &Unit) -> Unit {
        self.quotient(other, self.dimension.divide(&other.dimension))
    }

    /// `divide`, or `None` if a dimension exponent overflows
    pub fn checked_divide(&self, other: &Unit) -> Option<Unit> {
        Some(self.quotient(other, self.dimension.checked_divide(&other.dimension)?))
    }

    fn quotient(&self, other: &Unit, dimension: DimensionVector) -> Unit {
        let numerator = if self.symbol.is_empty() { "1" } else { self.symbol.as_str() };
        let symbol = if other.symbol.is_empty() {
            self.symbol.clone()
        } else if other.symbol.contains('/') {
            format!("{}/({})", numerator, other.symbol)
        } else {
            format!("{}/{}", numerator, other.symbol)
        };

        Unit {
            symbol,
            name: format!("{} per {}", self.name, other.name),
            dimension,
            scale: self.scale / other.scale,
            category: "derived".to_string(),
        }
    }

    /// Raise unit to a rational power (e.g., m^2, s^(1/2))
    pub fn power(&self, exp: Exponent) -> Unit {
        self.raised(exp, self.dimension.power(exp))
    }

    /// `power`, or `None` if a dimension exponent overflows
    pub fn checked_power(&self, exp: Exponent) -> Option<Unit> {
        Some(self.raised(exp, self.dimension.checked_power(exp)?))
    }

    fn raised(&self, exp: Exponent, dimension: DimensionVector) -> Unit {
        if exp.is_one() {
            return self.clone();
        }
        if exp.is_zero() || self.symbol.is_empty() {
            return Unit::dimensionless();
        }

        let grouped = if self.symbol.contains(|c: char| c == ' ' || c == '/' || c == '^') {
            format!("({})", self.symbol)
        } else {
            self.symbol.clone()
        };

        Unit {
            symbol: format_power(&grouped, exp),
            name: format!("{} to the {}", self.name, exp),
            dimension,
            scale: self.scale.powf(exp.to_f64().unwrap_or(0.0)),
            category: self.category.clone(),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

/// Errors that can occur in the quantity algebra
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// Units have incompatible dimensions
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: DimensionVector,
        to_dim: DimensionVector,
    },

    /// Unknown unit symbol
    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Unknown physical constant label
    #[error("unknown constant: {0}")]
    UnknownConstant(String),

    /// Malformed unit or quantity expression
    #[error("invalid expression '{expression}': {reason}")]
    InvalidExpression { expression: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meter() -> Unit {
        Unit::new("m", "meter", DimensionVector::LENGTH, 1.0, "length")
    }

    fn kilometer() -> Unit {
        Unit::new("km", "kilometer", DimensionVector::LENGTH, 1000.0, "length")
    }

    fn second() -> Unit {
        Unit::new("s", "second", DimensionVector::TIME, 1.0, "time")
    }

    #[test]
    fn test_si_coherent_unit() {
        assert!(meter().is_si_coherent());
        assert!(!kilometer().is_si_coherent());
    }

    #[test]
    fn test_compatible_units() {
        let m = meter();
        let km = kilometer();
        let s = second();

        assert!(m.is_compatible(&km));
        assert!(!m.is_compatible(&s));
    }

    #[test]
    fn test_unit_conversion() {
        // Convert 5000 m to km
        let converted = meter().convert_to(5000.0, &kilometer()).unwrap();
        assert_eq!(converted, 5.0);
    }

    #[test]
    fn test_incompatible_conversion() {
        let err = meter().convert_to(1.0, &second()).unwrap_err();
        assert!(matches!(err, UnitError::IncompatibleDimensions { .. }));
        assert!(err.to_string().contains("incompatible dimensions"));
    }

    #[test]
    fn test_unit_power() {
        let m2 = meter().power(Rational64::from_integer(2));
        assert_eq!(m2.symbol, "m^2");
        assert_eq!(m2.dimension, DimensionVector::AREA);

        let root = kilometer().power(Rational64::new(1, 2));
        assert_eq!(root.symbol, "km^(1/2)");
        assert!((root.scale - 1000f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_unit_multiply_divide() {
        let velocity = meter().divide(&second());
        assert_eq!(velocity.symbol, "m/s");
        assert_eq!(velocity.dimension, DimensionVector::VELOCITY);

        // (m/s) * s must not read as m/(s s)
        let back = velocity.multiply(&second());
        assert_eq!(back.symbol, "(m/s) s");
        assert_eq!(back.dimension, DimensionVector::LENGTH);

        let squared = velocity.power(Rational64::from_integer(2));
        assert_eq!(squared.symbol, "(m/s)^2");
    }

    #[test]
    fn test_si_unit() {
        let energy = Unit::si(DimensionVector::ENERGY);
        assert_eq!(energy.symbol, "kg m^2 s^-2");
        assert_eq!(energy.name, "energy");
        assert_eq!(Unit::si_base(BaseDimension::Amount).symbol, "mol");
    }
}
