//! Quantity type - a value with an associated unit

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::dimension::Exponent;
use crate::parse::parse_unit;
use crate::{DimensionVector, Unit, UnitError};

/// A physical quantity: a numeric value with an associated unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: f64,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Create a quantity from a value and a unit expression like "kg m/s^2"
    pub fn parse(value: f64, unit: &str) -> Result<Self, UnitError> {
        Ok(Quantity::new(value, parse_unit(unit)?))
    }

    /// Create a dimensionless quantity (pure number)
    pub fn dimensionless(value: f64) -> Self {
        Quantity::new(value, Unit::dimensionless())
    }

    /// Get the dimension of this quantity
    pub fn dimension(&self) -> DimensionVector {
        self.unit.dimension
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_dimensionless()
    }

    /// Check if two quantities have compatible dimensions
    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Get the value in SI units
    pub fn si_value(&self) -> f64 {
        self.unit.to_si(self.value)
    }

    /// Reduce to coherent SI units
    pub fn si(&self) -> Quantity {
        Quantity::new(self.si_value(), Unit::si(self.unit.dimension))
    }

    /// The unit part alone, with magnitude 1
    pub fn unit_quantity(&self) -> Quantity {
        Quantity::new(1.0, self.unit.clone())
    }

    /// Convert to another unit
    pub fn convert_to(&self, target: &Unit) -> Result<Quantity, UnitError> {
        let value = self.unit.convert_to(self.value, target)?;
        Ok(Quantity::new(value, target.clone()))
    }

    /// Convert to the unit described by an expression
    pub fn to(&self, target: &str) -> Result<Quantity, UnitError> {
        self.convert_to(&parse_unit(target)?)
    }

    /// Multiply two quantities (dimensions are multiplied)
    pub fn mul(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.value * other.value, self.unit.multiply(&other.unit))
    }

    /// Divide two quantities (dimensions are divided)
    pub fn div(&self, other: &Quantity) -> Quantity {
        Quantity::new(self.value / other.value, self.unit.divide(&other.unit))
    }

    /// Multiply by a pure number
    pub fn scale(&self, factor: f64) -> Quantity {
        Quantity::new(self.value * factor, self.unit.clone())
    }

    /// Raise quantity to a rational power
    pub fn pow(&self, exp: Exponent) -> Quantity {
        let value = self.value.powf(num_traits::ToPrimitive::to_f64(&exp).unwrap_or(0.0));
        Quantity::new(value, self.unit.power(exp))
    }

    /// Compare SI values within a relative tolerance
    pub fn is_close(&self, other: &Quantity, rel_tol: f64) -> bool {
        if !self.is_compatible(other) {
            return false;
        }
        let a = self.si_value();
        let b = other.si_value();
        (a - b).abs() <= rel_tol * a.abs().max(b.abs())
    }
}

/// Reduce a quantity to its SI base-dimension decomposition.
///
/// Only the unit contributes; the magnitude is irrelevant.
pub fn dimensions_of(quantity: &Quantity) -> DimensionVector {
    quantity.unit_quantity().si().unit.dimension
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit.symbol)
        }
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        // Compare SI values for equality
        if !self.is_compatible(other) {
            return false;
        }
        self.si_value() == other.si_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_rational::Rational64;

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
    fn test_quantity_creation() {
        let q = Quantity::new(5.0, meter());
        assert_eq!(q.value, 5.0);
        assert_eq!(q.unit.symbol, "m");
    }

    #[test]
    fn test_to_si() {
        let q = Quantity::new(5.0, kilometer());
        let si = q.si();
        assert_eq!(si.value, 5000.0);
        assert_eq!(si.unit.symbol, "m");
    }

    #[test]
    fn test_convert_to() {
        let q = Quantity::new(5000.0, meter());
        let converted = q.convert_to(&kilometer()).unwrap();
        assert_eq!(converted.value, 5.0);
    }

    #[test]
    fn test_convert_by_expression() {
        let q = Quantity::parse(36.0, "km/h").unwrap();
        let converted = q.to("m/s").unwrap();
        assert!((converted.value - 10.0).abs() < 1e-12);
        assert!(q.to("kg").is_err());
    }

    #[test]
    fn test_mul_div() {
        let distance = Quantity::new(100.0, meter());
        let time = Quantity::new(10.0, second());
        let velocity = distance.div(&time);

        assert_eq!(velocity.value, 10.0);
        assert_eq!(velocity.dimension(), DimensionVector::VELOCITY);
        assert_eq!(velocity.mul(&time).dimension(), DimensionVector::LENGTH);
    }

    #[test]
    fn test_rational_pow() {
        let area = Quantity::new(4.0, kilometer().power(Rational64::from_integer(2)));
        let side = area.pow(Rational64::new(1, 2));
        assert_eq!(side.dimension(), DimensionVector::LENGTH);
        assert!((side.si_value() - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimensions_of_ignores_magnitude() {
        let q = Quantity::parse(42.0, "kJ/h").unwrap();
        assert_eq!(dimensions_of(&q), DimensionVector::POWER);
        assert_eq!(dimensions_of(&Quantity::dimensionless(3.0)), DimensionVector::DIMENSIONLESS);
    }

    #[test]
    fn test_equality() {
        let q1 = Quantity::new(1.0, kilometer());
        let q2 = Quantity::new(1000.0, meter());
        assert_eq!(q1, q2);
        assert!(q1.is_close(&q2, 1e-12));
        assert!(!q1.is_close(&Quantity::new(1000.0, second()), 1e-12));
    }

    #[test]
    fn test_display() {
        let q = Quantity::new(5.0, meter());
        assert_eq!(format!("{}", q), "5 m");
        assert_eq!(format!("{}", Quantity::dimensionless(2.5)), "2.5");
    }
}
