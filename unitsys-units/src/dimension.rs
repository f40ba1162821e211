//! Dimensional analysis types
//!
//! Each physical quantity has dimensions represented as an 8-element vector
//! of rational exponents:
//! [mass, length, time, temperature, current, amount, luminous intensity, angle]

use std::fmt;
use num_rational::Rational64;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, ToPrimitive, Zero};
use serde::{Serialize, Deserialize};

/// Exponent of a base dimension
pub type Exponent = Rational64;

/// Number of base dimensions
pub const BASE_COUNT: usize = 8;

/// Largest denominator tried when snapping a float back to a rational exponent
const MAX_DENOMINATOR: i64 = 1000;

/// Absolute tolerance (per unit of denominator) for rational snapping
const RATIONAL_TOLERANCE: f64 = 1e-9;

const fn int(n: i64) -> Rational64 {
    Rational64::new_raw(n, 1)
}

/// The eight base dimensions, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDimension {
    Mass,
    Length,
    Time,
    Temperature,
    Current,
    Amount,
    LuminousIntensity,
    Angle,
}

impl BaseDimension {
    /// All base dimensions in canonical order
    pub const ALL: [BaseDimension; BASE_COUNT] = [
        BaseDimension::Mass,
        BaseDimension::Length,
        BaseDimension::Time,
        BaseDimension::Temperature,
        BaseDimension::Current,
        BaseDimension::Amount,
        BaseDimension::LuminousIntensity,
        BaseDimension::Angle,
    ];

    /// Position in the canonical order
    pub fn index(self) -> usize {
        self as usize
    }

    /// Symbol of the SI unit for this dimension
    pub fn si_symbol(self) -> &'static str {
        match self {
            BaseDimension::Mass => "kg",
            BaseDimension::Length => "m",
            BaseDimension::Time => "s",
            BaseDimension::Temperature => "K",
            BaseDimension::Current => "A",
            BaseDimension::Amount => "mol",
            BaseDimension::LuminousIntensity => "cd",
            BaseDimension::Angle => "rad",
        }
    }

    /// Dimension symbol used in dimensional formulas
    pub fn symbol(self) -> &'static str {
        match self {
            BaseDimension::Mass => "M",
            BaseDimension::Length => "L",
            BaseDimension::Time => "T",
            BaseDimension::Temperature => "Θ",
            BaseDimension::Current => "I",
            BaseDimension::Amount => "N",
            BaseDimension::LuminousIntensity => "J",
            BaseDimension::Angle => "∠",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BaseDimension::Mass => "mass",
            BaseDimension::Length => "length",
            BaseDimension::Time => "time",
            BaseDimension::Temperature => "temperature",
            BaseDimension::Current => "current",
            BaseDimension::Amount => "amount",
            BaseDimension::LuminousIntensity => "luminous_intensity",
            BaseDimension::Angle => "angle",
        }
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the dimensions of a physical quantity
/// as rational exponents of the 8 base dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionVector {
    /// [mass, length, time, temperature, current, amount, luminous intensity, angle]
    pub exponents: [Exponent; BASE_COUNT],
}

impl DimensionVector {
    /// Dimensionless quantity (all exponents zero)
    pub const DIMENSIONLESS: DimensionVector = Self::from_integers([0, 0, 0, 0, 0, 0, 0, 0]);

    /// Mass dimension [M]
    pub const MASS: DimensionVector = Self::from_integers([1, 0, 0, 0, 0, 0, 0, 0]);

    /// Length dimension [L]
    pub const LENGTH: DimensionVector = Self::from_integers([0, 1, 0, 0, 0, 0, 0, 0]);

    /// Time dimension [T]
    pub const TIME: DimensionVector = Self::from_integers([0, 0, 1, 0, 0, 0, 0, 0]);

    /// Temperature dimension [Θ]
    pub const TEMPERATURE: DimensionVector = Self::from_integers([0, 0, 0, 1, 0, 0, 0, 0]);

    /// Electric current dimension [I]
    pub const CURRENT: DimensionVector = Self::from_integers([0, 0, 0, 0, 1, 0, 0, 0]);

    /// Amount of substance dimension [N]
    pub const AMOUNT: DimensionVector = Self::from_integers([0, 0, 0, 0, 0, 1, 0, 0]);

    /// Luminous intensity dimension [J]
    pub const LUMINOUS_INTENSITY: DimensionVector = Self::from_integers([0, 0, 0, 0, 0, 0, 1, 0]);

    /// Plane angle dimension
    pub const ANGLE: DimensionVector = Self::from_integers([0, 0, 0, 0, 0, 0, 0, 1]);

    /// Velocity [L T^-1]
    pub const VELOCITY: DimensionVector = Self::from_integers([0, 1, -1, 0, 0, 0, 0, 0]);

    /// Acceleration [L T^-2]
    pub const ACCELERATION: DimensionVector = Self::from_integers([0, 1, -2, 0, 0, 0, 0, 0]);

    /// Force [M L T^-2]
    pub const FORCE: DimensionVector = Self::from_integers([1, 1, -2, 0, 0, 0, 0, 0]);

    /// Energy [M L^2 T^-2]
    pub const ENERGY: DimensionVector = Self::from_integers([1, 2, -2, 0, 0, 0, 0, 0]);

    /// Power [M L^2 T^-3]
    pub const POWER: DimensionVector = Self::from_integers([1, 2, -3, 0, 0, 0, 0, 0]);

    /// Action [M L^2 T^-1]
    pub const ACTION: DimensionVector = Self::from_integers([1, 2, -1, 0, 0, 0, 0, 0]);

    /// Pressure [M L^-1 T^-2]
    pub const PRESSURE: DimensionVector = Self::from_integers([1, -1, -2, 0, 0, 0, 0, 0]);

    /// Area [L^2]
    pub const AREA: DimensionVector = Self::from_integers([0, 2, 0, 0, 0, 0, 0, 0]);

    /// Volume [L^3]
    pub const VOLUME: DimensionVector = Self::from_integers([0, 3, 0, 0, 0, 0, 0, 0]);

    /// Frequency [T^-1]
    pub const FREQUENCY: DimensionVector = Self::from_integers([0, 0, -1, 0, 0, 0, 0, 0]);

    /// Electric charge [I T]
    pub const CHARGE: DimensionVector = Self::from_integers([0, 0, 1, 0, 1, 0, 0, 0]);

    /// Voltage [M L^2 T^-3 I^-1]
    pub const VOLTAGE: DimensionVector = Self::from_integers([1, 2, -3, 0, -1, 0, 0, 0]);

    /// Resistance [M L^2 T^-3 I^-2]
    pub const RESISTANCE: DimensionVector = Self::from_integers([1, 2, -3, 0, -2, 0, 0, 0]);

    /// Capacitance [M^-1 L^-2 T^4 I^2]
    pub const CAPACITANCE: DimensionVector = Self::from_integers([-1, -2, 4, 0, 2, 0, 0, 0]);

    /// Magnetic flux density [M T^-2 I^-1]
    pub const MAGNETIC_FLUX_DENSITY: DimensionVector = Self::from_integers([1, 0, -2, 0, -1, 0, 0, 0]);

    /// Solid angle [∠^2]
    pub const SOLID_ANGLE: DimensionVector = Self::from_integers([0, 0, 0, 0, 0, 0, 0, 2]);

    /// Create a new dimension from exponents
    pub fn new(exponents: [Exponent; BASE_COUNT]) -> Self {
        DimensionVector { exponents }
    }

    /// Create a dimension from integer exponents
    pub const fn from_integers(exponents: [i64; BASE_COUNT]) -> Self {
        DimensionVector {
            exponents: [
                int(exponents[0]),
                int(exponents[1]),
                int(exponents[2]),
                int(exponents[3]),
                int(exponents[4]),
                int(exponents[5]),
                int(exponents[6]),
                int(exponents[7]),
            ],
        }
    }

    /// Unit vector along one base dimension
    pub fn of(dim: BaseDimension) -> Self {
        let mut exponents = [Exponent::zero(); BASE_COUNT];
        exponents[dim.index()] = int(1);
        DimensionVector { exponents }
    }

    /// Exponent of one base dimension
    pub fn get(&self, dim: BaseDimension) -> Exponent {
        self.exponents[dim.index()]
    }

    /// Check if this is a dimensionless quantity
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|e| e.is_zero())
    }

    /// Base dimensions with a non-zero exponent, in canonical order
    pub fn spanned(&self) -> Vec<BaseDimension> {
        BaseDimension::ALL
            .into_iter()
            .filter(|d| !self.get(*d).is_zero())
            .collect()
    }

    /// If exactly one base dimension is involved with exponent 1, return it
    pub fn as_base(&self) -> Option<BaseDimension> {
        match self.spanned().as_slice() {
            [single] if self.get(*single) == int(1) => Some(*single),
            _ => None,
        }
    }

    /// Multiply dimensions (add exponents)
    pub fn multiply(&self, other: &DimensionVector) -> DimensionVector {
        let mut result = self.exponents;
        for (r, o) in result.iter_mut().zip(other.exponents.iter()) {
            *r += *o;
        }
        DimensionVector { exponents: result }
    }

    /// Divide dimensions (subtract exponents)
    pub fn divide(&self, other: &DimensionVector) -> DimensionVector {
        let mut result = self.exponents;
        for (r, o) in result.iter_mut().zip(other.exponents.iter()) {
            *r -= *o;
        }
        DimensionVector { exponents: result }
    }

    /// Raise to a rational power (multiply exponents)
    pub fn power(&self, exp: Exponent) -> DimensionVector {
        let mut result = self.exponents;
        for r in result.iter_mut() {
            *r *= exp;
        }
        DimensionVector { exponents: result }
    }

    /// `multiply`, or `None` if an exponent overflows
    pub fn checked_multiply(&self, other: &DimensionVector) -> Option<DimensionVector> {
        self.zip_checked(other, |a, b| a.checked_add(b))
    }

    /// `divide`, or `None` if an exponent overflows
    pub fn checked_divide(&self, other: &DimensionVector) -> Option<DimensionVector> {
        self.zip_checked(other, |a, b| a.checked_sub(b))
    }

    /// `power`, or `None` if an exponent overflows
    pub fn checked_power(&self, exp: Exponent) -> Option<DimensionVector> {
        let mut result = self.exponents;
        for r in result.iter_mut() {
            *r = r.checked_mul(&exp)?;
        }
        Some(DimensionVector { exponents: result })
    }

    fn zip_checked(
        &self,
        other: &DimensionVector,
        op: impl Fn(&Exponent, &Exponent) -> Option<Exponent>,
    ) -> Option<DimensionVector> {
        let mut result = self.exponents;
        for (r, o) in result.iter_mut().zip(other.exponents.iter()) {
            *r = op(r, o)?;
        }
        Some(DimensionVector { exponents: result })
    }

    /// Invert dimensions (negate exponents)
    pub fn invert(&self) -> DimensionVector {
        self.power(int(-1))
    }

    /// Exponents as floats, for matrix arithmetic
    pub fn to_f64(&self) -> [f64; BASE_COUNT] {
        let mut out = [0.0; BASE_COUNT];
        for (o, e) in out.iter_mut().zip(self.exponents.iter()) {
            *o = e.to_f64().unwrap_or(0.0);
        }
        out
    }

    /// Snap float exponents back to rationals; `None` if any is not finite
    pub fn from_f64(values: &[f64; BASE_COUNT]) -> Option<DimensionVector> {
        let mut exponents = [Exponent::zero(); BASE_COUNT];
        for (e, v) in exponents.iter_mut().zip(values.iter()) {
            *e = rationalize(*v)?;
        }
        Some(DimensionVector { exponents })
    }

    /// The SI unit expression for this dimension, e.g. "kg m^2 s^-2".
    ///
    /// The result is re-parseable by [`crate::parse_unit`]; the empty string
    /// denotes a dimensionless quantity.
    pub fn si_unit_string(&self) -> String {
        BaseDimension::ALL
            .into_iter()
            .filter(|d| !self.get(*d).is_zero())
            .map(|d| format_power(d.si_symbol(), self.get(d)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Get the dimension name if it matches a common dimension
    pub fn name(&self) -> Option<&'static str> {
        let named = [
            (Self::DIMENSIONLESS, "dimensionless"),
            (Self::MASS, "mass"),
            (Self::LENGTH, "length"),
            (Self::TIME, "time"),
            (Self::TEMPERATURE, "temperature"),
            (Self::CURRENT, "current"),
            (Self::AMOUNT, "amount"),
            (Self::LUMINOUS_INTENSITY, "luminous intensity"),
            (Self::ANGLE, "angle"),
            (Self::VELOCITY, "velocity"),
            (Self::ACCELERATION, "acceleration"),
            (Self::FORCE, "force"),
            (Self::ENERGY, "energy"),
            (Self::POWER, "power"),
            (Self::ACTION, "action"),
            (Self::PRESSURE, "pressure"),
            (Self::AREA, "area"),
            (Self::VOLUME, "volume"),
            (Self::FREQUENCY, "frequency"),
            (Self::CHARGE, "charge"),
            (Self::VOLTAGE, "voltage"),
            (Self::RESISTANCE, "resistance"),
            (Self::CAPACITANCE, "capacitance"),
            (Self::MAGNETIC_FLUX_DENSITY, "magnetic flux density"),
            (Self::SOLID_ANGLE, "solid angle"),
        ];
        named.iter().find(|(d, _)| d == self).map(|(_, n)| *n)
    }
}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = BaseDimension::ALL
            .into_iter()
            .filter(|d| !self.get(*d).is_zero())
            .map(|d| format_power(d.symbol(), self.get(d)))
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

impl Default for DimensionVector {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

/// Format an exponent the way the unit parser reads it back:
/// integers bare ("2", "-1"), fractions parenthesised ("(1/2)").
pub fn format_exponent(exp: Exponent) -> String {
    if exp.is_integer() {
        format!("{}", exp.to_integer())
    } else {
        format!("({}/{})", exp.numer(), exp.denom())
    }
}

/// Format `base^exp`, omitting the exponent when it is 1
pub fn format_power(base: &str, exp: Exponent) -> String {
    if exp == int(1) {
        base.to_string()
    } else {
        format!("{}^{}", base, format_exponent(exp))
    }
}

/// Snap a float to the nearest rational with a small denominator.
///
/// Exponents coming out of matrix arithmetic carry rounding noise
/// (0.49999999999 for 1/2); this recovers the exact value.
pub fn rationalize(x: f64) -> Option<Exponent> {
    if !x.is_finite() {
        return None;
    }
    for den in 1..=MAX_DENOMINATOR {
        let scaled = x * den as f64;
        let num = scaled.round();
        if (scaled - num).abs() <= RATIONAL_TOLERANCE * den as f64 {
            return Some(Rational64::new(num as i64, den));
        }
    }
    Rational64::approximate_float(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(DimensionVector::DIMENSIONLESS.is_dimensionless());
        assert!(!DimensionVector::LENGTH.is_dimensionless());
        assert!(!DimensionVector::ANGLE.is_dimensionless());
    }

    #[test]
    fn test_multiply() {
        let velocity = DimensionVector::LENGTH.divide(&DimensionVector::TIME);
        assert_eq!(velocity, DimensionVector::VELOCITY);
    }

    #[test]
    fn test_force() {
        // Force = Mass * Acceleration = M * L * T^-2
        let force = DimensionVector::MASS.multiply(&DimensionVector::ACCELERATION);
        assert_eq!(force, DimensionVector::FORCE);
    }

    #[test]
    fn test_rational_power() {
        let root = DimensionVector::ACTION.power(Rational64::new(1, 2));
        assert_eq!(root.get(BaseDimension::Mass), Rational64::new(1, 2));
        assert_eq!(root.get(BaseDimension::Length), int(1));
        assert_eq!(root.get(BaseDimension::Time), Rational64::new(-1, 2));
        assert_eq!(root.power(int(2)), DimensionVector::ACTION);
    }

    #[test]
    fn test_checked_overflow() {
        let huge = DimensionVector::LENGTH.power(Rational64::from_integer(i64::MAX / 2 + 1));
        assert_eq!(huge.checked_multiply(&huge), None);
        assert_eq!(huge.checked_power(int(2)), None);
        assert_eq!(huge.checked_divide(&huge.invert()), None);

        let force = DimensionVector::MASS.checked_multiply(&DimensionVector::ACCELERATION);
        assert_eq!(force, Some(DimensionVector::FORCE));
        assert_eq!(
            DimensionVector::LENGTH.checked_divide(&DimensionVector::TIME),
            Some(DimensionVector::VELOCITY)
        );
        assert_eq!(
            DimensionVector::ACTION.checked_power(Rational64::new(1, 2)),
            Some(DimensionVector::ACTION.power(Rational64::new(1, 2)))
        );
    }

    #[test]
    fn test_spanned() {
        assert_eq!(
            DimensionVector::ENERGY.spanned(),
            vec![BaseDimension::Mass, BaseDimension::Length, BaseDimension::Time]
        );
        assert!(DimensionVector::DIMENSIONLESS.spanned().is_empty());
        assert_eq!(DimensionVector::LENGTH.as_base(), Some(BaseDimension::Length));
        assert_eq!(DimensionVector::AREA.as_base(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", DimensionVector::DIMENSIONLESS), "1");
        assert_eq!(format!("{}", DimensionVector::LENGTH), "L");
        assert_eq!(format!("{}", DimensionVector::VELOCITY), "L T^-1");
        let half = DimensionVector::MASS.power(Rational64::new(1, 2));
        assert_eq!(format!("{}", half), "M^(1/2)");
    }

    #[test]
    fn test_si_unit_string() {
        assert_eq!(DimensionVector::ENERGY.si_unit_string(), "kg m^2 s^-2");
        assert_eq!(DimensionVector::DIMENSIONLESS.si_unit_string(), "");
        let half = DimensionVector::TIME.power(Rational64::new(-3, 2));
        assert_eq!(half.si_unit_string(), "s^(-3/2)");
    }

    #[test]
    fn test_rationalize() {
        assert_eq!(rationalize(0.49999999999), Some(Rational64::new(1, 2)));
        assert_eq!(rationalize(-2.0000000001), Some(int(-2)));
        assert_eq!(rationalize(1.0 / 3.0), Some(Rational64::new(1, 3)));
        assert_eq!(rationalize(f64::NAN), None);
    }

    #[test]
    fn test_f64_roundtrip() {
        let dim = DimensionVector::CAPACITANCE.power(Rational64::new(1, 2));
        let back = DimensionVector::from_f64(&dim.to_f64()).unwrap();
        assert_eq!(back, dim);
    }
}
