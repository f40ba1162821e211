//! Physical constants with sources
//!
//! CODATA 2018 values for fundamental constants and IAU 2015 nominal
//! values for astronomical ones. Every constant is stored in coherent SI.

use std::collections::HashMap;
use std::sync::LazyLock;
use serde::Serialize;
use crate::{DimensionVector, Quantity, Unit, UnitError};

/// Global constant registry
pub static CONSTANTS: LazyLock<ConstantRegistry> = LazyLock::new(ConstantRegistry::new);

/// A named physical constant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysicalConstant {
    /// Short label used for lookup and persistence (e.g. "hbar")
    pub abbrev: &'static str,
    pub name: &'static str,
    /// Value in coherent SI units
    pub value: f64,
    pub dimension: DimensionVector,
    pub source: &'static str,
}

impl PhysicalConstant {
    /// The constant as a quantity in coherent SI units
    pub fn quantity(&self) -> Quantity {
        Quantity::new(self.value, Unit::si(self.dimension))
    }

    /// The constant as a unit of its own, e.g. `c` for velocities
    pub fn as_unit(&self) -> Unit {
        Unit::new(self.abbrev, self.name, self.dimension, self.value, "constant")
    }
}

/// Registry of all known constants
pub struct ConstantRegistry {
    constants: HashMap<&'static str, PhysicalConstant>,
    aliases: HashMap<&'static str, &'static str>,
}

impl Default for ConstantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantRegistry {
    pub fn new() -> Self {
        let mut registry = ConstantRegistry {
            constants: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_fundamental();
        registry.register_atomic();
        registry.register_astronomical();
        registry
    }

    /// Get a constant by label or alias
    pub fn get(&self, label: &str) -> Option<&PhysicalConstant> {
        self.constants
            .get(label)
            .or_else(|| self.aliases.get(label).and_then(|c| self.constants.get(c)))
    }

    /// Resolve a label to a quantity
    pub fn quantity(&self, label: &str) -> Result<Quantity, UnitError> {
        self.get(label)
            .map(PhysicalConstant::quantity)
            .ok_or_else(|| UnitError::UnknownConstant(label.to_string()))
    }

    /// All labels, sorted
    pub fn labels(&self) -> Vec<&'static str> {
        let mut labels: Vec<_> = self.constants.keys().copied().collect();
        labels.sort_unstable();
        labels
    }

    fn register(
        &mut self,
        abbrev: &'static str,
        name: &'static str,
        value: f64,
        dimension: [i64; 8],
        source: &'static str,
    ) {
        self.constants.insert(abbrev, PhysicalConstant {
            abbrev,
            name,
            value,
            dimension: DimensionVector::from_integers(dimension),
            source,
        });
    }

    //                                                            M   L   T   Θ   I   N   J   ∠
    fn register_fundamental(&mut self) {
        self.register("c", "speed of light in vacuum", 299_792_458.0, [0, 1, -1, 0, 0, 0, 0, 0], "CODATA 2018 (exact)");
        self.register("h", "Planck constant", 6.62607015e-34, [1, 2, -1, 0, 0, 0, 0, 0], "CODATA 2018 (exact)");
        self.register("hbar", "reduced Planck constant", 1.054571817e-34, [1, 2, -1, 0, 0, 0, 0, 0], "CODATA 2018");
        self.register("G", "gravitational constant", 6.67430e-11, [-1, 3, -2, 0, 0, 0, 0, 0], "CODATA 2018");
        self.register("k_B", "Boltzmann constant", 1.380649e-23, [1, 2, -2, -1, 0, 0, 0, 0], "CODATA 2018 (exact)");
        self.register("eps0", "vacuum electric permittivity", 8.8541878128e-12, [-1, -3, 4, 0, 2, 0, 0, 0], "CODATA 2018");
        self.register("mu0", "vacuum magnetic permeability", 1.25663706212e-6, [1, 1, -2, 0, -2, 0, 0, 0], "CODATA 2018");
        self.register("e", "elementary charge", 1.602176634e-19, [0, 0, 1, 0, 1, 0, 0, 0], "CODATA 2018 (exact)");
        self.register("N_A", "Avogadro constant", 6.02214076e23, [0, 0, 0, 0, 0, -1, 0, 0], "CODATA 2018 (exact)");
        self.register("R", "molar gas constant", 8.314462618, [1, 2, -2, -1, 0, -1, 0, 0], "CODATA 2018");
        self.register("sigma_sb", "Stefan-Boltzmann constant", 5.670374419e-8, [1, 0, -3, -4, 0, 0, 0, 0], "CODATA 2018");
        self.register("g0", "standard acceleration of gravity", 9.80665, [0, 1, -2, 0, 0, 0, 0, 0], "CGPM 1901 (exact)");

        self.aliases.insert("ħ", "hbar");
        self.aliases.insert("k", "k_B");
        self.aliases.insert("epsilon0", "eps0");
    }

    fn register_atomic(&mut self) {
        self.register("m_e", "electron mass", 9.1093837015e-31, [1, 0, 0, 0, 0, 0, 0, 0], "CODATA 2018");
        self.register("m_p", "proton mass", 1.67262192369e-27, [1, 0, 0, 0, 0, 0, 0, 0], "CODATA 2018");
        self.register("m_n", "neutron mass", 1.67492749804e-27, [1, 0, 0, 0, 0, 0, 0, 0], "CODATA 2018");
        self.register("u", "atomic mass constant", 1.66053906660e-27, [1, 0, 0, 0, 0, 0, 0, 0], "CODATA 2018");
        self.register("a0", "Bohr radius", 5.29177210903e-11, [0, 1, 0, 0, 0, 0, 0, 0], "CODATA 2018");
        self.register("alpha", "fine-structure constant", 7.2973525693e-3, [0, 0, 0, 0, 0, 0, 0, 0], "CODATA 2018");
        self.register("Ryd", "Rydberg constant", 10_973_731.568160, [0, -1, 0, 0, 0, 0, 0, 0], "CODATA 2018");
    }

    fn register_astronomical(&mut self) {
        self.register("M_sun", "solar mass", 1.988409870698051e30, [1, 0, 0, 0, 0, 0, 0, 0], "IAU 2015");
        self.register("R_sun", "nominal solar radius", 6.957e8, [0, 1, 0, 0, 0, 0, 0, 0], "IAU 2015");
        self.register("L_sun", "nominal solar luminosity", 3.828e26, [1, 2, -3, 0, 0, 0, 0, 0], "IAU 2015");
        self.register("M_earth", "earth mass", 5.972167867791379e24, [1, 0, 0, 0, 0, 0, 0, 0], "IAU 2015");
        self.register("R_earth", "nominal earth equatorial radius", 6.3781e6, [0, 1, 0, 0, 0, 0, 0, 0], "IAU 2015");
        self.register("M_jup", "jupiter mass", 1.8981245973360505e27, [1, 0, 0, 0, 0, 0, 0, 0], "IAU 2015");
        self.register("au", "astronomical unit", 1.495978707e11, [0, 1, 0, 0, 0, 0, 0, 0], "IAU 2012 (exact)");
        self.register("pc", "parsec", 3.0856775814913673e16, [0, 1, 0, 0, 0, 0, 0, 0], "IAU 2015");
        self.register("kpc", "kiloparsec", 3.0856775814913673e19, [0, 1, 0, 0, 0, 0, 0, 0], "IAU 2015");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let c = CONSTANTS.get("c").unwrap();
        assert_eq!(c.value, 299_792_458.0);
        assert_eq!(c.dimension, DimensionVector::VELOCITY);

        let hbar = CONSTANTS.get("ħ").unwrap();
        assert_eq!(hbar.abbrev, "hbar");
        assert_eq!(hbar.dimension, DimensionVector::ACTION);

        assert!(CONSTANTS.get("not_a_constant").is_none());
    }

    #[test]
    fn test_quantity() {
        let k_b = CONSTANTS.quantity("k_B").unwrap();
        assert_eq!(k_b.unit.symbol, "kg m^2 s^-2 K^-1");
        assert!(matches!(CONSTANTS.quantity("nope"), Err(UnitError::UnknownConstant(_))));
    }

    #[test]
    fn test_hbar_consistent_with_h() {
        let h = CONSTANTS.get("h").unwrap().value;
        let hbar = CONSTANTS.get("hbar").unwrap().value;
        let ratio = h / (2.0 * std::f64::consts::PI) / hbar;
        assert!((ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_as_unit() {
        let c = CONSTANTS.get("c").unwrap().as_unit();
        let q = Quantity::new(1.0, c);
        assert_eq!(q.si_value(), 299_792_458.0);
        assert_eq!(q.unit.symbol, "c");
    }

    #[test]
    fn test_labels_sorted() {
        let labels = CONSTANTS.labels();
        assert!(labels.contains(&"hbar"));
        assert!(labels.windows(2).all(|w| w[0] <= w[1]));
    }
}
