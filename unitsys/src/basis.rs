//! Basis quantities: the constants and units a custom system is built from
//!
//! Each basis quantity remembers where it came from (`BasisSource`) so the
//! definition can be persisted and resolved again to the same SI value.

use serde::{Deserialize, Serialize};
use unitsys_units::{
    dimensions_of, parse_unit, BaseDimension, DimensionVector, Quantity, Unit, UnitError, CONSTANTS,
    UNITS,
};

/// How to reconstruct a basis quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisSource {
    /// A physical constant from the registry, by label
    Constant(String),
    /// A unit expression, e.g. "eV" or "km/s"
    Unit(String),
    /// A magnitude in some unit; with a symbol it acts as a named unit
    Literal {
        magnitude: f64,
        unit: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        symbol: Option<String>,
    },
}

impl BasisSource {
    /// Resolve to a quantity
    pub fn resolve(&self) -> Result<Quantity, UnitError> {
        match self {
            BasisSource::Constant(label) => CONSTANTS.quantity(label),
            BasisSource::Unit(expression) => Ok(Quantity::new(1.0, parse_unit(expression)?)),
            BasisSource::Literal { magnitude, unit, symbol: None } => Quantity::parse(*magnitude, unit),
            BasisSource::Literal { magnitude, unit, symbol: Some(symbol) } => {
                let value = Quantity::parse(*magnitude, unit)?;
                Ok(Quantity::new(1.0, Unit::from_quantity(symbol, symbol, &value)))
            }
        }
    }

    /// Label used when the caller supplies none
    pub fn default_label(&self) -> &str {
        match self {
            BasisSource::Constant(label) => label,
            BasisSource::Unit(expression) => expression,
            BasisSource::Literal { symbol: Some(symbol), .. } => symbol,
            BasisSource::Literal { unit, .. } => unit,
        }
    }
}

/// One candidate member of a unit-system basis
#[derive(Debug, Clone, PartialEq)]
pub struct BasisQuantity {
    label: String,
    source: BasisSource,
    quantity: Quantity,
}

impl BasisQuantity {
    /// Resolve a source, labelled with its default label
    pub fn resolve(source: BasisSource) -> Result<Self, UnitError> {
        let quantity = source.resolve()?;
        Ok(BasisQuantity {
            label: source.default_label().to_string(),
            source,
            quantity,
        })
    }

    /// A registry constant ("c", "hbar", "ħ", ...); aliases resolve to the canonical label
    pub fn constant(label: &str) -> Result<Self, UnitError> {
        let constant = CONSTANTS
            .get(label)
            .ok_or_else(|| UnitError::UnknownConstant(label.to_string()))?;
        Self::resolve(BasisSource::Constant(constant.abbrev.to_string()))
    }

    /// A unit expression ("eV", "kpc", "km/s")
    pub fn unit(expression: &str) -> Result<Self, UnitError> {
        Self::resolve(BasisSource::Unit(expression.trim().to_string()))
    }

    /// A magnitude in a unit, e.g. `literal(1.0, "kg m^2 s^-1")`.
    ///
    /// Stored as its SI magnitude and SI unit string, labelled with the unit
    /// as given.
    pub fn literal(magnitude: f64, unit: &str) -> Result<Self, UnitError> {
        let unit = unit.trim();
        let si = Quantity::parse(magnitude, unit)?.si();
        let basis = Self::resolve(BasisSource::Literal {
            magnitude: si.value,
            unit: si.dimension().si_unit_string(),
            symbol: None,
        })?;
        Ok(basis.with_label(unit))
    }

    /// The SI base unit of one dimension
    pub fn si_base(dim: BaseDimension) -> Self {
        let symbol = dim.si_symbol();
        BasisQuantity {
            label: symbol.to_string(),
            source: BasisSource::Unit(symbol.to_string()),
            quantity: Quantity::new(1.0, Unit::si_base(dim)),
        }
    }

    /// Any unit, including ad hoc ones defined with `Unit::from_quantity`.
    ///
    /// Registry units keep their symbol; anything else is stored as its SI
    /// value with the unit's symbol.
    pub fn from_unit(unit: &Unit) -> Self {
        let registered = UNITS
            .get(&unit.symbol)
            .is_some_and(|known| known.dimension == unit.dimension && known.scale == unit.scale);

        let source = if registered {
            BasisSource::Unit(unit.symbol.clone())
        } else {
            BasisSource::Literal {
                magnitude: unit.scale,
                unit: unit.dimension.si_unit_string(),
                symbol: Some(unit.symbol.clone()),
            }
        };

        BasisQuantity {
            label: source.default_label().to_string(),
            source,
            quantity: Quantity::new(1.0, unit.clone()),
        }
    }

    /// A named unit worth `quantity`, e.g. `from_quantity("soc", c)`
    pub fn from_quantity(symbol: &str, quantity: &Quantity) -> Self {
        Self::from_unit(&Unit::from_quantity(symbol, symbol, quantity))
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn source(&self) -> &BasisSource {
        &self.source
    }

    pub fn quantity(&self) -> &Quantity {
        &self.quantity
    }

    pub fn dimension(&self) -> DimensionVector {
        dimensions_of(&self.quantity)
    }

    /// The quantity as a unit to express results in.
    ///
    /// Unit-valued sources keep their own symbol; a literal with a magnitude
    /// other than one is written as "2 m".
    pub fn as_unit(&self) -> Unit {
        if self.quantity.value == 1.0 {
            return self.quantity.unit.clone();
        }
        let symbol = self.quantity.to_string();
        Unit::new(&symbol, &symbol, self.dimension(), self.quantity.si_value(), "basis")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant() {
        let hbar = BasisQuantity::constant("ħ").unwrap();
        assert_eq!(hbar.label(), "hbar");
        assert_eq!(hbar.source(), &BasisSource::Constant("hbar".to_string()));
        assert_eq!(hbar.dimension(), DimensionVector::ACTION);
        assert!(matches!(BasisQuantity::constant("zz"), Err(UnitError::UnknownConstant(_))));
    }

    #[test]
    fn test_unit() {
        let ev = BasisQuantity::unit(" eV ").unwrap();
        assert_eq!(ev.label(), "eV");
        assert_eq!(ev.dimension(), DimensionVector::ENERGY);
        assert_eq!(ev.as_unit().symbol, "eV");

        let v = BasisQuantity::unit("km/s").unwrap();
        assert_eq!(v.dimension(), DimensionVector::VELOCITY);
        assert!(BasisQuantity::unit("parsnip").is_err());
    }

    #[test]
    fn test_literal() {
        let two_m = BasisQuantity::literal(2.0, "m").unwrap();
        assert_eq!(two_m.label(), "m");
        assert_eq!(two_m.quantity().si_value(), 2.0);

        let unit = two_m.as_unit();
        assert_eq!(unit.symbol, "2 m");
        assert_eq!(unit.scale, 2.0);
    }

    #[test]
    fn test_literal_is_stored_in_si() {
        let two_km = BasisQuantity::literal(2.0, " km ").unwrap();
        assert_eq!(two_km.label(), "km");
        assert_eq!(
            two_km.source(),
            &BasisSource::Literal {
                magnitude: 2000.0,
                unit: "m".to_string(),
                symbol: None,
            }
        );
        assert_eq!(two_km.quantity().si_value(), 2000.0);

        let g = BasisQuantity::literal(9.80665, "m/s^2").unwrap();
        match g.source() {
            BasisSource::Literal { unit, .. } => assert_eq!(unit, "m s^-2"),
            other => panic!("expected a literal, got {other:?}"),
        }
        assert_eq!(g.dimension(), DimensionVector::ACCELERATION);
    }

    #[test]
    fn test_si_base() {
        let cd = BasisQuantity::si_base(BaseDimension::LuminousIntensity);
        assert_eq!(cd.label(), "cd");
        assert_eq!(cd.source(), &BasisSource::Unit("cd".to_string()));
        assert_eq!(cd.dimension(), DimensionVector::LUMINOUS_INTENSITY);
    }

    #[test]
    fn test_from_quantity_is_literal_with_symbol() {
        let c = CONSTANTS.quantity("c").unwrap();
        let soc = BasisQuantity::from_quantity("soc", &c);
        assert_eq!(soc.label(), "soc");
        assert_eq!(
            soc.source(),
            &BasisSource::Literal {
                magnitude: 299_792_458.0,
                unit: "m s^-1".to_string(),
                symbol: Some("soc".to_string()),
            }
        );
        assert_eq!(soc.as_unit().symbol, "soc");

        let resolved = BasisQuantity::resolve(soc.source().clone()).unwrap();
        assert_eq!(resolved, soc);
    }

    #[test]
    fn test_from_unit_keeps_registry_symbol() {
        let kpc = UNITS.get("kpc").unwrap();
        let basis = BasisQuantity::from_unit(kpc);
        assert_eq!(basis.source(), &BasisSource::Unit("kpc".to_string()));
    }

    #[test]
    fn test_source_serde_shape() {
        let json = serde_json::to_string(&BasisSource::Constant("c".to_string())).unwrap();
        assert_eq!(json, r#"{"constant":"c"}"#);

        let json = serde_json::to_string(&BasisSource::Literal {
            magnitude: 1.5,
            unit: "kg".to_string(),
            symbol: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"literal":{"magnitude":1.5,"unit":"kg"}}"#);
    }

    #[test]
    fn test_with_label() {
        let c = BasisQuantity::constant("c").unwrap().with_label("_c");
        assert_eq!(c.label(), "_c");
        assert_eq!(c.source(), &BasisSource::Constant("c".to_string()));
    }
}
