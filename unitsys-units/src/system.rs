//! Re-expression of quantities in a "standard" system of base units
//!
//! A standard system assigns one unit to some of the base dimensions
//! (e.g. kpc for length, solar masses for mass, years for time); every
//! other dimension keeps its SI unit.

use num_traits::Zero;
use crate::dimension::BaseDimension;
use crate::{Quantity, Unit, UnitError};

/// Convert `quantity` to the units of a standard system.
///
/// Each target unit must measure a single base dimension to the first power;
/// targets that do not (e.g. "km/s") are ignored, as are later duplicates
/// for an already-assigned dimension.
pub fn to_system(quantity: &Quantity, targets: &[Unit]) -> Result<Quantity, UnitError> {
    let mut chosen: [Option<&Unit>; 8] = [None; 8];
    for unit in targets {
        if let Some(dim) = unit.dimension.as_base() {
            chosen[dim.index()].get_or_insert(unit);
        }
    }

    let dimension = quantity.dimension();
    let mut result_unit = Unit::dimensionless();
    for dim in BaseDimension::ALL {
        let exp = dimension.get(dim);
        if exp.is_zero() {
            continue;
        }
        let base = chosen[dim.index()]
            .cloned()
            .unwrap_or_else(|| Unit::si_base(dim));
        result_unit = result_unit.multiply(&base.power(exp));
    }

    quantity.convert_to(&result_unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_unit;

    #[test]
    fn test_to_system_astronomical() {
        let q = Quantity::parse(1.0, "pc A").unwrap();
        let targets = [
            parse_unit("kpc").unwrap(),
            parse_unit("solMass").unwrap(),
            parse_unit("yr").unwrap(),
        ];
        let converted = to_system(&q, &targets).unwrap();
        assert!((converted.value - 0.001).abs() < 1e-15);
        assert_eq!(converted.unit.symbol, "kpc A");
    }

    #[test]
    fn test_to_system_keeps_si_for_unlisted() {
        let q = Quantity::parse(3.6, "km/h").unwrap();
        let converted = to_system(&q, &[parse_unit("km").unwrap()]).unwrap();
        // km/h -> km s^-1
        assert!((converted.value - 0.001).abs() < 1e-15);
        assert_eq!(converted.unit.symbol, "km s^-1");
    }

    #[test]
    fn test_to_system_ignores_compound_targets() {
        let q = Quantity::parse(2.0, "m").unwrap();
        let converted = to_system(&q, &[parse_unit("km/s").unwrap()]).unwrap();
        assert_eq!(converted.value, 2.0);
        assert_eq!(converted.unit.symbol, "m");
    }
}
