//! Unit string parsing - parse expressions like "km/h", "kg m^2 s^-2" or "s^(1/2)"

use num_rational::Rational64;
use crate::dimension::{rationalize, Exponent};
use crate::units::UNITS;
use crate::{DimensionVector, Quantity, Unit, UnitError};

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUPERSCRIPT_MINUS: char = '⁻';

/// Parse a unit string into a Unit
///
/// Supported formats:
/// - Simple: "m", "kg", "eV"
/// - Powers: "m^2", "s^-1", "m²", "s^(1/2)", "m^(-3/2)"
/// - Products: "m*s", "kg·m", "kg m"
/// - Quotients: "m/s", "kg/m^2" (everything after '/' is the denominator)
/// - Groups: "(kg m)^2", "(m/s) s"
/// - Numeric factors: "1e-3 m"
pub fn parse_unit(s: &str) -> Result<Unit, UnitError> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(Unit::dimensionless());
    }

    // Try simple lookup first
    if let Some(unit) = UNITS.get(s) {
        return Ok(unit.clone());
    }

    let mut parser = Parser::new(s);
    let unit = parser.expression()?;
    if parser.pos < parser.chars.len() {
        return Err(parser.error(format!("unexpected '{}'", parser.chars[parser.pos])));
    }
    Ok(unit)
}

/// Parse a quantity string like "5 m", "100kg" or "1.5e3 eV/c^2"
pub fn parse_quantity_string(s: &str) -> Result<Quantity, UnitError> {
    let s = s.trim();

    let numeric_end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')))
        .map(|(i, _)| i)
        .unwrap_or(s.len());

    // Longest numeric prefix that actually parses ("5eV" is 5 eV, not 5e V)
    let (value, split) = (1..=numeric_end)
        .rev()
        .filter(|end| s.is_char_boundary(*end))
        .find_map(|end| s[..end].parse::<f64>().ok().map(|v| (v, end)))
        .ok_or_else(|| UnitError::InvalidExpression {
            expression: s.to_string(),
            reason: "no number found".to_string(),
        })?;

    Ok(Quantity::new(value, parse_unit(&s[split..])?))
}

/// Recursive-descent parser over unit expressions
struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Parser {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> UnitError {
        UnitError::InvalidExpression {
            expression: self.source.to_string(),
            reason: reason.into(),
        }
    }

    fn overflow(&self) -> UnitError {
        self.error("exponent overflow")
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '*' || c == '·' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// expression := term (separator? term | '/' term)*
    fn expression(&mut self) -> Result<Unit, UnitError> {
        let mut numerator = Unit::dimensionless();
        let mut denominator = Unit::dimensionless();
        let mut in_denominator = false;
        let mut dangling = false;
        let mut empty = true;

        loop {
            self.skip_separators();
            match self.peek() {
                None | Some(')') => break,
                Some('/') => {
                    if empty {
                        return Err(self.error("'/' without numerator"));
                    }
                    self.pos += 1;
                    in_denominator = true;
                    dangling = true;
                }
                Some(_) => {
                    let term = self.term()?;
                    let side = if in_denominator { &mut denominator } else { &mut numerator };
                    *side = side.checked_multiply(&term).ok_or_else(|| self.overflow())?;
                    dangling = false;
                    empty = false;
                }
            }
        }

        if empty {
            return Err(self.error("empty expression"));
        }
        if dangling {
            return Err(self.error("'/' without denominator"));
        }

        if in_denominator {
            numerator.checked_divide(&denominator).ok_or_else(|| self.overflow())
        } else {
            Ok(numerator)
        }
    }

    /// term := atom ('^' exponent | superscript)?
    fn term(&mut self) -> Result<Unit, UnitError> {
        let base = self.atom()?;

        match self.peek() {
            Some('^') => {
                self.pos += 1;
                let exp = self.exponent()?;
                base.checked_power(exp).ok_or_else(|| self.overflow())
            }
            Some(c) if c == SUPERSCRIPT_MINUS || SUPERSCRIPT_DIGITS.contains(&c) => {
                let exp = self.superscript()?;
                base.checked_power(exp).ok_or_else(|| self.overflow())
            }
            _ => Ok(base),
        }
    }

    /// atom := '(' expression ')' | symbol | number
    fn atom(&mut self) -> Result<Unit, UnitError> {
        if self.peek() == Some('(') {
            self.pos += 1;
            let inner = self.expression()?;
            if self.peek() != Some(')') {
                return Err(self.error("unbalanced parenthesis"));
            }
            self.pos += 1;
            return Ok(inner);
        }

        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace()
                || matches!(c, '*' | '·' | '/' | '^' | '(' | ')')
                || c == SUPERSCRIPT_MINUS
                || SUPERSCRIPT_DIGITS.contains(&c)
            {
                break;
            }
            self.pos += 1;
        }

        let symbol: String = self.chars[start..self.pos].iter().collect();
        if symbol.is_empty() {
            return Err(self.error("expected a unit symbol"));
        }
        lookup_symbol(&symbol)
    }

    /// exponent := integer | decimal | '(' integer ('/' integer)? ')'
    fn exponent(&mut self) -> Result<Exponent, UnitError> {
        let text: String = if self.peek() == Some('(') {
            self.pos += 1;
            let start = self.pos;
            while self.peek().is_some_and(|c| c != ')') {
                self.pos += 1;
            }
            if self.peek() != Some(')') {
                return Err(self.error("unbalanced parenthesis in exponent"));
            }
            let text: String = self.chars[start..self.pos].iter().collect();
            self.pos += 1;
            text
        } else {
            let start = self.pos;
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
            {
                self.pos += 1;
            }
            self.chars[start..self.pos].iter().collect()
        };

        parse_exponent(&text).ok_or_else(|| self.error(format!("invalid exponent: '{}'", text)))
    }

    fn superscript(&mut self) -> Result<Exponent, UnitError> {
        let negative = self.peek() == Some(SUPERSCRIPT_MINUS);
        if negative {
            self.pos += 1;
        }

        let mut value: i64 = 0;
        let mut digits = 0;
        while let Some(d) = self
            .peek()
            .and_then(|c| SUPERSCRIPT_DIGITS.iter().position(|s| *s == c))
        {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(d as i64))
                .ok_or_else(|| self.overflow())?;
            digits += 1;
            self.pos += 1;
        }

        if digits == 0 {
            return Err(self.error("superscript minus without digits"));
        }
        Ok(Rational64::from_integer(if negative { -value } else { value }))
    }
}

fn parse_exponent(text: &str) -> Option<Exponent> {
    let text = text.trim();
    if let Some((num, den)) = text.split_once('/') {
        let num: i64 = num.trim().parse().ok()?;
        let den: i64 = den.trim().parse().ok()?;
        // i64::MIN cannot be negated while reducing
        if den == 0 || num == i64::MIN || den == i64::MIN {
            return None;
        }
        return Some(Rational64::new(num, den));
    }
    if let Ok(n) = text.parse::<i64>() {
        return Some(Rational64::from_integer(n));
    }
    text.parse::<f64>().ok().and_then(rationalize)
}

/// Look up a single symbol: "1", a numeric factor, or a registry unit/alias
fn lookup_symbol(s: &str) -> Result<Unit, UnitError> {
    if s == "1" {
        return Ok(Unit::dimensionless());
    }

    if s.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return s
            .parse::<f64>()
            .map(|v| Unit::new(s, s, DimensionVector::DIMENSIONLESS, v, "scale"))
            .map_err(|_| UnitError::UnknownUnit(s.to_string()));
    }

    UNITS
        .get(s)
        .cloned()
        .ok_or_else(|| UnitError::UnknownUnit(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BaseDimension;

    #[test]
    fn test_parse_simple_unit() {
        let unit = parse_unit("m").unwrap();
        assert_eq!(unit.symbol, "m");
        assert_eq!(unit.dimension, DimensionVector::LENGTH);
    }

    #[test]
    fn test_parse_unit_with_power() {
        let unit = parse_unit("m^2").unwrap();
        assert_eq!(unit.dimension, DimensionVector::AREA);

        let unit = parse_unit("s^-1").unwrap();
        assert_eq!(unit.dimension, DimensionVector::FREQUENCY);

        let unit = parse_unit("m³").unwrap();
        assert_eq!(unit.dimension, DimensionVector::VOLUME);

        let unit = parse_unit("s⁻²").unwrap();
        assert_eq!(unit.dimension, DimensionVector::TIME.power(Rational64::from_integer(-2)));
    }

    #[test]
    fn test_parse_rational_power() {
        let unit = parse_unit("s^(1/2)").unwrap();
        assert_eq!(unit.dimension.get(BaseDimension::Time), Rational64::new(1, 2));

        let unit = parse_unit("kg^(-3/2) m^0.5").unwrap();
        assert_eq!(unit.dimension.get(BaseDimension::Mass), Rational64::new(-3, 2));
        assert_eq!(unit.dimension.get(BaseDimension::Length), Rational64::new(1, 2));
    }

    #[test]
    fn test_parse_quotient() {
        let unit = parse_unit("m/s").unwrap();
        assert_eq!(unit.dimension, DimensionVector::VELOCITY);

        // Everything after '/' is the denominator
        let unit = parse_unit("kg/m s^2").unwrap();
        assert_eq!(unit.dimension, DimensionVector::PRESSURE);
    }

    #[test]
    fn test_parse_product() {
        let unit = parse_unit("kg*m").unwrap();
        let expected = DimensionVector::MASS.multiply(&DimensionVector::LENGTH);
        assert_eq!(unit.dimension, expected);

        let unit = parse_unit("kg·m^2 s^-2").unwrap();
        assert_eq!(unit.dimension, DimensionVector::ENERGY);
    }

    #[test]
    fn test_parse_groups() {
        let unit = parse_unit("(kg m)^2").unwrap();
        assert_eq!(unit.dimension, DimensionVector::from_integers([2, 2, 0, 0, 0, 0, 0, 0]));

        let unit = parse_unit("(m/s) s").unwrap();
        assert_eq!(unit.dimension, DimensionVector::LENGTH);

        assert!(parse_unit("(kg m").is_err());
    }

    #[test]
    fn test_parse_numeric_factor() {
        let unit = parse_unit("1e-3 m").unwrap();
        assert_eq!(unit.dimension, DimensionVector::LENGTH);
        assert!((unit.scale - 1e-3).abs() < 1e-18);
    }

    #[test]
    fn test_generated_symbols_reparse() {
        let base = parse_unit("eV").unwrap();
        let composed = base
            .divide(&parse_unit("m/s").unwrap())
            .multiply(&parse_unit("cd").unwrap())
            .power(Rational64::new(-1, 2));
        let reparsed = parse_unit(&composed.symbol).unwrap();
        assert_eq!(reparsed.dimension, composed.dimension);
        assert!((reparsed.scale / composed.scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_si_string_reparses() {
        let dim = DimensionVector::CAPACITANCE.power(Rational64::new(1, 2));
        let unit = parse_unit(&dim.si_unit_string()).unwrap();
        assert_eq!(unit.dimension, dim);
        assert_eq!(unit.scale, 1.0);
    }

    #[test]
    fn test_parse_quantity_string() {
        let q = parse_quantity_string("5 m").unwrap();
        assert_eq!(q.value, 5.0);
        assert_eq!(q.unit.symbol, "m");

        let q = parse_quantity_string("100kg").unwrap();
        assert_eq!(q.value, 100.0);
        assert_eq!(q.unit.symbol, "kg");

        let q = parse_quantity_string("5eV").unwrap();
        assert_eq!(q.value, 5.0);
        assert_eq!(q.unit.symbol, "eV");

        let q = parse_quantity_string("-1.5e3 rad").unwrap();
        assert_eq!(q.value, -1500.0);
        assert_eq!(q.unit.dimension, DimensionVector::ANGLE);

        assert!(parse_quantity_string("kg").is_err());
    }

    #[test]
    fn test_alias_lookup() {
        let unit = parse_unit("meter").unwrap();
        assert_eq!(unit.symbol, "m");

        let unit = parse_unit("kilogram").unwrap();
        assert_eq!(unit.symbol, "kg");
    }

    #[test]
    fn test_unknown_unit() {
        assert!(matches!(parse_unit("unknown_xyz"), Err(UnitError::UnknownUnit(_))));
        assert!(matches!(parse_unit("m/"), Err(UnitError::InvalidExpression { .. })));
        assert!(matches!(parse_unit("s^x"), Err(UnitError::InvalidExpression { .. })));
    }

    #[test]
    fn test_exponent_overflow_is_an_error() {
        for expression in [
            "m^4611686018427387904 m^4611686018427387904",
            "m^4611686018427387904 / m^-4611686018427387904",
            "(m^4611686018427387904)^2",
            "m¹⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰⁰",
            "m^(-9223372036854775808/-1)",
        ] {
            match parse_unit(expression) {
                Err(UnitError::InvalidExpression { .. }) => {}
                other => panic!("{expression}: expected InvalidExpression, got {other:?}"),
            }
        }
        let unit = parse_unit("m^4611686018427387904").unwrap();
        assert_eq!(
            unit.dimension.get(BaseDimension::Length),
            Rational64::from_integer(4_611_686_018_427_387_904)
        );
    }
}
