//! Unit definitions - common SI, CGS, astronomical and particle-physics units

use std::collections::HashMap;
use std::sync::LazyLock;
use crate::{DimensionVector, Unit};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

const ELECTRONVOLT: f64 = 1.602176634e-19;
const JULIAN_YEAR: f64 = 31_557_600.0;
const PARSEC: f64 = 3.085_677_581_491_367_3e16;
const ASTRONOMICAL_UNIT: f64 = 1.495_978_707e11;
const DEGREE: f64 = std::f64::consts::PI / 180.0;

/// Registry of all known units
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    aliases: HashMap<String, String>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    pub fn new() -> Self {
        let mut registry = UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_all_units();
        registry
    }

    /// Get a unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        // Try direct lookup first
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        // Try alias lookup
        if let Some(canonical) = self.aliases.get(symbol) {
            return self.units.get(canonical);
        }
        None
    }

    /// Check whether a symbol (or alias) is registered
    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.values()
            .filter(|u| u.category == category)
            .collect()
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }

    fn register(&mut self, symbol: &str, name: &str, dimension: DimensionVector, scale: f64, category: &str) {
        self.units.insert(symbol.to_string(), Unit::new(symbol, name, dimension, scale, category));
    }

    fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    fn register_all_units(&mut self) {
        self.register_length_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_temperature_units();
        self.register_current_units();
        self.register_amount_units();
        self.register_luminosity_units();
        self.register_angle_units();
        self.register_area_units();
        self.register_volume_units();
        self.register_velocity_units();
        self.register_acceleration_units();
        self.register_force_units();
        self.register_energy_units();
        self.register_power_units();
        self.register_pressure_units();
        self.register_frequency_units();
        self.register_electromagnetic_units();
    }

    fn register_length_units(&mut self) {
        let l = DimensionVector::LENGTH;

        // SI length units
        self.register("m", "meter", l, 1.0, "length");
        self.register("km", "kilometer", l, 1e3, "length");
        self.register("cm", "centimeter", l, 1e-2, "length");
        self.register("mm", "millimeter", l, 1e-3, "length");
        self.register("um", "micrometer", l, 1e-6, "length");
        self.register("nm", "nanometer", l, 1e-9, "length");
        self.register("pm", "picometer", l, 1e-12, "length");
        self.register("fm", "femtometer", l, 1e-15, "length");
        self.register("AA", "angstrom", l, 1e-10, "length");

        // Imperial/US length units
        self.register("in", "inch", l, 0.0254, "length");
        self.register("ft", "foot", l, 0.3048, "length");
        self.register("yd", "yard", l, 0.9144, "length");
        self.register("mi", "mile", l, 1609.344, "length");
        self.register("nmi", "nautical mile", l, 1852.0, "length");

        // Astronomical length units
        self.register("au", "astronomical unit", l, ASTRONOMICAL_UNIT, "length");
        self.register("lyr", "light year", l, 299_792_458.0 * JULIAN_YEAR, "length");
        self.register("pc", "parsec", l, PARSEC, "length");
        self.register("kpc", "kiloparsec", l, PARSEC * 1e3, "length");
        self.register("Mpc", "megaparsec", l, PARSEC * 1e6, "length");
        self.register("Gpc", "gigaparsec", l, PARSEC * 1e9, "length");
        self.register("solRad", "solar radius", l, 6.957e8, "length");

        // Aliases
        self.alias("meter", "m");
        self.alias("meters", "m");
        self.alias("metre", "m");
        self.alias("metres", "m");
        self.alias("kilometer", "km");
        self.alias("kilometers", "km");
        self.alias("centimeter", "cm");
        self.alias("millimeter", "mm");
        self.alias("μm", "um");
        self.alias("micron", "um");
        self.alias("Å", "AA");
        self.alias("angstrom", "AA");
        self.alias("inch", "in");
        self.alias("foot", "ft");
        self.alias("feet", "ft");
        self.alias("mile", "mi");
        self.alias("miles", "mi");
        self.alias("AU", "au");
        self.alias("ly", "lyr");
        self.alias("parsec", "pc");
        self.alias("R_sun", "solRad");
    }

    fn register_mass_units(&mut self) {
        let m = DimensionVector::MASS;

        // SI mass units
        self.register("kg", "kilogram", m, 1.0, "mass");
        self.register("g", "gram", m, 1e-3, "mass");
        self.register("mg", "milligram", m, 1e-6, "mass");
        self.register("ug", "microgram", m, 1e-9, "mass");
        self.register("t", "tonne", m, 1e3, "mass");

        // Imperial/US mass units
        self.register("lb", "pound", m, 0.45359237, "mass");
        self.register("oz", "ounce", m, 0.028349523125, "mass");

        // Atomic and astronomical mass units
        self.register("u", "atomic mass unit", m, 1.66053906660e-27, "mass");
        self.register("solMass", "solar mass", m, 1.98840987e30, "mass");
        self.register("earthMass", "earth mass", m, 5.97216787e24, "mass");
        self.register("jupiterMass", "jupiter mass", m, 1.89812460e27, "mass");

        // Aliases
        self.alias("kilogram", "kg");
        self.alias("kilograms", "kg");
        self.alias("gram", "g");
        self.alias("grams", "g");
        self.alias("μg", "ug");
        self.alias("tonne", "t");
        self.alias("pound", "lb");
        self.alias("lbs", "lb");
        self.alias("ounce", "oz");
        self.alias("Da", "u");
        self.alias("dalton", "u");
        self.alias("M_sun", "solMass");
        self.alias("Msun", "solMass");
        self.alias("M_earth", "earthMass");
    }

    fn register_time_units(&mut self) {
        let t = DimensionVector::TIME;

        self.register("s", "second", t, 1.0, "time");
        self.register("ms", "millisecond", t, 1e-3, "time");
        self.register("us", "microsecond", t, 1e-6, "time");
        self.register("ns", "nanosecond", t, 1e-9, "time");
        self.register("ps", "picosecond", t, 1e-12, "time");
        self.register("fs", "femtosecond", t, 1e-15, "time");
        self.register("min", "minute", t, 60.0, "time");
        self.register("h", "hour", t, 3600.0, "time");
        self.register("d", "day", t, 86400.0, "time");
        self.register("wk", "week", t, 604800.0, "time");
        self.register("yr", "julian year", t, JULIAN_YEAR, "time");
        self.register("Myr", "megayear", t, JULIAN_YEAR * 1e6, "time");
        self.register("Gyr", "gigayear", t, JULIAN_YEAR * 1e9, "time");

        // Aliases
        self.alias("second", "s");
        self.alias("seconds", "s");
        self.alias("sec", "s");
        self.alias("μs", "us");
        self.alias("minute", "min");
        self.alias("minutes", "min");
        self.alias("hour", "h");
        self.alias("hours", "h");
        self.alias("hr", "h");
        self.alias("day", "d");
        self.alias("days", "d");
        self.alias("week", "wk");
        self.alias("year", "yr");
        self.alias("years", "yr");
        self.alias("a", "yr");
    }

    fn register_temperature_units(&mut self) {
        let k = DimensionVector::TEMPERATURE;

        // Only proportional scales: offset scales (Celsius, Fahrenheit) are not linear units
        self.register("K", "kelvin", k, 1.0, "temperature");
        self.register("mK", "millikelvin", k, 1e-3, "temperature");
        self.register("R", "rankine", k, 5.0 / 9.0, "temperature");

        self.alias("kelvin", "K");
        self.alias("Kelvin", "K");
        self.alias("rankine", "R");
    }

    fn register_current_units(&mut self) {
        let i = DimensionVector::CURRENT;

        self.register("A", "ampere", i, 1.0, "current");
        self.register("mA", "milliampere", i, 1e-3, "current");
        self.register("uA", "microampere", i, 1e-6, "current");
        self.register("kA", "kiloampere", i, 1e3, "current");

        self.alias("ampere", "A");
        self.alias("amperes", "A");
        self.alias("amp", "A");
        self.alias("μA", "uA");
    }

    fn register_amount_units(&mut self) {
        let n = DimensionVector::AMOUNT;

        self.register("mol", "mole", n, 1.0, "amount");
        self.register("mmol", "millimole", n, 1e-3, "amount");
        self.register("umol", "micromole", n, 1e-6, "amount");
        self.register("kmol", "kilomole", n, 1e3, "amount");

        self.alias("mole", "mol");
        self.alias("moles", "mol");
        self.alias("μmol", "umol");
    }

    fn register_luminosity_units(&mut self) {
        let lumen = DimensionVector::LUMINOUS_INTENSITY.multiply(&DimensionVector::SOLID_ANGLE);

        self.register("cd", "candela", DimensionVector::LUMINOUS_INTENSITY, 1.0, "luminosity");
        // lm = cd sr, lx = lm / m^2
        self.register("lm", "lumen", lumen, 1.0, "luminosity");
        self.register("lx", "lux", lumen.divide(&DimensionVector::AREA), 1.0, "luminosity");

        self.alias("candela", "cd");
        self.alias("lumen", "lm");
        self.alias("lux", "lx");
    }

    fn register_angle_units(&mut self) {
        let a = DimensionVector::ANGLE;

        // Plane angle is a base dimension here, radian is its SI unit
        self.register("rad", "radian", a, 1.0, "angle");
        self.register("mrad", "milliradian", a, 1e-3, "angle");
        self.register("deg", "degree", a, DEGREE, "angle");
        self.register("arcmin", "arcminute", a, DEGREE / 60.0, "angle");
        self.register("arcsec", "arcsecond", a, DEGREE / 3600.0, "angle");
        self.register("mas", "milliarcsecond", a, DEGREE / 3.6e6, "angle");
        self.register("grad", "gradian", a, std::f64::consts::PI / 200.0, "angle");
        self.register("turn", "turn", a, std::f64::consts::TAU, "angle");
        self.register("sr", "steradian", DimensionVector::SOLID_ANGLE, 1.0, "angle");

        self.alias("radian", "rad");
        self.alias("radians", "rad");
        self.alias("degree", "deg");
        self.alias("degrees", "deg");
        self.alias("°", "deg");
        self.alias("steradian", "sr");
    }

    fn register_area_units(&mut self) {
        let a = DimensionVector::AREA;

        self.register("m2", "square meter", a, 1.0, "area");
        self.register("km2", "square kilometer", a, 1e6, "area");
        self.register("cm2", "square centimeter", a, 1e-4, "area");
        self.register("ha", "hectare", a, 1e4, "area");
        self.register("ac", "acre", a, 4046.8564224, "area");
        self.register("ft2", "square foot", a, 0.09290304, "area");
        self.register("barn", "barn", a, 1e-28, "area");

        self.alias("m²", "m2");
        self.alias("km²", "km2");
        self.alias("cm²", "cm2");
        self.alias("ft²", "ft2");
        self.alias("hectare", "ha");
        self.alias("acre", "ac");
        self.alias("b", "barn");
    }

    fn register_volume_units(&mut self) {
        let v = DimensionVector::VOLUME;

        self.register("m3", "cubic meter", v, 1.0, "volume");
        self.register("L", "liter", v, 1e-3, "volume");
        self.register("mL", "milliliter", v, 1e-6, "volume");
        self.register("cm3", "cubic centimeter", v, 1e-6, "volume");
        self.register("gal", "gallon", v, 0.003785411784, "volume");

        self.alias("m³", "m3");
        self.alias("liter", "L");
        self.alias("litre", "L");
        self.alias("l", "L");
        self.alias("ml", "mL");
        self.alias("cc", "cm3");
        self.alias("cm³", "cm3");
        self.alias("gallon", "gal");
    }

    fn register_velocity_units(&mut self) {
        let v = DimensionVector::VELOCITY;

        self.register("m/s", "meter per second", v, 1.0, "velocity");
        self.register("km/s", "kilometer per second", v, 1e3, "velocity");
        self.register("km/h", "kilometer per hour", v, 1e3 / 3600.0, "velocity");
        self.register("mph", "mile per hour", v, 0.44704, "velocity");
        self.register("kn", "knot", v, 1852.0 / 3600.0, "velocity");
        self.register("c", "speed of light", v, 299_792_458.0, "velocity");

        self.alias("kph", "km/h");
        self.alias("knot", "kn");
        self.alias("knots", "kn");
    }

    fn register_acceleration_units(&mut self) {
        let a = DimensionVector::ACCELERATION;

        self.register("m/s2", "meter per second squared", a, 1.0, "acceleration");
        self.register("g0", "standard gravity", a, 9.80665, "acceleration");
        self.register("Gal", "galileo", a, 1e-2, "acceleration");

        self.alias("m/s²", "m/s2");
    }

    fn register_force_units(&mut self) {
        let f = DimensionVector::FORCE;

        self.register("N", "newton", f, 1.0, "force");
        self.register("kN", "kilonewton", f, 1e3, "force");
        self.register("mN", "millinewton", f, 1e-3, "force");
        self.register("dyn", "dyne", f, 1e-5, "force");
        self.register("lbf", "pound-force", f, 4.4482216152605, "force");

        self.alias("newton", "N");
        self.alias("newtons", "N");
        self.alias("dyne", "dyn");
    }

    fn register_energy_units(&mut self) {
        let e = DimensionVector::ENERGY;

        self.register("J", "joule", e, 1.0, "energy");
        self.register("kJ", "kilojoule", e, 1e3, "energy");
        self.register("MJ", "megajoule", e, 1e6, "energy");
        self.register("erg", "erg", e, 1e-7, "energy");
        self.register("cal", "calorie", e, 4.184, "energy");
        self.register("kcal", "kilocalorie", e, 4184.0, "energy");
        self.register("Wh", "watt-hour", e, 3600.0, "energy");
        self.register("kWh", "kilowatt-hour", e, 3.6e6, "energy");
        self.register("BTU", "British thermal unit", e, 1055.05585262, "energy");

        // Particle physics
        self.register("meV", "millielectronvolt", e, ELECTRONVOLT * 1e-3, "energy");
        self.register("eV", "electronvolt", e, ELECTRONVOLT, "energy");
        self.register("keV", "kiloelectronvolt", e, ELECTRONVOLT * 1e3, "energy");
        self.register("MeV", "megaelectronvolt", e, ELECTRONVOLT * 1e6, "energy");
        self.register("GeV", "gigaelectronvolt", e, ELECTRONVOLT * 1e9, "energy");
        self.register("TeV", "teraelectronvolt", e, ELECTRONVOLT * 1e12, "energy");
        self.register("Ry", "rydberg", e, 13.605693122994 * ELECTRONVOLT, "energy");

        self.alias("joule", "J");
        self.alias("joules", "J");
        self.alias("calorie", "cal");
        self.alias("electronvolt", "eV");
    }

    fn register_power_units(&mut self) {
        let p = DimensionVector::POWER;

        self.register("W", "watt", p, 1.0, "power");
        self.register("kW", "kilowatt", p, 1e3, "power");
        self.register("MW", "megawatt", p, 1e6, "power");
        self.register("mW", "milliwatt", p, 1e-3, "power");
        self.register("hp", "horsepower", p, 745.699872, "power");
        self.register("solLum", "solar luminosity", p, 3.828e26, "power");

        self.alias("watt", "W");
        self.alias("watts", "W");
        self.alias("L_sun", "solLum");
    }

    fn register_pressure_units(&mut self) {
        let p = DimensionVector::PRESSURE;

        self.register("Pa", "pascal", p, 1.0, "pressure");
        self.register("kPa", "kilopascal", p, 1e3, "pressure");
        self.register("MPa", "megapascal", p, 1e6, "pressure");
        self.register("hPa", "hectopascal", p, 1e2, "pressure");
        self.register("bar", "bar", p, 1e5, "pressure");
        self.register("mbar", "millibar", p, 1e2, "pressure");
        self.register("atm", "atmosphere", p, 101325.0, "pressure");
        self.register("psi", "pounds per square inch", p, 6894.757293168, "pressure");
        self.register("mmHg", "millimeter of mercury", p, 133.322387415, "pressure");
        self.register("torr", "torr", p, 101325.0 / 760.0, "pressure");
        self.register("Ba", "barye", p, 0.1, "pressure");

        self.alias("pascal", "Pa");
        self.alias("atmosphere", "atm");
        self.alias("Torr", "torr");
    }

    fn register_frequency_units(&mut self) {
        let f = DimensionVector::FREQUENCY;

        self.register("Hz", "hertz", f, 1.0, "frequency");
        self.register("kHz", "kilohertz", f, 1e3, "frequency");
        self.register("MHz", "megahertz", f, 1e6, "frequency");
        self.register("GHz", "gigahertz", f, 1e9, "frequency");
        self.register("THz", "terahertz", f, 1e12, "frequency");

        self.alias("hertz", "Hz");
    }

    fn register_electromagnetic_units(&mut self) {
        let magnetic_flux = DimensionVector::MAGNETIC_FLUX_DENSITY.multiply(&DimensionVector::AREA);
        let inductance = magnetic_flux.divide(&DimensionVector::CURRENT);

        // Charge
        self.register("C", "coulomb", DimensionVector::CHARGE, 1.0, "electromagnetic");
        self.register("mC", "millicoulomb", DimensionVector::CHARGE, 1e-3, "electromagnetic");
        self.register("uC", "microcoulomb", DimensionVector::CHARGE, 1e-6, "electromagnetic");
        self.register("Fr", "franklin", DimensionVector::CHARGE, 3.3356409519815204e-10, "electromagnetic");

        // Voltage
        self.register("V", "volt", DimensionVector::VOLTAGE, 1.0, "electromagnetic");
        self.register("mV", "millivolt", DimensionVector::VOLTAGE, 1e-3, "electromagnetic");
        self.register("kV", "kilovolt", DimensionVector::VOLTAGE, 1e3, "electromagnetic");

        // Resistance and conductance
        self.register("ohm", "ohm", DimensionVector::RESISTANCE, 1.0, "electromagnetic");
        self.register("kohm", "kiloohm", DimensionVector::RESISTANCE, 1e3, "electromagnetic");
        self.register("S", "siemens", DimensionVector::RESISTANCE.invert(), 1.0, "electromagnetic");

        // Capacitance, magnetism
        self.register("F", "farad", DimensionVector::CAPACITANCE, 1.0, "electromagnetic");
        self.register("uF", "microfarad", DimensionVector::CAPACITANCE, 1e-6, "electromagnetic");
        self.register("T", "tesla", DimensionVector::MAGNETIC_FLUX_DENSITY, 1.0, "electromagnetic");
        self.register("G", "gauss", DimensionVector::MAGNETIC_FLUX_DENSITY, 1e-4, "electromagnetic");
        self.register("Wb", "weber", magnetic_flux, 1.0, "electromagnetic");
        self.register("H", "henry", inductance, 1.0, "electromagnetic");

        self.alias("coulomb", "C");
        self.alias("μC", "uC");
        self.alias("statC", "Fr");
        self.alias("volt", "V");
        self.alias("volts", "V");
        self.alias("Ω", "ohm");
        self.alias("ohms", "ohm");
        self.alias("kΩ", "kohm");
        self.alias("farad", "F");
        self.alias("μF", "uF");
        self.alias("tesla", "T");
        self.alias("gauss", "G");
    }
}
