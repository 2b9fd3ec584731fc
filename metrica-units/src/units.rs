//! Standard unit definitions, organized by category

use std::sync::LazyLock;
use metrica_core::Category;

use crate::{PhysicalLimit, RegistryBuilder, Unit, UnitRegistry};

/// Shared standard registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::standard);

const FIVE_NINTHS: f64 = 5.0 / 9.0;

impl UnitRegistry {
    /// Registry with the standard length, weight, temperature and pressure units
    ///
    /// The first three units of each category are the ones offered by the
    /// interactive menu.
    pub fn standard() -> Self {
        standard_builder()
            .build()
            .expect("standard unit table is valid")
    }
}

pub fn standard_builder() -> RegistryBuilder {
    let builder = UnitRegistry::builder();
    let builder = register_length_units(builder);
    let builder = register_weight_units(builder);
    let builder = register_temperature_units(builder);
    register_pressure_units(builder)
}

fn register_length_units(builder: RegistryBuilder) -> RegistryBuilder {
    use Category::Length;

    builder
        .category(Length, PhysicalLimit::NON_NEGATIVE)
        .base_unit(Unit::new("m", "meter", "meters", Length, 1.0))
        .unit(Unit::new("km", "kilometer", "kilometers", Length, 1000.0))
        .unit(Unit::new("mi", "mile", "miles", Length, 1609.344))
        // Other SI and imperial units
        .unit(Unit::new("cm", "centimeter", "centimeters", Length, 0.01))
        .unit(Unit::new("mm", "millimeter", "millimeters", Length, 0.001))
        .unit(Unit::new("ft", "foot", "feet", Length, 0.3048))
        .unit(Unit::new("in", "inch", "inches", Length, 0.0254))
        .unit(Unit::new("yd", "yard", "yards", Length, 0.9144))
        .unit(Unit::new("nmi", "nautical mile", "nautical miles", Length, 1852.0))
        // Aliases
        .alias(Length, "metre", "m")
        .alias(Length, "metres", "m")
        .alias(Length, "kilometre", "km")
        .alias(Length, "kilometres", "km")
        .alias(Length, "centimetre", "cm")
        .alias(Length, "millimetre", "mm")
}

fn register_weight_units(builder: RegistryBuilder) -> RegistryBuilder {
    use Category::Weight;

    builder
        .category(Weight, PhysicalLimit::NON_NEGATIVE)
        .base_unit(Unit::new("kg", "kilogram", "kilograms", Weight, 1.0))
        .unit(Unit::new("lb", "pound", "pounds", Weight, 0.45359237))
        .unit(Unit::new("oz", "ounce", "ounces", Weight, 0.028349523125))
        .unit(Unit::new("g", "gram", "grams", Weight, 0.001))
        .unit(Unit::new("mg", "milligram", "milligrams", Weight, 0.000001))
        .unit(Unit::new("t", "tonne", "tonnes", Weight, 1000.0))
        .unit(Unit::new("st", "stone", "stone", Weight, 6.35029318))
        .alias(Weight, "lbs", "lb")
        .alias(Weight, "metric ton", "t")
        .alias(Weight, "kilo", "kg")
        .alias(Weight, "kilos", "kg")
}

fn register_temperature_units(builder: RegistryBuilder) -> RegistryBuilder {
    use Category::Temperature;

    builder
        .category(Temperature, PhysicalLimit::NON_NEGATIVE)
        .unit(Unit::with_offset("C", "degree Celsius", "degrees Celsius", Temperature, 1.0, 273.15))
        // Offset is the scale times 459.67 so that -459.67 normalizes to exactly 0 K
        .unit(Unit::with_offset(
            "F",
            "degree Fahrenheit",
            "degrees Fahrenheit",
            Temperature,
            FIVE_NINTHS,
            459.67 * FIVE_NINTHS,
        ))
        .base_unit(Unit::new("K", "kelvin", "kelvins", Temperature, 1.0))
        .unit(Unit::new("R", "degree Rankine", "degrees Rankine", Temperature, FIVE_NINTHS))
        .alias(Temperature, "celsius", "C")
        .alias(Temperature, "centigrade", "C")
        .alias(Temperature, "°C", "C")
        .alias(Temperature, "fahrenheit", "F")
        .alias(Temperature, "°F", "F")
        .alias(Temperature, "rankine", "R")
}

fn register_pressure_units(builder: RegistryBuilder) -> RegistryBuilder {
    use Category::Pressure;

    builder
        .category(Pressure, PhysicalLimit::NON_NEGATIVE)
        .base_unit(Unit::new("Pa", "pascal", "pascals", Pressure, 1.0))
        .unit(Unit::new("bar", "bar", "bars", Pressure, 100_000.0))
        .unit(Unit::new("atm", "atmosphere", "atmospheres", Pressure, 101_325.0))
        .unit(Unit::new("kPa", "kilopascal", "kilopascals", Pressure, 1000.0))
        .unit(Unit::new("psi", "pound per square inch", "pounds per square inch", Pressure, 6894.757293168361))
        .unit(Unit::new("mmHg", "millimeter of mercury", "millimeters of mercury", Pressure, 133.322387415))
        .alias(Pressure, "torr", "mmHg")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_builds() {
        let registry = UnitRegistry::standard();
        assert_eq!(registry.categories(), Category::ALL.to_vec());
    }

    #[test]
    fn test_base_units() {
        let expected = [
            (Category::Length, "m"),
            (Category::Weight, "kg"),
            (Category::Temperature, "K"),
            (Category::Pressure, "Pa"),
        ];
        for (category, symbol) in expected {
            assert_eq!(UNITS.base_unit_of(category).unwrap().symbol, symbol);
        }
    }

    #[test]
    fn test_menu_units_come_first() {
        let menu = |c| -> Vec<String> {
            UNITS.units_for(c).unwrap()[..3].iter().map(|u| u.symbol.clone()).collect()
        };
        assert_eq!(menu(Category::Length), ["m", "km", "mi"]);
        assert_eq!(menu(Category::Weight), ["kg", "lb", "oz"]);
        assert_eq!(menu(Category::Temperature), ["C", "F", "K"]);
        assert_eq!(menu(Category::Pressure), ["Pa", "bar", "atm"]);
    }

    #[test]
    fn test_every_unit_is_invertible() {
        for category in UNITS.categories() {
            for unit in UNITS.units_for(category).unwrap() {
                assert!(unit.validate().is_ok(), "{} is not invertible", unit.symbol);
                assert_eq!(unit.category, category);
            }
        }
    }

    #[test]
    fn test_every_category_floors_at_zero() {
        for category in UNITS.categories() {
            assert_eq!(UNITS.limit_of(category).unwrap(), PhysicalLimit::NON_NEGATIVE);
        }
    }

    #[test]
    fn test_case_sensitive_symbols_resolve() {
        assert_eq!(UNITS.unit(Category::Pressure, "kPa").unwrap().name, "kilopascal");
        assert_eq!(UNITS.unit(Category::Pressure, "mmhg").unwrap().symbol, "mmHg");
        assert_eq!(UNITS.unit(Category::Temperature, "°F").unwrap().symbol, "F");
        assert_eq!(UNITS.unit(Category::Length, "Feet").unwrap().symbol, "ft");
    }
}
