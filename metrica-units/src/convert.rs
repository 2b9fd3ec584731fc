//! Conversion operation: source -> base -> target

use metrica_core::{ensure_finite, Category, ConversionResult, ValueStage};
use tracing::{debug, trace};

use crate::{PhysicalLimit, Quantity, Unit, UnitRegistry, UNITS};

impl UnitRegistry {
    /// Convert `value` from one unit to another within `category`
    ///
    /// Checks run in a fixed order: category, both units, finiteness of the
    /// input, then the physical limit of the normalized value. Converting a
    /// unit to itself returns `value` untouched once those checks pass.
    pub fn convert(&self, category: Category, from: &str, to: &str, value: f64) -> ConversionResult<f64> {
        let limit = self.limit_of(category)?;
        let from_unit = self.unit(category, from)?;
        let to_unit = self.unit(category, to)?;
        convert_units(category, limit, from_unit, to_unit, value)
    }

    /// Same as `convert`, with the category given as text
    pub fn convert_named(&self, category: &str, from: &str, to: &str, value: f64) -> ConversionResult<f64> {
        let category: Category = category.parse()?;
        self.convert(category, from, to, value)
    }

    /// Normalize a value to the base unit of its category
    pub fn to_base(&self, category: Category, unit: &str, value: f64) -> ConversionResult<f64> {
        let limit = self.limit_of(category)?;
        let unit = self.unit(category, unit)?;
        ensure_finite(value, ValueStage::Input)?;
        let base = ensure_finite(unit.to_base(value), ValueStage::Normalized)?;
        limit.check(category, base)?;
        Ok(base)
    }

    /// Express a base-unit value in `unit`
    pub fn from_base(&self, category: Category, unit: &str, base: f64) -> ConversionResult<f64> {
        let limit = self.limit_of(category)?;
        let unit = self.unit(category, unit)?;
        ensure_finite(base, ValueStage::Normalized)?;
        limit.check(category, base)?;
        ensure_finite(unit.from_base(base), ValueStage::Result)
    }

    /// Build a quantity in a registered unit, checking the value
    pub fn quantity(&self, category: Category, unit: &str, value: f64) -> ConversionResult<Quantity> {
        self.to_base(category, unit, value)?;
        let unit = self.unit(category, unit)?;
        Ok(Quantity::new(value, unit.clone()))
    }

    /// Convert a quantity into another unit of the same category
    ///
    /// The quantity's value goes through the same checks as `convert`, so an
    /// unchecked `Quantity::new` is a valid input.
    pub fn convert_quantity(&self, quantity: &Quantity, to: &str) -> ConversionResult<Quantity> {
        let category = quantity.unit.category;
        let limit = self.limit_of(category)?;
        let target = self.unit(category, to)?;
        let value = convert_units(category, limit, &quantity.unit, target, quantity.value)?;
        Ok(Quantity::new(value, target.clone()))
    }
}

fn convert_units(
    category: Category,
    limit: PhysicalLimit,
    from_unit: &Unit,
    to_unit: &Unit,
    value: f64,
) -> ConversionResult<f64> {
    ensure_finite(value, ValueStage::Input)?;
    let base = ensure_finite(from_unit.to_base(value), ValueStage::Normalized)?;
    trace!(%category, from = %from_unit, value, base, "normalized");
    limit.check(category, base)?;

    if same_unit(from_unit, to_unit) {
        return Ok(value);
    }

    let result = ensure_finite(to_unit.from_base(base), ValueStage::Result)?;
    debug!(%category, from = %from_unit, to = %to_unit, value, result, "converted");
    Ok(result)
}

fn same_unit(a: &Unit, b: &Unit) -> bool {
    std::ptr::eq(a, b) || (a.is_compatible(b) && a.symbol == b.symbol)
}

/// Convert using the shared standard registry
pub fn convert(category: Category, from: &str, to: &str, value: f64) -> ConversionResult<f64> {
    UNITS.convert(category, from, to, value)
}

/// Convert using the shared standard registry, category given as text
pub fn convert_named(category: &str, from: &str, to: &str, value: f64) -> ConversionResult<f64> {
    UNITS.convert_named(category, from, to, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use metrica_core::{nearly_equal, ConversionError, Tolerances};
    use proptest::prelude::*;

    #[test]
    fn test_celsius_absolute_zero() {
        assert_eq!(convert(Category::Temperature, "C", "K", -273.15).unwrap(), 0.0);

        let err = convert(Category::Temperature, "C", "K", -300.0).unwrap_err();
        assert!(matches!(err, ConversionError::PhysicalLimit { category: Category::Temperature, .. }));
    }

    #[test]
    fn test_fahrenheit_absolute_zero_is_exact() {
        assert_eq!(convert(Category::Temperature, "F", "K", -459.67).unwrap(), 0.0);
        assert!(convert(Category::Temperature, "F", "K", -459.68).is_err());
    }

    #[test]
    fn test_celsius_fahrenheit() {
        let f = convert(Category::Temperature, "C", "F", 0.0).unwrap();
        assert_relative_eq!(f, 32.0, epsilon = 1e-9);

        let c = convert(Category::Temperature, "F", "C", 212.0).unwrap();
        assert_relative_eq!(c, 100.0, epsilon = 1e-9);

        let c = convert(Category::Temperature, "fahrenheit", "celsius", -40.0).unwrap();
        assert_relative_eq!(c, -40.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rankine() {
        let r = convert(Category::Temperature, "K", "R", 100.0).unwrap();
        assert_relative_eq!(r, 180.0, epsilon = 1e-9);
        let f = convert(Category::Temperature, "R", "F", 0.0).unwrap();
        assert_relative_eq!(f, -459.67, epsilon = 1e-9);
    }

    #[test]
    fn test_length() {
        assert_eq!(convert(Category::Length, "km", "m", 1.0).unwrap(), 1000.0);

        let miles = convert(Category::Length, "meters", "miles", 1609.34).unwrap();
        assert_relative_eq!(miles, 1.0, epsilon = 1e-5);

        let feet = convert(Category::Length, "in", "ft", 12.0).unwrap();
        assert_relative_eq!(feet, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_weight() {
        let lb = convert(Category::Weight, "kg", "lb", 1.0).unwrap();
        assert_relative_eq!(lb, 2.20462, epsilon = 1e-5);

        let oz = convert(Category::Weight, "pound", "ounce", 1.0).unwrap();
        assert_relative_eq!(oz, 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pressure() {
        let pa = convert(Category::Pressure, "atm", "Pa", 1.0).unwrap();
        assert_relative_eq!(pa, 101_325.0, epsilon = 1e-9);

        let bar = convert(Category::Pressure, "atmosphere", "bar", 1.0).unwrap();
        assert_relative_eq!(bar, 1.01325, epsilon = 1e-12);

        let psi = convert(Category::Pressure, "atm", "psi", 1.0).unwrap();
        assert_relative_eq!(psi, 14.6959, epsilon = 1e-4);
    }

    #[test]
    fn test_infinite_input_rejected() {
        let err = convert(Category::Length, "m", "m", f64::INFINITY).unwrap_err();
        assert_eq!(err, ConversionError::non_finite(ValueStage::Input, f64::INFINITY));

        let err = convert(Category::Weight, "kg", "lb", f64::NAN).unwrap_err();
        assert!(matches!(err, ConversionError::NonFiniteValue { stage: ValueStage::Input, .. }));
    }

    #[test]
    fn test_overflow_rejected() {
        let err = convert(Category::Length, "nmi", "mm", f64::MAX).unwrap_err();
        assert!(matches!(err, ConversionError::NonFiniteValue { stage: ValueStage::Normalized, .. }));

        let err = convert(Category::Length, "m", "mm", f64::MAX).unwrap_err();
        assert!(matches!(err, ConversionError::NonFiniteValue { stage: ValueStage::Result, .. }));
    }

    #[test]
    fn test_unknown_category() {
        let err = convert_named("Height", "Meters", "Feet", 1.0).unwrap_err();
        assert_eq!(err, ConversionError::unknown_category("Height"));
    }

    #[test]
    fn test_unknown_category_in_custom_registry() {
        let registry = UnitRegistry::builder()
            .category(Category::Length, PhysicalLimit::NON_NEGATIVE)
            .base_unit(Unit::new("m", "meter", "meters", Category::Length, 1.0))
            .build()
            .unwrap();
        let err = registry.convert(Category::Weight, "kg", "lb", 1.0).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownCategory { .. }));
    }

    #[test]
    fn test_unknown_unit() {
        let err = convert(Category::Length, "m", "parsec", 1.0).unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit(Category::Length, "parsec"));

        // Units from another category are not members
        let err = convert(Category::Length, "K", "m", 1.0).unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit(Category::Length, "K"));
    }

    #[test]
    fn test_unit_checked_before_value() {
        let err = convert(Category::Length, "m", "parsec", f64::NAN).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { .. }));
    }

    #[test]
    fn test_negative_scalar_rejected() {
        for (category, unit) in [
            (Category::Length, "m"),
            (Category::Weight, "oz"),
            (Category::Pressure, "bar"),
        ] {
            let err = convert(category, unit, unit, -1.0).unwrap_err();
            assert!(matches!(err, ConversionError::PhysicalLimit { .. }));
        }
    }

    #[test]
    fn test_same_unit_through_alias_is_exact() {
        let value = 0.1 + 0.2;
        assert_eq!(convert(Category::Length, "m", "metres", value).unwrap(), value);
        assert_eq!(convert(Category::Temperature, "F", "°F", 98.6).unwrap(), 98.6);
    }

    #[test]
    fn test_to_and_from_base() {
        assert_relative_eq!(UNITS.to_base(Category::Temperature, "C", 25.0).unwrap(), 298.15, epsilon = 1e-9);
        assert_relative_eq!(UNITS.from_base(Category::Temperature, "C", 298.15).unwrap(), 25.0, epsilon = 1e-9);
        assert!(UNITS.from_base(Category::Temperature, "C", -1.0).is_err());
        assert!(UNITS.to_base(Category::Pressure, "psi", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_convert_quantity() {
        let boiling = UNITS.quantity(Category::Temperature, "celsius", 100.0).unwrap();
        let converted = UNITS.convert_quantity(&boiling, "F").unwrap();
        assert_eq!(converted.unit.symbol, "F");
        assert_relative_eq!(converted.value, 212.0, epsilon = 1e-9);

        assert!(UNITS.quantity(Category::Temperature, "K", -0.5).is_err());
        assert!(UNITS.convert_quantity(&boiling, "Pa").is_err());
    }

    #[test]
    fn test_convert_quantity_checks_unchecked_value() {
        let kelvin = UNITS.unit(Category::Temperature, "K").unwrap().clone();
        let err = UNITS.convert_quantity(&Quantity::new(-1.0, kelvin.clone()), "C").unwrap_err();
        assert!(matches!(err, ConversionError::PhysicalLimit { .. }));

        // Target unit is resolved before the value is inspected
        let err = UNITS.convert_quantity(&Quantity::new(f64::NAN, kelvin), "kelvinish").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { .. }));
    }

    fn unit_pairs() -> Vec<(Category, String, String)> {
        let mut pairs = Vec::new();
        for category in UNITS.categories() {
            let units = UNITS.units_for(category).unwrap();
            for a in units {
                for b in units {
                    pairs.push((category, a.symbol.clone(), b.symbol.clone()));
                }
            }
        }
        pairs
    }

    fn all_units() -> Vec<(Category, String)> {
        unit_pairs()
            .into_iter()
            .filter(|(_, a, b)| a == b)
            .map(|(c, a, _)| (c, a))
            .collect()
    }

    fn round_trip(category: Category, a: &str, b: &str, base: f64) -> (f64, f64) {
        let v = UNITS.from_base(category, a, base).unwrap();
        let there = UNITS.convert(category, a, b, v).unwrap();
        let back = UNITS.convert(category, b, a, there).unwrap();
        (v, back)
    }

    #[test]
    fn test_round_trip_at_floor() {
        for (category, a, b) in unit_pairs() {
            let (v, back) = round_trip(category, &a, &b, 0.0);
            assert!(
                nearly_equal(back, v, Tolerances::default()),
                "{category} {a} -> {b} -> {a}: {v} came back as {back}"
            );
        }
    }

    #[test]
    fn test_floor_values_stay_in_range() {
        let c = convert(Category::Temperature, "C", "F", -273.15).unwrap();
        assert_eq!(convert(Category::Temperature, "F", "C", c).unwrap(), -273.15);

        let f = convert(Category::Temperature, "R", "F", 0.0).unwrap();
        assert_eq!(convert(Category::Temperature, "F", "R", f).unwrap(), 0.0);

        for (category, unit) in all_units() {
            let v = UNITS.from_base(category, &unit, 0.0).unwrap();
            assert_eq!(UNITS.convert(category, &unit, &unit, v).unwrap(), v);
        }
    }

    #[test]
    fn test_round_trip_just_above_floor() {
        for i in 0..200 {
            let base = f64::from(i) * 1e-3;
            for (category, a, b) in unit_pairs() {
                let (v, back) = round_trip(category, &a, &b, base);
                assert!(nearly_equal(back, v, Tolerances::default()), "{a} -> {b} at base {base}");
            }
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip((category, a, b) in prop::sample::select(unit_pairs()), base in 0.0..1e9f64) {
            let (v, back) = round_trip(category, &a, &b, base);
            prop_assert!(nearly_equal(back, v, Tolerances::default()));
        }

        #[test]
        fn prop_identity_is_exact((category, unit) in prop::sample::select(all_units()), base in 0.0..1e12f64) {
            let v = UNITS.from_base(category, &unit, base).unwrap();
            prop_assert_eq!(UNITS.convert(category, &unit, &unit, v).unwrap(), v);
        }

        #[test]
        fn prop_km_m_ratio(k in 1e-6..1e6f64) {
            let m = convert(Category::Length, "km", "m", k).unwrap();
            prop_assert!((m / k - 1000.0).abs() < 1e-9);
        }
    }
}
