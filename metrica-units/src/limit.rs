//! Physical limits per category, expressed in the base unit

use serde::{Deserialize, Serialize};
use metrica_core::{Category, ConversionError, ConversionResult};

use crate::Unit;

/// Inclusive bounds on a base-unit value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalLimit {
    /// Lowest allowed base value (e.g. 0 K for temperature)
    pub min: f64,
    /// Highest allowed base value, if the category has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl PhysicalLimit {
    /// Zero floor, no ceiling: lengths, masses, absolute pressures and
    /// thermodynamic temperatures
    pub const NON_NEGATIVE: PhysicalLimit = PhysicalLimit { min: 0.0, max: None };

    pub fn at_least(min: f64) -> Self {
        PhysicalLimit { min, max: None }
    }

    pub fn between(min: f64, max: f64) -> Self {
        PhysicalLimit { min, max: Some(max) }
    }

    /// Check whether a base-unit value lies within the bounds
    pub fn contains(&self, base: f64) -> bool {
        if base.is_nan() || base < self.min {
            return false;
        }
        match self.max {
            Some(max) => base <= max,
            None => true,
        }
    }

    /// Fail with `PhysicalLimit` if `base` is out of bounds
    pub fn check(&self, category: Category, base: f64) -> ConversionResult<()> {
        if self.contains(base) {
            Ok(())
        } else {
            Err(ConversionError::PhysicalLimit {
                category,
                base_value: base,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// The lower bound expressed in `unit` (e.g. -273.15 for Celsius)
    pub fn min_in(&self, unit: &Unit) -> f64 {
        unit.from_base(self.min)
    }

    /// The upper bound expressed in `unit`
    pub fn max_in(&self, unit: &Unit) -> Option<f64> {
        self.max.map(|max| unit.from_base(max))
    }

    pub(crate) fn validate(&self, category: Category) -> ConversionResult<()> {
        if self.min.is_nan() || self.max.is_some_and(f64::is_nan) {
            return Err(ConversionError::invalid_definition(format!(
                "{} limit has a NaN bound",
                category
            )));
        }
        if let Some(max) = self.max {
            if self.min > max {
                return Err(ConversionError::invalid_definition(format!(
                    "{} limit minimum {} exceeds maximum {}",
                    category, self.min, max
                )));
            }
        }
        Ok(())
    }
}

impl Default for PhysicalLimit {
    fn default() -> Self {
        Self::NON_NEGATIVE
    }
}
