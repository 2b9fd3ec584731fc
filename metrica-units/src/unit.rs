//! Unit representation with its transformation to the category base unit

use std::fmt;
use serde::{Deserialize, Serialize};
use metrica_core::{Category, ConversionError, ConversionResult};

/// A unit of measurement within one category
///
/// The relationship to the base unit is affine: `base = value * scale + offset`.
/// Purely multiplicative units have `offset == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// The unit symbol (e.g., "m", "kg", "C"), unique within its category
    pub symbol: String,
    /// Singular name (e.g., "meter")
    pub name: String,
    /// Plural name used when displaying results (e.g., "meters")
    pub plural: String,
    /// Category the unit belongs to
    pub category: Category,
    /// Factor applied when normalizing to the base unit
    pub scale: f64,
    /// Offset added after scaling (non-zero only for temperature scales)
    pub offset: f64,
}

impl Unit {
    /// Create a new unit with proportional conversion (no offset)
    pub fn new(symbol: &str, name: &str, plural: &str, category: Category, scale: f64) -> Self {
        Self::with_offset(symbol, name, plural, category, scale, 0.0)
    }

    /// Create a unit with offset (for temperature conversions)
    pub fn with_offset(
        symbol: &str,
        name: &str,
        plural: &str,
        category: Category,
        scale: f64,
        offset: f64,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            plural: plural.to_string(),
            category,
            scale,
            offset,
        }
    }

    /// Check if this unit's transformation is the identity
    pub fn is_base(&self) -> bool {
        self.scale == 1.0 && self.offset == 0.0
    }

    /// Check if two units belong to the same category (can be converted)
    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.category == other.category
    }

    /// Convert a value from this unit to the base unit
    pub fn to_base(&self, value: f64) -> f64 {
        value * self.scale + self.offset
    }

    /// Convert a value from the base unit to this unit
    pub fn from_base(&self, base: f64) -> f64 {
        (base - self.offset) / self.scale
    }

    /// Name to use for a displayed amount
    pub fn name_for(&self, value: f64) -> &str {
        if value == 1.0 {
            &self.name
        } else {
            &self.plural
        }
    }

    /// Reject transformations that cannot be inverted
    pub fn validate(&self) -> ConversionResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(ConversionError::invalid_definition(format!(
                "{} unit '{}' has an empty symbol",
                self.category, self.name
            )));
        }
        if !self.scale.is_finite() || self.scale == 0.0 {
            return Err(ConversionError::invalid_definition(format!(
                "unit '{}' has non-invertible scale {}",
                self.symbol, self.scale
            )));
        }
        if !self.offset.is_finite() {
            return Err(ConversionError::invalid_definition(format!(
                "unit '{}' has non-finite offset {}",
                self.symbol, self.offset
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
