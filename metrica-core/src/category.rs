//! Measurement categories
//!
//! The set of categories is closed: every unit belongs to exactly one of them
//! and conversions never cross category boundaries.

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::ConversionError;

/// A class of physically comparable units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Weight,
    Temperature,
    Pressure,
}

impl Category {
    /// All categories, in menu order
    pub const ALL: [Category; 4] = [
        Category::Length,
        Category::Weight,
        Category::Temperature,
        Category::Pressure,
    ];

    /// Human-readable name ("Length", "Weight", ...)
    pub fn name(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Weight => "Weight",
            Category::Temperature => "Temperature",
            Category::Pressure => "Pressure",
        }
    }

    /// Position in the main menu (1-based)
    pub fn menu_number(&self) -> usize {
        match self {
            Category::Length => 1,
            Category::Weight => 2,
            Category::Temperature => 3,
            Category::Pressure => 4,
        }
    }

    /// Look up a category by its 1-based menu number
    pub fn from_menu_number(n: usize) -> Option<Category> {
        Self::ALL.iter().copied().find(|c| c.menu_number() == n)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = ConversionError;

    /// Accepts the category name in any case, or its menu number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(n) = trimmed.parse::<usize>() {
            return Category::from_menu_number(n)
                .ok_or_else(|| ConversionError::unknown_category(trimmed));
        }

        match trimmed.to_lowercase().as_str() {
            "length" | "distance" => Ok(Category::Length),
            "weight" | "mass" => Ok(Category::Weight),
            "temperature" | "temp" => Ok(Category::Temperature),
            "pressure" => Ok(Category::Pressure),
            _ => Err(ConversionError::unknown_category(trimmed)),
        }
    }
}
