//! Quantity type - a value with an associated unit

use std::fmt;
use serde::{Deserialize, Serialize};

use crate::Unit;

/// A measurement: a numeric value with its unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    /// The numeric value
    pub value: f64,
    /// The unit of measurement
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Quantity { value, unit }
    }

    /// Render with a fixed number of decimal places
    ///
    /// `None` keeps the shortest representation that round-trips.
    pub fn display_with(&self, precision: Option<usize>) -> String {
        format!("{} {}", format_value(self.value, precision), self.unit.name_for(self.value))
    }
}

/// Format a number with `precision` decimal places, or its shortest form
pub fn format_value(value: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => format!("{}", value),
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.name_for(self.value))
    }
}
