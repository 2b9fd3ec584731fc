//! Structured conversion errors
//!
//! Every failure is scoped to a single request. The engine reports it and
//! never clamps or retries; the caller decides whether to re-prompt.

use std::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Category;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const NON_FINITE: &str = "NON_FINITE";
    pub const PHYSICAL_LIMIT: &str = "PHYSICAL_LIMIT";
    pub const INVALID_DEFINITION: &str = "INVALID_DEFINITION";
}

pub type ConversionResult<T> = Result<T, ConversionError>;

/// Point in the conversion pipeline where a value was inspected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueStage {
    /// The caller-supplied value, before any arithmetic
    Input,
    /// The value after normalization to the base unit
    Normalized,
    /// The value expressed in the target unit
    Result,
}

impl fmt::Display for ValueStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueStage::Input => f.write_str("input"),
            ValueStage::Normalized => f.write_str("normalized"),
            ValueStage::Result => f.write_str("result"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Unknown category: {category}")]
    UnknownCategory { category: String },

    #[error("Unknown unit '{unit}' for {category}")]
    UnknownUnit { category: Category, unit: String },

    #[error("Non-finite {stage} value: {value}")]
    NonFiniteValue { stage: ValueStage, value: f64 },

    #[error("{category} value {base_value} is outside its physical limits {}", describe_bounds(.min, .max))]
    PhysicalLimit {
        category: Category,
        base_value: f64,
        min: f64,
        max: Option<f64>,
    },

    #[error("Invalid unit definition: {reason}")]
    InvalidDefinition { reason: String },
}

fn describe_bounds(min: &f64, max: &Option<f64>) -> String {
    match max {
        Some(max) => format!("[{}, {}]", min, max),
        None => format!("[{}, +inf)", min),
    }
}

impl ConversionError {
    pub fn unknown_category(category: impl Into<String>) -> Self {
        Self::UnknownCategory { category: category.into() }
    }

    pub fn unknown_unit(category: Category, unit: impl Into<String>) -> Self {
        Self::UnknownUnit { category, unit: unit.into() }
    }

    pub fn non_finite(stage: ValueStage, value: f64) -> Self {
        Self::NonFiniteValue { stage, value }
    }

    pub fn invalid_definition(reason: impl Into<String>) -> Self {
        Self::InvalidDefinition { reason: reason.into() }
    }

    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownCategory { .. } => codes::UNKNOWN_CATEGORY,
            Self::UnknownUnit { .. } => codes::UNKNOWN_UNIT,
            Self::NonFiniteValue { .. } => codes::NON_FINITE,
            Self::PhysicalLimit { .. } => codes::PHYSICAL_LIMIT,
            Self::InvalidDefinition { .. } => codes::INVALID_DEFINITION,
        }
    }

    /// Hint for the user on how to fix the request, if there is one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::UnknownCategory { .. } => Some(format!(
                "Use one of: {}",
                Category::ALL.map(|c| c.name()).join(", ")
            )),
            Self::UnknownUnit { category, .. } => {
                Some(format!("Use `metrica units {}` to list valid units", category.name().to_lowercase()))
            }
            Self::NonFiniteValue { stage: ValueStage::Input, .. } => {
                Some("Enter a finite number".to_string())
            }
            Self::NonFiniteValue { .. } => Some("The value is too large to convert".to_string()),
            Self::PhysicalLimit { category: Category::Temperature, .. } => {
                Some("Temperatures cannot be below absolute zero".to_string())
            }
            Self::PhysicalLimit { .. } => Some("This measurement cannot be negative".to_string()),
            Self::InvalidDefinition { .. } => None,
        }
    }

    /// Serializable view of this error
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion: self.suggestion(),
        }
    }
}

/// Structured error for display or JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ErrorReport {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self })
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}
