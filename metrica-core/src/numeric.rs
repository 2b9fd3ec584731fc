//! Floating-point helpers shared by the engine and its callers

use crate::{ConversionError, ValueStage};

/// Absolute and relative tolerance for comparing converted values
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass a finite value through, or report where in the pipeline it went bad
pub fn ensure_finite(value: f64, stage: ValueStage) -> Result<f64, ConversionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConversionError::non_finite(stage, value))
    }
}
