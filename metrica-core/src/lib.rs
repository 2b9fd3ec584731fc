//! Metrica Core - Fundamental types
//!
//! This crate provides the types shared by the conversion engine and its
//! front ends:
//! - `Category`: the closed set of measurement categories
//! - `ConversionError`: request-scoped failures with machine-readable codes
//! - numeric helpers for finiteness checks and tolerant comparison

mod category;
mod error;
mod numeric;

pub use category::Category;
pub use error::{codes, ConversionError, ConversionResult, ErrorReport, ValueStage};
pub use numeric::{ensure_finite, nearly_equal, Tolerances};
