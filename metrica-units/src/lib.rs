//! Metrica Units - Unit registry and conversion engine
//!
//! Every unit is defined by an affine map onto its category's base unit
//! (`base = value * scale + offset`), and every conversion pivots through
//! that base unit. Values are checked for finiteness and against the
//! category's physical limit before a result is produced.
//!
//! Categories and base units:
//! - Length (m, km, mi, cm, mm, ft, in, yd, nmi) - meter
//! - Weight (kg, lb, oz, g, mg, t, st) - kilogram
//! - Temperature (C, F, K, R) - kelvin, floored at absolute zero
//! - Pressure (Pa, bar, atm, kPa, psi, mmHg) - pascal

mod unit;
mod limit;
mod registry;
mod units;
mod quantity;
mod convert;

pub use unit::Unit;
pub use limit::PhysicalLimit;
pub use registry::{RegistryBuilder, UnitRegistry};
pub use units::{standard_builder, UNITS};
pub use quantity::{format_value, Quantity};
pub use convert::{convert, convert_named};

pub use metrica_core::{Category, ConversionError, ConversionResult};
