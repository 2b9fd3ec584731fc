//! One-shot subcommands

use std::io::Write;
use std::process::ExitCode;

use metrica_core::{Category, ConversionError, ConversionResult};
use metrica_units::{PhysicalLimit, Quantity, Unit, UnitRegistry};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output;

/// Whether a command did what was asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failed => ExitCode::FAILURE,
        }
    }
}

#[derive(Debug, Serialize)]
struct ConversionOutput {
    category: Category,
    from: Quantity,
    to: Quantity,
}

#[derive(Debug, Serialize)]
struct CategoryListing<'a> {
    category: Category,
    base: &'a str,
    limit: PhysicalLimit,
    units: &'a [Unit],
}

pub struct ConvertArgs<'a> {
    pub category: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    pub value: f64,
    pub json: bool,
}

fn convert_quantities(
    registry: &UnitRegistry,
    args: &ConvertArgs<'_>,
) -> ConversionResult<ConversionOutput> {
    let category: Category = args.category.parse()?;
    let from = Quantity::new(args.value, registry.unit(category, args.from)?.clone());
    let to = registry.convert_quantity(&from, args.to)?;
    Ok(ConversionOutput { category, from, to })
}

pub fn run_convert<O: Write, E: Write>(
    registry: &UnitRegistry,
    config: &CliConfig,
    args: &ConvertArgs<'_>,
    out: &mut O,
    err: &mut E,
) -> CliResult<Status> {
    match convert_quantities(registry, args) {
        Ok(conversion) => {
            info!(category = %conversion.category, from = %conversion.from, to = %conversion.to, "converted");
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&conversion)?)?;
            } else {
                writeln!(out, "{}", output::conversion_line(&conversion.from, &conversion.to, config.precision))?;
            }
            Ok(Status::Success)
        }
        Err(e) => {
            report_error(&e, args.json, out, err)?;
            Ok(Status::Failed)
        }
    }
}

pub fn run_units<O: Write, E: Write>(
    registry: &UnitRegistry,
    config: &CliConfig,
    category: Option<&str>,
    json: bool,
    out: &mut O,
    err: &mut E,
) -> CliResult<Status> {
    let categories = match category.map(str::parse::<Category>).transpose() {
        Ok(Some(c)) => vec![c],
        Ok(None) => registry.categories(),
        Err(e) => {
            report_error(&e, json, out, err)?;
            return Ok(Status::Failed);
        }
    };

    if json {
        let mut listings = Vec::new();
        for category in categories {
            listings.push(CategoryListing {
                category,
                base: &registry.base_unit_of(category)?.symbol,
                limit: registry.limit_of(category)?,
                units: registry.units_for(category)?,
            });
        }
        writeln!(out, "{}", serde_json::to_string_pretty(&listings)?)?;
    } else {
        let blocks = categories
            .into_iter()
            .map(|c| output::unit_listing(registry, c, config.precision))
            .collect::<ConversionResult<Vec<_>>>()?;
        writeln!(out, "{}", blocks.join("\n\n"))?;
    }
    Ok(Status::Success)
}

fn report_error<O: Write, E: Write>(
    e: &ConversionError,
    json: bool,
    out: &mut O,
    err: &mut E,
) -> CliResult<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&e.report().to_json())?)?;
    } else {
        writeln!(err, "{}", output::conversion_error(e))?;
    }
    Ok(())
}
