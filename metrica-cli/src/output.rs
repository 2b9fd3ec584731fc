//! Text rendering for the terminal

use colored::Colorize;
use metrica_core::{Category, ConversionError, ConversionResult};
use metrica_units::{format_value, Quantity, Unit, UnitRegistry};

/// Number of units per category offered by the interactive menu
pub const MENU_UNITS: usize = 3;

const DOUBLE_ARROW: &str = "\u{2194}";

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Units shown in the interactive menu for `category`
pub fn menu_units(registry: &UnitRegistry, category: Category) -> ConversionResult<&[Unit]> {
    let units = registry.units_for(category)?;
    Ok(&units[..units.len().min(MENU_UNITS)])
}

pub fn main_menu(registry: &UnitRegistry) -> ConversionResult<String> {
    let mut lines = vec![format!("{}", "Main Menu".bold().blue())];
    let categories = registry.categories();
    let separator = format!(" {} ", DOUBLE_ARROW);
    for (i, category) in categories.iter().enumerate() {
        let names: Vec<String> = menu_units(registry, *category)?
            .iter()
            .map(|u| capitalize(&u.plural))
            .collect();
        lines.push(format!(
            "{}. {} ({})",
            i + 1,
            category,
            names.join(separator.as_str())
        ));
    }
    lines.push(format!("{}. Exit", categories.len() + 1));
    Ok(lines.join("\n"))
}

pub fn category_header(registry: &UnitRegistry, category: Category) -> ConversionResult<String> {
    let mut lines = vec![
        format!("{}", format!("--- {} Converter selected ---", category).green()),
        "Available units below".to_string(),
    ];
    for (i, unit) in menu_units(registry, category)?.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, capitalize(&unit.name)));
    }
    Ok(lines.join("\n"))
}

pub fn result_line(quantity: &Quantity, precision: Option<usize>) -> String {
    format!(
        "{} {} {}",
        "Result:".bold().green(),
        format_value(quantity.value, precision).yellow(),
        quantity.unit.name_for(quantity.value)
    )
}

pub fn conversion_line(from: &Quantity, to: &Quantity, precision: Option<usize>) -> String {
    format!(
        "{} = {}",
        from.display_with(None),
        to.display_with(precision).bold()
    )
}

pub fn input_error(message: &str) -> String {
    format!("{}", format!("[ERROR] {}", message).bold().red())
}

pub fn conversion_error(err: &ConversionError) -> String {
    let report = err.report();
    let mut out = format!("{}", format!("[ERROR] {}", report.message).bold().red());
    if let Some(suggestion) = report.suggestion {
        out.push('\n');
        out.push_str(&format!("{}", suggestion.yellow()));
    }
    out
}

/// Table of units for one category, with the lower limit in each unit
pub fn unit_listing(
    registry: &UnitRegistry,
    category: Category,
    precision: Option<usize>,
) -> ConversionResult<String> {
    let base = registry.base_unit_of(category)?;
    let limit = registry.limit_of(category)?;
    let mut lines = vec![format!(
        "{} (base unit: {})",
        category.to_string().bold(),
        base.name
    )];
    for unit in registry.units_for(category)? {
        let marker = if unit.symbol == base.symbol { "*" } else { " " };
        let mut line = format!(
            " {} {:<6} {:<26} min {}",
            marker,
            unit.symbol,
            format!("{} / {}", unit.name, unit.plural),
            format_value(limit.min_in(unit), precision)
        );
        if let Some(max) = limit.max_in(unit) {
            line.push_str(&format!(", max {}", format_value(max, precision)));
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}
