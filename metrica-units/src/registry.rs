//! Unit registry: category -> units, base unit and physical limit

use std::collections::HashMap;
use metrica_core::{Category, ConversionError, ConversionResult};
use tracing::debug;

use crate::{PhysicalLimit, Unit};

/// Units of one category, in registration order
#[derive(Debug, Clone)]
struct CategoryTable {
    units: Vec<Unit>,
    base: usize,
    limit: PhysicalLimit,
    /// Lowercased symbol, name, plural or alias -> index into `units`
    lookup: HashMap<String, usize>,
}

impl CategoryTable {
    fn get(&self, id: &str) -> Option<&Unit> {
        let key = id.trim();
        // Exact symbol match wins over case-folded lookup
        if let Some(unit) = self.units.iter().find(|u| u.symbol == key) {
            return Some(unit);
        }
        self.lookup
            .get(&key.to_lowercase())
            .map(|&idx| &self.units[idx])
    }
}

/// Immutable registry of all known units
///
/// Built once, then only read. Every conversion pivots through the base unit
/// of its category.
#[derive(Debug, Clone)]
pub struct UnitRegistry {
    tables: HashMap<Category, CategoryTable>,
}

impl UnitRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registered categories, in menu order
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.tables.contains_key(c))
            .collect()
    }

    /// All units of a category, in registration order
    pub fn units_for(&self, category: Category) -> ConversionResult<&[Unit]> {
        Ok(&self.table(category)?.units)
    }

    /// The pivot unit of a category
    pub fn base_unit_of(&self, category: Category) -> ConversionResult<&Unit> {
        let table = self.table(category)?;
        Ok(&table.units[table.base])
    }

    /// Bounds on the base-unit value of a category
    pub fn limit_of(&self, category: Category) -> ConversionResult<PhysicalLimit> {
        Ok(self.table(category)?.limit)
    }

    /// Resolve a unit by symbol, name, plural or alias (case-insensitive)
    pub fn unit(&self, category: Category, id: &str) -> ConversionResult<&Unit> {
        self.table(category)?
            .get(id)
            .ok_or_else(|| ConversionError::unknown_unit(category, id.trim()))
    }

    fn table(&self, category: Category) -> ConversionResult<&CategoryTable> {
        self.tables
            .get(&category)
            .ok_or_else(|| ConversionError::unknown_category(category.name()))
    }
}

#[derive(Debug)]
struct PendingCategory {
    category: Category,
    limit: PhysicalLimit,
    base: Option<usize>,
    units: Vec<Unit>,
}

/// Collects unit definitions and checks them before producing a registry
///
/// Definition mistakes are remembered and reported from `build`, so a
/// registry is either fully valid or not created at all.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    pending: Vec<PendingCategory>,
    aliases: Vec<(Category, String, String)>,
    errors: Vec<String>,
}

impl RegistryBuilder {
    /// Declare a category with its physical limit
    pub fn category(mut self, category: Category, limit: PhysicalLimit) -> Self {
        if self.find(category).is_some() {
            self.errors.push(format!("category {} declared twice", category));
        } else {
            self.pending.push(PendingCategory {
                category,
                limit,
                base: None,
                units: Vec::new(),
            });
        }
        self
    }

    /// Register the pivot unit of its category
    pub fn base_unit(mut self, unit: Unit) -> Self {
        if !unit.is_base() {
            self.errors.push(format!(
                "base unit '{}' must have scale 1 and offset 0",
                unit.symbol
            ));
            return self;
        }
        let category = unit.category;
        match self.find(category) {
            Some(idx) if self.pending[idx].base.is_some() => {
                self.errors.push(format!("{} already has a base unit", category));
            }
            Some(idx) => {
                let entry = &mut self.pending[idx];
                entry.base = Some(entry.units.len());
                entry.units.push(unit);
            }
            None => self.errors.push(undeclared(category, &unit.symbol)),
        }
        self
    }

    /// Register a non-base unit
    pub fn unit(mut self, unit: Unit) -> Self {
        match self.find(unit.category) {
            Some(idx) => self.pending[idx].units.push(unit),
            None => self.errors.push(undeclared(unit.category, &unit.symbol)),
        }
        self
    }

    /// Register an extra lookup name for a unit symbol
    pub fn alias(mut self, category: Category, alias: &str, symbol: &str) -> Self {
        self.aliases.push((category, alias.to_string(), symbol.to_string()));
        self
    }

    pub fn build(self) -> ConversionResult<UnitRegistry> {
        if let Some(first) = self.errors.into_iter().next() {
            return Err(ConversionError::invalid_definition(first));
        }

        let mut tables = HashMap::new();
        for pending in self.pending {
            let category = pending.category;
            pending.limit.validate(category)?;

            let base = pending.base.ok_or_else(|| {
                ConversionError::invalid_definition(format!("{} has no base unit", category))
            })?;

            let mut lookup = HashMap::new();
            for (idx, unit) in pending.units.iter().enumerate() {
                unit.validate()?;
                if pending.units[..idx].iter().any(|u| u.symbol == unit.symbol) {
                    return Err(ConversionError::invalid_definition(format!(
                        "duplicate {} symbol '{}'",
                        category, unit.symbol
                    )));
                }
                for key in [&unit.symbol, &unit.name, &unit.plural] {
                    insert_key(&mut lookup, category, key, idx)?;
                }
            }

            tables.insert(
                category,
                CategoryTable {
                    units: pending.units,
                    base,
                    limit: pending.limit,
                    lookup,
                },
            );
        }

        for (category, alias, symbol) in self.aliases {
            let table = tables.get_mut(&category).ok_or_else(|| {
                ConversionError::invalid_definition(undeclared(category, &alias))
            })?;
            let idx = table
                .units
                .iter()
                .position(|u| u.symbol == symbol)
                .ok_or_else(|| {
                    ConversionError::invalid_definition(format!(
                        "alias '{}' refers to unknown {} unit '{}'",
                        alias, category, symbol
                    ))
                })?;
            insert_key(&mut table.lookup, category, &alias, idx)?;
        }

        let unit_count: usize = tables.values().map(|t| t.units.len()).sum();
        debug!(categories = tables.len(), units = unit_count, "unit registry built");

        Ok(UnitRegistry { tables })
    }

    fn find(&self, category: Category) -> Option<usize> {
        self.pending.iter().position(|p| p.category == category)
    }
}

fn undeclared(category: Category, symbol: &str) -> String {
    format!("unit '{}' registered for undeclared category {}", symbol, category)
}

fn insert_key(
    lookup: &mut HashMap<String, usize>,
    category: Category,
    key: &str,
    idx: usize,
) -> ConversionResult<()> {
    let key = key.trim().to_lowercase();
    if key.is_empty() {
        return Ok(());
    }
    match lookup.insert(key.clone(), idx) {
        Some(existing) if existing != idx => Err(ConversionError::invalid_definition(format!(
            "{} lookup name '{}' is ambiguous",
            category, key
        ))),
        _ => Ok(()),
    }
}
