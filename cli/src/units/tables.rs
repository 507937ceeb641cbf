// Static unit tables: one factor per unit, expressed in the system's base unit
// (m² for land, grams for weight). Built once and never mutated.

use crate::units::error::{ConversionError, Result};
use lazy_static::lazy_static;
use serde::Serialize;
use std::collections::HashMap;

/// A named unit and its size in the base unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Unit {
    pub name: &'static str,
    pub factor: f64,
}

/// Immutable lookup table for one measurement system
#[derive(Debug)]
pub struct UnitTable {
    label: &'static str,
    units: Vec<Unit>,
    index: HashMap<&'static str, usize>,
}

impl UnitTable {
    fn new(label: &'static str, entries: &[(&'static str, f64)]) -> Self {
        let units: Vec<Unit> = entries
            .iter()
            .map(|&(name, factor)| Unit { name, factor })
            .collect();
        let index = units
            .iter()
            .enumerate()
            .map(|(i, unit)| (unit.name, i))
            .collect();
        Self {
            label,
            units,
            index,
        }
    }

    /// Look up a unit by name, ignoring case
    pub fn lookup(&self, name: &str) -> Result<&Unit> {
        self.get(name)
            .ok_or_else(|| ConversionError::unknown_unit(name, self.describe()))
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        let key = name.trim().to_lowercase();
        self.index.get(key.as_str()).map(|&i| &self.units[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Units in table order (largest land unit first)
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.name).collect()
    }

    /// Human readable list for error messages, e.g. "Terai units (bigha, kattha, dhur)"
    pub fn describe(&self) -> String {
        format!("{} units ({})", self.label, self.names().join(", "))
    }
}

lazy_static! {
    /// Terai land units in square meters
    pub static ref TERAI: UnitTable = UnitTable::new(
        "Terai",
        &[
            ("bigha", 6772.63),
            ("kattha", 338.63),
            ("dhur", 16.93),
        ]
    );

    /// Hilly land units in square meters
    pub static ref HILLY: UnitTable = UnitTable::new(
        "Hilly",
        &[
            ("ropani", 508.72),
            ("aana", 31.79),
            ("paisa", 7.95),
            ("daam", 1.99),
        ]
    );

    /// Weight units in grams. Every pairwise factor is derived from these,
    /// so there are no per-pair tables to keep consistent.
    pub static ref WEIGHT: UnitTable = UnitTable::new(
        "Weight",
        &[
            ("dharni", 2390.0),
            ("sher", 796.0),
            ("pau", 199.0),
            ("chatak", 58.31),
            ("tola", 11.66),
            ("lal", 0.1166),
            ("kg", 1000.0),
            ("g", 1.0),
            ("lb", 453.59237),
            ("oz", 28.349523125),
        ]
    );
}
