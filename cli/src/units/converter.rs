use crate::units::error::{ConversionError, Result};
use crate::units::tables::UnitTable;
use crate::units::types::System;
use tracing::trace;

/// Converts values within one measurement system through its base unit
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    system: System,
    table: &'static UnitTable,
}

impl Converter {
    pub fn new(system: System) -> Self {
        Self {
            system,
            table: system.table(),
        }
    }

    pub fn system(&self) -> System {
        self.system
    }

    pub fn table(&self) -> &'static UnitTable {
        self.table
    }

    /// Convert `value` in `unit` to the base unit (m² or g), rounded to `precision`
    pub fn to_base(&self, value: f64, unit: &str, precision: i32) -> Result<f64> {
        validate_precision(precision)?;
        let base = self.to_base_exact(value, unit)?;
        Ok(round_to(base, precision))
    }

    /// Convert a base-unit amount to `unit`, rounded to `precision`
    pub fn from_base(&self, base_amount: f64, unit: &str, precision: i32) -> Result<f64> {
        validate_precision(precision)?;
        let value = self.from_base_exact(base_amount, unit)?;
        Ok(round_to(value, precision))
    }

    /// Convert between two units of this system.
    /// Only the final result is rounded; the intermediate base amount is kept exact.
    pub fn convert(
        &self,
        value: f64,
        from_unit: &str,
        to_unit: &str,
        precision: i32,
    ) -> Result<f64> {
        validate_precision(precision)?;
        let base = self.to_base_exact(value, from_unit)?;
        let converted = self.from_base_exact(base, to_unit)?;
        trace!(
            system = %self.system,
            value,
            from_unit,
            to_unit,
            converted,
            "converted within system"
        );
        Ok(round_to(converted, precision))
    }

    pub(crate) fn to_base_exact(&self, value: f64, unit: &str) -> Result<f64> {
        let value = validate_value(value)?;
        let unit = self.table.lookup(unit)?;
        ensure_finite(value * unit.factor, value, unit.name)
    }

    pub(crate) fn from_base_exact(&self, base_amount: f64, unit: &str) -> Result<f64> {
        let base_amount = validate_value(base_amount)?;
        let unit = self.table.lookup(unit)?;
        ensure_finite(base_amount / unit.factor, base_amount, unit.name)
    }
}

/// Reject NaN, infinities and negative amounts.
/// Returns the value with the sign of a negative zero cleared.
pub fn validate_value(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(ConversionError::invalid_input(format!(
            "value must be a finite number, got {}",
            value
        )));
    }
    if value < 0.0 {
        return Err(ConversionError::invalid_input(format!(
            "value must be non-negative, got {}",
            value
        )));
    }
    Ok(value + 0.0)
}

/// A finite input can still leave the f64 range once scaled
fn ensure_finite(result: f64, value: f64, unit: &str) -> Result<f64> {
    if !result.is_finite() {
        return Err(ConversionError::invalid_input(format!(
            "{} {} is out of range for conversion",
            value, unit
        )));
    }
    Ok(result)
}

pub fn validate_precision(precision: i32) -> Result<()> {
    if precision < 0 {
        return Err(ConversionError::invalid_input(format!(
            "precision must be non-negative, got {}",
            precision
        )));
    }
    Ok(())
}

/// Round to `precision` decimal digits, halves away from zero.
/// Values too large to scale are returned unchanged.
pub fn round_to(value: f64, precision: i32) -> f64 {
    let scale = 10f64.powi(precision.max(0));
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

pub(crate) fn resolve_system(unit: &str) -> Result<System> {
    System::for_unit(unit).ok_or_else(|| unknown_in_any_system(unit))
}

/// UnknownUnit listing every table
pub(crate) fn unknown_in_any_system(unit: &str) -> ConversionError {
    let known: Vec<String> = System::ALL
        .iter()
        .map(|system| system.table().describe())
        .collect();
    ConversionError::unknown_unit(unit, known.join("; "))
}

/// Convert `value` in any known unit to its system's base unit
pub fn convert_to_base(value: f64, unit: &str, precision: i32) -> Result<f64> {
    Converter::new(resolve_system(unit)?).to_base(value, unit, precision)
}

/// Convert a base-unit amount (m² or g, depending on `unit`) to `unit`
pub fn convert_from_base(base_amount: f64, unit: &str, precision: i32) -> Result<f64> {
    Converter::new(resolve_system(unit)?).from_base(base_amount, unit, precision)
}

/// Convert between two units of the same system; the system comes from `from_unit`
pub fn convert_unit_to_unit(
    value: f64,
    from_unit: &str,
    to_unit: &str,
    precision: i32,
) -> Result<f64> {
    Converter::new(resolve_system(from_unit)?).convert(value, from_unit, to_unit, precision)
}
