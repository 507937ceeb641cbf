// Conversion between systems that measure the same quantity (Terai and Hilly
// land), composed from one system's to-base and the other's from-base.

use crate::units::converter::{resolve_system, round_to, validate_precision, Converter};
use crate::units::error::{ConversionError, Result};
use crate::units::types::System;
use tracing::debug;

/// Convert `value` between two explicit systems through their shared base unit
pub fn convert_between(
    value: f64,
    from: System,
    from_unit: &str,
    to: System,
    to_unit: &str,
    precision: i32,
) -> Result<f64> {
    validate_precision(precision)?;
    if from.quantity() != to.quantity() {
        return Err(ConversionError::unknown_unit(
            to_unit,
            format!("a unit measuring {} to match {} '{}'", from.quantity(), from, from_unit),
        ));
    }

    let base = Converter::new(from).to_base_exact(value, from_unit)?;
    let converted = Converter::new(to).from_base_exact(base, to_unit)?;
    debug!(
        %from,
        %to,
        value,
        from_unit,
        to_unit,
        base,
        converted,
        "cross-system conversion"
    );
    Ok(round_to(converted, precision))
}

/// Convert between any two units measuring the same quantity.
/// The systems are resolved from the unit names.
pub fn convert_across_systems(
    value: f64,
    from_unit: &str,
    to_unit: &str,
    precision: i32,
) -> Result<f64> {
    let from = resolve_system(from_unit)?;

    // Prefer a system of the same quantity so "bigha -> kg" reports the target unit
    let to = System::ALL
        .into_iter()
        .filter(|system| system.quantity() == from.quantity())
        .find(|system| system.table().contains(to_unit))
        .ok_or_else(|| {
            ConversionError::unknown_unit(
                to_unit,
                format!("a unit measuring {} to match {} '{}'", from.quantity(), from, from_unit),
            )
        })?;

    convert_between(value, from, from_unit, to, to_unit, precision)
}

/// Terai unit to Hilly unit
pub fn terai_to_hilly(value: f64, from_unit: &str, to_unit: &str, precision: i32) -> Result<f64> {
    convert_between(value, System::Terai, from_unit, System::Hilly, to_unit, precision)
}

/// Hilly unit to Terai unit
pub fn hilly_to_terai(value: f64, from_unit: &str, to_unit: &str, precision: i32) -> Result<f64> {
    convert_between(value, System::Hilly, from_unit, System::Terai, to_unit, precision)
}
