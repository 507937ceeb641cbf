// Nepali land-area and weight unit conversion.
// Tables -> single-system converters -> cross-system and mixed expressions.

pub mod converter;
pub mod cross;
pub mod detector;
pub mod error;
pub mod mixed;
pub mod tables;
pub mod types;

#[cfg(test)]
mod tests;

pub use converter::{convert_from_base, convert_to_base, convert_unit_to_unit, Converter};
pub use cross::{convert_across_systems, convert_between, hilly_to_terai, terai_to_hilly};
pub use detector::detect_system;
pub use error::{ConversionError, Result};
pub use mixed::{
    convert_mixed, convert_mixed_across_systems, format_mixed, format_mixed_as,
    hilly_mixed_to_terai_mixed, land_counterpart, parse_mixed, parse_mixed_expression,
    terai_mixed_to_hilly_mixed, MixedExpression,
};
pub use tables::{Unit, UnitTable};
pub use types::{ConversionRequest, ConversionResult, Quantity, System, DEFAULT_PRECISION};
