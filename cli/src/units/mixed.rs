// Mixed expressions: "1 bigha 5 kattha 10 dhur" style compound quantities.
// Parsing sums every (value, unit) pair into the base unit; formatting breaks
// a base amount back down from the largest unit to the smallest.

use crate::units::converter::{
    round_to, unknown_in_any_system, validate_precision, validate_value, Converter,
};
use crate::units::detector::{detect_system, is_numeric_token};
use crate::units::error::{ConversionError, Result};
use crate::units::types::System;
use std::fmt;
use tracing::{debug, trace};

/// Parsed (value, unit) pairs of one system, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct MixedExpression {
    system: System,
    pairs: Vec<(f64, &'static str)>,
}

impl MixedExpression {
    /// Parse `text` as pairs of units from `system`.
    /// The first offending token aborts the parse.
    pub fn parse(text: &str, system: System) -> Result<Self> {
        let tokens = tokenize(text)?;
        let table = system.table();

        let mut pairs = Vec::with_capacity(tokens.len() / 2);
        for pair in tokens.chunks(2) {
            let value = parse_value_token(pair[0], text)?;
            if value < 0.0 {
                return Err(ConversionError::invalid_input(format!(
                    "value must be non-negative, got {} in '{}'",
                    pair[0], text
                )));
            }
            let unit = table.lookup(pair[1])?;
            trace!(value, unit = unit.name, "mixed pair");
            // "-0" parses as negative zero
            pairs.push((value + 0.0, unit.name));
        }

        Ok(Self { system, pairs })
    }

    pub fn system(&self) -> System {
        self.system
    }

    pub fn pairs(&self) -> &[(f64, &'static str)] {
        &self.pairs
    }

    /// Total in the system's base unit, unrounded
    pub fn base_amount(&self) -> Result<f64> {
        let converter = Converter::new(self.system);
        let total = self.pairs.iter().try_fold(0.0, |total, &(value, unit)| {
            Ok::<f64, ConversionError>(total + converter.to_base_exact(value, unit)?)
        })?;
        if !total.is_finite() {
            return Err(ConversionError::invalid_input(format!(
                "'{}' is out of range for conversion",
                self
            )));
        }
        Ok(total)
    }
}

impl fmt::Display for MixedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (value, unit)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", value, unit)?;
        }
        Ok(())
    }
}

fn tokenize(text: &str) -> Result<Vec<&str>> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(ConversionError::malformed(text, "expression is empty"));
    }
    if tokens.len() % 2 != 0 {
        return Err(ConversionError::malformed(
            text,
            format!(
                "expected (value, unit) pairs, got {} tokens",
                tokens.len()
            ),
        ));
    }
    Ok(tokens)
}

fn parse_value_token(token: &str, text: &str) -> Result<f64> {
    let invalid = || ConversionError::malformed(text, format!("invalid numeric value '{}'", token));
    if !is_numeric_token(token) {
        return Err(invalid());
    }
    let value = token.parse::<f64>().map_err(|_| invalid())?;
    // "1e400" matches the pattern but parses to infinity
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}

/// Parse a mixed expression of `system` into its total base amount
pub fn parse_mixed(text: &str, system: System) -> Result<f64> {
    MixedExpression::parse(text, system)?.base_amount()
}

/// Parse a mixed expression, taking the system from its first recognised unit
pub fn parse_mixed_expression(text: &str) -> Result<(System, f64)> {
    let tokens = tokenize(text)?;
    let system = detect_system(text).ok_or_else(|| unknown_in_any_system(tokens[1]))?;

    let total = parse_mixed(text, system)?;
    debug!(%system, total, expression = text, "parsed mixed expression");
    Ok((system, total))
}

/// Break `base_amount` into the mixed units of `system`.
///
/// Every unit but the last gets a whole count; the last one carries the
/// remainder, rounded and rendered with exactly `precision` decimals.
pub fn format_mixed(base_amount: f64, system: System, precision: i32) -> Result<String> {
    let base_amount = validate_value(base_amount)?;
    validate_precision(precision)?;

    let table = system.table();
    let chain = system.mixed_units();
    let mut remainder = base_amount;
    let mut parts = Vec::with_capacity(chain.len());

    for (i, name) in chain.iter().enumerate() {
        let factor = table.lookup(name)?.factor;
        if i + 1 == chain.len() {
            let last = round_to(remainder / factor, precision);
            parts.push(format!("{:.*} {}", precision as usize, last, name));
        } else {
            // Count derived from the same remainder keeps the two consistent
            let rest = remainder % factor;
            let count = ((remainder - rest) / factor).round();
            parts.push(format!("{} {}", count, name));
            remainder = rest;
        }
    }

    Ok(parts.join(" "))
}

/// Re-express a mixed expression in `target`, which must measure the same quantity
pub fn convert_mixed(text: &str, target: System, precision: i32) -> Result<String> {
    validate_precision(precision)?;
    let (source, total) = parse_mixed_expression(text)?;
    format_mixed_as(total, source, target, precision)
}

/// Convert a Terai mixed expression to Hilly, or Hilly to Terai
pub fn convert_mixed_across_systems(text: &str, precision: i32) -> Result<String> {
    validate_precision(precision)?;
    let (source, total) = parse_mixed_expression(text)?;
    let target = land_counterpart(source)?;
    debug!(%source, %target, total, "mixed cross-system conversion");
    format_mixed_as(total, source, target, precision)
}

/// Format a `source` base amount as a mixed expression of `target`
pub fn format_mixed_as(
    total: f64,
    source: System,
    target: System,
    precision: i32,
) -> Result<String> {
    if source.quantity() != target.quantity() {
        return Err(ConversionError::unknown_unit(
            &source.mixed_units().join("/"),
            format!("{} units convertible to {}", target.quantity(), target),
        ));
    }
    format_mixed(total, target, precision)
}

/// The other land system; weight has none
pub fn land_counterpart(source: System) -> Result<System> {
    source.counterpart().ok_or_else(|| {
        ConversionError::unknown_unit(
            &source.mixed_units().join("/"),
            "Terai or Hilly land units",
        )
    })
}

pub fn terai_mixed_to_hilly_mixed(text: &str, precision: i32) -> Result<String> {
    validate_precision(precision)?;
    let total = parse_mixed(text, System::Terai)?;
    format_mixed(total, System::Hilly, precision)
}

pub fn hilly_mixed_to_terai_mixed(text: &str, precision: i32) -> Result<String> {
    validate_precision(precision)?;
    let total = parse_mixed(text, System::Hilly)?;
    format_mixed(total, System::Terai, precision)
}
