use crate::units::cross::convert_across_systems;
use crate::units::error::ConversionError;
use crate::units::tables::{UnitTable, HILLY, TERAI, WEIGHT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Precision used when the caller does not pick one
pub const DEFAULT_PRECISION: i32 = 4;

/// Physical quantity a system measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Area,
    Mass,
}

impl Quantity {
    /// Base unit symbol every factor of this quantity is expressed in
    pub fn base_unit(self) -> &'static str {
        match self {
            Quantity::Area => "m²",
            Quantity::Mass => "g",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Area => write!(f, "area"),
            Quantity::Mass => write!(f, "mass"),
        }
    }
}

/// Measurement system owning a unit table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum System {
    /// Lowland land units: bigha, kattha, dhur
    Terai,
    /// Hill land units: ropani, aana, paisa, daam
    Hilly,
    /// Traditional and SI weight units
    Weight,
}

impl System {
    pub const ALL: [System; 3] = [System::Terai, System::Hilly, System::Weight];

    pub fn table(self) -> &'static UnitTable {
        match self {
            System::Terai => &TERAI,
            System::Hilly => &HILLY,
            System::Weight => &WEIGHT,
        }
    }

    pub fn quantity(self) -> Quantity {
        match self {
            System::Terai | System::Hilly => Quantity::Area,
            System::Weight => Quantity::Mass,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            System::Terai => "terai",
            System::Hilly => "hilly",
            System::Weight => "weight",
        }
    }

    /// Find the system owning a unit (case-insensitive).
    /// Unit names are unique across all tables.
    pub fn for_unit(unit: &str) -> Option<System> {
        System::ALL
            .into_iter()
            .find(|system| system.table().contains(unit))
    }

    /// Units used to break a base amount into a mixed expression,
    /// largest first. The last one carries the fractional part.
    pub fn mixed_units(self) -> &'static [&'static str] {
        match self {
            System::Terai => &["bigha", "kattha", "dhur"],
            System::Hilly => &["ropani", "aana", "paisa", "daam"],
            System::Weight => &["dharni", "sher", "pau", "chatak", "tola", "lal"],
        }
    }

    /// The other land system, if this one is a land system
    pub fn counterpart(self) -> Option<System> {
        match self {
            System::Terai => Some(System::Hilly),
            System::Hilly => Some(System::Terai),
            System::Weight => None,
        }
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for System {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "terai" => Ok(System::Terai),
            "hilly" | "pahadi" => Ok(System::Hilly),
            "weight" => Ok(System::Weight),
            _ => Err(ConversionError::invalid_input(format!(
                "unknown system '{}' (expected terai, hilly or weight)",
                s
            ))),
        }
    }
}

/// A single conversion call, as received from JSON callers
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConversionRequest {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
    #[serde(default = "default_precision")]
    pub precision: i32,
}

impl ConversionRequest {
    /// Run the request within one system, or across land systems when the
    /// two units belong to different ones
    pub fn execute(&self) -> crate::units::error::Result<f64> {
        convert_across_systems(self.value, &self.from_unit, &self.to_unit, self.precision)
    }
}

fn default_precision() -> i32 {
    DEFAULT_PRECISION
}

/// Result of a conversion, echoing the input for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    /// Original input for display (e.g. "1 bigha" or "1 ropani 2 aana")
    pub input: String,
    /// Converted numeric value, rounded to the requested precision
    pub value: f64,
    /// Unit the value is expressed in
    pub unit: String,
    /// Mixed-expression rendering, when the output is a compound quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_from_str() {
        assert_eq!("Terai".parse::<System>().unwrap(), System::Terai);
        assert_eq!("pahadi".parse::<System>().unwrap(), System::Hilly);
        assert_eq!(" WEIGHT ".parse::<System>().unwrap(), System::Weight);
        assert!(matches!(
            "marsh".parse::<System>(),
            Err(ConversionError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_for_unit() {
        assert_eq!(System::for_unit("Bigha"), Some(System::Terai));
        assert_eq!(System::for_unit("DAAM"), Some(System::Hilly));
        assert_eq!(System::for_unit("tola"), Some(System::Weight));
        assert_eq!(System::for_unit("acre"), None);
    }

    #[test]
    fn test_counterpart_and_quantity() {
        assert_eq!(System::Terai.counterpart(), Some(System::Hilly));
        assert_eq!(System::Hilly.counterpart(), Some(System::Terai));
        assert_eq!(System::Weight.counterpart(), None);
        assert_eq!(System::Terai.quantity(), System::Hilly.quantity());
        assert_eq!(System::Weight.quantity().base_unit(), "g");
    }

    #[test]
    fn test_request_default_precision() {
        let request: ConversionRequest =
            serde_json::from_str(r#"{"value": 2, "from_unit": "bigha", "to_unit": "kattha"}"#)
                .unwrap();
        assert_eq!(request.precision, DEFAULT_PRECISION);
        assert_eq!(request.value, 2.0);
    }
}
