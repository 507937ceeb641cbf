// WebAssembly bindings for the conversion API
use crate::units::{self, ConversionError, ConversionRequest, System, DEFAULT_PRECISION};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct RupantaranWasm {}

impl Default for RupantaranWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(e: ConversionError) -> JsValue {
    JsValue::from_str(&format!("{}: {}", e.kind(), e))
}

fn parse_system(system: &str) -> Result<System, JsValue> {
    system.parse::<System>().map_err(to_js_error)
}

#[wasm_bindgen]
impl RupantaranWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {}
    }

    /// Convert a value to the base unit (m² or g)
    #[wasm_bindgen]
    pub fn to_base(&self, value: f64, unit: &str, precision: Option<i32>) -> Result<f64, JsValue> {
        units::convert_to_base(value, unit, precision.unwrap_or(DEFAULT_PRECISION))
            .map_err(to_js_error)
    }

    /// Convert a base-unit amount to `unit`
    #[wasm_bindgen]
    pub fn from_base(
        &self,
        amount: f64,
        unit: &str,
        precision: Option<i32>,
    ) -> Result<f64, JsValue> {
        units::convert_from_base(amount, unit, precision.unwrap_or(DEFAULT_PRECISION))
            .map_err(to_js_error)
    }

    /// Convert between two units of one system, or across land systems
    #[wasm_bindgen]
    pub fn convert(
        &self,
        value: f64,
        from_unit: &str,
        to_unit: &str,
        precision: Option<i32>,
    ) -> Result<f64, JsValue> {
        units::convert_across_systems(
            value,
            from_unit,
            to_unit,
            precision.unwrap_or(DEFAULT_PRECISION),
        )
        .map_err(to_js_error)
    }

    /// Run a JSON-encoded ConversionRequest
    /// Returns the converted number
    #[wasm_bindgen]
    pub fn convert_json(&self, request_json: &str) -> Result<f64, JsValue> {
        let request: ConversionRequest = serde_json::from_str(request_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse request JSON: {}", e)))?;
        request.execute().map_err(to_js_error)
    }

    /// Sum a mixed expression into the base unit.
    /// Returns JSON: {"system": "terai", "total": 8635.08}
    #[wasm_bindgen]
    pub fn parse_mixed(&self, expression: &str) -> Result<String, JsValue> {
        let (system, total) = units::parse_mixed_expression(expression).map_err(to_js_error)?;
        let result = serde_json::json!({
            "system": system,
            "total": total,
        });
        serde_json::to_string(&result)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
    }

    /// Break a base-unit amount into a mixed expression of `system`
    #[wasm_bindgen]
    pub fn format_mixed(
        &self,
        amount: f64,
        system: &str,
        precision: Option<i32>,
    ) -> Result<String, JsValue> {
        let system = parse_system(system)?;
        units::format_mixed(amount, system, precision.unwrap_or(DEFAULT_PRECISION))
            .map_err(to_js_error)
    }

    /// Convert a Terai mixed expression to Hilly or the other way round
    #[wasm_bindgen]
    pub fn convert_mixed(
        &self,
        expression: &str,
        precision: Option<i32>,
    ) -> Result<String, JsValue> {
        units::convert_mixed_across_systems(expression, precision.unwrap_or(DEFAULT_PRECISION))
            .map_err(to_js_error)
    }

    /// Unit tables as JSON: {"terai": [{"name": "bigha", "factor": 6772.63}, ...], ...}
    #[wasm_bindgen]
    pub fn get_units(&self) -> Result<String, JsValue> {
        let tables: std::collections::HashMap<&str, &[units::Unit]> = System::ALL
            .iter()
            .map(|system| (system.name(), system.table().units()))
            .collect();
        serde_json::to_string(&tables)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize units: {}", e)))
    }
}
