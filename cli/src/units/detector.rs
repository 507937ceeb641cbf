use crate::units::types::System;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Plain decimal number with optional sign and exponent.
    /// Rejects the "inf"/"nan" spellings that `f64::from_str` would accept.
    static ref NUMBER_PATTERN: Regex =
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap();
}

/// Check if a token is a plain decimal number
pub fn is_numeric_token(token: &str) -> bool {
    NUMBER_PATTERN.is_match(token)
}

/// System of the first recognised unit in `s`, if any
pub fn detect_system(s: &str) -> Option<System> {
    s.split_whitespace().find_map(System::for_unit)
}
