use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;

/// Errors raised by the converters and the mixed-expression layer.
///
/// All of them describe bad caller input; nothing here is retried or
/// recovered internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Value is not finite, is negative, or precision is negative
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unit is not part of the table it was looked up in
    #[error("Unknown unit '{unit}': expected {expected}")]
    UnknownUnit { unit: String, expected: String },

    /// Mixed expression with an odd token count or a non-numeric value token
    #[error("Malformed expression '{expression}': {reason}")]
    MalformedExpression { expression: String, reason: String },
}

impl ConversionError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        ConversionError::InvalidInput(message.into())
    }

    pub fn unknown_unit(unit: &str, expected: impl Into<String>) -> Self {
        ConversionError::UnknownUnit {
            unit: unit.to_string(),
            expected: expected.into(),
        }
    }

    pub fn malformed(expression: &str, reason: impl Into<String>) -> Self {
        ConversionError::MalformedExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }

    /// Short kind name, used by the JSON and wasm surfaces
    pub fn kind(&self) -> &'static str {
        match self {
            ConversionError::InvalidInput(_) => "InvalidInput",
            ConversionError::UnknownUnit { .. } => "UnknownUnit",
            ConversionError::MalformedExpression { .. } => "MalformedExpression",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_offending_input() {
        let err = ConversionError::unknown_unit("acre", "bigha, kattha, dhur");
        assert_eq!(
            err.to_string(),
            "Unknown unit 'acre': expected bigha, kattha, dhur"
        );

        let err = ConversionError::malformed("1 bigha 5", "odd number of tokens (3)");
        assert!(err.to_string().contains("'1 bigha 5'"));
        assert_eq!(err.kind(), "MalformedExpression");

        let err = ConversionError::invalid_input("value must be non-negative, got -1");
        assert!(err.to_string().starts_with("Invalid input:"));
    }
}
