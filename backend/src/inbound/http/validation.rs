//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidInteger,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidInteger => "invalid_integer",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_integer_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be an integer"))
        .with_value(ErrorCode::InvalidInteger, value)
}

/// Parse a path segment as an integer id, producing a structured 400 for
/// non-numeric input.
pub(crate) fn parse_id(value: &str, field: FieldName) -> Result<i32, Error> {
    value
        .parse::<i32>()
        .map_err(|_| invalid_integer_error(field, value))
}

/// Require an optional JSON field, producing a structured 400 when absent.
pub(crate) fn require_field<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn missing_field_carries_structured_details() {
        let error = missing_field_error(FieldName::new("cyclesCompleted"));
        let details = error.details().expect("details present");
        assert_eq!(details["field"], "cyclesCompleted");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    #[case("5", Ok(5))]
    #[case("-3", Ok(-3))]
    fn parse_id_accepts_integers(#[case] raw: &str, #[case] expected: Result<i32, ()>) {
        let parsed = parse_id(raw, FieldName::new("techniqueId"));
        assert_eq!(parsed.ok(), expected.ok());
    }

    #[rstest]
    #[case("abc")]
    #[case("5.5")]
    #[case("")]
    fn parse_id_rejects_non_integers(#[case] raw: &str) {
        let error = parse_id(raw, FieldName::new("techniqueId")).expect_err("non-integer");
        let details = error.details().expect("details present");
        assert_eq!(details["code"], "invalid_integer");
        assert_eq!(details["value"], raw);
    }

    #[rstest]
    fn require_field_passes_through_present_values() {
        let value = require_field(Some(7), FieldName::new("cyclesCompleted")).expect("present");
        assert_eq!(value, 7);
    }
}
