//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`Error`] whose details carry the
//! offending `field`, a machine-readable `code`, and any bound that applies.

use serde_json::{Map, Value, json};

use crate::domain::{Error, ExampleName, ExampleValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    TooShort,
    TooLong,
    NotPositive,
    OutOfRange,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::TooShort => "too_short",
            ErrorCode::TooLong => "too_long",
            ErrorCode::NotPositive => "not_positive",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidValue => "invalid_value",
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
    extra: Map<String, Value>,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str().to_owned(),
            message: message.into(),
            extra: Map::new(),
        }
    }

    fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_owned(), value.into());
        self
    }

    fn with_code(self, code: ErrorCode) -> Error {
        let mut details = self.extra;
        details.insert("field".to_owned(), json!(self.field));
        details.insert("code".to_owned(), json!(code.as_str()));
        Error::invalid_request(self.message).with_details(Value::Object(details))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn too_short_error(field: FieldName, min: usize) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be at least {min} characters"))
        .with("min", min)
        .with_code(ErrorCode::TooShort)
}

pub(crate) fn too_long_error(field: FieldName, max: usize) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be at most {max} characters"))
        .with("max", max)
        .with_code(ErrorCode::TooLong)
}

pub(crate) fn not_positive_error(field: FieldName, value: f64) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a positive number"))
        .with("value", value)
        .with_code(ErrorCode::NotPositive)
}

pub(crate) fn out_of_range_error(
    field: FieldName,
    value: &str,
    min: u32,
    max: Option<u32>,
) -> Error {
    let name = field.as_str();
    let message = match max {
        Some(max) => format!("{name} must be between {min} and {max}"),
        None => format!("{name} must be at least {min}"),
    };
    let error = ValidationError::new(field, message)
        .with("value", value)
        .with("min", min);
    match max {
        Some(max) => error.with("max", max),
        None => error,
    }
    .with_code(ErrorCode::OutOfRange)
}

pub(crate) fn invalid_value_error(field: FieldName, value: &str, expected: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be {expected}"))
        .with("value", value)
        .with_code(ErrorCode::InvalidValue)
}

/// Validate a client-supplied example name.
pub(crate) fn parse_example_name(value: String, field: FieldName) -> Result<ExampleName, Error> {
    ExampleName::new(value).map_err(|err| match err {
        ExampleValidationError::NameTooLong { max } => too_long_error(field, max),
        ExampleValidationError::EmptyName | ExampleValidationError::NonPositivePrice => {
            too_short_error(field, 1)
        }
    })
}

/// Parse an optional unsigned integer query parameter within `min..=max`.
pub(crate) fn parse_bounded_u32(
    value: Option<String>,
    field: FieldName,
    default: u32,
    min: u32,
    max: Option<u32>,
) -> Result<u32, Error> {
    let Some(raw) = value else {
        return Ok(default);
    };
    let parsed: u32 = raw
        .trim()
        .parse()
        .map_err(|_| invalid_value_error(field, &raw, "an integer"))?;
    let above_max = max.is_some_and(|max| parsed > max);
    if parsed < min || above_max {
        return Err(out_of_range_error(field, &raw, min, max));
    }
    Ok(parsed)
}
