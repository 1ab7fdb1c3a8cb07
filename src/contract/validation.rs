//! Request body validation for contract calls.
//!
//! Each contract method declares the fields it needs as a list of [`Field`]s.
//! [`validate`] checks them in order against the request body and returns the
//! call arguments, containing exactly the declared fields.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;
use thiserror::Error;

use super::types::CallArgs;

/// Primitive JSON type a field must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON number.
    Number,
    /// A JSON string with at least one character.
    String,
}

impl FieldKind {
    /// Whether `value` satisfies this kind. An absent value never does.
    ///
    /// Empty strings are treated as absent.
    pub fn accepts(&self, value: Option<&Value>) -> bool {
        match (self, value) {
            (FieldKind::Number, Some(Value::Number(_))) => true,
            (FieldKind::String, Some(Value::String(s))) => !s.is_empty(),
            _ => false,
        }
    }

    /// OpenAPI type name.
    pub fn schema_type(&self) -> &'static str {
        match self {
            FieldKind::Number => "number",
            FieldKind::String => "string",
        }
    }
}

/// A required request body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Message returned to the caller when the field is missing or mistyped.
    pub error: &'static str,
    /// Human-readable description, used in the plugin manifest.
    pub description: &'static str,
}

impl Field {
    pub const fn number(
        name: &'static str,
        error: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
            error,
            description,
        }
    }

    pub const fn string(
        name: &'static str,
        error: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            error,
            description,
        }
    }
}

/// A required field was absent or had the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// The first field that failed.
    pub field: &'static str,
    pub message: &'static str,
}

impl From<&Field> for ValidationError {
    fn from(field: &Field) -> Self {
        Self {
            field: field.name,
            message: field.error,
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

/// Check `body` against `fields` and collect the call arguments.
///
/// Fields are checked in declaration order and the first failure is returned.
/// Keys in `body` that are not declared are dropped. Anything other than a
/// JSON object is treated as an empty body. Arguments keep the declaration
/// order, and integral floats are stored as integers (see [`normalize_number`]).
pub fn validate(fields: &[Field], body: &Value) -> Result<CallArgs, ValidationError> {
    let mut args = CallArgs::new();
    for field in fields {
        let value = body.get(field.name);
        if !field.kind.accepts(value) {
            return Err(field.into());
        }
        if let Some(value) = value {
            let value = match field.kind {
                FieldKind::Number => normalize_number(value),
                FieldKind::String => value.clone(),
            };
            args.insert(field.name.to_string(), value);
        }
    }
    Ok(args)
}

/// Store a float without a fractional part as an integer.
///
/// `3.0` and `1e3` become `3` and `1000`, since contract methods taking
/// integer arguments reject a float literal. Values outside the `i64`/`u64`
/// range and true fractions are left as they are.
pub fn normalize_number(value: &Value) -> Value {
    let Some(f) = value.as_f64().filter(|_| value.is_f64()) else {
        return value.clone();
    };
    if f.fract() != 0.0 {
        return value.clone();
    }
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Value::from(f as i64)
    } else if f >= 0.0 && f < u64::MAX as f64 {
        Value::from(f as u64)
    } else {
        value.clone()
    }
}
