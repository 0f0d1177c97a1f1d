//! Structural validators for connector configuration and credential payloads.

use super::PayloadSchemaError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Value type accepted by a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// JSON string.
    String,
    /// Any JSON number.
    Number,
    /// JSON number without a fractional part.
    Integer,
    /// JSON boolean.
    Boolean,
    /// JSON object.
    Object,
    /// JSON array.
    Array,
    /// JSON string restricted to the field's options.
    Select,
}

impl FieldType {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Select => "select",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String | Self::Select => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Specification for one top-level payload field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in the payload.
    pub name: String,
    /// Accepted value type.
    pub field_type: FieldType,
    /// Whether the field must be present (and non-blank for strings).
    pub required: bool,
    /// Allowed values for `select` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FieldSpec {
    /// Creates a required field.
    #[must_use]
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
            options: Vec::new(),
        }
    }

    /// Creates an optional field.
    #[must_use]
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, field_type)
        }
    }

    /// Adds allowed options for `select` fields.
    #[must_use]
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Which of the two instance payloads a schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Non-secret connector configuration.
    Config,
    /// Secret credential payload.
    Credentials,
}

impl PayloadKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Credentials => "credentials",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Why a payload failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    /// The payload is not a JSON object.
    NotAnObject,
    /// A required field is absent or null.
    MissingRequiredField,
    /// A required string field is blank.
    BlankValue,
    /// The field holds a value of the wrong type.
    WrongType {
        /// Type declared by the schema.
        expected: FieldType,
    },
    /// A `select` field holds a value outside its options.
    OptionNotAllowed {
        /// The rejected value; never captured for credential payloads.
        value: Option<String>,
    },
    /// The field is not declared and the schema is closed.
    UnknownField,
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => formatter.write_str("payload must be an object"),
            Self::MissingRequiredField => formatter.write_str("required field is missing"),
            Self::BlankValue => formatter.write_str("required field must not be blank"),
            Self::WrongType { expected } => {
                write!(formatter, "expected a value of type {expected}")
            }
            Self::OptionNotAllowed { value: Some(value) } => {
                write!(formatter, "value '{value}' is not allowed")
            }
            Self::OptionNotAllowed { value: None } => formatter.write_str("value is not allowed"),
            Self::UnknownField => formatter.write_str("field is not declared"),
        }
    }
}

/// A payload that does not satisfy its schema.
///
/// Names the payload and the offending field. Field values of credential
/// payloads are never captured, so neither `Display` nor `Debug` echoes them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Payload that failed validation.
    pub payload: PayloadKind,
    /// Offending field, when the failure is attributable to one.
    pub field: Option<String>,
    /// Failure reason.
    pub reason: ViolationReason,
}

impl SchemaViolation {
    fn new(payload: PayloadKind, field: Option<&str>, reason: ViolationReason) -> Self {
        Self {
            payload,
            field: field.map(str::to_owned),
            reason,
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = &self.reason;
        match &self.field {
            Some(field) => write!(formatter, "invalid {}.{field}: {reason}", self.payload),
            None => write!(formatter, "invalid {}: {reason}", self.payload),
        }
    }
}

/// Structural validator for one payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadSchema {
    /// Declared top-level fields.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    /// Whether fields not listed in `fields` are accepted.
    #[serde(default)]
    pub allow_unknown_fields: bool,
}

impl PayloadSchema {
    /// Creates a closed schema with no fields.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            fields: Vec::new(),
            allow_unknown_fields: false,
        }
    }

    /// Creates a schema that accepts any object.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            fields: Vec::new(),
            allow_unknown_fields: true,
        }
    }

    /// Adds a field specification.
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Accepts fields that the schema does not declare.
    #[must_use]
    pub const fn allowing_unknown_fields(mut self) -> Self {
        self.allow_unknown_fields = true;
        self
    }

    /// Checks the schema definition itself.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadSchemaError`] for blank or duplicate field names and
    /// for `select` fields without options.
    pub fn validate_definition(&self) -> Result<(), PayloadSchemaError> {
        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(PayloadSchemaError::EmptyFieldName);
            }
            if !names.insert(field.name.as_str()) {
                return Err(PayloadSchemaError::DuplicateField(field.name.clone()));
            }
            if field.field_type == FieldType::Select && field.options.is_empty() {
                return Err(PayloadSchemaError::SelectWithoutOptions(field.name.clone()));
            }
        }
        Ok(())
    }

    /// Validates a payload against this schema.
    ///
    /// A `null` payload is treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaViolation`] found, naming the offending field
    /// where possible.
    pub fn validate(&self, kind: PayloadKind, payload: &Value) -> Result<(), SchemaViolation> {
        let empty = Map::new();
        let object = match payload {
            Value::Object(object) => object,
            Value::Null => &empty,
            _ => {
                return Err(SchemaViolation::new(kind, None, ViolationReason::NotAnObject));
            }
        };

        for field in &self.fields {
            check_field(kind, field, object.get(&field.name))?;
        }

        if !self.allow_unknown_fields
            && let Some(unknown) = object
                .keys()
                .find(|key| !self.fields.iter().any(|field| field.name == **key))
        {
            return Err(SchemaViolation::new(
                kind,
                Some(unknown.as_str()),
                ViolationReason::UnknownField,
            ));
        }

        Ok(())
    }
}

fn check_field(
    kind: PayloadKind,
    field: &FieldSpec,
    value: Option<&Value>,
) -> Result<(), SchemaViolation> {
    let present = match value {
        None | Some(Value::Null) if field.required => {
            return Err(SchemaViolation::new(
                kind,
                Some(field.name.as_str()),
                ViolationReason::MissingRequiredField,
            ));
        }
        None | Some(Value::Null) => return Ok(()),
        Some(present) => present,
    };

    if !field.field_type.accepts(present) {
        return Err(SchemaViolation::new(
            kind,
            Some(field.name.as_str()),
            ViolationReason::WrongType {
                expected: field.field_type,
            },
        ));
    }

    if let Value::String(text) = present {
        if field.required && text.trim().is_empty() {
            return Err(SchemaViolation::new(
                kind,
                Some(field.name.as_str()),
                ViolationReason::BlankValue,
            ));
        }
        if field.field_type == FieldType::Select
            && !field.options.iter().any(|option| option == text)
        {
            return Err(SchemaViolation::new(
                kind,
                Some(field.name.as_str()),
                ViolationReason::OptionNotAllowed {
                    value: (kind == PayloadKind::Config).then(|| text.clone()),
                },
            ));
        }
    }

    Ok(())
}
