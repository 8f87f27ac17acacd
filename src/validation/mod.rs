//! Schema-driven field validation.
//!
//! A [`Schema`] is plain data: an ordered set of fields, each with a kind and
//! a list of [`Constraint`]s. [`validate`] interprets it against a set of
//! [`Values`] and reports the first failing message per field.

pub mod config;
pub mod constraints;
pub mod schemas;

pub use constraints::Constraint;

use crate::core::FieldId;
use crate::core::value::{Value, Values};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    /// Values must read as a finite number before any constraint runs.
    Number,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_error: Option<String>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl FieldSchema {
    pub fn text() -> Self {
        Self::default()
    }

    pub fn number() -> Self {
        Self {
            kind: FieldKind::Number,
            ..Self::default()
        }
    }

    pub fn type_error(mut self, message: impl Into<String>) -> Self {
        self.type_error = Some(message.into());
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.constraint(Constraint::Required {
            message: message.into(),
        })
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.constraint(Constraint::MinLength {
            min,
            message: message.into(),
        })
    }

    pub fn url(self, message: impl Into<String>) -> Self {
        self.constraint(Constraint::Url {
            message: message.into(),
        })
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.constraint(Constraint::Email {
            message: message.into(),
        })
    }

    pub fn min(self, min: f64, message: impl Into<String>) -> Self {
        self.constraint(Constraint::Min {
            min,
            message: message.into(),
        })
    }

    pub fn max(self, max: f64, message: impl Into<String>) -> Self {
        self.constraint(Constraint::Max {
            max,
            message: message.into(),
        })
    }

    pub fn positive(self, message: impl Into<String>) -> Self {
        self.constraint(Constraint::Positive {
            message: message.into(),
        })
    }

    pub fn integer(self, message: impl Into<String>) -> Self {
        self.constraint(Constraint::Integer {
            message: message.into(),
        })
    }

    pub fn is_required(&self) -> bool {
        self.constraints.iter().any(Constraint::is_required)
    }

    /// First failing message for `value`, or `None` when it passes.
    ///
    /// Empty values only answer to `required`; a field without it accepts
    /// an empty value whatever else is declared.
    pub fn check(&self, id: &FieldId, value: &Value) -> Option<String> {
        if value.is_empty() {
            return self
                .constraints
                .iter()
                .find(|c| c.is_required())
                .map(|c| c.message().to_string());
        }

        let value = match self.kind {
            FieldKind::Text => Cow::Borrowed(value),
            FieldKind::Number => match value.as_number() {
                Some(number) => Cow::Owned(Value::Number(number)),
                None => return Some(self.type_error_message(id)),
            },
        };

        self.constraints
            .iter()
            .find_map(|c| c.check(&value).err())
            .map(str::to_string)
    }

    fn type_error_message(&self, id: &FieldId) -> String {
        self.type_error
            .clone()
            .unwrap_or_else(|| format!("{id} must be a number"))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    pub fields: IndexMap<FieldId, FieldSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, id: impl Into<FieldId>, field: FieldSchema) -> Self {
        self.fields.insert(id.into(), field);
        self
    }

    pub fn get(&self, id: &str) -> Option<&FieldSchema> {
        self.fields.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &FieldId> {
        self.fields.keys()
    }

    /// One empty value per declared field.
    pub fn empty_values(&self) -> Values {
        self.fields
            .keys()
            .map(|id| (id.clone(), Value::None))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldValidationError {
    pub field: FieldId,
    pub message: String,
}

/// Non-empty set of field errors returned by a rejected submit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(Vec<FieldValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|err| err.field.as_str() == field)
            .map(|err| err.message.as_str())
    }

    pub fn into_vec(self) -> Vec<FieldValidationError> {
        self.0
    }
}

/// Per-field outcome of [`validate`]: valid fields are absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    errors: IndexMap<FieldId, String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(id, message)| (id.as_str(), message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(ValidationErrors(
            self.errors
                .into_iter()
                .map(|(field, message)| FieldValidationError { field, message })
                .collect(),
        ))
    }
}

/// Validates every field declared in `schema`. Values for undeclared fields
/// are ignored; missing ones count as empty.
pub fn validate(schema: &Schema, values: &Values) -> ValidationReport {
    let errors = schema
        .fields
        .iter()
        .filter_map(|(id, field)| {
            let value = values.get(id.as_str()).unwrap_or(&Value::None);
            field.check(id, value).map(|message| (id.clone(), message))
        })
        .collect();
    ValidationReport { errors }
}
