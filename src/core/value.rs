use crate::core::FieldId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field values keyed by field id, in insertion order.
pub type Values = IndexMap<FieldId, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Blank text counts as empty, matching what a user sees in an untouched input.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.trim().is_empty(),
            Self::List(v) => v.is_empty(),
            Self::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Numeric view of the value. Text is trimmed and parsed; non-finite
    /// results are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            Self::Number(v) => *v,
            Self::Text(v) => v.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        number.is_finite().then_some(number)
    }

    /// Text the way an input control would display it.
    pub fn to_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Text(v) => v.clone(),
            Self::Number(v) => format_number(*v),
            Self::List(v) => v.join(", "),
        }
    }

    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(v) => Self::Text(v.to_string()),
            serde_json::Value::Number(v) => v.as_f64().map(Self::Number).unwrap_or(Self::None),
            serde_json::Value::String(v) => Self::Text(v.clone()),
            serde_json::Value::Array(items) => Self::List(
                items
                    .iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            serde_json::Value::Object(_) => Self::Text(value.to_string()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<String>> for Value {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Integral numbers print without a trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Collects the fields of a JSON object into [`Values`]. Non-object input
/// yields an empty set.
pub fn values_from_json(value: &serde_json::Value) -> Values {
    let Some(object) = value.as_object() else {
        return Values::new();
    };
    object
        .iter()
        .map(|(key, value)| (FieldId::from(key), Value::from_json(value)))
        .collect()
}
