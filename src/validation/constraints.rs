use crate::core::value::Value;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"#,
    )
    .expect("email pattern must compile")
});

const URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// A single check on a field value, paired with the message shown when it
/// fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Required { message: String },
    MinLength { min: usize, message: String },
    Url { message: String },
    Email { message: String },
    Min { min: f64, message: String },
    Max { max: f64, message: String },
    Positive { message: String },
    Integer { message: String },
}

impl Constraint {
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::MinLength { message, .. }
            | Self::Url { message }
            | Self::Email { message }
            | Self::Min { message, .. }
            | Self::Max { message, .. }
            | Self::Positive { message }
            | Self::Integer { message } => message.as_str(),
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required { .. })
    }

    /// Checks `value`, returning the failure message. Numeric constraints
    /// fail on values that have no numeric reading.
    pub fn check(&self, value: &Value) -> Result<(), &str> {
        let passed = match self {
            Self::Required { .. } => !value.is_empty(),
            Self::MinLength { min, .. } => value.to_text().chars().count() >= *min,
            Self::Url { .. } => value.as_text().is_some_and(is_url),
            Self::Email { .. } => value.as_text().is_some_and(|text| EMAIL.is_match(text)),
            Self::Min { min, .. } => value.as_number().is_some_and(|n| n >= *min),
            Self::Max { max, .. } => value.as_number().is_some_and(|n| n <= *max),
            Self::Positive { .. } => value.as_number().is_some_and(|n| n > 0.0),
            Self::Integer { .. } => value.as_number().is_some_and(|n| n.fract() == 0.0),
        };
        if passed { Ok(()) } else { Err(self.message()) }
    }
}

fn is_url(text: &str) -> bool {
    if text.chars().any(char::is_whitespace) {
        return false;
    }
    url::Url::parse(text)
        .is_ok_and(|url| URL_SCHEMES.contains(&url.scheme()) && url.has_host())
}

#[cfg(test)]
mod tests {
    use super::Constraint;
    use crate::core::value::Value;

    fn url() -> Constraint {
        Constraint::Url {
            message: "bad url".to_string(),
        }
    }

    fn email() -> Constraint {
        Constraint::Email {
            message: "bad email".to_string(),
        }
    }

    #[test]
    fn url_requires_scheme_and_host() {
        assert!(url().check(&Value::text("https://x.com/a.png")).is_ok());
        assert!(url().check(&Value::text("ftp://files.example.org/a")).is_ok());
        assert_eq!(url().check(&Value::text("x.com/a.png")), Err("bad url"));
        assert_eq!(url().check(&Value::text("mailto:a@b.se")), Err("bad url"));
        assert_eq!(url().check(&Value::text("https://x.com/a b.png")), Err("bad url"));
    }

    #[test]
    fn email_pattern() {
        assert!(email().check(&Value::text("anna@example.se")).is_ok());
        assert!(email().check(&Value::text("a.b+c@mail.example.com")).is_ok());
        assert_eq!(email().check(&Value::text("anna@")), Err("bad email"));
        assert_eq!(email().check(&Value::text("anna.example.se")), Err("bad email"));
    }

    #[test]
    fn min_length_counts_chars() {
        let constraint = Constraint::MinLength {
            min: 2,
            message: "short".to_string(),
        };
        assert!(constraint.check(&Value::text("åä")).is_ok());
        assert_eq!(constraint.check(&Value::text("å")), Err("short"));
    }

    #[test]
    fn numeric_constraints() {
        let min = Constraint::Min {
            min: 1.0,
            message: "min".to_string(),
        };
        let positive = Constraint::Positive {
            message: "positive".to_string(),
        };
        let max = Constraint::Max {
            max: 10.0,
            message: "max".to_string(),
        };
        let integer = Constraint::Integer {
            message: "integer".to_string(),
        };
        assert!(min.check(&Value::Number(1.0)).is_ok());
        assert_eq!(min.check(&Value::Number(0.5)), Err("min"));
        assert!(max.check(&Value::Number(10.0)).is_ok());
        assert_eq!(max.check(&Value::Number(10.5)), Err("max"));
        assert_eq!(positive.check(&Value::Number(0.0)), Err("positive"));
        assert!(positive.check(&Value::Number(0.1)).is_ok());
        assert_eq!(integer.check(&Value::Number(2.5)), Err("integer"));
        assert!(integer.check(&Value::Number(-3.0)).is_ok());
    }
}
