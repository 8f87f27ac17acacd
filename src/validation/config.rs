//! Schema documents. A schema can be written as YAML or JSON:
//!
//! ```yaml
//! fields:
//!   title:
//!     kind: text
//!     constraints:
//!       - required: { message: Title required }
//!       - min_length: { min: 2, message: Title must be at least two characters }
//! ```

use super::Schema;
use serde_yaml::with::singleton_map_recursive;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read schema {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML schema: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),
}

/// Constraints are read as single-key maps (`- min: { ... }`) rather than
/// YAML tags.
pub fn schema_from_yaml(source: &str) -> Result<Schema, ConfigError> {
    let deserializer = serde_yaml::Deserializer::from_str(source);
    Ok(singleton_map_recursive::deserialize(deserializer)?)
}

pub fn schema_from_json(source: &str) -> Result<Schema, ConfigError> {
    Ok(serde_json::from_str(source)?)
}

pub fn schema_to_yaml(schema: &Schema) -> Result<String, ConfigError> {
    let value = singleton_map_recursive::serialize(schema, serde_yaml::value::Serializer)?;
    Ok(serde_yaml::to_string(&value)?)
}

/// Loads a schema file; `.json` files are read as JSON, anything else as YAML.
pub fn load_schema(path: &Path) -> Result<Schema, ConfigError> {
    let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let schema = if is_json {
        schema_from_json(&source)?
    } else {
        schema_from_yaml(&source)?
    };
    tracing::debug!(path = %path.display(), fields = schema.fields.len(), "loaded schema");
    Ok(schema)
}
