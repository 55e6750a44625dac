//! YAML classification and normalization for plain manifest files

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Why a file could not be re-encoded
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("document {index} is a {found}, expected a mapping")]
    NotAMapping { index: usize, found: &'static str },
}

/// Whether `path` names YAML content (`.yaml`, `.yml`, `.json`)
pub fn is_yaml_like(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "yaml" | "yml" | "json"))
}

/// Re-encode manifest bytes as YAML.
///
/// JSON is tried first, then (multi-document) YAML. Every document must be
/// a mapping; empty documents are dropped and the rest are joined with
/// `---`. Empty input gives empty output.
pub fn to_yaml(data: &[u8]) -> Result<Vec<u8>, NormalizeError> {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(data) {
        return match json {
            serde_json::Value::Null => Ok(Vec::new()),
            serde_json::Value::Object(_) => Ok(serde_yaml::to_string(&json)?.into_bytes()),
            other => Err(NormalizeError::NotAMapping {
                index: 0,
                found: json_kind(&other),
            }),
        };
    }

    let mut out = String::new();
    for (index, document) in serde_yaml::Deserializer::from_slice(data).enumerate() {
        let value = serde_yaml::Value::deserialize(document)?;
        match value {
            serde_yaml::Value::Null => continue,
            serde_yaml::Value::Mapping(_) => {}
            other => {
                return Err(NormalizeError::NotAMapping {
                    index,
                    found: yaml_kind(&other),
                });
            }
        }

        if !out.is_empty() {
            out.push_str("---\n");
        }
        out.push_str(&serde_yaml::to_string(&value)?);
    }

    Ok(out.into_bytes())
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "sequence",
        serde_json::Value::Object(_) => "mapping",
    }
}
