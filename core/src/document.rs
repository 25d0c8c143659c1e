//! # Materialized Document
//!
//! The plain JSON tree produced by materialization, plus JSON/YAML rendering.

use crate::error::{AppError, AppResult};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::Path;

/// A fully materialized OpenAPI document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Map<String, JsonValue>);

impl Document {
    pub(crate) fn new(map: Map<String, JsonValue>) -> Self {
        Self(map)
    }

    /// Top-level fields in output order.
    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    /// A top-level field.
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// The `openapi` version tag.
    pub fn version(&self) -> Option<&str> {
        self.get("openapi").and_then(JsonValue::as_str)
    }

    /// The `components` object, if anything was hoisted or registered.
    pub fn components(&self) -> Option<&Map<String, JsonValue>> {
        self.get("components").and_then(JsonValue::as_object)
    }

    /// Consumes the document into a JSON value.
    pub fn into_value(self) -> JsonValue {
        JsonValue::Object(self.0)
    }

    /// Renders as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> AppResult<String> {
        serde_json::to_string_pretty(&self.0)
            .map_err(|e| AppError::Serialization(format!("JSON serialization failed: {}", e)))
    }

    /// Renders as YAML.
    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(&self.0)
            .map_err(|e| AppError::Serialization(format!("YAML serialization failed: {}", e)))
    }

    /// Writes the document to `path`.
    ///
    /// `.yaml` and `.yml` paths get YAML, everything else JSON. Missing parent
    /// directories are created.
    pub fn write_to_path(&self, path: &Path) -> AppResult<()> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let rendered = match ext {
            "yaml" | "yml" => self.to_yaml()?,
            _ => self.to_json_pretty()?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, rendered)?;
        Ok(())
    }
}

impl From<Document> for JsonValue {
    fn from(doc: Document) -> Self {
        doc.into_value()
    }
}
