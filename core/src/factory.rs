//! # OpenAPI Namespace
//!
//! Version-gated entry point bundling the object constructors, the `Empty`
//! sentinel helpers and `build`.

use crate::document::Document;
use crate::error::{AppError, AppResult};
use crate::materializer::materialize;
use crate::model::{non_empty, Fields, Kind, Object, Value};

/// OpenAPI versions this crate can build.
pub const SUPPORTED_VERSIONS: &[&str] = &["3.0.3"];

/// Object factory bound to one OpenAPI version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenApiSpec {
    version: String,
}

impl OpenApiSpec {
    /// Creates a namespace for `version`.
    ///
    /// # Errors
    ///
    /// * `AppError::UnsupportedVersion` - `version` is not in [`SUPPORTED_VERSIONS`].
    pub fn new(version: &str) -> AppResult<Self> {
        if !SUPPORTED_VERSIONS.iter().any(|v| *v == version) {
            return Err(AppError::UnsupportedVersion(version.to_string()));
        }
        Ok(Self {
            version: version.to_string(),
        })
    }

    /// The version written to built documents.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Document root.
    pub fn openapi(&self, fields: Fields) -> Object {
        Object::new(Kind::OpenApi, fields)
    }

    /// Info Object.
    pub fn info(&self, fields: Fields) -> Object {
        Object::new(Kind::Info, fields)
    }

    /// Path Item Object.
    pub fn path_item(&self, fields: Fields) -> Object {
        Object::new(Kind::PathItem, fields)
    }

    /// Operation Object.
    pub fn operation(&self, fields: Fields) -> Object {
        Object::new(Kind::Operation, fields)
    }

    /// Parameter Object.
    pub fn parameter(&self, fields: Fields) -> Object {
        Object::new(Kind::Parameter, fields)
    }

    /// Request Body Object.
    pub fn request_body(&self, fields: Fields) -> Object {
        Object::new(Kind::RequestBody, fields)
    }

    /// Response Object.
    pub fn response(&self, fields: Fields) -> Object {
        Object::new(Kind::Response, fields)
    }

    /// Media Type Object.
    pub fn media_type(&self, fields: Fields) -> Object {
        Object::new(Kind::MediaType, fields)
    }

    /// Tag Object.
    pub fn tag(&self, fields: Fields) -> Object {
        Object::new(Kind::Tag, fields)
    }

    /// Anonymous Schema Object. Always inlined.
    pub fn schema(&self, fields: Fields) -> Object {
        Object::new(Kind::Schema, fields)
    }

    /// Schema Object hoisted to `components.schemas.<key>` when shared.
    pub fn keyed_schema(&self, fields: Fields, key: impl Into<String>) -> Object {
        Object::keyed(Kind::Schema, fields, key)
    }

    /// Security Scheme Object registered under `components.securitySchemes.<key>`.
    pub fn security_scheme(&self, fields: Fields, key: impl Into<String>) -> Object {
        Object::keyed(Kind::SecurityScheme, fields, key)
    }

    /// Security Requirement Object naming `scheme`.
    pub fn security_requirement(&self, scheme: &Object) -> Object {
        Object::security_requirement(scheme)
    }

    /// The "not provided" sentinel.
    pub fn empty(&self) -> Value {
        Value::Empty
    }

    /// See [`non_empty`].
    pub fn non_empty(&self, value: impl Into<Value>, baseline: impl Into<Value>) -> Value {
        non_empty(value, baseline)
    }

    /// Materializes `root` with this namespace's version.
    pub fn build(&self, root: &Object) -> AppResult<Document> {
        materialize(root, &self.version)
    }
}
