#![deny(missing_docs)]

//! # Graph Materializer
//!
//! - **counter**: identity-keyed occurrence counting (pass 1).
//! - **rewrite**: inline-or-hoist conversion to JSON (pass 2).
//! - **components**: the partitioned table hoisted entries land in.
//!
//! Counting finishes before any rewriting starts: whether a schema is hoisted
//! depends on its total number of occurrences in the whole graph.

pub mod components;
mod counter;
mod rewrite;

pub use components::{SCHEMAS, SECURITY_SCHEMES};

use crate::document::Document;
use crate::error::{AppError, AppResult};
use crate::model::Object;
use counter::ReferenceCounter;
use rewrite::Rewriter;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Prefix of every `$ref` pointer emitted for a hoisted schema.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Materializes the graph rooted at `root` into a plain document.
///
/// Keyed schemas reached more than once are replaced by
/// `{"$ref": "#/components/schemas/<key>"}` and stored once under
/// `components.schemas`. Every security requirement registers its scheme under
/// `components.securitySchemes`. The result carries `openapi: version`, and
/// `components` only when something was registered.
///
/// # Errors
///
/// * `AppError::InvalidRoot` - `root` does not carry the document-root marker.
pub fn materialize(root: &Object, version: &str) -> AppResult<Document> {
    if !root.is_root() {
        return Err(AppError::InvalidRoot(root.kind()));
    }
    debug!(version, fields = root.len(), "materializing document");

    let counter = ReferenceCounter::count(root);
    let mut rewriter = Rewriter::new(&counter);
    let mut doc = rewriter.rewrite_fields(root.fields());
    let components = rewriter.finish();

    debug!(
        schemas = components.len_of(SCHEMAS),
        security_schemes = components.len_of(SECURITY_SCHEMES),
        "materialized document"
    );

    doc.insert("openapi".to_string(), JsonValue::String(version.to_string()));
    if !components.is_empty() {
        doc.insert("components".to_string(), components.into_value());
    }

    Ok(Document::new(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use crate::model::Kind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_rejects_non_root() {
        let info = Object::new(Kind::Info, fields! { "title" => "t" });
        let err = materialize(&info, "3.0.3").unwrap_err();
        assert!(matches!(err, AppError::InvalidRoot(Kind::Info)));
    }

    #[test]
    fn test_version_and_no_components() {
        let root = Object::new(Kind::OpenApi, fields! { "paths" => fields! {} });
        let doc = materialize(&root, "3.0.3").unwrap();
        assert_eq!(doc.into_value(), json!({ "paths": {}, "openapi": "3.0.3" }));
    }

    #[test]
    fn test_version_overrides_caller_field_in_place() {
        let root = Object::new(Kind::OpenApi, fields! { "openapi" => "9.9", "paths" => fields! {} });
        let doc = materialize(&root, "3.0.3").unwrap();
        let keys: Vec<&String> = doc.as_map().keys().collect();
        assert_eq!(keys, vec!["openapi", "paths"]);
        assert_eq!(doc.version(), Some("3.0.3"));
    }

    #[test]
    fn test_components_appended_last() {
        let foo = Object::keyed(Kind::Schema, fields! { "type" => "string" }, "foo");
        let root = Object::new(Kind::OpenApi, fields! { "a" => &foo, "b" => &foo });
        let doc = materialize(&root, "3.0.3").unwrap();
        let keys: Vec<&String> = doc.as_map().keys().collect();
        assert_eq!(keys, vec!["a", "b", "openapi", "components"]);
    }
}
