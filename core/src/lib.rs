#![deny(missing_docs)]

//! # OAS Build Core
//!
//! Builds OpenAPI documents from a graph of declared objects. Keyed schemas
//! that are reached from more than one place are hoisted into
//! `components.schemas` and replaced by `$ref` pointers; everything else is
//! inlined.
//!
//! ```
//! use oas_build_core::{fields, OpenApiSpec};
//!
//! let oas = OpenApiSpec::new("3.0.3").unwrap();
//! let id = oas.keyed_schema(fields! { "type" => "string" }, "Id");
//! let root = oas.openapi(fields! { "a" => &id, "b" => &id });
//! let doc = oas.build(&root).unwrap();
//! assert_eq!(doc.get("a"), doc.get("b"));
//! assert!(doc.components().unwrap().contains_key("schemas"));
//! ```

/// Shared error types.
pub mod error;

/// Declarative object model.
pub mod model;

/// Two-pass graph materialization.
pub mod materializer;

/// Materialized document output.
pub mod document;

/// Version-gated object factory.
pub mod factory;

pub use document::Document;
pub use error::{AppError, AppResult};
pub use factory::{OpenApiSpec, SUPPORTED_VERSIONS};
pub use materializer::{materialize, SCHEMA_REF_PREFIX};
pub use model::{non_empty, non_null, Fields, Kind, Object, Value};
