#![deny(missing_docs)]

//! # Declarative Object Model
//!
//! - **value**: raw field values and the `Empty` sentinel.
//! - **declared**: per-kind default and transform tables.
//! - **text**: free-text normalization.
//!
//! An [`Object`] is an immutable, insertion-ordered node. Cloning it clones the
//! handle, not the node, so the same instance can be placed at several points
//! of a document graph. Equality and hashing are by identity.

pub mod declared;
pub mod text;
pub mod value;

pub use declared::{declared_fields, field_spec, FieldDefault, FieldSpec, Transform};
pub use text::cleandoc;
pub use value::{non_empty, non_null, Fields, Value};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The declared object kinds of an OpenAPI 3.0 document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Document root. The only kind carrying the root marker.
    OpenApi,
    /// `info`
    Info,
    /// Entry of `paths`.
    PathItem,
    /// HTTP operation.
    Operation,
    /// Operation or path parameter.
    Parameter,
    /// `requestBody`
    RequestBody,
    /// Entry of `responses`.
    Response,
    /// Entry of `content`.
    MediaType,
    /// Tag metadata.
    Tag,
    /// Schema. Dedup-eligible: hoisted into `components.schemas` when shared.
    Schema,
    /// Security scheme, registered under `components.securitySchemes`.
    SecurityScheme,
    /// Security requirement wrapping a scheme.
    SecurityRequirement,
}

impl Kind {
    /// Whether objects of this kind can be materialized as a document.
    pub fn is_root(self) -> bool {
        matches!(self, Kind::OpenApi)
    }

    /// Whether objects of this kind take part in occurrence counting and hoisting.
    pub fn is_dedup_eligible(self) -> bool {
        matches!(self, Kind::Schema)
    }

    /// OpenAPI name of the object kind.
    pub fn name(self) -> &'static str {
        match self {
            Kind::OpenApi => "OpenAPIObject",
            Kind::Info => "InfoObject",
            Kind::PathItem => "PathItemObject",
            Kind::Operation => "OperationObject",
            Kind::Parameter => "ParameterObject",
            Kind::RequestBody => "RequestBodyObject",
            Kind::Response => "ResponseObject",
            Kind::MediaType => "MediaTypeObject",
            Kind::Tag => "TagObject",
            Kind::Schema => "SchemaObject",
            Kind::SecurityScheme => "SecuritySchemeObject",
            Kind::SecurityRequirement => "SecurityRequirementObject",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of an object node, stable while the node is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
struct Node {
    kind: Kind,
    fields: Fields,
    key: Option<String>,
    scheme: Option<Object>,
}

/// Shared handle to an immutable declared object.
#[derive(Debug, Clone)]
pub struct Object(Arc<Node>);

impl Object {
    /// Builds an object of `kind` from raw fields.
    ///
    /// Fields set to [`Value::Empty`] are dropped. Declared fields equal to their
    /// default are dropped, and the remaining declared fields are transformed.
    pub fn new(kind: Kind, raw: Fields) -> Self {
        Self::build(kind, raw, None, None)
    }

    /// Builds an object carrying a component key.
    ///
    /// For dedup-eligible kinds an empty key counts as no key, so the object is
    /// always inlined. Other kinds keep the key as given.
    pub fn keyed(kind: Kind, raw: Fields, key: impl Into<String>) -> Self {
        let key = Some(key.into()).filter(|k| !kind.is_dedup_eligible() || !k.is_empty());
        Self::build(kind, raw, key, None)
    }

    /// Builds a security requirement naming `scheme`.
    ///
    /// Its fields are `{scheme.key: []}`. A scheme without a key is named `""`.
    pub fn security_requirement(scheme: &Object) -> Self {
        let name = scheme.key().unwrap_or_default().to_string();
        let mut raw = Fields::new();
        raw.insert(name, Value::Array(Vec::new()));
        Self::build(Kind::SecurityRequirement, raw, None, Some(scheme.clone()))
    }

    fn build(kind: Kind, raw: Fields, key: Option<String>, scheme: Option<Object>) -> Self {
        let fields = raw
            .into_iter()
            .filter(|(_, value)| !value.is_empty_sentinel())
            .filter_map(|(name, value)| match field_spec(kind, &name) {
                Some(spec) if spec.default.is_some_and(|d| d.matches(&value)) => None,
                Some(spec) => Some((name, spec.transform.apply(value))),
                None => Some((name, value)),
            })
            .collect();

        Object(Arc::new(Node {
            kind,
            fields,
            key,
            scheme,
        }))
    }

    /// The declared kind.
    pub fn kind(&self) -> Kind {
        self.0.kind
    }

    /// All stored fields, in insertion order.
    pub fn fields(&self) -> &Fields {
        &self.0.fields
    }

    /// A single field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.fields.get(name)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.fields.iter()
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.0.fields.len()
    }

    /// Whether no fields are stored.
    pub fn is_empty(&self) -> bool {
        self.0.fields.is_empty()
    }

    /// The component key, if any.
    pub fn key(&self) -> Option<&str> {
        self.0.key.as_deref()
    }

    /// The wrapped scheme of a security requirement.
    pub fn scheme(&self) -> Option<&Object> {
        self.0.scheme.as_ref()
    }

    /// Whether this object carries the document-root marker.
    pub fn is_root(&self) -> bool {
        self.kind().is_root()
    }

    /// Whether this object is counted and possibly hoisted during materialization.
    pub fn is_dedup_eligible(&self) -> bool {
        self.kind().is_dedup_eligible()
    }

    /// Whether this object registers a security scheme during materialization.
    pub fn is_security_requirement(&self) -> bool {
        self.kind() == Kind::SecurityRequirement && self.0.scheme.is_some()
    }

    pub(crate) fn id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.0) as usize)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Object {}

impl Hash for Object {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
