//! # Declared Fields
//!
//! Static per-kind tables describing which fields are suppressed at their
//! default value and which are transformed on construction.

use crate::model::text::cleandoc;
use crate::model::{Kind, Value};

/// A declared default. A raw value equal to it is omitted from the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    /// Boolean default (e.g. `deprecated: false`).
    Bool(bool),
}

impl FieldDefault {
    /// Whether `value` equals this default.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldDefault::Bool(default), Value::Bool(v)) => default == v,
            _ => false,
        }
    }
}

/// A pure, total value transform applied to a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Stores the value unchanged.
    Identity,
    /// Applies [`cleandoc`] to string values.
    Cleandoc,
}

impl Transform {
    /// Applies the transform. Values outside its domain pass through unchanged.
    pub fn apply(&self, value: Value) -> Value {
        match (self, value) {
            (Transform::Cleandoc, Value::String(s)) => Value::String(cleandoc(&s)),
            (_, value) => value,
        }
    }
}

/// One entry of a kind's declared-field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as it appears in the document.
    pub name: &'static str,
    /// Value at which the field is omitted.
    pub default: Option<FieldDefault>,
    /// Transform applied to a kept value.
    pub transform: Transform,
}

impl FieldSpec {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            default: None,
            transform: Transform::Cleandoc,
        }
    }

    const fn flag(name: &'static str) -> Self {
        Self {
            name,
            default: Some(FieldDefault::Bool(false)),
            transform: Transform::Identity,
        }
    }
}

const DESCRIBED: &[FieldSpec] = &[FieldSpec::text("description")];

const OPERATION: &[FieldSpec] = &[FieldSpec::text("description"), FieldSpec::flag("deprecated")];

const PARAMETER: &[FieldSpec] = &[
    FieldSpec::flag("required"),
    FieldSpec::text("description"),
    FieldSpec::flag("deprecated"),
];

const REQUEST_BODY: &[FieldSpec] = &[FieldSpec::flag("required"), FieldSpec::text("description")];

const SCHEMA: &[FieldSpec] = &[
    FieldSpec::text("description"),
    FieldSpec::flag("readOnly"),
    FieldSpec::flag("writeOnly"),
    FieldSpec::flag("uniqueItems"),
    FieldSpec::flag("nullable"),
    FieldSpec::flag("exclusiveMaximum"),
    FieldSpec::flag("exclusiveMinimum"),
];

/// Returns the declared-field table for `kind`.
pub fn declared_fields(kind: Kind) -> &'static [FieldSpec] {
    match kind {
        Kind::Info | Kind::PathItem | Kind::Response | Kind::Tag | Kind::SecurityScheme => {
            DESCRIBED
        }
        Kind::Operation => OPERATION,
        Kind::Parameter => PARAMETER,
        Kind::RequestBody => REQUEST_BODY,
        Kind::Schema => SCHEMA,
        Kind::OpenApi | Kind::MediaType | Kind::SecurityRequirement => &[],
    }
}

/// Looks up the declaration of `name` for `kind`.
pub fn field_spec(kind: Kind, name: &str) -> Option<&'static FieldSpec> {
    declared_fields(kind).iter().find(|spec| spec.name == name)
}
