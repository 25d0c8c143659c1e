//! # Field Values
//!
//! The raw values an `Object` is assembled from, including the `Empty`
//! sentinel that marks a field as "not provided".

use crate::model::Object;
use indexmap::IndexMap;
use serde_json::{Number, Value as JsonValue};

/// Insertion-ordered raw field map used to construct objects and plain mappings.
pub type Fields = IndexMap<String, Value>;

/// A raw value placed in an object graph.
///
/// Scalars compare by value, containers element-wise, and `Object` by identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Sentinel meaning "field not provided". Never emitted.
    Empty,
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(Number),
    /// JSON string.
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Plain mapping that is not a declared object.
    Map(Fields),
    /// A shared declared object node.
    Object(Object),
}

impl Value {
    /// Returns `true` for the `Empty` sentinel.
    pub fn is_empty_sentinel(&self) -> bool {
        matches!(self, Value::Empty)
    }
}

/// Returns `Empty` when `value` equals `baseline`, otherwise `value`.
///
/// Lets a caller write "include this field only if it differs from X".
pub fn non_empty(value: impl Into<Value>, baseline: impl Into<Value>) -> Value {
    let value = value.into();
    if value == baseline.into() {
        Value::Empty
    } else {
        value
    }
}

/// Shorthand for `non_empty(value, Value::Null)`.
pub fn non_null(value: impl Into<Value>) -> Value {
    non_empty(value, Value::Null)
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::from(f64::from(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::Map(fields)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl From<&Object> for Value {
    fn from(object: &Object) -> Self {
        Value::Object(object.clone())
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => Value::Number(n),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Builds an insertion-ordered [`Fields`] map.
///
/// ```
/// use oas_build_core::{fields, Value};
///
/// let f = fields! { "type" => "string", "maxLength" => 10 };
/// assert_eq!(f["type"], Value::from("string"));
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::model::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::model::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::model::Value::from($value));
        )+
        fields
    }};
}
