//! # Rewrite Pass
//!
//! Second pass: converts the object graph into plain JSON, replacing shared
//! keyed schemas with `$ref` pointers and collecting the components table.

use crate::materializer::components::{Components, SCHEMAS, SECURITY_SCHEMES};
use crate::materializer::counter::ReferenceCounter;
use crate::materializer::SCHEMA_REF_PREFIX;
use crate::model::{Fields, NodeId, Object, Value};
use serde_json::{json, Map, Value as JsonValue};
use std::collections::HashMap;
use tracing::{trace, warn};

/// A single components write, kept so it can be replayed.
#[derive(Debug, Clone)]
struct Write {
    partition: &'static str,
    key: String,
    owner: NodeId,
    value: JsonValue,
}

/// Rewritten body of a hoisted schema plus the writes made while building it.
#[derive(Debug)]
struct Hoisted {
    body: JsonValue,
    writes: Vec<Write>,
}

pub(crate) struct Rewriter<'a> {
    counter: &'a ReferenceCounter,
    components: Components,
    hoisted: HashMap<NodeId, Hoisted>,
    // One frame per hoisted body currently being built.
    journal: Vec<Vec<Write>>,
}

impl<'a> Rewriter<'a> {
    pub(crate) fn new(counter: &'a ReferenceCounter) -> Self {
        Self {
            counter,
            components: Components::default(),
            hoisted: HashMap::new(),
            journal: Vec::new(),
        }
    }

    /// Returns the collected components table.
    pub(crate) fn finish(self) -> Components {
        self.components
    }

    /// Rewrites a field map, dropping `Empty` entries.
    pub(crate) fn rewrite_fields(&mut self, fields: &Fields) -> Map<String, JsonValue> {
        fields
            .iter()
            .filter_map(|(name, value)| Some((name.clone(), self.rewrite_value(value)?)))
            .collect()
    }

    /// Rewrites a value. `None` only for the `Empty` sentinel.
    fn rewrite_value(&mut self, value: &Value) -> Option<JsonValue> {
        let out = match value {
            Value::Empty => return None,
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => JsonValue::Number(n.clone()),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .filter_map(|item| self.rewrite_value(item))
                    .collect(),
            ),
            Value::Map(fields) => JsonValue::Object(self.rewrite_fields(fields)),
            Value::Object(object) => self.rewrite_object(object),
        };
        Some(out)
    }

    fn rewrite_object(&mut self, object: &Object) -> JsonValue {
        if object.is_dedup_eligible() {
            if let Some(key) = object.key() {
                if self.counter.count_of(object) > 1 {
                    return self.hoist(object, key);
                }
            }
        }

        if let Some(scheme) = object.scheme().filter(|_| object.is_security_requirement()) {
            self.register_scheme(scheme);
        }

        JsonValue::Object(self.rewrite_fields(object.fields()))
    }

    /// Hoists `object` and returns its `$ref`.
    ///
    /// The body is rewritten once per call. Later occurrences replay the
    /// components writes the body produced, in order, before writing the body
    /// itself, so colliding keys resolve exactly as a full rewrite would.
    fn hoist(&mut self, object: &Object, key: &str) -> JsonValue {
        let id = object.id();
        let body = match self.hoisted.get(&id) {
            Some(hoisted) => {
                let writes = hoisted.writes.clone();
                let body = hoisted.body.clone();
                for write in writes {
                    self.record(write);
                }
                body
            }
            None => {
                trace!(key, "hoisting shared schema");
                self.journal.push(Vec::new());
                let body = JsonValue::Object(self.rewrite_fields(object.fields()));
                let writes = self.journal.pop().unwrap_or_default();
                if let Some(parent) = self.journal.last_mut() {
                    parent.extend(writes.iter().cloned());
                }
                self.hoisted.insert(
                    id,
                    Hoisted {
                        body: body.clone(),
                        writes,
                    },
                );
                body
            }
        };

        self.record(Write {
            partition: SCHEMAS,
            key: key.to_string(),
            owner: id,
            value: body,
        });

        json!({ "$ref": format!("{}{}", SCHEMA_REF_PREFIX, key) })
    }

    fn register_scheme(&mut self, scheme: &Object) {
        let key = scheme.key().unwrap_or_default();
        trace!(key, "registering security scheme");
        let body = JsonValue::Object(self.rewrite_fields(scheme.fields()));
        self.record(Write {
            partition: SECURITY_SCHEMES,
            key: key.to_string(),
            owner: scheme.id(),
            value: body,
        });
    }

    /// Applies a components write and notes it in the innermost open frame.
    fn record(&mut self, write: Write) {
        let replaced_other = self.components.set_field(
            write.partition,
            &write.key,
            write.owner,
            write.value.clone(),
        );
        if replaced_other {
            warn!(
                partition = write.partition,
                key = %write.key,
                "distinct objects share a component key; keeping the last one"
            );
        }
        if let Some(frame) = self.journal.last_mut() {
            frame.push(write);
        }
    }
}
