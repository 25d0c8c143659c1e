//! # Components Table
//!
//! Partitioned store of hoisted entries, emitted as the document's `components`.

use crate::model::NodeId;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

/// Partition holding hoisted schemas.
pub const SCHEMAS: &str = "schemas";

/// Partition holding security schemes.
pub const SECURITY_SCHEMES: &str = "securitySchemes";

/// Entries keyed by partition, then by component key. Last write wins.
#[derive(Debug, Default)]
pub(crate) struct Components {
    partitions: IndexMap<&'static str, IndexMap<String, JsonValue>>,
    owners: HashMap<(&'static str, String), NodeId>,
}

impl Components {
    /// Stores `value` at `partition`/`key`, replacing any previous entry.
    ///
    /// Returns `true` when the replaced entry was written by a different node.
    pub(crate) fn set_field(
        &mut self,
        partition: &'static str,
        key: &str,
        owner: NodeId,
        value: JsonValue,
    ) -> bool {
        self.partitions
            .entry(partition)
            .or_default()
            .insert(key.to_string(), value);
        self.owners
            .insert((partition, key.to_string()), owner)
            .is_some_and(|previous| previous != owner)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.partitions.values().all(IndexMap::is_empty)
    }

    #[cfg(test)]
    pub(crate) fn get(&self, partition: &str, key: &str) -> Option<&JsonValue> {
        self.partitions.get(partition)?.get(key)
    }

    pub(crate) fn len_of(&self, partition: &str) -> usize {
        self.partitions.get(partition).map_or(0, IndexMap::len)
    }

    /// Converts into the `components` object, skipping empty partitions.
    pub(crate) fn into_value(self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .partitions
            .into_iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(name, entries)| {
                (
                    name.to_string(),
                    JsonValue::Object(entries.into_iter().collect()),
                )
            })
            .collect();
        JsonValue::Object(map)
    }
}
