//! # Reference Counting
//!
//! First pass over the object graph: how many times each dedup-eligible node
//! is reached.

use crate::model::{NodeId, Object, Value};
use std::collections::{HashMap, HashSet};

/// Identity-keyed occurrence counts of dedup-eligible objects.
#[derive(Debug, Default)]
pub(crate) struct ReferenceCounter {
    counts: HashMap<NodeId, usize>,
    visited: HashSet<NodeId>,
}

impl ReferenceCounter {
    /// Counts every occurrence reachable from `root`.
    pub(crate) fn count(root: &Object) -> Self {
        let mut counter = Self::default();
        counter.visit_object(root);
        counter
    }

    /// Occurrences of `object`. Zero for nodes never reached or not eligible.
    pub(crate) fn count_of(&self, object: &Object) -> usize {
        self.counts.get(&object.id()).copied().unwrap_or(0)
    }

    fn visit_value(&mut self, value: &Value) {
        match value {
            Value::Object(object) => self.visit_object(object),
            Value::Map(fields) => fields.values().for_each(|v| self.visit_value(v)),
            Value::Array(items) => items.iter().for_each(|v| self.visit_value(v)),
            _ => {}
        }
    }

    fn visit_object(&mut self, object: &Object) {
        if object.is_dedup_eligible() {
            let id = object.id();
            *self.counts.entry(id).or_default() += 1;
            // Children of a shared node are counted once.
            if !self.visited.insert(id) {
                return;
            }
        }
        for value in object.fields().values() {
            self.visit_value(value);
        }
    }
}
