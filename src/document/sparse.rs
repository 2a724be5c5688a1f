//! Sparse document builder.
//!
//! A [`SparseDocument`] is an insertion-ordered JSON object that only ever
//! receives "present" values. Each conditional setter defines presence for its
//! value type; a rejected value is a silent no-op, never an error.
//!
//! Insertion order is kept (serde_json `preserve_order`) so output is stable
//! and diffable, but consumers address fields by name only.

use serde::Serialize;
use serde_json::{Map, Value};

/// Ordered key/value builder that omits absent, empty and default values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SparseDocument {
    fields: Map<String, Value>,
}

impl SparseDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unconditionally. Use when the caller has already decided the
    /// value is present. An existing key is overwritten in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Insert iff `value` is `Some` and not the empty string.
    pub fn set_if_non_empty_str(&mut self, key: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.set(key, value);
        }
    }

    /// Insert iff the tri-state boolean is known, whether true or false.
    pub fn set_if_present_bool(&mut self, key: impl Into<String>, value: Option<bool>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Insert only a `true` flag. For booleans where `false` is the default
    /// and carries no information.
    pub fn set_if_true(&mut self, key: impl Into<String>, value: bool) {
        if value {
            self.set(key, true);
        }
    }

    /// Insert iff the integer is known. Zero is a real value and is kept.
    pub fn set_if_some_int(&mut self, key: impl Into<String>, value: Option<i64>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Insert a copy of the mapping iff it is `Some` and has at least one entry.
    pub fn set_if_non_empty_map(
        &mut self,
        key: impl Into<String>,
        value: Option<&Map<String, Value>>,
    ) {
        if let Some(map) = value.filter(|m| !m.is_empty()) {
            self.set(key, Value::Object(map.clone()));
        }
    }

    /// Insert a nested document iff at least one of its fields was set.
    pub fn set_if_non_empty_doc(&mut self, key: impl Into<String>, value: SparseDocument) {
        if !value.is_empty() {
            self.set(key, value);
        }
    }

    /// Insert a sequence iff it has at least one element.
    pub fn set_if_non_empty_seq(&mut self, key: impl Into<String>, value: Vec<Value>) {
        if !value.is_empty() {
            self.set(key, Value::Array(value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<SparseDocument> for Value {
    fn from(doc: SparseDocument) -> Self {
        doc.into_value()
    }
}
