//! # Schema Values
//!
//! [`Schema`] wraps an already-parsed JSON schema object. The traversal
//! reads keywords from it through the accessors below; anything richer is
//! the traversal's business.
//!
//! [`SchemaRef`] mirrors the OpenAPI "schema or `$ref`" slot. A slot whose
//! `value` is `None` has not been resolved yet and is the only case in
//! which a policy's fallback resolver may be consulted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque schema object backed by a JSON value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    /// Wrap an already-parsed schema value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Access the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consume the schema and return the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `title` keyword, if present.
    pub fn title(&self) -> Option<&str> {
        self.str_keyword("title")
    }

    /// The `type` keyword, if it is a single string.
    pub fn schema_type(&self) -> Option<&str> {
        self.str_keyword("type")
    }

    /// The `format` keyword, if present.
    pub fn format(&self) -> Option<&str> {
        self.str_keyword("format")
    }

    /// The `pattern` keyword, if present.
    pub fn pattern(&self) -> Option<&str> {
        self.str_keyword("pattern")
    }

    /// The schema-declared `default`, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.0.get("default")
    }

    pub fn is_read_only(&self) -> bool {
        self.bool_keyword("readOnly")
    }

    pub fn is_write_only(&self) -> bool {
        self.bool_keyword("writeOnly")
    }

    fn str_keyword(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn bool_keyword(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }
}

impl From<Value> for Schema {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A schema slot holding an embedded schema, a reference string, or both.
///
/// An empty `reference` means the slot carries no reference at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRef {
    /// The `$ref` string, e.g. `#/components/schemas/Pet`. May be empty.
    pub reference: String,
    /// The resolved or inline schema. `None` until resolved.
    pub value: Option<Arc<Schema>>,
}

impl SchemaRef {
    /// A slot holding an inline schema and no reference.
    pub fn inline(schema: impl Into<Arc<Schema>>) -> Self {
        Self {
            reference: String::new(),
            value: Some(schema.into()),
        }
    }

    /// An unresolved slot holding only a reference string.
    pub fn reference(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            value: None,
        }
    }

    /// Attach a resolved schema to this slot, keeping its reference.
    pub fn with_value(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        self.value = Some(schema.into());
        self
    }

    /// Returns true if the slot has a reference string.
    pub fn has_reference(&self) -> bool {
        !self.reference.is_empty()
    }

    /// Returns true if the slot already carries a schema value.
    pub fn is_resolved(&self) -> bool {
        self.value.is_some()
    }
}
