//! # Error Types
//!
//! [`SchemaError`] is the unit the traversal produces for every violation.
//! Its `Display` implementation is the *default* rendering; a policy may
//! override it for presentation through an error-message customizer.
//!
//! [`OasvError`] is the workspace-level error. It uses `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Violations carry the instance path, the failing schema keyword, the
//!   offending value and the violated schema.
//! - Fail-fast outcomes carry no detail: the traversal stops before it
//!   builds one.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::schema::Schema;

/// Top-level error type for oasv.
#[derive(Error, Debug)]
pub enum OasvError {
    /// A single schema violation.
    #[error(transparent)]
    Validation(#[from] SchemaError),

    /// Every violation collected during a traversal.
    #[error("{0}")]
    MultipleViolations(SchemaErrors),

    /// The traversal stopped at its first violation without detail.
    #[error("document does not match the schema")]
    FailFast,
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Instance path from the document root, one segment per level.
    path: Vec<String>,
    /// The offending instance value.
    pub value: Value,
    /// The schema that was violated, when the traversal has it at hand.
    pub schema: Option<Arc<Schema>>,
    /// The schema keyword that failed (`required`, `pattern`, ...).
    pub schema_field: String,
    /// Human-readable reason. May be empty.
    pub reason: String,
}

impl SchemaError {
    /// Create a violation at the document root.
    pub fn new(schema_field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            value: Value::Null,
            schema: None,
            schema_field: schema_field.into(),
            reason: reason.into(),
        }
    }

    /// Attach the offending instance value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Attach the violated schema.
    pub fn with_schema(mut self, schema: impl Into<Arc<Schema>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Prefix the instance path with `segment`.
    ///
    /// The traversal calls this while unwinding, so the innermost segment
    /// is added first.
    pub fn within(mut self, segment: impl Into<String>) -> Self {
        self.path.insert(0, segment.into());
        self
    }

    /// Instance path segments, outermost first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The instance path as an RFC 6901 JSON Pointer. Empty for the root.
    pub fn json_pointer(&self) -> String {
        self.path
            .iter()
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.path.is_empty() {
            write!(f, "Error at \"{}\": ", self.json_pointer())?;
        }
        if self.reason.is_empty() {
            write!(f, "Doesn't match schema \"{}\"", self.schema_field)
        } else {
            f.write_str(&self.reason)
        }
    }
}

impl std::error::Error for SchemaError {}

/// Ordered collection of violations produced in collect-all mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaErrors {
    errors: Vec<SchemaError>,
}

impl SchemaErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a violation.
    pub fn push(&mut self, error: SchemaError) {
        self.errors.push(error);
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn errors(&self) -> &[SchemaError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SchemaError> {
        self.errors.iter()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<SchemaError> {
        self.errors
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl From<Vec<SchemaError>> for SchemaErrors {
    fn from(errors: Vec<SchemaError>) -> Self {
        Self { errors }
    }
}

impl FromIterator<SchemaError> for SchemaErrors {
    fn from_iter<I: IntoIterator<Item = SchemaError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a SchemaErrors {
    type Item = &'a SchemaError;
    type IntoIter = std::slice::Iter<'a, SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
