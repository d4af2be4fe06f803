//! # Validation Options
//!
//! Every recognized policy switch as an enumerable value. A policy is built
//! by applying a sequence of options in order; when two options touch the
//! same field, the later one wins.

use std::fmt;
use std::sync::Arc;

use oasv_core::{Schema, SchemaError};

use crate::hooks::{DefaultsAppliedFn, ErrorMessageFn, SchemaResolveFn};

/// One mutation of a [`ValidationPolicy`](crate::ValidationPolicy) field.
#[derive(Clone)]
pub enum ValidationOption {
    /// Stop at the first violation.
    FailFast,
    /// Collect every violation into a composite error.
    MultiErrors,
    /// Validate as an inbound request. Clears `AsResponse`.
    AsRequest,
    /// Validate as an outbound response. Clears `AsRequest`.
    AsResponse,
    /// Reject properties that have no schema.
    EnableUnknownPropertyValidation,
    /// Check string formats against format-specific rules.
    EnableFormatValidation,
    /// Skip `pattern` checks.
    DisablePatternValidation,
    /// Skip `readOnly` checks.
    DisableReadOnlyValidation,
    /// Skip `writeOnly` checks.
    DisableWriteOnlyValidation,
    /// Callback fired once when the traversal applies a schema default.
    DefaultsApplied(DefaultsAppliedFn),
    /// Override for error-message rendering.
    ErrorMessageCustomizer(ErrorMessageFn),
    /// Fallback resolver for unresolved references.
    SchemaResolver(SchemaResolveFn),
}

impl ValidationOption {
    pub fn defaults_applied<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::DefaultsApplied(Arc::new(f))
    }

    pub fn error_message_customizer<F>(f: F) -> Self
    where
        F: Fn(&SchemaError) -> String + Send + Sync + 'static,
    {
        Self::ErrorMessageCustomizer(Arc::new(f))
    }

    pub fn schema_resolver<F>(f: F) -> Self
    where
        F: Fn(&str) -> Option<Arc<Schema>> + Send + Sync + 'static,
    {
        Self::SchemaResolver(Arc::new(f))
    }

    /// Stable kebab-case name of the option, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FailFast => "fail-fast",
            Self::MultiErrors => "multi-errors",
            Self::AsRequest => "validate-as-request",
            Self::AsResponse => "validate-as-response",
            Self::EnableUnknownPropertyValidation => "enable-unknown-property-validation",
            Self::EnableFormatValidation => "enable-format-validation",
            Self::DisablePatternValidation => "disable-pattern-validation",
            Self::DisableReadOnlyValidation => "disable-readonly-validation",
            Self::DisableWriteOnlyValidation => "disable-writeonly-validation",
            Self::DefaultsApplied(_) => "defaults-applied-callback",
            Self::ErrorMessageCustomizer(_) => "error-message-customizer",
            Self::SchemaResolver(_) => "schema-reference-resolver",
        }
    }
}

impl fmt::Debug for ValidationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ValidationOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
