//! # Validation Policy
//!
//! The settings object a schema traversal consults while it walks a
//! document. A policy is assembled once (see [`PolicyBuilder`]) and then
//! only read, with one exception: the latch that keeps the
//! defaults-applied callback from running more than once.
//!
//! ## Thread Safety
//!
//! `ValidationPolicy` is `Send + Sync`. Share it by reference or through an
//! `Arc` across traversals running in parallel. It is intentionally not
//! `Clone`: a clone would carry its own latch and could fire the callback a
//! second time.

use std::fmt;
use std::sync::Arc;

use oasv_core::{OasvError, Schema, SchemaError, SchemaErrors, SchemaRef};

use crate::builder::PolicyBuilder;
use crate::hooks::{DefaultsLatch, ErrorMessageFn, SchemaResolveFn};
use crate::option::ValidationOption;

/// Direction-sensitive rule set. Request and response are exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValidationDirection {
    #[default]
    Unspecified,
    /// Inbound request body: `readOnly` properties must not be sent.
    AsRequest,
    /// Outbound response body: `writeOnly` properties must not be returned.
    AsResponse,
}

/// How the traversal reports violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMode {
    /// Stop at the first violation and return it in full.
    FirstError,
    /// Stop at the first violation without building its detail.
    FailFast,
    /// Keep walking and return every violation.
    CollectAll,
}

/// Behavioral switches and extension hooks for one or more traversals.
///
/// Fields are assigned during construction only; for every field the last
/// assignment wins.
pub struct ValidationPolicy {
    pub(crate) fail_fast: bool,
    pub(crate) multi_errors: bool,
    pub(crate) direction: ValidationDirection,
    pub(crate) format_validation: bool,
    pub(crate) unknown_property_validation: bool,
    pub(crate) pattern_validation_disabled: bool,
    pub(crate) read_only_validation_disabled: bool,
    pub(crate) write_only_validation_disabled: bool,
    pub(crate) defaults: DefaultsLatch,
    pub(crate) error_message: Option<ErrorMessageFn>,
    pub(crate) schema_resolver: Option<SchemaResolveFn>,
}

impl ValidationPolicy {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::new()
    }

    /// Build a policy by applying `options` in order.
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ValidationOption>,
    {
        PolicyBuilder::new().options(options).build()
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    pub fn multi_errors(&self) -> bool {
        self.multi_errors
    }

    pub fn direction(&self) -> ValidationDirection {
        self.direction
    }

    pub fn format_validation_enabled(&self) -> bool {
        self.format_validation
    }

    pub fn unknown_property_validation_enabled(&self) -> bool {
        self.unknown_property_validation
    }

    pub fn pattern_validation_disabled(&self) -> bool {
        self.pattern_validation_disabled
    }

    pub fn read_only_validation_disabled(&self) -> bool {
        self.read_only_validation_disabled
    }

    pub fn write_only_validation_disabled(&self) -> bool {
        self.write_only_validation_disabled
    }

    pub fn validates_patterns(&self) -> bool {
        !self.pattern_validation_disabled
    }

    /// True when a `readOnly` property present in the document is a
    /// violation: the document is a request and the check is not disabled.
    pub fn rejects_read_only_properties(&self) -> bool {
        self.direction == ValidationDirection::AsRequest && !self.read_only_validation_disabled
    }

    /// True when a `writeOnly` property present in the document is a
    /// violation: the document is a response and the check is not disabled.
    pub fn rejects_write_only_properties(&self) -> bool {
        self.direction == ValidationDirection::AsResponse && !self.write_only_validation_disabled
    }

    /// Control-flow policy for violations. Fail-fast takes precedence over
    /// multi-error when both are set.
    pub fn error_mode(&self) -> ErrorMode {
        if self.fail_fast {
            ErrorMode::FailFast
        } else if self.multi_errors {
            ErrorMode::CollectAll
        } else {
            ErrorMode::FirstError
        }
    }

    /// Turn the violations a traversal gathered into its final result.
    ///
    /// # Errors
    ///
    /// Returns `OasvError::FailFast` in fail-fast mode,
    /// `OasvError::MultipleViolations` in collect-all mode, and the first
    /// violation as `OasvError::Validation` otherwise.
    pub fn outcome(&self, errors: SchemaErrors) -> Result<(), OasvError> {
        if errors.is_empty() {
            return Ok(());
        }
        match self.error_mode() {
            ErrorMode::FailFast => Err(OasvError::FailFast),
            ErrorMode::CollectAll => Err(OasvError::MultipleViolations(errors)),
            ErrorMode::FirstError => match errors.into_iter().next() {
                Some(first) => Err(OasvError::Validation(first)),
                None => Ok(()),
            },
        }
    }

    /// Resolve the schema behind a schema slot.
    ///
    /// An embedded schema is returned as is. Otherwise the fallback
    /// resolver, if configured, is called with a non-empty reference.
    /// `None` means unresolved; the traversal decides whether that is a
    /// violation.
    pub fn resolve_schema(&self, schema_ref: &SchemaRef) -> Option<Arc<Schema>> {
        if let Some(value) = &schema_ref.value {
            return Some(Arc::clone(value));
        }
        let Some(resolver) = &self.schema_resolver else {
            tracing::trace!(reference = %schema_ref.reference, "no schema resolver configured");
            return None;
        };
        if schema_ref.reference.is_empty() {
            tracing::trace!("empty schema reference; resolver skipped");
            return None;
        }
        let resolved = resolver(schema_ref.reference.as_str());
        tracing::debug!(
            reference = %schema_ref.reference,
            resolved = resolved.is_some(),
            "schema reference resolved through fallback resolver"
        );
        resolved
    }

    /// Record that the traversal substituted a schema default.
    ///
    /// The configured callback runs on the first call only, across every
    /// traversal sharing this policy and across threads.
    pub fn notify_defaults_applied(&self) {
        self.defaults.fire();
    }

    /// Whether the defaults-applied callback has run.
    pub fn defaults_applied(&self) -> bool {
        self.defaults.has_fired()
    }

    /// The customized message for `error`, or `None` to use its default
    /// rendering.
    pub fn format_error_message(&self, error: &SchemaError) -> Option<String> {
        let customize = self.error_message.as_ref()?;
        let message = customize(error);
        if message.is_empty() {
            tracing::trace!(schema_field = %error.schema_field, "message customizer deferred");
            None
        } else {
            Some(message)
        }
    }

    /// Render `error`, honoring the message customizer.
    pub fn render_error(&self, error: &SchemaError) -> String {
        self.format_error_message(error).unwrap_or_else(|| error.to_string())
    }

    /// Render every violation, joined the same way as [`SchemaErrors`]'
    /// default rendering.
    pub fn render_errors(&self, errors: &SchemaErrors) -> String {
        errors
            .iter()
            .map(|e| self.render_error(e))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        PolicyBuilder::new().build()
    }
}

impl fmt::Debug for ValidationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationPolicy")
            .field("fail_fast", &self.fail_fast)
            .field("multi_errors", &self.multi_errors)
            .field("direction", &self.direction)
            .field("format_validation", &self.format_validation)
            .field("unknown_property_validation", &self.unknown_property_validation)
            .field("pattern_validation_disabled", &self.pattern_validation_disabled)
            .field("read_only_validation_disabled", &self.read_only_validation_disabled)
            .field("write_only_validation_disabled", &self.write_only_validation_disabled)
            .field("defaults", &self.defaults)
            .field("error_message", &self.error_message.is_some())
            .field("schema_resolver", &self.schema_resolver.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pet_schema() -> Arc<Schema> {
        Arc::new(Schema::new(json!({"title": "Pet", "type": "object"})))
    }

    fn counting_resolver(
        calls: &Arc<AtomicUsize>,
        result: Option<Arc<Schema>>,
    ) -> ValidationOption {
        let calls = Arc::clone(calls);
        ValidationOption::schema_resolver(move |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            result.clone()
        })
    }

    #[test]
    fn test_default_policy() {
        let policy = ValidationPolicy::default();
        assert_eq!(policy.direction(), ValidationDirection::Unspecified);
        assert_eq!(policy.error_mode(), ErrorMode::FirstError);
        assert!(policy.validates_patterns());
        assert!(!policy.rejects_read_only_properties());
        assert!(!policy.rejects_write_only_properties());
        assert!(!policy.defaults_applied());
    }

    #[test]
    fn test_request_then_response_leaves_response() {
        let policy = ValidationPolicy::from_options([
            ValidationOption::AsRequest,
            ValidationOption::AsResponse,
        ]);
        assert_eq!(policy.direction(), ValidationDirection::AsResponse);

        let policy = ValidationPolicy::from_options([
            ValidationOption::AsResponse,
            ValidationOption::AsRequest,
        ]);
        assert_eq!(policy.direction(), ValidationDirection::AsRequest);
    }

    #[test]
    fn test_error_mode_resolution() {
        let cases = [
            (vec![], ErrorMode::FirstError),
            (vec![ValidationOption::FailFast], ErrorMode::FailFast),
            (vec![ValidationOption::MultiErrors], ErrorMode::CollectAll),
            (
                vec![ValidationOption::MultiErrors, ValidationOption::FailFast],
                ErrorMode::FailFast,
            ),
            (
                vec![ValidationOption::FailFast, ValidationOption::MultiErrors],
                ErrorMode::FailFast,
            ),
        ];
        for (options, expected) in cases {
            let policy = ValidationPolicy::from_options(options);
            assert_eq!(policy.error_mode(), expected);
            // Both flags stay observable even when fail-fast wins.
            assert_eq!(policy.fail_fast(), expected == ErrorMode::FailFast);
        }
    }

    #[test]
    fn test_read_only_rejection_by_direction() {
        let request = ValidationPolicy::builder().as_request().build();
        let response = ValidationPolicy::builder().as_response().build();
        let disabled = ValidationPolicy::builder()
            .as_request()
            .disable_read_only_validation()
            .build();
        assert!(request.rejects_read_only_properties());
        assert!(!response.rejects_read_only_properties());
        assert!(!disabled.rejects_read_only_properties());
    }

    #[test]
    fn test_write_only_rejection_by_direction() {
        let request = ValidationPolicy::builder().as_request().build();
        let response = ValidationPolicy::builder().as_response().build();
        let disabled = ValidationPolicy::builder()
            .as_response()
            .disable_write_only_validation()
            .build();
        assert!(response.rejects_write_only_properties());
        assert!(!request.rejects_write_only_properties());
        assert!(!disabled.rejects_write_only_properties());
    }

    #[test]
    fn test_resolve_without_resolver_is_unresolved() {
        let policy = ValidationPolicy::default();
        let slot = SchemaRef::reference("#/components/schemas/Pet");
        assert!(policy.resolve_schema(&slot).is_none());
    }

    #[test]
    fn test_resolve_embedded_schema_skips_resolver() {
        let calls = Arc::new(AtomicUsize::new(0));
        let policy = ValidationPolicy::from_options([counting_resolver(&calls, None)]);
        let embedded = pet_schema();
        let slot =
            SchemaRef::reference("#/components/schemas/Pet").with_value(Arc::clone(&embedded));
        let resolved = policy.resolve_schema(&slot).unwrap();
        assert!(Arc::ptr_eq(&resolved, &embedded));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resolve_reference_through_resolver() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pet = pet_schema();
        let policy =
            ValidationPolicy::from_options([counting_resolver(&calls, Some(Arc::clone(&pet)))]);
        let resolved = policy
            .resolve_schema(&SchemaRef::reference("#/components/schemas/Pet"))
            .unwrap();
        assert!(Arc::ptr_eq(&resolved, &pet));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_resolve_empty_reference_skips_resolver() {
        let calls = Arc::new(AtomicUsize::new(0));
        let policy =
            ValidationPolicy::from_options([counting_resolver(&calls, Some(pet_schema()))]);
        assert!(policy.resolve_schema(&SchemaRef::default()).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_resolver_returning_nothing_is_unresolved() {
        let calls = Arc::new(AtomicUsize::new(0));
        let policy = ValidationPolicy::from_options([counting_resolver(&calls, None)]);
        assert!(policy
            .resolve_schema(&SchemaRef::reference("#/components/schemas/Missing"))
            .is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_notify_defaults_applied_fires_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let policy = ValidationPolicy::builder()
            .on_defaults_applied(move || {
                c.fetch_add(1, Ordering::SeqCst);
            })
            .build();
        assert!(!policy.defaults_applied());
        policy.notify_defaults_applied();
        policy.notify_defaults_applied();
        policy.notify_defaults_applied();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(policy.defaults_applied());
    }

    #[test]
    fn test_notify_without_callback_is_noop() {
        let policy = ValidationPolicy::default();
        policy.notify_defaults_applied();
        assert!(!policy.defaults_applied());
    }

    #[test]
    fn test_format_error_message_defers_on_empty() {
        let policy = ValidationPolicy::builder()
            .error_message_customizer(|err| {
                if err.schema_field == "pattern" {
                    String::new()
                } else {
                    format!("custom: {}", err.schema_field)
                }
            })
            .build();

        let deferred = SchemaError::new("pattern", "string doesn't match").within("name");
        assert_eq!(policy.format_error_message(&deferred), None);
        assert_eq!(policy.render_error(&deferred), deferred.to_string());

        let custom = SchemaError::new("required", "missing id");
        assert_eq!(policy.format_error_message(&custom).as_deref(), Some("custom: required"));
        assert_eq!(policy.render_error(&custom), "custom: required");
    }

    #[test]
    fn test_render_without_customizer_uses_default() {
        let policy = ValidationPolicy::default();
        let err = SchemaError::new("type", "expected integer").within("age");
        assert_eq!(policy.format_error_message(&err), None);
        assert_eq!(policy.render_error(&err), r#"Error at "/age": expected integer"#);
    }

    #[test]
    fn test_render_errors_applies_customizer_per_member() {
        let policy = ValidationPolicy::builder()
            .error_message_customizer(|err| {
                if err.schema_field == "type" {
                    "wrong type".to_string()
                } else {
                    String::new()
                }
            })
            .build();
        let errors: SchemaErrors = vec![
            SchemaError::new("type", "expected string"),
            SchemaError::new("required", "missing id"),
        ]
        .into();
        assert_eq!(policy.render_errors(&errors), "wrong type | missing id");
    }

    #[test]
    fn test_outcome_by_error_mode() {
        let errors = || -> SchemaErrors {
            vec![
                SchemaError::new("required", "missing id"),
                SchemaError::new("type", "expected string"),
            ]
            .into()
        };

        assert!(ValidationPolicy::default().outcome(SchemaErrors::new()).is_ok());

        match ValidationPolicy::default().outcome(errors()) {
            Err(OasvError::Validation(e)) => assert_eq!(e.schema_field, "required"),
            other => panic!("expected first violation, got {other:?}"),
        }

        match ValidationPolicy::builder().multi_errors().build().outcome(errors()) {
            Err(OasvError::MultipleViolations(all)) => assert_eq!(all.len(), 2),
            other => panic!("expected all violations, got {other:?}"),
        }

        let fail_fast = ValidationPolicy::builder().multi_errors().fail_fast().build();
        assert!(matches!(fail_fast.outcome(errors()), Err(OasvError::FailFast)));
    }

    #[test]
    fn test_policy_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationPolicy>();
    }

    #[test]
    fn test_debug_hides_hooks() {
        let policy = ValidationPolicy::builder()
            .schema_resolver(|_| None)
            .on_defaults_applied(|| {})
            .build();
        let debug = format!("{policy:?}");
        assert!(debug.contains("schema_resolver: true"));
        assert!(debug.contains("armed: true"));
        assert!(debug.contains("fired: false"));
    }
}
