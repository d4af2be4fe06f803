//! # Policy Builder
//!
//! Assembles a [`ValidationPolicy`] from options, configuration records and
//! hooks. Every setter is a plain field assignment, so the last write to a
//! field wins regardless of which surface made it.

use std::sync::Arc;

use oasv_core::{Schema, SchemaError};

use crate::config::PolicyConfig;
use crate::hooks::{DefaultsAppliedFn, DefaultsLatch, ErrorMessageFn, SchemaResolveFn};
use crate::option::ValidationOption;
use crate::policy::{ValidationDirection, ValidationPolicy};

/// Builder for [`ValidationPolicy`]. Building cannot fail.
#[derive(Clone, Default)]
pub struct PolicyBuilder {
    fail_fast: bool,
    multi_errors: bool,
    direction: ValidationDirection,
    format_validation: bool,
    unknown_property_validation: bool,
    pattern_validation_disabled: bool,
    read_only_validation_disabled: bool,
    write_only_validation_disabled: bool,
    defaults_applied: Option<DefaultsAppliedFn>,
    error_message: Option<ErrorMessageFn>,
    schema_resolver: Option<SchemaResolveFn>,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single option.
    pub fn option(mut self, option: ValidationOption) -> Self {
        tracing::trace!(option = option.name(), "applying validation option");
        match option {
            ValidationOption::FailFast => self.fail_fast = true,
            ValidationOption::MultiErrors => self.multi_errors = true,
            ValidationOption::AsRequest => self.direction = ValidationDirection::AsRequest,
            ValidationOption::AsResponse => self.direction = ValidationDirection::AsResponse,
            ValidationOption::EnableUnknownPropertyValidation => {
                self.unknown_property_validation = true
            }
            ValidationOption::EnableFormatValidation => self.format_validation = true,
            ValidationOption::DisablePatternValidation => self.pattern_validation_disabled = true,
            ValidationOption::DisableReadOnlyValidation => {
                self.read_only_validation_disabled = true
            }
            ValidationOption::DisableWriteOnlyValidation => {
                self.write_only_validation_disabled = true
            }
            ValidationOption::DefaultsApplied(f) => self.defaults_applied = Some(f),
            ValidationOption::ErrorMessageCustomizer(f) => self.error_message = Some(f),
            ValidationOption::SchemaResolver(f) => self.schema_resolver = Some(f),
        }
        self
    }

    /// Apply options in iteration order.
    pub fn options<I>(self, options: I) -> Self
    where
        I: IntoIterator<Item = ValidationOption>,
    {
        options.into_iter().fold(self, Self::option)
    }

    /// Apply the options a configuration record describes.
    pub fn config(self, config: &PolicyConfig) -> Self {
        self.options(config.to_options())
    }

    pub fn fail_fast(self) -> Self {
        self.option(ValidationOption::FailFast)
    }

    pub fn multi_errors(self) -> Self {
        self.option(ValidationOption::MultiErrors)
    }

    pub fn as_request(self) -> Self {
        self.option(ValidationOption::AsRequest)
    }

    pub fn as_response(self) -> Self {
        self.option(ValidationOption::AsResponse)
    }

    pub fn enable_unknown_property_validation(self) -> Self {
        self.option(ValidationOption::EnableUnknownPropertyValidation)
    }

    pub fn enable_format_validation(self) -> Self {
        self.option(ValidationOption::EnableFormatValidation)
    }

    pub fn disable_pattern_validation(self) -> Self {
        self.option(ValidationOption::DisablePatternValidation)
    }

    pub fn disable_read_only_validation(self) -> Self {
        self.option(ValidationOption::DisableReadOnlyValidation)
    }

    pub fn disable_write_only_validation(self) -> Self {
        self.option(ValidationOption::DisableWriteOnlyValidation)
    }

    /// Set the callback fired once when the traversal applies a default.
    pub fn on_defaults_applied<F>(self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.option(ValidationOption::defaults_applied(f))
    }

    /// Set the error-message override. Returning `""` defers to the
    /// error's default rendering.
    pub fn error_message_customizer<F>(self, f: F) -> Self
    where
        F: Fn(&SchemaError) -> String + Send + Sync + 'static,
    {
        self.option(ValidationOption::error_message_customizer(f))
    }

    /// Set the fallback resolver for references whose schema is absent.
    pub fn schema_resolver<F>(self, f: F) -> Self
    where
        F: Fn(&str) -> Option<Arc<Schema>> + Send + Sync + 'static,
    {
        self.option(ValidationOption::schema_resolver(f))
    }

    pub fn build(self) -> ValidationPolicy {
        ValidationPolicy {
            fail_fast: self.fail_fast,
            multi_errors: self.multi_errors,
            direction: self.direction,
            format_validation: self.format_validation,
            unknown_property_validation: self.unknown_property_validation,
            pattern_validation_disabled: self.pattern_validation_disabled,
            read_only_validation_disabled: self.read_only_validation_disabled,
            write_only_validation_disabled: self.write_only_validation_disabled,
            defaults: DefaultsLatch::new(self.defaults_applied),
            error_message: self.error_message,
            schema_resolver: self.schema_resolver,
        }
    }
}

impl std::fmt::Debug for PolicyBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyBuilder")
            .field("fail_fast", &self.fail_fast)
            .field("multi_errors", &self.multi_errors)
            .field("direction", &self.direction)
            .field("format_validation", &self.format_validation)
            .field("unknown_property_validation", &self.unknown_property_validation)
            .field("pattern_validation_disabled", &self.pattern_validation_disabled)
            .field("read_only_validation_disabled", &self.read_only_validation_disabled)
            .field("write_only_validation_disabled", &self.write_only_validation_disabled)
            .field("defaults_applied", &self.defaults_applied.is_some())
            .field("error_message", &self.error_message.is_some())
            .field("schema_resolver", &self.schema_resolver.is_some())
            .finish()
    }
}
