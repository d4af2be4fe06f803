//! # Policy Configuration
//!
//! A plain record of every non-hook policy switch, for callers that prefer
//! a struct literal over a list of options.
//!
//! A record can only switch behavior *on*: `false` and `Unspecified` map to
//! no option at all, so they never undo an option applied earlier. Hooks
//! are set through options or the builder.

use crate::option::ValidationOption;
use crate::policy::{ValidationDirection, ValidationPolicy};

/// Non-hook subset of a [`ValidationPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    pub fail_fast: bool,
    pub multi_errors: bool,
    pub direction: ValidationDirection,
    pub format_validation: bool,
    pub unknown_property_validation: bool,
    pub disable_pattern_validation: bool,
    pub disable_read_only_validation: bool,
    pub disable_write_only_validation: bool,
}

impl PolicyConfig {
    /// The options this record stands for, in field order.
    pub fn to_options(&self) -> Vec<ValidationOption> {
        let flags = [
            (self.fail_fast, ValidationOption::FailFast),
            (self.multi_errors, ValidationOption::MultiErrors),
            (self.format_validation, ValidationOption::EnableFormatValidation),
            (
                self.unknown_property_validation,
                ValidationOption::EnableUnknownPropertyValidation,
            ),
            (self.disable_pattern_validation, ValidationOption::DisablePatternValidation),
            (self.disable_read_only_validation, ValidationOption::DisableReadOnlyValidation),
            (self.disable_write_only_validation, ValidationOption::DisableWriteOnlyValidation),
        ];
        let mut options: Vec<ValidationOption> = flags
            .into_iter()
            .filter_map(|(set, option)| set.then_some(option))
            .collect();
        match self.direction {
            ValidationDirection::Unspecified => {}
            ValidationDirection::AsRequest => options.push(ValidationOption::AsRequest),
            ValidationDirection::AsResponse => options.push(ValidationOption::AsResponse),
        }
        options
    }
}

impl From<&PolicyConfig> for ValidationPolicy {
    fn from(config: &PolicyConfig) -> Self {
        ValidationPolicy::builder().config(config).build()
    }
}
