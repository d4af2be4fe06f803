//! # oasv-policy: Validation Policy for Schema Traversals
//!
//! A [`ValidationPolicy`] tells a schema traversal *how* to validate:
//! which checks to run, how to report violations, and which caller hooks
//! to consult. The traversal itself lives outside this crate and only
//! reads the policy.
//!
//! ## Building a Policy
//!
//! Options are applied in order and the last write to a field wins:
//!
//! - [`ValidationPolicy::from_options`] with a list of [`ValidationOption`]s.
//! - [`ValidationPolicy::builder`] for chained setters.
//! - [`PolicyConfig`] as a struct literal of the non-hook switches; compose
//!   it with options through [`PolicyBuilder::config`].
//!
//! ## What the Traversal Consumes
//!
//! - [`ValidationPolicy::resolve_schema`]: embedded schema first, then
//!   the caller's fallback resolver for a non-empty reference.
//! - [`ValidationPolicy::notify_defaults_applied`]: runs the caller's
//!   callback once per policy, even under concurrent traversals.
//! - [`ValidationPolicy::render_error`]: caller's message override, or the
//!   error's default rendering when the override returns `""`.
//! - [`ValidationPolicy::error_mode`] and [`ValidationPolicy::outcome`]:
//!   fail-fast, first-error or collect-all reporting.
//!
//! ## Crate Policy
//!
//! - Depends only on `oasv-core` internally.
//! - Building, resolving and formatting never fail; a missing hook means
//!   the default behavior.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod builder;
pub mod config;
pub mod hooks;
pub mod option;
pub mod policy;

pub use builder::PolicyBuilder;
pub use config::PolicyConfig;
pub use hooks::{DefaultsAppliedFn, ErrorMessageFn, SchemaResolveFn};
pub use option::ValidationOption;
pub use policy::{ErrorMode, ValidationDirection, ValidationPolicy};
