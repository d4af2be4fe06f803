//! # Extension Hooks
//!
//! Hook signatures a caller may plug into a [`ValidationPolicy`], and the
//! one-shot latch guarding the defaults-applied callback.
//!
//! Hooks are shared, thread-safe function objects: a single policy may back
//! many traversals running in parallel.
//!
//! [`ValidationPolicy`]: crate::ValidationPolicy

use std::fmt;
use std::sync::Arc;

use oasv_core::{Schema, SchemaError};
use parking_lot::Once;

/// Callback fired the first time the traversal substitutes a schema default.
pub type DefaultsAppliedFn = Arc<dyn Fn() + Send + Sync>;

/// Override for the rendering of a [`SchemaError`]. An empty string defers
/// to the error's default rendering.
pub type ErrorMessageFn = Arc<dyn Fn(&SchemaError) -> String + Send + Sync>;

/// Fallback resolver for a reference whose schema is absent.
pub type SchemaResolveFn = Arc<dyn Fn(&str) -> Option<Arc<Schema>> + Send + Sync>;

/// Runs the defaults-applied callback at most once.
///
/// The check and the call happen inside a single `Once`, so concurrent
/// callers cannot both observe "not fired". A callback that panics still
/// counts as fired.
pub(crate) struct DefaultsLatch {
    once: Once,
    callback: Option<DefaultsAppliedFn>,
}

impl DefaultsLatch {
    pub(crate) fn new(callback: Option<DefaultsAppliedFn>) -> Self {
        Self {
            once: Once::new(),
            callback,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.callback.is_some()
    }

    pub(crate) fn fire(&self) {
        let Some(callback) = &self.callback else {
            return;
        };
        self.once.call_once_force(|state| {
            // A poisoned latch means the callback already ran and panicked.
            if state.poisoned() {
                return;
            }
            tracing::debug!("schema defaults applied; running callback");
            callback();
        });
    }

    pub(crate) fn has_fired(&self) -> bool {
        let state = self.once.state();
        state.done() || state.poisoned()
    }
}

impl fmt::Debug for DefaultsLatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultsLatch")
            .field("armed", &self.is_armed())
            .field("fired", &self.has_fired())
            .finish()
    }
}
