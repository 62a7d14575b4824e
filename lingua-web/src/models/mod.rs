//! Domain models and request payloads
//!
//! Records mirror the store's tables; request payloads carry the form
//! fields a screen submits and validate themselves before any store call.
//! Validation is field-scoped: every problem is reported against the field
//! that caused it.

pub mod billing;
pub mod collections;
pub mod content;
pub mod forum;
pub mod schedule;
pub mod settings;

pub use billing::*;
pub use collections::*;
pub use content::*;
pub use forum::*;
pub use schedule::*;
pub use settings::*;

use lingua_core::{FieldError, LinguaError, LinguaResult};

/// Record a "required" violation when `value` is empty or whitespace.
pub(crate) fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
}

/// Finish a validation pass: empty error list means the payload is valid.
pub(crate) fn finish(errors: Vec<FieldError>) -> LinguaResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(LinguaError::validation(errors))
    }
}
