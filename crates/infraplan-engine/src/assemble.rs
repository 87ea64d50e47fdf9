//! Patch assembly helpers
//!
//! A computed date only enters the patch when the corresponding field already
//! exists on the project; otherwise an edit could resurrect a date the user
//! never set. Explicit clears bypass this rule because those operations
//! target the field directly.

use infraplan_model::{PatchField, PlainDate};

/// Stage a computed date, but only when the project already has the field
#[inline]
#[must_use]
pub fn carry_date(existing: Option<PlainDate>, value: Option<PlainDate>) -> PatchField<PlainDate> {
    match (existing, value) {
        (Some(_), Some(date)) => PatchField::Set(date),
        _ => PatchField::Omit,
    }
}
