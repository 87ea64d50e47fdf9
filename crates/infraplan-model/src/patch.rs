//! The outgoing patch
//!
//! One user edit produces one [`ProjectPatch`]; it is the only artifact that
//! crosses into persistence. Date and year fields are tri-state: absent from
//! the patch, explicit `null`, or a value. Slot entries are two-state: `null`
//! hides a slot, a string activates it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::date::PlainDate;
use crate::ledger::FinanceField;

/// Tri-state patch field
///
/// `Omit` keeps the persisted value untouched, `Clear` is an explicit wire
/// `null`, `Set` carries a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchField<T> {
    /// Not part of the patch
    Omit,
    /// Explicit `null` on the wire
    Clear,
    /// New value
    Set(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Omit
    }
}

impl<T> PatchField<T> {
    /// Whether the field is absent from the patch
    #[inline]
    #[must_use]
    pub const fn is_omitted(&self) -> bool {
        matches!(self, PatchField::Omit)
    }

    /// The carried value, if any
    #[inline]
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            PatchField::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for PatchField<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            PatchField::Omit | PatchField::Clear => serializer.serialize_none(),
            PatchField::Set(value) => value.serialize(serializer),
        }
    }
}

/// Ledger slot updates keyed by slot name, plus the anchor year
///
/// An entry with a `None` value is an explicit wire `null` (the slot becomes
/// hidden); `Some` activates the slot with the given amount. Entries are kept
/// in offset order so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancePatch {
    /// Anchor year for slot naming
    pub year: i32,
    #[serde(flatten)]
    entries: BTreeMap<FinanceField, Option<String>>,
}

impl FinancePatch {
    /// Empty patch anchored at the given year
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            year,
            entries: BTreeMap::new(),
        }
    }

    /// Whether no slot is touched
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage one slot update
    pub fn set(&mut self, field: FinanceField, value: Option<String>) {
        self.entries.insert(field, value);
    }

    /// Staged update for one slot, if any
    #[must_use]
    pub fn get(&self, field: FinanceField) -> Option<&Option<String>> {
        self.entries.get(&field)
    }

    /// All staged updates in offset order
    pub fn entries(&self) -> impl Iterator<Item = (FinanceField, Option<&str>)> {
        self.entries
            .iter()
            .map(|(field, value)| (*field, value.as_deref()))
    }

    /// Fold another patch's entries into this one
    pub fn merge(&mut self, other: &FinancePatch) {
        for (field, value) in &other.entries {
            self.entries.insert(*field, value.clone());
        }
    }
}

/// The complete patch for one timeline edit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    /// Planning start date
    #[serde(skip_serializing_if = "PatchField::is_omitted")]
    pub est_planning_start: PatchField<PlainDate>,
    /// Planning end date
    #[serde(skip_serializing_if = "PatchField::is_omitted")]
    pub est_planning_end: PatchField<PlainDate>,
    /// Construction start date
    #[serde(skip_serializing_if = "PatchField::is_omitted")]
    pub est_construction_start: PatchField<PlainDate>,
    /// Construction end date
    #[serde(skip_serializing_if = "PatchField::is_omitted")]
    pub est_construction_end: PatchField<PlainDate>,
    /// Warranty start date
    #[serde(skip_serializing_if = "PatchField::is_omitted")]
    pub est_warranty_phase_start: PatchField<PlainDate>,
    /// Warranty end date
    #[serde(skip_serializing_if = "PatchField::is_omitted")]
    pub est_warranty_phase_end: PatchField<PlainDate>,
    /// Year the timeline begins in
    #[serde(skip_serializing_if = "PatchField::is_omitted")]
    pub planning_start_year: PatchField<i32>,
    /// Year construction ends in
    #[serde(skip_serializing_if = "PatchField::is_omitted")]
    pub construction_end_year: PatchField<i32>,
    /// Ledger slot updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finances: Option<FinancePatch>,
}

impl ProjectPatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.est_planning_start.is_omitted()
            && self.est_planning_end.is_omitted()
            && self.est_construction_start.is_omitted()
            && self.est_construction_end.is_omitted()
            && self.est_warranty_phase_start.is_omitted()
            && self.est_warranty_phase_end.is_omitted()
            && self.planning_start_year.is_omitted()
            && self.construction_end_year.is_omitted()
            && self.finances.as_ref().map_or(true, FinancePatch::is_empty)
    }

    /// The finance patch, created on first use
    pub fn finances_mut(&mut self, year: i32) -> &mut FinancePatch {
        self.finances.get_or_insert_with(|| FinancePatch::new(year))
    }
}
