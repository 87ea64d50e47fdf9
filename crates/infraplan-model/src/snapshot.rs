//! Persisted project fields
//!
//! [`ProjectSnapshot`] is the slice of a project record the timeline engine
//! works from: the six boundary dates, the two derived year fields, and the
//! budget ledger.

use serde::{Deserialize, Serialize};

use crate::cell::TimelineDates;
use crate::date::PlainDate;
use crate::ledger::BudgetLedger;

/// The persisted fields a timeline row is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Project name
    #[serde(default)]
    pub name: String,
    /// Planning start date
    #[serde(default)]
    pub est_planning_start: Option<PlainDate>,
    /// Planning end date
    #[serde(default)]
    pub est_planning_end: Option<PlainDate>,
    /// Construction start date
    #[serde(default)]
    pub est_construction_start: Option<PlainDate>,
    /// Construction end date
    #[serde(default)]
    pub est_construction_end: Option<PlainDate>,
    /// Warranty start date
    #[serde(default)]
    pub est_warranty_phase_start: Option<PlainDate>,
    /// Warranty end date
    #[serde(default)]
    pub est_warranty_phase_end: Option<PlainDate>,
    /// Year the timeline begins in
    #[serde(default)]
    pub planning_start_year: Option<i32>,
    /// Year construction ends in
    #[serde(default)]
    pub construction_end_year: Option<i32>,
    /// Per-year budget ledger
    pub finances: BudgetLedger,
}

impl ProjectSnapshot {
    /// Empty snapshot with a ledger anchored at the given year
    #[must_use]
    pub fn new(name: impl Into<String>, anchor_year: i32) -> Self {
        Self {
            name: name.into(),
            est_planning_start: None,
            est_planning_end: None,
            est_construction_start: None,
            est_construction_end: None,
            est_warranty_phase_start: None,
            est_warranty_phase_end: None,
            planning_start_year: None,
            construction_end_year: None,
            finances: BudgetLedger::new(anchor_year),
        }
    }

    /// The boundary dates as a timeline snapshot
    #[must_use]
    pub fn dates(&self) -> TimelineDates {
        TimelineDates {
            planning_start: self.est_planning_start,
            planning_end: self.est_planning_end,
            construction_start: self.est_construction_start,
            construction_end: self.est_construction_end,
            warranty_start: self.est_warranty_phase_start,
            warranty_end: self.est_warranty_phase_end,
        }
    }
}
