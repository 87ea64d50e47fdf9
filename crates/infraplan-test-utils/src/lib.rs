//! Testing utilities for the infraplan workspace
//!
//! Shared snapshot fixtures and row-building shorthand.

#![allow(missing_docs)]

use infraplan_model::row::build_row;
use infraplan_model::{
    BudgetLedger, CellKind, FinanceField, FinancePatch, PlainDate, ProjectSnapshot, TimelineCell,
    TimelineDates, TimelineRow,
};

/// Snapshot with no dates and an empty ledger anchored at `anchor_year`.
pub fn empty_project(anchor_year: i32) -> ProjectSnapshot {
    ProjectSnapshot::new("fixture", anchor_year)
}

/// Snapshot with full-year phase dates: starts on 01.01, ends on 31.12.
pub fn project_with_phases(
    anchor_year: i32,
    planning: Option<(i32, i32)>,
    construction: Option<(i32, i32)>,
) -> ProjectSnapshot {
    let mut snapshot = ProjectSnapshot::new("fixture", anchor_year);
    if let Some((start, end)) = planning {
        snapshot.est_planning_start = Some(PlainDate::first_of(start));
        snapshot.est_planning_end = Some(PlainDate::last_of(end));
    }
    if let Some((start, end)) = construction {
        snapshot.est_construction_start = Some(PlainDate::first_of(start));
        snapshot.est_construction_end = Some(PlainDate::last_of(end));
    }
    snapshot.planning_start_year = planning.or(construction).map(|(start, _)| start);
    snapshot.construction_end_year = construction.map(|(_, end)| end);
    snapshot
}

/// Add a warranty period to a snapshot.
pub fn with_warranty(mut snapshot: ProjectSnapshot, start: i32, end: i32) -> ProjectSnapshot {
    snapshot.est_warranty_phase_start = Some(PlainDate::first_of(start));
    snapshot.est_warranty_phase_end = Some(PlainDate::last_of(end));
    snapshot
}

/// Set a ledger slot by year offset. Offsets outside the vocabulary panic,
/// which is fine in fixtures.
pub fn set_budget(snapshot: &mut ProjectSnapshot, offset: i64, value: &str) {
    let field = FinanceField::from_offset(offset).expect("offset within 0..=10");
    snapshot.finances.set(field, Some(value.to_string()));
}

/// Build the row, panicking on empty snapshots.
pub fn row_for(snapshot: &ProjectSnapshot) -> TimelineRow {
    build_row(snapshot).expect("fixture snapshot has dates")
}

/// Index of the cell for a year, panicking when absent.
pub fn cell_index(row: &TimelineRow, year: i32) -> usize {
    row.index_of_year(year).expect("year within the row")
}

/// A detached cell with the given kind and year, for boundary tests that
/// exercise the engine without a full snapshot.
pub fn bare_cell(year: i32, start_year: i32, kind: CellKind) -> TimelineCell {
    TimelineCell {
        year,
        start_year,
        kind,
        is_start_of_timeline: false,
        is_end_of_timeline: false,
        is_last_of_kind: false,
        finance_field: FinanceField::from_offset(i64::from(year) - i64::from(start_year)),
        budget: None,
        absorb_into: None,
        finances_to_reset: FinancePatch::new(start_year),
        grow: Default::default(),
        affects_dates: kind.affects_dates(),
        timeline: TimelineDates::default(),
        project: TimelineDates::default(),
    }
}

/// Ledger with the given (offset, value) slots, anchored at `year`.
pub fn ledger_with(year: i32, slots: &[(i64, &str)]) -> BudgetLedger {
    let mut ledger = BudgetLedger::new(year);
    for (offset, value) in slots {
        let field = FinanceField::from_offset(*offset).expect("offset within 0..=10");
        ledger.set(field, Some((*value).to_string()));
    }
    ledger
}
