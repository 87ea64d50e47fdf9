//! Shifting the whole timeline by one year
//!
//! Every boundary date moves one year and every ledger slot moves one
//! position in the direction of travel. The slot pushed past the usable
//! offset range is dropped and the vacated end becomes an active zero.

use infraplan_model::{
    BudgetLedger, FinanceField, FinancePatch, GrowDirection, PatchField, ProjectPatch,
    TimelineCell, TimelineRow,
};

use crate::assemble::carry_date;

/// Patch for shifting the timeline from the cell at `index`
///
/// Shifting right requires the timeline's last cell, shifting left its
/// first; any other combination is an empty patch.
#[must_use]
pub fn shift_patch(
    row: &TimelineRow,
    index: usize,
    direction: GrowDirection,
    ledger: &BudgetLedger,
) -> ProjectPatch {
    let Some(cell) = row.cell(index) else {
        return ProjectPatch::default();
    };
    match direction {
        GrowDirection::Right if cell.is_end_of_timeline => shift_forward(cell, ledger),
        GrowDirection::Left if cell.is_start_of_timeline => shift_backward(cell, ledger),
        _ => ProjectPatch::default(),
    }
}

/// Move the whole timeline one year later
#[must_use]
pub fn shift_forward(cell: &TimelineCell, ledger: &BudgetLedger) -> ProjectPatch {
    tracing::debug!(year = cell.year, "shifting timeline forward");
    let mut patch = shifted_dates(cell, 1);
    patch.finances = Some(shifted_slots(ledger, 1));
    patch
}

/// Move the whole timeline one year earlier
#[must_use]
pub fn shift_backward(cell: &TimelineCell, ledger: &BudgetLedger) -> ProjectPatch {
    tracing::debug!(year = cell.year, "shifting timeline backward");
    let mut patch = shifted_dates(cell, -1);
    patch.finances = Some(shifted_slots(ledger, -1));
    patch
}

fn shifted_dates(cell: &TimelineCell, delta: i32) -> ProjectPatch {
    let mut patch = ProjectPatch::default();
    patch.est_planning_start = carry_date(
        cell.project.planning_start,
        cell.timeline.planning_start.map(|d| d.plus_years(delta)),
    );
    patch.est_planning_end = carry_date(
        cell.project.planning_end,
        cell.timeline.planning_end.map(|d| d.plus_years(delta)),
    );
    patch.est_construction_start = carry_date(
        cell.project.construction_start,
        cell.timeline.construction_start.map(|d| d.plus_years(delta)),
    );
    patch.est_construction_end = carry_date(
        cell.project.construction_end,
        cell.timeline.construction_end.map(|d| d.plus_years(delta)),
    );
    patch.est_warranty_phase_start = carry_date(
        cell.project.warranty_start,
        cell.timeline.warranty_start.map(|d| d.plus_years(delta)),
    );
    patch.est_warranty_phase_end = carry_date(
        cell.project.warranty_end,
        cell.timeline.warranty_end.map(|d| d.plus_years(delta)),
    );

    // year fields recomputed from the shifted dates
    if let Some(planning_start) = cell.timeline.planning_start {
        patch.planning_start_year = PatchField::Set(planning_start.year() + delta);
    }
    if let Some(construction_end) = cell.timeline.construction_end {
        patch.construction_end_year = PatchField::Set(construction_end.year() + delta);
    }
    patch
}

// Slot k takes the value of slot k - delta. The source falling outside the
// usable range leaves an active zero at the vacated end; the value pushed
// past the other end is dropped.
fn shifted_slots(ledger: &BudgetLedger, delta: i64) -> FinancePatch {
    let mut finances = FinancePatch::new(ledger.year);
    for field in FinanceField::ALL {
        let value = match FinanceField::from_offset(i64::from(field.offset()) - delta) {
            Some(source) => ledger.get(source).map(String::from),
            None => Some("0".to_string()),
        };
        finances.set(field, value);
    }
    finances
}
