//! Removing one cell from the timeline
//!
//! Shrinks the timeline by one year. The date part of the patch depends on
//! the removed cell's kind and position; the finance part always moves the
//! removed budget into the absorbing neighbor and settles the removed slot.

use infraplan_model::money;
use infraplan_model::{CellKind, PatchField, ProjectPatch, TimelineCell, TimelineRow};

use crate::assemble::carry_date;

/// Patch for removing the cell at `index`
#[must_use]
pub fn removal_patch(row: &TimelineRow, index: usize) -> ProjectPatch {
    let Some(cell) = row.cell(index) else {
        return ProjectPatch::default();
    };
    let absorb = cell.absorb_into.and_then(|i| row.cell(i));
    tracing::debug!(kind = ?cell.kind, year = cell.year, "computing removal patch");

    let mut patch = ProjectPatch::default();
    match cell.kind {
        CellKind::PlanningStart => remove_planning_start(cell, absorb, &mut patch),
        CellKind::PlanningEnd => remove_planning_end(cell, absorb, &mut patch),
        CellKind::ConstructionStart => remove_construction_start(cell, absorb, &mut patch),
        CellKind::ConstructionEnd => remove_construction_end(cell, absorb, &mut patch),
        CellKind::WarrantyStart => remove_warranty_start(cell, absorb, &mut patch),
        CellKind::WarrantyEnd => remove_warranty_end(cell, absorb, &mut patch),
        CellKind::Overlap => remove_overlap(cell, &mut patch),
        CellKind::Planning | CellKind::Construction | CellKind::Warranty | CellKind::Gap => {}
    }

    settle_finances(cell, absorb, &mut patch);
    patch
}

fn remove_planning_start(
    cell: &TimelineCell,
    absorb: Option<&TimelineCell>,
    patch: &mut ProjectPatch,
) {
    let Some(absorb) = absorb else { return };
    patch.est_planning_start = carry_date(
        cell.project.planning_start,
        cell.timeline.planning_start.map(|d| d.with_year(absorb.year)),
    );
    patch.planning_start_year = PatchField::Set(absorb.year);
}

fn remove_planning_end(
    cell: &TimelineCell,
    absorb: Option<&TimelineCell>,
    patch: &mut ProjectPatch,
) {
    if cell.is_last_of_kind {
        // removing the only planning year eliminates the phase
        patch.est_planning_start = PatchField::Clear;
        patch.est_planning_end = PatchField::Clear;
        if let Some(absorb) = absorb {
            patch.planning_start_year = PatchField::Set(absorb.year);
        }
    } else if let Some(absorb) = absorb {
        patch.est_planning_end = carry_date(
            cell.project.planning_end,
            cell.timeline.planning_end.map(|d| d.with_year(absorb.year)),
        );
    }
}

fn remove_construction_start(
    cell: &TimelineCell,
    absorb: Option<&TimelineCell>,
    patch: &mut ProjectPatch,
) {
    let Some(absorb) = absorb else { return };
    patch.est_construction_start = carry_date(
        cell.project.construction_start,
        cell.timeline
            .construction_start
            .map(|d| d.with_year(absorb.year)),
    );
    patch.construction_end_year = PatchField::Set(absorb.year);
}

fn remove_construction_end(
    cell: &TimelineCell,
    absorb: Option<&TimelineCell>,
    patch: &mut ProjectPatch,
) {
    if cell.is_last_of_kind {
        // construction is eliminated; the end-year field falls back to the
        // start of the remaining timeline
        patch.est_construction_start = PatchField::Clear;
        patch.est_construction_end = PatchField::Clear;
        if let Some(planning_start) = cell.timeline.planning_start {
            patch.construction_end_year = PatchField::Set(planning_start.year());
        }
    } else if let Some(absorb) = absorb {
        patch.est_construction_end = carry_date(
            cell.project.construction_end,
            cell.timeline
                .construction_end
                .map(|d| d.with_year(absorb.year)),
        );
        patch.construction_end_year = PatchField::Set(absorb.year);
    }
}

fn remove_warranty_start(
    cell: &TimelineCell,
    absorb: Option<&TimelineCell>,
    patch: &mut ProjectPatch,
) {
    let Some(absorb) = absorb else { return };
    patch.est_warranty_phase_start = carry_date(
        cell.project.warranty_start,
        cell.timeline.warranty_start.map(|d| d.with_year(absorb.year)),
    );
}

fn remove_warranty_end(
    cell: &TimelineCell,
    absorb: Option<&TimelineCell>,
    patch: &mut ProjectPatch,
) {
    if cell.is_last_of_kind {
        patch.est_warranty_phase_start = PatchField::Clear;
        patch.est_warranty_phase_end = PatchField::Clear;
    } else if let Some(absorb) = absorb {
        patch.est_warranty_phase_end = carry_date(
            cell.project.warranty_end,
            cell.timeline.warranty_end.map(|d| d.with_year(absorb.year)),
        );
    }
}

fn remove_overlap(cell: &TimelineCell, patch: &mut ProjectPatch) {
    match (cell.is_start_of_timeline, cell.is_end_of_timeline) {
        // the timeline is exactly this one year; everything goes
        (true, true) => {
            patch.est_planning_start = PatchField::Clear;
            patch.est_planning_end = PatchField::Clear;
            patch.est_construction_start = PatchField::Clear;
            patch.est_construction_end = PatchField::Clear;
            patch.planning_start_year = PatchField::Clear;
            patch.construction_end_year = PatchField::Clear;
        }
        // first year removed: the whole timeline slides one year later
        (true, false) => {
            patch.est_planning_start = carry_date(
                cell.project.planning_start,
                cell.timeline.planning_start.map(|d| d.plus_years(1)),
            );
            patch.est_planning_end = carry_date(
                cell.project.planning_end,
                cell.timeline.planning_end.map(|d| d.plus_years(1)),
            );
            patch.est_construction_start = carry_date(
                cell.project.construction_start,
                cell.timeline.construction_start.map(|d| d.plus_years(1)),
            );
            if let Some(planning_end) = cell.timeline.planning_end {
                patch.planning_start_year = PatchField::Set(planning_end.year() + 1);
            }
        }
        // last year removed: the whole timeline slides one year earlier
        (false, true) => {
            patch.est_planning_end = carry_date(
                cell.project.planning_end,
                cell.timeline.planning_end.map(|d| d.plus_years(-1)),
            );
            patch.est_construction_start = carry_date(
                cell.project.construction_start,
                cell.timeline.construction_start.map(|d| d.plus_years(-1)),
            );
            patch.est_construction_end = carry_date(
                cell.project.construction_end,
                cell.timeline.construction_end.map(|d| d.plus_years(-1)),
            );
            if let Some(construction_end) = cell.timeline.construction_end {
                patch.construction_end_year = PatchField::Set(construction_end.year() - 1);
            }
        }
        // interior overlap: dates stay, only finances settle
        (false, false) => {}
    }
}

// Budget moves into the absorbing neighbor, the removed slot is settled, and
// hidden gap slots crossed by the absorb scan surface as explicit zeroes.
fn settle_finances(cell: &TimelineCell, absorb: Option<&TimelineCell>, patch: &mut ProjectPatch) {
    let finances = patch.finances_mut(cell.start_year);

    if let Some(absorb) = absorb {
        if let Some(field) = absorb.finance_field {
            let total = money::parse_amount_or_zero(cell.budget.as_deref())
                + money::parse_amount_or_zero(absorb.budget.as_deref());
            finances.set(field, Some(money::format_plain(total)));
        }
    }

    if let Some(own) = cell.finance_field {
        // an interior removal hides its slot instead of zeroing it,
        // preserving the gap semantics
        let settled = cell.affects_dates.then(|| "0".to_string());
        finances.set(own, settled);
    }

    finances.merge(&cell.finances_to_reset);

    if patch
        .finances
        .as_ref()
        .map_or(false, |finances| finances.is_empty())
    {
        patch.finances = None;
    }
}
