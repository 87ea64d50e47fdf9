//! Growing the timeline by one cell
//!
//! Extends the timeline one year to the left or right of the selected cell.
//! Only boundary cells move dates; in every case a hidden neighbor slot on
//! the grow side becomes an active zero-valued slot.

use infraplan_model::{CellKind, GrowDirection, PatchField, ProjectPatch, TimelineCell, TimelineRow};

use crate::assemble::carry_date;

/// Patch for growing the timeline from the cell at `index`
#[must_use]
pub fn addition_patch(row: &TimelineRow, index: usize, direction: GrowDirection) -> ProjectPatch {
    let Some(cell) = row.cell(index) else {
        return ProjectPatch::default();
    };
    if !cell.grow.allows(direction) {
        return ProjectPatch::default();
    }
    tracing::debug!(kind = ?cell.kind, year = cell.year, ?direction, "computing addition patch");

    let mut patch = ProjectPatch::default();
    if cell.affects_dates {
        match direction {
            GrowDirection::Left => grow_left(cell, &mut patch),
            GrowDirection::Right => grow_right(cell, &mut patch),
        }
    }

    // a previously hidden gap slot next to the new cell becomes active
    if let Some(neighbor) = row.neighbor(index, direction) {
        if neighbor.budget.is_none() {
            if let Some(field) = neighbor.finance_field {
                patch
                    .finances_mut(cell.start_year)
                    .set(field, Some("0".to_string()));
            }
        }
    }

    patch
}

fn grow_left(cell: &TimelineCell, patch: &mut ProjectPatch) {
    match cell.kind {
        kind if cell.is_start_of_timeline && kind.is_planning() => {
            patch.est_planning_start = carry_date(
                cell.project.planning_start,
                cell.timeline.planning_start.map(|d| d.plus_years(-1)),
            );
            if let Some(planning_start) = cell.timeline.planning_start {
                patch.planning_start_year = PatchField::Set(planning_start.year() - 1);
            }
        }
        CellKind::ConstructionStart => construction_start_earlier(cell, patch),
        CellKind::ConstructionEnd if cell.is_last_of_kind => {
            construction_start_earlier(cell, patch);
        }
        CellKind::WarrantyStart => warranty_start_earlier(cell, patch),
        CellKind::WarrantyEnd if cell.is_last_of_kind => warranty_start_earlier(cell, patch),
        _ => {}
    }
}

fn grow_right(cell: &TimelineCell, patch: &mut ProjectPatch) {
    match cell.kind {
        CellKind::PlanningEnd => {
            patch.est_planning_end = carry_date(
                cell.project.planning_end,
                cell.timeline.planning_end.map(|d| d.plus_years(1)),
            );
        }
        CellKind::ConstructionEnd | CellKind::Overlap => {
            patch.est_construction_end = carry_date(
                cell.project.construction_end,
                cell.timeline.construction_end.map(|d| d.plus_years(1)),
            );
            if let Some(construction_end) = cell.timeline.construction_end {
                patch.construction_end_year = PatchField::Set(construction_end.year() + 1);
            }
        }
        CellKind::WarrantyEnd => {
            patch.est_warranty_phase_end = carry_date(
                cell.project.warranty_end,
                cell.timeline.warranty_end.map(|d| d.plus_years(1)),
            );
        }
        _ => {}
    }
}

fn construction_start_earlier(cell: &TimelineCell, patch: &mut ProjectPatch) {
    patch.est_construction_start = carry_date(
        cell.project.construction_start,
        cell.timeline.construction_start.map(|d| d.plus_years(-1)),
    );
}

fn warranty_start_earlier(cell: &TimelineCell, patch: &mut ProjectPatch) {
    patch.est_warranty_phase_start = carry_date(
        cell.project.warranty_start,
        cell.timeline.warranty_start.map(|d| d.plus_years(-1)),
    );
}
