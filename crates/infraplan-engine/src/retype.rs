//! Phase boundary recompute after a cell changes designation
//!
//! When a cell is declared the new planning end (or the new construction
//! start), the boundary walks to it. Planning walks backward, construction
//! walks forward; every ledger slot strictly between the cell and its phase
//! is nulled because those years were the hidden gap the boundary crossed.

use infraplan_model::{CellKind, FinancePatch, Phase, ProjectPatch, TimelineCell, TimelineRow};

use crate::assemble::carry_date;

/// Patch for declaring the cell at `index` part of `side`
#[must_use]
pub fn retype_patch(row: &TimelineRow, index: usize, side: Phase) -> ProjectPatch {
    let Some(cell) = row.cell(index) else {
        return ProjectPatch::default();
    };
    tracing::debug!(kind = ?cell.kind, year = cell.year, ?side, "computing retype patch");

    let mut patch = ProjectPatch::default();
    match side {
        Phase::Planning => retype_planning(row, index, cell, &mut patch),
        Phase::Construction => retype_construction(row, index, cell, &mut patch),
        // warranty boundaries are not retyped through the grid
        Phase::Warranty => {}
    }
    patch
}

// The cell becomes the new planning end. Walk backward to the planning
// period, nulling gap slots on the way.
fn retype_planning(row: &TimelineRow, index: usize, cell: &TimelineCell, patch: &mut ProjectPatch) {
    if cell.kind == CellKind::Overlap {
        // only the planning side of an overlap year moves
        patch.est_planning_end = carry_date(
            cell.project.planning_end,
            cell.timeline.planning_end.map(|d| d.with_year(cell.year)),
        );
        return;
    }

    let Some((found, gap)) = walk(row, index, -1, Phase::Planning) else {
        return;
    };

    let adjacent = found.year == cell.year - 1;
    let new_end = if adjacent {
        cell.timeline.planning_end.map(|d| d.plus_years(1))
    } else {
        cell.timeline.planning_end.map(|d| d.with_year(cell.year))
    };
    patch.est_planning_end = carry_date(cell.project.planning_end, new_end);

    if !gap.is_empty() {
        patch.finances_mut(cell.start_year).merge(&gap);
    }
}

// The cell becomes the new construction start. Walk forward to the
// construction period, nulling gap slots on the way.
fn retype_construction(
    row: &TimelineRow,
    index: usize,
    cell: &TimelineCell,
    patch: &mut ProjectPatch,
) {
    if cell.kind == CellKind::Overlap {
        patch.est_construction_start = carry_date(
            cell.project.construction_start,
            cell.timeline
                .construction_start
                .map(|d| d.with_year(cell.year)),
        );
        return;
    }

    let Some((found, gap)) = walk(row, index, 1, Phase::Construction) else {
        return;
    };

    let adjacent = found.year == cell.year + 1;
    let new_start = if adjacent {
        cell.timeline.construction_start.map(|d| d.plus_years(-1))
    } else {
        cell.timeline
            .construction_start
            .map(|d| d.with_year(cell.year))
    };
    patch.est_construction_start = carry_date(cell.project.construction_start, new_start);

    if !gap.is_empty() {
        patch.finances_mut(cell.start_year).merge(&gap);
    }
}

// Walk from the cell in one direction until the first cell of the target
// phase, collecting nulls for every slot strictly between.
fn walk<'a>(
    row: &'a TimelineRow,
    index: usize,
    step: isize,
    phase: Phase,
) -> Option<(&'a TimelineCell, FinancePatch)> {
    let anchor = row.cell(index)?.start_year;
    let mut gap = FinancePatch::new(anchor);
    let mut cursor = index as isize + step;

    while cursor >= 0 {
        let crossed = row.cell(usize::try_from(cursor).ok()?)?;
        if crossed.kind.in_phase(phase) {
            return Some((crossed, gap));
        }
        if let Some(field) = crossed.finance_field {
            gap.set(field, None);
        }
        cursor += step;
    }
    None
}
