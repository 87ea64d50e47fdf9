//! Row construction
//!
//! Builds a well-formed cell row from a project snapshot: kinds, positional
//! flags, slot assignment, absorb targets, and grow affordances. The engine
//! trusts rows built here and performs no validation of its own.

use crate::cell::{CellKind, GrowSet, TimelineCell, TimelineDates, TimelineRow};
use crate::date::PlainDate;
use crate::error::ModelError;
use crate::ledger::FinanceField;
use crate::money;
use crate::patch::FinancePatch;
use crate::snapshot::ProjectSnapshot;

/// Build the cell row for a snapshot
///
/// # Errors
/// Returns [`ModelError::EmptyTimeline`] when the snapshot has no dates.
pub fn build_row(snapshot: &ProjectSnapshot) -> Result<TimelineRow, ModelError> {
    let dates = snapshot.dates();
    let (first, last) = timeline_span(&dates).ok_or(ModelError::EmptyTimeline)?;
    let anchor = snapshot.finances.year;

    let kinds: Vec<CellKind> = (first..=last)
        .map(|year| kind_for_year(year, &dates))
        .collect();

    let planning_cells = kinds.iter().filter(|k| k.is_planning()).count();
    let construction_cells = kinds.iter().filter(|k| k.is_construction()).count();
    let warranty_cells = kinds.iter().filter(|k| k.is_warranty()).count();

    let mut cells = Vec::with_capacity(kinds.len());
    for (idx, &kind) in kinds.iter().enumerate() {
        let year = first + idx as i32;
        let is_start = idx == 0;
        let is_end = idx == kinds.len() - 1;
        let is_last_of_kind = match kind {
            CellKind::Overlap => planning_cells == 1 && construction_cells == 1,
            k if k.is_planning() => planning_cells == 1,
            k if k.is_construction() => construction_cells == 1,
            k if k.is_warranty() => warranty_cells == 1,
            _ => false,
        };

        let finance_field = FinanceField::from_offset(i64::from(year) - i64::from(anchor));
        let budget = finance_field
            .and_then(|field| snapshot.finances.get(field))
            .map(String::from);

        let (absorb_into, finances_to_reset) = match absorb_step(kind, is_start, is_last_of_kind) {
            Some(step) => scan_absorb(&kinds, idx, step, first, anchor),
            None => (None, FinancePatch::new(anchor)),
        };

        cells.push(TimelineCell {
            year,
            start_year: anchor,
            kind,
            is_start_of_timeline: is_start,
            is_end_of_timeline: is_end,
            is_last_of_kind,
            finance_field,
            budget,
            absorb_into,
            finances_to_reset,
            grow: grow_set(&kinds, idx, kind, is_start, is_end, is_last_of_kind),
            affects_dates: kind.affects_dates(),
            timeline: dates,
            project: dates,
        });
    }

    Ok(TimelineRow::new(cells))
}

fn timeline_span(dates: &TimelineDates) -> Option<(i32, i32)> {
    let years: Vec<i32> = [
        dates.planning_start,
        dates.planning_end,
        dates.construction_start,
        dates.construction_end,
        dates.warranty_start,
        dates.warranty_end,
    ]
    .into_iter()
    .flatten()
    .map(|date| date.year())
    .collect();
    Some((*years.iter().min()?, *years.iter().max()?))
}

fn kind_for_year(year: i32, dates: &TimelineDates) -> CellKind {
    let planning = phase_span(dates.planning_start, dates.planning_end);
    let construction = phase_span(dates.construction_start, dates.construction_end);
    let warranty = phase_span(dates.warranty_start, dates.warranty_end);

    if covers(planning, year) && covers(construction, year) {
        CellKind::Overlap
    } else if covers(planning, year) {
        boundary_kind(
            planning,
            year,
            CellKind::PlanningStart,
            CellKind::Planning,
            CellKind::PlanningEnd,
        )
    } else if covers(construction, year) {
        boundary_kind(
            construction,
            year,
            CellKind::ConstructionStart,
            CellKind::Construction,
            CellKind::ConstructionEnd,
        )
    } else if covers(warranty, year) {
        boundary_kind(
            warranty,
            year,
            CellKind::WarrantyStart,
            CellKind::Warranty,
            CellKind::WarrantyEnd,
        )
    } else {
        CellKind::Gap
    }
}

// A phase with only one boundary date set covers that single year.
fn phase_span(start: Option<PlainDate>, end: Option<PlainDate>) -> Option<(i32, i32)> {
    match (start, end) {
        (Some(s), Some(e)) => Some((s.year(), e.year())),
        (Some(s), None) => Some((s.year(), s.year())),
        (None, Some(e)) => Some((e.year(), e.year())),
        (None, None) => None,
    }
}

fn covers(span: Option<(i32, i32)>, year: i32) -> bool {
    span.is_some_and(|(start, end)| year >= start && year <= end)
}

fn boundary_kind(
    span: Option<(i32, i32)>,
    year: i32,
    start_kind: CellKind,
    interior: CellKind,
    end_kind: CellKind,
) -> CellKind {
    // End wins on single-year phases.
    match span {
        Some((_, end)) if year == end => end_kind,
        Some((start, _)) if year == start => start_kind,
        _ => interior,
    }
}

// Which way a cell's budget moves when the cell is removed. Start boundaries
// absorb into their phase's interior on the right, end boundaries on the
// left. A last remaining planning cell absorbs across the phase boundary
// into the construction side, since its removal eliminates planning.
fn absorb_step(kind: CellKind, is_start: bool, is_last_of_kind: bool) -> Option<isize> {
    match kind {
        CellKind::PlanningStart | CellKind::ConstructionStart | CellKind::WarrantyStart => Some(1),
        CellKind::PlanningEnd if is_last_of_kind => Some(1),
        CellKind::PlanningEnd | CellKind::ConstructionEnd | CellKind::WarrantyEnd => Some(-1),
        CellKind::Overlap | CellKind::Planning | CellKind::Construction | CellKind::Warranty => {
            Some(if is_start { 1 } else { -1 })
        }
        CellKind::Gap => None,
    }
}

// Walk in one direction to the first non-gap cell. Hidden gap slots skipped
// on the way surface in the reset patch as explicit zeroes.
fn scan_absorb(
    kinds: &[CellKind],
    idx: usize,
    step: isize,
    first_year: i32,
    anchor: i32,
) -> (Option<usize>, FinancePatch) {
    let mut reset = FinancePatch::new(anchor);
    let mut cursor = idx as isize + step;
    while cursor >= 0 && (cursor as usize) < kinds.len() {
        let position = cursor as usize;
        if kinds[position] == CellKind::Gap {
            let year = first_year + position as i32;
            if let Some(field) = FinanceField::from_offset(i64::from(year) - i64::from(anchor)) {
                reset.set(field, Some(money::format_fixed(0.0)));
            }
            cursor += step;
            continue;
        }
        return (Some(position), reset);
    }
    (None, reset)
}

fn grow_set(
    kinds: &[CellKind],
    idx: usize,
    kind: CellKind,
    is_start: bool,
    is_end: bool,
    is_last_of_kind: bool,
) -> GrowSet {
    let prev = idx.checked_sub(1).map(|i| kinds[i]);
    let next = kinds.get(idx + 1).copied();

    let left = match kind {
        k if is_start && k.is_planning() => true,
        CellKind::ConstructionStart => {
            matches!(prev, None | Some(CellKind::Gap | CellKind::PlanningEnd))
        }
        CellKind::ConstructionEnd if is_last_of_kind => {
            matches!(prev, None | Some(CellKind::Gap | CellKind::PlanningEnd))
        }
        CellKind::WarrantyStart => {
            matches!(prev, None | Some(CellKind::Gap | CellKind::ConstructionEnd))
        }
        CellKind::WarrantyEnd if is_last_of_kind => {
            matches!(prev, None | Some(CellKind::Gap | CellKind::ConstructionEnd))
        }
        _ => false,
    };

    let right = match kind {
        CellKind::PlanningEnd => {
            matches!(next, None | Some(CellKind::Gap | CellKind::ConstructionStart))
        }
        CellKind::ConstructionEnd => {
            matches!(next, None | Some(CellKind::Gap | CellKind::WarrantyStart))
        }
        CellKind::WarrantyEnd => matches!(next, None | Some(CellKind::Gap)),
        CellKind::Overlap => is_end,
        _ => false,
    };

    GrowSet { left, right }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> PlainDate {
        s.parse().unwrap()
    }

    fn snapshot(planning: Option<(i32, i32)>, construction: Option<(i32, i32)>) -> ProjectSnapshot {
        let mut snapshot = ProjectSnapshot::new("test", 2025);
        if let Some((start, end)) = planning {
            snapshot.est_planning_start = Some(PlainDate::first_of(start));
            snapshot.est_planning_end = Some(PlainDate::last_of(end));
        }
        if let Some((start, end)) = construction {
            snapshot.est_construction_start = Some(PlainDate::first_of(start));
            snapshot.est_construction_end = Some(PlainDate::last_of(end));
        }
        snapshot
    }

    #[test]
    fn contiguous_phases_get_boundary_kinds() {
        let row = build_row(&snapshot(Some((2025, 2027)), Some((2028, 2029)))).unwrap();
        let kinds: Vec<CellKind> = row.cells().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CellKind::PlanningStart,
                CellKind::Planning,
                CellKind::PlanningEnd,
                CellKind::ConstructionStart,
                CellKind::ConstructionEnd,
            ]
        );
        assert!(row.cells()[0].is_start_of_timeline);
        assert!(row.cells()[4].is_end_of_timeline);
        assert!(!row.cells()[2].is_last_of_kind);
    }

    #[test]
    fn shared_year_becomes_overlap() {
        let row = build_row(&snapshot(Some((2025, 2026)), Some((2026, 2027)))).unwrap();
        let kinds: Vec<CellKind> = row.cells().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![CellKind::PlanningStart, CellKind::Overlap, CellKind::ConstructionEnd]
        );
    }

    #[test]
    fn hidden_years_between_phases_are_gaps() {
        let row = build_row(&snapshot(Some((2025, 2025)), Some((2027, 2028)))).unwrap();
        let kinds: Vec<CellKind> = row.cells().iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CellKind::PlanningEnd,
                CellKind::Gap,
                CellKind::ConstructionStart,
                CellKind::ConstructionEnd,
            ]
        );
        // single planning year is the phase's last cell
        assert!(row.cells()[0].is_last_of_kind);
        assert!(row.cells()[1].budget.is_none());
    }

    #[test]
    fn last_planning_cell_absorbs_across_the_gap() {
        let row = build_row(&snapshot(Some((2025, 2025)), Some((2027, 2028)))).unwrap();
        let planning_end = &row.cells()[0];
        assert_eq!(planning_end.absorb_into, Some(2));
        let reset: Vec<_> = planning_end.finances_to_reset.entries().collect();
        assert_eq!(
            reset,
            vec![(FinanceField::BudgetProposalCurrentYearPlus1, Some("0.00"))]
        );
    }

    #[test]
    fn slots_follow_the_anchor_year() {
        let mut project = snapshot(Some((2025, 2027)), None);
        project.finances.set(
            FinanceField::BudgetProposalCurrentYearPlus1,
            Some("200".to_string()),
        );
        let row = build_row(&project).unwrap();
        assert_eq!(
            row.cells()[0].finance_field,
            Some(FinanceField::BudgetProposalCurrentYearPlus0)
        );
        assert_eq!(row.cells()[1].budget.as_deref(), Some("200"));
    }

    #[test]
    fn years_past_the_slot_range_have_no_field() {
        let row = build_row(&snapshot(Some((2025, 2027)), Some((2028, 2037)))).unwrap();
        let last = row.cells().last().unwrap();
        assert_eq!(last.year, 2037);
        assert_eq!(last.finance_field, None);
    }

    #[test]
    fn grow_affordances_follow_boundaries() {
        let row = build_row(&snapshot(Some((2025, 2025)), Some((2027, 2028)))).unwrap();
        // single planning year at start of timeline: may extend both ways
        assert!(row.cells()[0].grow.left);
        assert!(row.cells()[0].grow.right);
        // construction start after a gap may grow left into it
        assert!(row.cells()[2].grow.left);
        assert!(!row.cells()[2].grow.right);
        // construction end at end of timeline grows right
        assert!(row.cells()[3].grow.right);
    }

    #[test]
    fn empty_snapshot_is_rejected() {
        let empty = ProjectSnapshot::new("empty", 2025);
        assert!(matches!(build_row(&empty), Err(ModelError::EmptyTimeline)));
    }

    #[test]
    fn dates_snapshot_is_attached_to_every_cell() {
        let row = build_row(&snapshot(Some((2025, 2026)), Some((2026, 2027)))).unwrap();
        for cell in row.cells() {
            assert_eq!(cell.timeline.planning_start, Some(date("01.01.2025")));
            assert_eq!(cell.project.construction_end, Some(date("31.12.2027")));
        }
    }
}
