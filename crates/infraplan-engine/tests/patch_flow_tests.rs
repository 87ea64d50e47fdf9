use infraplan_engine::harness::apply::apply_patch;
use infraplan_engine::{addition_patch, removal_patch};
use infraplan_model::row::build_row;
use infraplan_model::{CellKind, GrowDirection};
use infraplan_test_utils::{cell_index, project_with_phases, row_for, set_budget};
use pretty_assertions::assert_eq;

#[test]
fn removing_the_first_year_shrinks_the_rebuilt_row() {
    let mut project = project_with_phases(2025, Some((2025, 2027)), Some((2028, 2029)));
    set_budget(&mut project, 0, "100");
    set_budget(&mut project, 1, "200");
    let row = row_for(&project);
    let total_before = project.finances.total();

    let patch = removal_patch(&row, cell_index(&row, 2025));
    apply_patch(&mut project, &patch);

    let rebuilt = build_row(&project).unwrap();
    assert_eq!(rebuilt.len(), row.len() - 1);
    assert_eq!(rebuilt.cells()[0].year, 2026);
    assert_eq!(rebuilt.cells()[0].kind, CellKind::PlanningStart);
    // all euros still on the ledger, merged into the absorbing slot
    assert!((project.finances.total() - total_before).abs() < 1e-9);
}

#[test]
fn growing_right_extends_the_rebuilt_row() {
    let mut project = project_with_phases(2025, Some((2025, 2026)), Some((2027, 2028)));
    let row = row_for(&project);

    let patch = addition_patch(&row, cell_index(&row, 2028), GrowDirection::Right);
    apply_patch(&mut project, &patch);

    let rebuilt = build_row(&project).unwrap();
    assert_eq!(rebuilt.len(), row.len() + 1);
    assert_eq!(rebuilt.cells().last().unwrap().year, 2029);
    assert_eq!(rebuilt.cells().last().unwrap().kind, CellKind::ConstructionEnd);
}

#[test]
fn eliminating_planning_leaves_a_construction_only_row() {
    let mut project = project_with_phases(2025, Some((2025, 2025)), Some((2027, 2028)));
    let row = row_for(&project);

    let patch = removal_patch(&row, cell_index(&row, 2025));
    apply_patch(&mut project, &patch);

    assert_eq!(project.est_planning_start, None);
    assert_eq!(project.est_planning_end, None);
    assert_eq!(project.planning_start_year, Some(2027));

    let rebuilt = build_row(&project).unwrap();
    assert_eq!(rebuilt.cells()[0].year, 2027);
    assert!(rebuilt.cells().iter().all(|cell| !cell.kind.is_planning()));
}
