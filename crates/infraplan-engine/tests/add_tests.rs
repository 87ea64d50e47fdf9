use infraplan_engine::addition_patch;
use infraplan_model::{FinanceField, GrowDirection, PatchField, PlainDate};
use infraplan_test_utils::{cell_index, project_with_phases, row_for, set_budget, with_warranty};
use pretty_assertions::assert_eq;

fn date(s: &str) -> PlainDate {
    s.parse().unwrap()
}

fn slot(offset: i64) -> FinanceField {
    FinanceField::from_offset(offset).unwrap()
}

#[test]
fn growing_left_at_the_start_moves_the_planning_start_earlier() {
    let project = project_with_phases(2025, Some((2025, 2026)), Some((2027, 2028)));
    let row = row_for(&project);

    let patch = addition_patch(&row, cell_index(&row, 2025), GrowDirection::Left);

    assert_eq!(patch.est_planning_start, PatchField::Set(date("01.01.2024")));
    assert_eq!(patch.planning_start_year, PatchField::Set(2024));
    // no cell to the left, so no slot to activate
    assert!(patch.finances.is_none());
}

#[test]
fn growing_left_from_a_construction_start_eats_into_the_gap() {
    let project = project_with_phases(2025, Some((2025, 2025)), Some((2027, 2028)));
    let row = row_for(&project);

    let patch = addition_patch(&row, cell_index(&row, 2027), GrowDirection::Left);

    assert_eq!(
        patch.est_construction_start,
        PatchField::Set(date("01.01.2026"))
    );
    // the hidden gap slot next to the new cell becomes an active zero
    let finances = patch.finances.as_ref().unwrap();
    assert_eq!(finances.get(slot(1)), Some(&Some("0".to_string())));
}

#[test]
fn growing_left_from_a_single_construction_year_moves_its_start() {
    let project = project_with_phases(2025, Some((2025, 2025)), Some((2027, 2027)));
    let row = row_for(&project);

    let patch = addition_patch(&row, cell_index(&row, 2027), GrowDirection::Left);

    assert_eq!(
        patch.est_construction_start,
        PatchField::Set(date("01.01.2026"))
    );
}

#[test]
fn growing_right_from_a_planning_end_extends_planning() {
    let project = project_with_phases(2025, Some((2025, 2025)), Some((2027, 2028)));
    let row = row_for(&project);

    let patch = addition_patch(&row, cell_index(&row, 2025), GrowDirection::Right);

    assert_eq!(patch.est_planning_end, PatchField::Set(date("31.12.2026")));
    assert!(patch.planning_start_year.is_omitted());
    // the gap year to the right becomes active
    let finances = patch.finances.as_ref().unwrap();
    assert_eq!(finances.get(slot(1)), Some(&Some("0".to_string())));
}

#[test]
fn growing_right_from_the_construction_end_extends_construction() {
    let project = project_with_phases(2025, Some((2025, 2026)), Some((2027, 2028)));
    let row = row_for(&project);

    let patch = addition_patch(&row, cell_index(&row, 2028), GrowDirection::Right);

    assert_eq!(
        patch.est_construction_end,
        PatchField::Set(date("31.12.2029"))
    );
    assert_eq!(patch.construction_end_year, PatchField::Set(2029));
    assert!(patch.finances.is_none());
}

#[test]
fn growing_right_from_a_warranty_end_extends_the_warranty() {
    let project = with_warranty(
        project_with_phases(2025, Some((2025, 2025)), Some((2026, 2027))),
        2028,
        2029,
    );
    let row = row_for(&project);

    let patch = addition_patch(&row, cell_index(&row, 2029), GrowDirection::Right);

    assert_eq!(
        patch.est_warranty_phase_end,
        PatchField::Set(date("31.12.2030"))
    );
}

#[test]
fn a_neighbor_with_budget_is_left_alone() {
    let mut project = project_with_phases(2025, Some((2025, 2025)), Some((2027, 2028)));
    set_budget(&mut project, 1, "10");
    let row = row_for(&project);

    let patch = addition_patch(&row, cell_index(&row, 2027), GrowDirection::Left);

    // the gap slot already carries a value, so only the date moves
    assert!(patch.finances.is_none());
    assert_eq!(
        patch.est_construction_start,
        PatchField::Set(date("01.01.2026"))
    );
}

#[test]
fn directions_without_an_affordance_are_no_ops() {
    let project = project_with_phases(2025, Some((2025, 2027)), Some((2028, 2029)));
    let row = row_for(&project);

    // interior planning cells cannot grow
    let patch = addition_patch(&row, cell_index(&row, 2026), GrowDirection::Left);
    assert!(patch.is_empty());

    // a construction end that is not the whole phase cannot grow left
    let patch = addition_patch(&row, cell_index(&row, 2029), GrowDirection::Left);
    assert!(patch.is_empty());
}
