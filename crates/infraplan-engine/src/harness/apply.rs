//! Patch application
//!
//! The submission layer merges a patch into the persisted record; the
//! harness needs the same merge to keep simulating on the updated snapshot.

use infraplan_model::{PatchField, ProjectPatch, ProjectSnapshot};

/// Merge a patch into a snapshot the way the submission layer would
pub fn apply_patch(snapshot: &mut ProjectSnapshot, patch: &ProjectPatch) {
    apply_field(&mut snapshot.est_planning_start, &patch.est_planning_start);
    apply_field(&mut snapshot.est_planning_end, &patch.est_planning_end);
    apply_field(
        &mut snapshot.est_construction_start,
        &patch.est_construction_start,
    );
    apply_field(
        &mut snapshot.est_construction_end,
        &patch.est_construction_end,
    );
    apply_field(
        &mut snapshot.est_warranty_phase_start,
        &patch.est_warranty_phase_start,
    );
    apply_field(
        &mut snapshot.est_warranty_phase_end,
        &patch.est_warranty_phase_end,
    );
    apply_field(&mut snapshot.planning_start_year, &patch.planning_start_year);
    apply_field(
        &mut snapshot.construction_end_year,
        &patch.construction_end_year,
    );

    if let Some(finances) = &patch.finances {
        for (field, value) in finances.entries() {
            snapshot.finances.set(field, value.map(String::from));
        }
    }
}

fn apply_field<T: Copy>(slot: &mut Option<T>, patch: &PatchField<T>) {
    match patch {
        PatchField::Omit => {}
        PatchField::Clear => *slot = None,
        PatchField::Set(value) => *slot = Some(*value),
    }
}
