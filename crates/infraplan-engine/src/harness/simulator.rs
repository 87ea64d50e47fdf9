//! Edit-sequence simulator
//!
//! Key invariants checked after every applied edit:
//! - budget is conserved, up to the amounts an edit legitimately drops
//!   (a slot pushed off the usable range, a removal with no absorb target)
//! - boundary dates stay ordered (year-granular across phases, since an
//!   overlap year belongs to both)

use infraplan_model::row::build_row;
use infraplan_model::{
    money, CellKind, FinanceField, GrowDirection, Phase, PlainDate, ProjectSnapshot, TimelineRow,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::harness::apply::apply_patch;
use crate::{addition_patch, removal_patch, retype_patch, shift_patch};

/// Simulator configuration
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Total edit operations to attempt
    pub total_edits: u64,
    /// Stop on the first violation
    pub stop_on_first_violation: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            total_edits: 1000,
            stop_on_first_violation: true,
        }
    }
}

/// One simulated edit
#[derive(Debug, Clone)]
pub enum SimulatedEdit {
    /// Remove the cell of a year
    Remove {
        /// Calendar year of the removed cell
        year: i32,
    },
    /// Grow the timeline from a cell
    Add {
        /// Calendar year of the anchor cell
        year: i32,
        /// Grow direction
        direction: GrowDirection,
    },
    /// Declare a hidden year part of a phase
    Retype {
        /// Calendar year of the retyped cell
        year: i32,
        /// Requested phase side
        side: Phase,
    },
    /// Shift the whole timeline by one year
    Shift {
        /// Calendar year of the anchor cell
        year: i32,
        /// Direction of travel
        direction: GrowDirection,
    },
}

/// A violation detected during simulation
#[derive(Debug, Clone)]
pub enum Violation {
    /// An edit created or destroyed budget beyond what it legitimately drops
    BudgetNotConserved {
        /// The offending edit
        edit: SimulatedEdit,
        /// Ledger total before the edit
        before: f64,
        /// Ledger total after the edit
        after: f64,
        /// Amount the edit was allowed to drop
        expected_drop: f64,
    },
    /// Boundary dates no longer ordered after an edit
    DatesNotMonotonic {
        /// The offending edit
        edit: SimulatedEdit,
        /// Which ordering broke
        detail: String,
    },
}

/// Statistics for one simulation run
#[derive(Debug, Clone, Default)]
pub struct SimulatorStats {
    /// Edits generated
    pub edits_attempted: u64,
    /// Edits that produced a non-empty patch
    pub edits_applied: u64,
    /// Edits the engine answered with an empty patch
    pub edits_no_op: u64,
    /// Times the timeline was emptied and a fresh snapshot generated
    pub timelines_exhausted: u64,
}

/// Final report from the simulator
#[derive(Debug, Clone)]
pub struct SimulatorReport {
    /// The configuration that produced this report
    pub config: SimulatorConfig,
    /// Run statistics
    pub stats: SimulatorStats,
    /// Violations found
    pub violations: Vec<Violation>,
}

impl SimulatorReport {
    /// Whether the run found no violations
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Render a text report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Infraplan Simulator Report ===\n\n");
        report.push_str(&format!("Seed: {}\n", self.config.seed));
        report.push_str(&format!("Edits Attempted: {}\n", self.stats.edits_attempted));
        report.push_str(&format!("Edits Applied: {}\n", self.stats.edits_applied));
        report.push_str(&format!("Edits No-Op: {}\n", self.stats.edits_no_op));
        report.push_str(&format!(
            "Timelines Exhausted: {}\n",
            self.stats.timelines_exhausted
        ));
        report.push_str(&format!("Violations: {}\n", self.violations.len()));

        if !self.violations.is_empty() {
            report.push_str("\n=== Violations ===\n");
            for (i, violation) in self.violations.iter().enumerate() {
                report.push_str(&format!("{}. {:?}\n", i + 1, violation));
            }
        }

        report.push_str(&format!(
            "\n=== Result: {} ===\n",
            if self.passed() { "PASS" } else { "FAIL" }
        ));
        report
    }
}

/// Run the simulator
#[must_use]
pub fn run_simulator(config: SimulatorConfig) -> SimulatorReport {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut snapshot = random_snapshot(&mut rng);
    let mut stats = SimulatorStats::default();
    let mut violations = Vec::new();

    for _ in 0..config.total_edits {
        let Ok(row) = build_row(&snapshot) else {
            stats.timelines_exhausted += 1;
            snapshot = random_snapshot(&mut rng);
            continue;
        };

        stats.edits_attempted += 1;
        let (edit, patch, expected_drop) = generate_edit(&mut rng, &snapshot, &row);
        if patch.is_empty() {
            stats.edits_no_op += 1;
            continue;
        }

        let before = snapshot.finances.total();
        apply_patch(&mut snapshot, &patch);
        let after = snapshot.finances.total();
        stats.edits_applied += 1;

        if (before - expected_drop - after).abs() > 1e-6 {
            violations.push(Violation::BudgetNotConserved {
                edit: edit.clone(),
                before,
                after,
                expected_drop,
            });
            if config.stop_on_first_violation {
                break;
            }
        }

        if let Some(detail) = monotonicity_breach(&snapshot) {
            violations.push(Violation::DatesNotMonotonic { edit, detail });
            if config.stop_on_first_violation {
                break;
            }
        }
    }

    SimulatorReport {
        config,
        stats,
        violations,
    }
}

// Pick a cell and an edit applicable to it; return the edit, its patch, and
// the amount the edit legitimately drops from the ledger.
fn generate_edit(
    rng: &mut StdRng,
    snapshot: &ProjectSnapshot,
    row: &TimelineRow,
) -> (SimulatedEdit, infraplan_model::ProjectPatch, f64) {
    let index = rng.gen_range(0..row.len());
    let cell = &row.cells()[index];
    let year = cell.year;

    match rng.gen_range(0..4u8) {
        0 => {
            // a removal with no usable absorb target drops the cell's budget
            let expected_drop = match cell.absorb_into.and_then(|i| row.cell(i)) {
                Some(absorb) if absorb.finance_field.is_some() => 0.0,
                _ => money::parse_amount_or_zero(cell.budget.as_deref()),
            };
            (
                SimulatedEdit::Remove { year },
                removal_patch(row, index),
                expected_drop,
            )
        }
        1 => {
            let direction = if rng.gen_bool(0.5) {
                GrowDirection::Left
            } else {
                GrowDirection::Right
            };
            (
                SimulatedEdit::Add { year, direction },
                addition_patch(row, index, direction),
                0.0,
            )
        }
        2 if cell.kind == CellKind::Gap => {
            let side = if rng.gen_bool(0.5) {
                Phase::Planning
            } else {
                Phase::Construction
            };
            (
                SimulatedEdit::Retype { year, side },
                retype_patch(row, index, side),
                0.0,
            )
        }
        _ => {
            let direction = if rng.gen_bool(0.5) {
                GrowDirection::Left
            } else {
                GrowDirection::Right
            };
            // a shift drops the slot pushed off the usable range
            let expected_drop = if cell.is_end_of_timeline && direction == GrowDirection::Right {
                money::parse_amount_or_zero(
                    snapshot
                        .finances
                        .get(FinanceField::PreliminaryCurrentYearPlus10),
                )
            } else if cell.is_start_of_timeline && direction == GrowDirection::Left {
                money::parse_amount_or_zero(
                    snapshot
                        .finances
                        .get(FinanceField::BudgetProposalCurrentYearPlus0),
                )
            } else {
                0.0
            };
            (
                SimulatedEdit::Shift { year, direction },
                shift_patch(row, index, direction, &snapshot.finances),
                expected_drop,
            )
        }
    }
}

fn random_snapshot(rng: &mut StdRng) -> ProjectSnapshot {
    let anchor = 2024 + rng.gen_range(0..4);
    let planning_years = rng.gen_range(1..=3);
    // 0 shares a year (overlap), 1 is contiguous, 2 leaves a hidden gap year
    let construction_offset = rng.gen_range(0..3);
    let construction_years = rng.gen_range(1..=3);

    let planning_start = anchor;
    let planning_end = planning_start + planning_years - 1;
    let construction_start = planning_end + construction_offset;
    let construction_end = construction_start + construction_years - 1;

    let mut snapshot = ProjectSnapshot::new("simulated", anchor);
    snapshot.est_planning_start = Some(PlainDate::first_of(planning_start));
    snapshot.est_planning_end = Some(PlainDate::last_of(planning_end));
    snapshot.est_construction_start = Some(PlainDate::first_of(construction_start));
    snapshot.est_construction_end = Some(PlainDate::last_of(construction_end));
    snapshot.planning_start_year = Some(planning_start);
    snapshot.construction_end_year = Some(construction_end);

    for year in planning_start..=construction_end {
        if let Some(field) = FinanceField::from_offset(i64::from(year - anchor)) {
            if rng.gen_bool(0.8) {
                let cents: u32 = rng.gen_range(0..1_000_000);
                snapshot
                    .finances
                    .set(field, Some(money::format_fixed(f64::from(cents) / 100.0)));
            }
        }
    }
    snapshot
}

fn monotonicity_breach(snapshot: &ProjectSnapshot) -> Option<String> {
    let phases = [
        (
            "planning",
            snapshot.est_planning_start,
            snapshot.est_planning_end,
        ),
        (
            "construction",
            snapshot.est_construction_start,
            snapshot.est_construction_end,
        ),
        (
            "warranty",
            snapshot.est_warranty_phase_start,
            snapshot.est_warranty_phase_end,
        ),
    ];
    for (phase, start, end) in phases {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Some(format!("{phase} starts {start} after its end {end}"));
            }
        }
    }

    // boundary years may be shared, so cross-phase ordering is year-granular
    let boundaries = [
        (
            "planning end",
            snapshot.est_planning_end,
            "construction start",
            snapshot.est_construction_start,
        ),
        (
            "construction end",
            snapshot.est_construction_end,
            "warranty start",
            snapshot.est_warranty_phase_start,
        ),
    ];
    for (earlier_name, earlier, later_name, later) in boundaries {
        if let (Some(earlier), Some(later)) = (earlier, later) {
            if earlier.year() > later.year() {
                return Some(format!(
                    "{earlier_name} {earlier} after {later_name} {later}"
                ));
            }
        }
    }
    None
}
