//! Finance ledger reallocation
//!
//! When a timeline's start or end year moves, budget stranded in the skipped
//! year slots must be folded into the new boundary slot. Both operations work
//! on a copy and never mutate their input; a destination slot that cannot be
//! resolved makes the whole operation a no-op, so an amount is either moved
//! completely or not at all.

use infraplan_model::money;
use infraplan_model::{BudgetLedger, FinanceField};

/// Resolve the slot holding the budget of an absolute calendar year
///
/// Years whose offset from the anchor falls outside `[0, 10]` have no slot.
#[inline]
#[must_use]
pub fn slot_for_year(ledger: &BudgetLedger, year: i32) -> Option<FinanceField> {
    FinanceField::from_offset(i64::from(year) - i64::from(ledger.year))
}

/// Accumulate the listed years' budgets and zero their slots on the copy
///
/// Unresolvable years are skipped; missing and garbage values count as zero.
fn accumulate_and_clear(
    ledger: &BudgetLedger,
    copy: &mut BudgetLedger,
    years: impl IntoIterator<Item = i32>,
) -> f64 {
    let mut moved = 0.0;
    for year in years {
        if let Some(field) = slot_for_year(ledger, year) {
            moved += money::parse_amount_or_zero(ledger.get(field));
            copy.set(field, Some(money::format_fixed(0.0)));
        }
    }
    moved
}

/// Fold budget from skipped years into the new start-year slot
///
/// Every year strictly between the previous and the new start year is
/// cleared and its amount added to the slot for `start`. When that slot
/// cannot be resolved the input ledger is returned unchanged.
#[must_use]
pub fn move_budget_forwards(
    ledger: &BudgetLedger,
    previous_start: i32,
    start: i32,
) -> BudgetLedger {
    let Some(destination) = slot_for_year(ledger, start) else {
        return ledger.clone();
    };
    tracing::debug!(previous_start, start, "moving stranded budget forwards");

    let mut updated = ledger.clone();
    let moved = accumulate_and_clear(ledger, &mut updated, previous_start + 1..start);
    let total = money::parse_amount_or_zero(ledger.get(destination)) + moved;
    updated.set(destination, Some(money::format_fixed(total)));
    updated
}

/// Fold budget from years beyond the new end year into its slot
///
/// Every year strictly after `end`, bounded by the last usable slot offset,
/// is cleared and its amount added to the slot for `end`. When that slot
/// cannot be resolved the input ledger is returned unchanged.
#[must_use]
pub fn move_budget_backwards(ledger: &BudgetLedger, previous_end: i32, end: i32) -> BudgetLedger {
    let Some(destination) = slot_for_year(ledger, end) else {
        return ledger.clone();
    };
    tracing::debug!(previous_end, end, "moving stranded budget backwards");

    let mut updated = ledger.clone();
    let last_usable = ledger.year + i32::from(FinanceField::MAX_OFFSET);
    let moved = accumulate_and_clear(ledger, &mut updated, end + 1..=last_usable);
    let total = money::parse_amount_or_zero(ledger.get(destination)) + moved;
    updated.set(destination, Some(money::format_fixed(total)));
    updated
}
