use infraplan_engine::{move_budget_backwards, move_budget_forwards};
use infraplan_model::{BudgetLedger, FinanceField};
use infraplan_test_utils::ledger_with;
use proptest::prelude::*;

const ANCHOR: i32 = 2025;

fn arbitrary_ledger() -> impl Strategy<Value = BudgetLedger> {
    proptest::collection::vec(proptest::option::of(0u32..1_000_000), FinanceField::COUNT).prop_map(
        |cents| {
            let mut ledger = BudgetLedger::new(ANCHOR);
            for (field, amount) in FinanceField::ALL.into_iter().zip(cents) {
                ledger.set(
                    field,
                    amount.map(|cents| format!("{:.2}", f64::from(cents) / 100.0)),
                );
            }
            ledger
        },
    )
}

proptest! {
    // moving a start year never creates or destroys budget
    #[test]
    fn prop_forwards_conserves_the_total(
        ledger in arbitrary_ledger(),
        previous_start in ANCHOR - 2..ANCHOR + 12,
        distance in 0i32..12,
    ) {
        let start = previous_start + distance;
        let moved = move_budget_forwards(&ledger, previous_start, start);
        prop_assert!((moved.total() - ledger.total()).abs() < 1e-6);
    }

    // moving an end year never creates or destroys budget
    #[test]
    fn prop_backwards_conserves_the_total(
        ledger in arbitrary_ledger(),
        previous_end in ANCHOR..ANCHOR + 12,
        distance in 0i32..12,
    ) {
        let end = previous_end - distance;
        let moved = move_budget_backwards(&ledger, previous_end, end);
        prop_assert!((moved.total() - ledger.total()).abs() < 1e-6);
    }

    // a shift of zero years is numerically a no-op
    #[test]
    fn prop_no_shift_is_identity(ledger in arbitrary_ledger(), year in ANCHOR..ANCHOR + 11) {
        let moved = move_budget_forwards(&ledger, year, year);
        for field in FinanceField::ALL {
            let before = infraplan_model::money::parse_amount_or_zero(ledger.get(field));
            let after = infraplan_model::money::parse_amount_or_zero(moved.get(field));
            prop_assert!((before - after).abs() < 1e-9);
        }
    }

    // the input ledger is never mutated
    #[test]
    fn prop_input_is_untouched(ledger in arbitrary_ledger(), distance in 0i32..12) {
        let copy = ledger.clone();
        let _ = move_budget_forwards(&ledger, ANCHOR, ANCHOR + distance);
        let _ = move_budget_backwards(&ledger, ANCHOR + 10, ANCHOR + 10 - distance);
        prop_assert_eq!(ledger, copy);
    }
}

#[test]
fn forwards_literal_case() {
    // start moves from the year before the anchor to anchor + 2
    let ledger = ledger_with(ANCHOR, &[(0, "100"), (1, "150"), (2, "200"), (3, "250.00")]);
    let moved = move_budget_forwards(&ledger, ANCHOR - 1, ANCHOR + 2);

    assert_eq!(moved.get(FinanceField::BudgetProposalCurrentYearPlus0), Some("0.00"));
    assert_eq!(moved.get(FinanceField::BudgetProposalCurrentYearPlus1), Some("0.00"));
    assert_eq!(moved.get(FinanceField::BudgetProposalCurrentYearPlus2), Some("450.00"));
    assert_eq!(moved.get(FinanceField::PreliminaryCurrentYearPlus3), Some("250.00"));
    // the original ledger is numerically unchanged
    assert_eq!(ledger.get(FinanceField::BudgetProposalCurrentYearPlus0), Some("100"));
}

#[test]
fn backwards_literal_case() {
    // end moves from anchor + 6 to anchor + 3
    let ledger = ledger_with(ANCHOR, &[(4, "550"), (5, "400"), (6, "500")]);
    let moved = move_budget_backwards(&ledger, ANCHOR + 6, ANCHOR + 3);

    assert_eq!(moved.get(FinanceField::PreliminaryCurrentYearPlus6), Some("0.00"));
    assert_eq!(moved.get(FinanceField::PreliminaryCurrentYearPlus5), Some("0.00"));
    assert_eq!(moved.get(FinanceField::PreliminaryCurrentYearPlus4), Some("0.00"));
    assert_eq!(moved.get(FinanceField::PreliminaryCurrentYearPlus3), Some("1450.00"));
}
