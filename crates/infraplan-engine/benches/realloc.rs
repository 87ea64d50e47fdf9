use criterion::{black_box, criterion_group, criterion_main, Criterion};
use infraplan_engine::{move_budget_backwards, move_budget_forwards};
use infraplan_model::{BudgetLedger, FinanceField};

fn full_ledger() -> BudgetLedger {
    let mut ledger = BudgetLedger::new(2025);
    for (i, field) in FinanceField::ALL.into_iter().enumerate() {
        ledger.set(field, Some(format!("{}.00", (i + 1) * 100)));
    }
    ledger
}

fn bench_realloc(c: &mut Criterion) {
    let ledger = full_ledger();

    c.bench_function("move_budget_forwards_full_span", |b| {
        b.iter(|| move_budget_forwards(black_box(&ledger), black_box(2025), black_box(2035)));
    });

    c.bench_function("move_budget_backwards_full_span", |b| {
        b.iter(|| move_budget_backwards(black_box(&ledger), black_box(2035), black_box(2025)));
    });
}

criterion_group!(benches, bench_realloc);
criterion_main!(benches);
