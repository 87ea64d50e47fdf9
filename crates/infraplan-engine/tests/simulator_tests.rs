use infraplan_engine::harness::{run_simulator, SimulatorConfig};

#[test]
fn default_run_finds_no_violations() {
    let report = run_simulator(SimulatorConfig::default());
    assert!(report.passed(), "{}", report.generate_text());
    assert!(report.stats.edits_applied > 0);
}

#[test]
fn runs_are_deterministic_per_seed() {
    let config = SimulatorConfig {
        seed: 7,
        total_edits: 200,
        stop_on_first_violation: false,
    };
    let first = run_simulator(config.clone());
    let second = run_simulator(config);

    assert_eq!(first.stats.edits_attempted, second.stats.edits_attempted);
    assert_eq!(first.stats.edits_applied, second.stats.edits_applied);
    assert_eq!(first.stats.edits_no_op, second.stats.edits_no_op);
    assert_eq!(first.violations.len(), second.violations.len());
}

#[test]
fn different_seeds_still_conserve_budget() {
    for seed in [1u64, 99, 2024] {
        let report = run_simulator(SimulatorConfig {
            seed,
            total_edits: 300,
            stop_on_first_violation: false,
        });
        assert!(report.passed(), "seed {seed}:\n{}", report.generate_text());
    }
}

#[test]
fn report_text_carries_the_verdict() {
    let report = run_simulator(SimulatorConfig {
        seed: 3,
        total_edits: 50,
        stop_on_first_violation: true,
    });
    let text = report.generate_text();
    assert!(text.contains("Seed: 3"));
    assert!(text.contains("Result: PASS"));
}
