//! Deterministic simulation harness
//!
//! Drives random edit sequences against random project snapshots and checks
//! the ledger invariants after every applied patch. Used by the `simulate`
//! subcommand and by integration tests.

pub mod apply;
mod simulator;

pub use simulator::{
    run_simulator, SimulatedEdit, SimulatorConfig, SimulatorReport, SimulatorStats, Violation,
};
