//! Infraplan data model
//!
//! The per-year cell representation of a project timeline, the eleven-slot
//! budget ledger, wire dates, and the patch types produced by the adjustment
//! engine.
//!
//! # Core Concepts
//!
//! - [`PlainDate`]: `dd.mm.yyyy` wire dates
//! - [`BudgetLedger`] / [`FinanceField`]: year-offset budget slots
//! - [`TimelineRow`] / [`TimelineCell`]: one row of yearly cells per project
//! - [`ProjectPatch`] / [`FinancePatch`]: the outgoing patch for one edit
//! - [`ProjectSnapshot`] and [`build_row`]: persisted fields and the row
//!   builder that turns them into cells

#![warn(unreachable_pub)]

pub mod cell;
pub mod date;
pub mod error;
pub mod ledger;
pub mod money;
pub mod patch;
pub mod row;
pub mod snapshot;

pub use cell::{
    CellKind, GrowDirection, GrowSet, Phase, TimelineCell, TimelineDates, TimelineRow,
};
pub use date::PlainDate;
pub use error::ModelError;
pub use ledger::{BudgetLedger, FinanceField};
pub use patch::{FinancePatch, PatchField, ProjectPatch};
pub use row::build_row;
pub use snapshot::ProjectSnapshot;
