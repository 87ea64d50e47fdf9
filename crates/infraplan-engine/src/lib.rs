//! Infraplan timeline adjustment engine
//!
//! Pure, synchronous computations from a cell row plus one requested edit to
//! the complete patch for the backing store. Four edit families share the
//! same contract: budget is never created or destroyed, only moved between
//! year slots, and a date field absent on the project is never resurrected.
//!
//! # Edit families
//!
//! - [`removal_patch`]: shrink the timeline by deleting a cell
//! - [`addition_patch`]: grow the timeline to the left or right of a cell
//! - [`retype_patch`]: recompute a phase boundary after a cell changes
//!   designation
//! - [`shift_patch`]: move the whole timeline forward or backward one year
//!
//! The [`realloc`] module holds the ledger reallocation used when a boundary
//! date moves directly; [`harness`] is a deterministic simulator over random
//! edit sequences.
//!
//! No operation here fails: unresolvable years are skipped and inapplicable
//! edits produce empty patches, never errors.

#![warn(unreachable_pub)]

pub mod add;
pub mod assemble;
pub mod harness;
pub mod realloc;
pub mod remove;
pub mod retype;
pub mod shift;

pub use add::addition_patch;
pub use realloc::{move_budget_backwards, move_budget_forwards, slot_for_year};
pub use remove::removal_patch;
pub use retype::retype_patch;
pub use shift::{shift_backward, shift_forward, shift_patch};
