//! The cell model
//!
//! A project timeline is rendered as one row of yearly cells. The row owns a
//! contiguous `Vec` of cells indexed by position; neighbor access is index
//! arithmetic and the absorb target is an index into the same row, so no
//! back-references are needed.

use crate::date::PlainDate;
use crate::ledger::FinanceField;
use crate::patch::FinancePatch;

/// Phase of a project lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Planning period
    Planning,
    /// Construction period
    Construction,
    /// Optional warranty period
    Warranty,
}

/// What one yearly cell represents
///
/// `Overlap` is a year that is simultaneously the last planning year and the
/// first construction year. `Gap` is a hidden year between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// First planning year
    PlanningStart,
    /// Interior planning year
    Planning,
    /// Last planning year
    PlanningEnd,
    /// First construction year
    ConstructionStart,
    /// Interior construction year
    Construction,
    /// Last construction year
    ConstructionEnd,
    /// Last planning year and first construction year at once
    Overlap,
    /// First warranty year
    WarrantyStart,
    /// Interior warranty year
    Warranty,
    /// Last warranty year
    WarrantyEnd,
    /// Hidden year between phases
    Gap,
}

impl CellKind {
    /// Whether the year belongs to the planning period
    #[inline]
    #[must_use]
    pub const fn is_planning(self) -> bool {
        matches!(
            self,
            CellKind::PlanningStart | CellKind::Planning | CellKind::PlanningEnd | CellKind::Overlap
        )
    }

    /// Whether the year belongs to the construction period
    #[inline]
    #[must_use]
    pub const fn is_construction(self) -> bool {
        matches!(
            self,
            CellKind::ConstructionStart
                | CellKind::Construction
                | CellKind::ConstructionEnd
                | CellKind::Overlap
        )
    }

    /// Whether the year belongs to the warranty period
    #[inline]
    #[must_use]
    pub const fn is_warranty(self) -> bool {
        matches!(
            self,
            CellKind::WarrantyStart | CellKind::Warranty | CellKind::WarrantyEnd
        )
    }

    /// Whether removing or adding this cell also moves a date field
    ///
    /// Interior plain years and hidden gap years do not.
    #[inline]
    #[must_use]
    pub const fn affects_dates(self) -> bool {
        !matches!(
            self,
            CellKind::Planning | CellKind::Construction | CellKind::Warranty | CellKind::Gap
        )
    }

    /// Whether this cell is a member of the given phase
    #[inline]
    #[must_use]
    pub const fn in_phase(self, phase: Phase) -> bool {
        match phase {
            Phase::Planning => self.is_planning(),
            Phase::Construction => self.is_construction(),
            Phase::Warranty => self.is_warranty(),
        }
    }
}

/// Direction a cell may be extended from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowDirection {
    /// Toward earlier years
    Left,
    /// Toward later years
    Right,
}

/// Grow affordances of one cell, consumed (never produced) by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowSet {
    /// May be extended toward earlier years
    pub left: bool,
    /// May be extended toward later years
    pub right: bool,
}

impl GrowSet {
    /// Whether growing in the given direction is allowed
    #[inline]
    #[must_use]
    pub const fn allows(self, direction: GrowDirection) -> bool {
        match direction {
            GrowDirection::Left => self.left,
            GrowDirection::Right => self.right,
        }
    }
}

/// Boundary dates of a whole timeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineDates {
    /// First planning day
    pub planning_start: Option<PlainDate>,
    /// Last planning day
    pub planning_end: Option<PlainDate>,
    /// First construction day
    pub construction_start: Option<PlainDate>,
    /// Last construction day
    pub construction_end: Option<PlainDate>,
    /// First warranty day
    pub warranty_start: Option<PlainDate>,
    /// Last warranty day
    pub warranty_end: Option<PlainDate>,
}

/// One calendar year of a project's timeline row
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineCell {
    /// Calendar year this cell represents
    pub year: i32,
    /// Anchor year for ledger slot naming
    pub start_year: i32,
    /// What this year represents
    pub kind: CellKind,
    /// First cell of the row
    pub is_start_of_timeline: bool,
    /// Last cell of the row
    pub is_end_of_timeline: bool,
    /// Only remaining cell of its phase; removal eliminates the phase
    pub is_last_of_kind: bool,
    /// Ledger slot owning this year's budget, when the year is in range
    pub finance_field: Option<FinanceField>,
    /// Budget currently in that slot
    pub budget: Option<String>,
    /// Row index of the neighbor that absorbs this cell's budget on removal
    pub absorb_into: Option<usize>,
    /// Hidden gap slots that must surface as zero when this cell is edited
    pub finances_to_reset: FinancePatch,
    /// UI grow affordances
    pub grow: GrowSet,
    /// Whether removal or addition also moves a date field
    pub affects_dates: bool,
    /// Boundary dates of the whole timeline as rendered
    pub timeline: TimelineDates,
    /// The equivalent fields as persisted on the project
    pub project: TimelineDates,
}

/// An owned, contiguous row of yearly cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineRow {
    cells: Vec<TimelineCell>,
}

impl TimelineRow {
    /// Wrap an already well-formed cell sequence
    #[must_use]
    pub fn new(cells: Vec<TimelineCell>) -> Self {
        Self { cells }
    }

    /// All cells in year order
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[TimelineCell] {
        &self.cells
    }

    /// Number of cells
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at an index
    #[inline]
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&TimelineCell> {
        self.cells.get(index)
    }

    /// Cell immediately before the index
    #[inline]
    #[must_use]
    pub fn prev(&self, index: usize) -> Option<&TimelineCell> {
        index.checked_sub(1).and_then(|i| self.cells.get(i))
    }

    /// Cell immediately after the index
    #[inline]
    #[must_use]
    pub fn next(&self, index: usize) -> Option<&TimelineCell> {
        self.cells.get(index + 1)
    }

    /// Neighbor in a grow direction
    #[inline]
    #[must_use]
    pub fn neighbor(&self, index: usize, direction: GrowDirection) -> Option<&TimelineCell> {
        match direction {
            GrowDirection::Left => self.prev(index),
            GrowDirection::Right => self.next(index),
        }
    }

    /// Index of the cell for a calendar year
    #[must_use]
    pub fn index_of_year(&self, year: i32) -> Option<usize> {
        self.cells.iter().position(|cell| cell.year == year)
    }
}
