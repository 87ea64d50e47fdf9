//! The eleven-slot budget ledger
//!
//! A project's budget lives in eleven named year-offset slots anchored at the
//! project's stored `year`: three budget-proposal slots for offsets 0-2 and
//! eight preliminary slots for offsets 3-10. The slot for absolute year `Y`
//! is deterministic from `Y - year`; offsets outside `[0, 10]` have no slot
//! and are silently ignored everywhere.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::money;

/// One of the eleven ledger slot names, ordered by year offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FinanceField {
    /// Budget proposal, anchor year
    BudgetProposalCurrentYearPlus0,
    /// Budget proposal, anchor year + 1
    BudgetProposalCurrentYearPlus1,
    /// Budget proposal, anchor year + 2
    BudgetProposalCurrentYearPlus2,
    /// Preliminary budget, anchor year + 3
    PreliminaryCurrentYearPlus3,
    /// Preliminary budget, anchor year + 4
    PreliminaryCurrentYearPlus4,
    /// Preliminary budget, anchor year + 5
    PreliminaryCurrentYearPlus5,
    /// Preliminary budget, anchor year + 6
    PreliminaryCurrentYearPlus6,
    /// Preliminary budget, anchor year + 7
    PreliminaryCurrentYearPlus7,
    /// Preliminary budget, anchor year + 8
    PreliminaryCurrentYearPlus8,
    /// Preliminary budget, anchor year + 9
    PreliminaryCurrentYearPlus9,
    /// Preliminary budget, anchor year + 10
    PreliminaryCurrentYearPlus10,
}

impl FinanceField {
    /// Number of slots in the ledger
    pub const COUNT: usize = 11;

    /// Largest usable year offset
    pub const MAX_OFFSET: u8 = 10;

    /// All slots in offset order
    pub const ALL: [FinanceField; Self::COUNT] = [
        FinanceField::BudgetProposalCurrentYearPlus0,
        FinanceField::BudgetProposalCurrentYearPlus1,
        FinanceField::BudgetProposalCurrentYearPlus2,
        FinanceField::PreliminaryCurrentYearPlus3,
        FinanceField::PreliminaryCurrentYearPlus4,
        FinanceField::PreliminaryCurrentYearPlus5,
        FinanceField::PreliminaryCurrentYearPlus6,
        FinanceField::PreliminaryCurrentYearPlus7,
        FinanceField::PreliminaryCurrentYearPlus8,
        FinanceField::PreliminaryCurrentYearPlus9,
        FinanceField::PreliminaryCurrentYearPlus10,
    ];

    /// Year offset of this slot from the anchor year
    #[inline]
    #[must_use]
    pub const fn offset(self) -> u8 {
        match self {
            FinanceField::BudgetProposalCurrentYearPlus0 => 0,
            FinanceField::BudgetProposalCurrentYearPlus1 => 1,
            FinanceField::BudgetProposalCurrentYearPlus2 => 2,
            FinanceField::PreliminaryCurrentYearPlus3 => 3,
            FinanceField::PreliminaryCurrentYearPlus4 => 4,
            FinanceField::PreliminaryCurrentYearPlus5 => 5,
            FinanceField::PreliminaryCurrentYearPlus6 => 6,
            FinanceField::PreliminaryCurrentYearPlus7 => 7,
            FinanceField::PreliminaryCurrentYearPlus8 => 8,
            FinanceField::PreliminaryCurrentYearPlus9 => 9,
            FinanceField::PreliminaryCurrentYearPlus10 => 10,
        }
    }

    /// Resolve a year offset to its slot
    ///
    /// Offsets below 0 or above 10 have no slot and resolve to `None`.
    #[inline]
    #[must_use]
    pub fn from_offset(offset: i64) -> Option<Self> {
        match offset {
            0..=10 => usize::try_from(offset).ok().map(|i| Self::ALL[i]),
            _ => None,
        }
    }

    /// Wire name of this slot
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            FinanceField::BudgetProposalCurrentYearPlus0 => "budgetProposalCurrentYearPlus0",
            FinanceField::BudgetProposalCurrentYearPlus1 => "budgetProposalCurrentYearPlus1",
            FinanceField::BudgetProposalCurrentYearPlus2 => "budgetProposalCurrentYearPlus2",
            FinanceField::PreliminaryCurrentYearPlus3 => "preliminaryCurrentYearPlus3",
            FinanceField::PreliminaryCurrentYearPlus4 => "preliminaryCurrentYearPlus4",
            FinanceField::PreliminaryCurrentYearPlus5 => "preliminaryCurrentYearPlus5",
            FinanceField::PreliminaryCurrentYearPlus6 => "preliminaryCurrentYearPlus6",
            FinanceField::PreliminaryCurrentYearPlus7 => "preliminaryCurrentYearPlus7",
            FinanceField::PreliminaryCurrentYearPlus8 => "preliminaryCurrentYearPlus8",
            FinanceField::PreliminaryCurrentYearPlus9 => "preliminaryCurrentYearPlus9",
            FinanceField::PreliminaryCurrentYearPlus10 => "preliminaryCurrentYearPlus10",
        }
    }

    /// Resolve a wire name back to its slot
    ///
    /// # Errors
    /// Returns an error when the name is not part of the vocabulary.
    pub fn from_wire_name(name: &str) -> Result<Self, ModelError> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == name)
            .ok_or_else(|| ModelError::UnknownFinanceField(name.to_string()))
    }
}

impl std::fmt::Display for FinanceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl Serialize for FinanceField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for FinanceField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::from_wire_name(&raw).map_err(serde::de::Error::custom)
    }
}

/// The per-project budget ledger: anchor year plus eleven slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LedgerWire", into = "LedgerWire")]
pub struct BudgetLedger {
    /// Anchor year for slot naming
    pub year: i32,
    slots: [Option<String>; FinanceField::COUNT],
}

impl BudgetLedger {
    /// Empty ledger anchored at the given year
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            year,
            slots: Default::default(),
        }
    }

    /// Current value of a slot
    #[inline]
    #[must_use]
    pub fn get(&self, field: FinanceField) -> Option<&str> {
        self.slots[field.offset() as usize].as_deref()
    }

    /// Overwrite a slot
    #[inline]
    pub fn set(&mut self, field: FinanceField, value: Option<String>) {
        self.slots[field.offset() as usize] = value;
    }

    /// All slots in offset order
    pub fn iter(&self) -> impl Iterator<Item = (FinanceField, Option<&str>)> {
        FinanceField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Sum of every slot, missing and garbage values counted as zero
    #[must_use]
    pub fn total(&self) -> f64 {
        self.iter()
            .map(|(_, value)| money::parse_amount_or_zero(value))
            .sum()
    }
}

/// Wire shape of the ledger: anchor year plus one named field per slot
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LedgerWire {
    year: i32,
    #[serde(default)]
    budget_proposal_current_year_plus0: Option<String>,
    #[serde(default)]
    budget_proposal_current_year_plus1: Option<String>,
    #[serde(default)]
    budget_proposal_current_year_plus2: Option<String>,
    #[serde(default)]
    preliminary_current_year_plus3: Option<String>,
    #[serde(default)]
    preliminary_current_year_plus4: Option<String>,
    #[serde(default)]
    preliminary_current_year_plus5: Option<String>,
    #[serde(default)]
    preliminary_current_year_plus6: Option<String>,
    #[serde(default)]
    preliminary_current_year_plus7: Option<String>,
    #[serde(default)]
    preliminary_current_year_plus8: Option<String>,
    #[serde(default)]
    preliminary_current_year_plus9: Option<String>,
    #[serde(default)]
    preliminary_current_year_plus10: Option<String>,
}

impl From<LedgerWire> for BudgetLedger {
    fn from(wire: LedgerWire) -> Self {
        Self {
            year: wire.year,
            slots: [
                wire.budget_proposal_current_year_plus0,
                wire.budget_proposal_current_year_plus1,
                wire.budget_proposal_current_year_plus2,
                wire.preliminary_current_year_plus3,
                wire.preliminary_current_year_plus4,
                wire.preliminary_current_year_plus5,
                wire.preliminary_current_year_plus6,
                wire.preliminary_current_year_plus7,
                wire.preliminary_current_year_plus8,
                wire.preliminary_current_year_plus9,
                wire.preliminary_current_year_plus10,
            ],
        }
    }
}

impl From<BudgetLedger> for LedgerWire {
    fn from(ledger: BudgetLedger) -> Self {
        let [p0, p1, p2, p3, p4, p5, p6, p7, p8, p9, p10] = ledger.slots;
        Self {
            year: ledger.year,
            budget_proposal_current_year_plus0: p0,
            budget_proposal_current_year_plus1: p1,
            budget_proposal_current_year_plus2: p2,
            preliminary_current_year_plus3: p3,
            preliminary_current_year_plus4: p4,
            preliminary_current_year_plus5: p5,
            preliminary_current_year_plus6: p6,
            preliminary_current_year_plus7: p7,
            preliminary_current_year_plus8: p8,
            preliminary_current_year_plus9: p9,
            preliminary_current_year_plus10: p10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_round_trip() {
        for field in FinanceField::ALL {
            assert_eq!(
                FinanceField::from_offset(i64::from(field.offset())),
                Some(field)
            );
        }
    }

    #[test]
    fn out_of_range_offsets_have_no_slot() {
        assert_eq!(FinanceField::from_offset(-1), None);
        assert_eq!(FinanceField::from_offset(11), None);
        assert_eq!(FinanceField::from_offset(i64::MAX), None);
    }

    #[test]
    fn wire_names_round_trip() {
        for field in FinanceField::ALL {
            assert_eq!(FinanceField::from_wire_name(field.wire_name()).ok(), Some(field));
        }
        assert!(FinanceField::from_wire_name("budgetProposalCurrentYearPlus11").is_err());
    }

    #[test]
    fn ledger_get_set_total() {
        let mut ledger = BudgetLedger::new(2025);
        ledger.set(
            FinanceField::BudgetProposalCurrentYearPlus0,
            Some("100.00".to_string()),
        );
        ledger.set(
            FinanceField::PreliminaryCurrentYearPlus3,
            Some("250.00".to_string()),
        );
        assert_eq!(
            ledger.get(FinanceField::BudgetProposalCurrentYearPlus0),
            Some("100.00")
        );
        assert_eq!(ledger.get(FinanceField::BudgetProposalCurrentYearPlus1), None);
        assert!((ledger.total() - 350.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ledger_serde_uses_wire_names() {
        let mut ledger = BudgetLedger::new(2025);
        ledger.set(
            FinanceField::PreliminaryCurrentYearPlus3,
            Some("250.00".to_string()),
        );
        let json = serde_json::to_value(&ledger).unwrap();
        assert_eq!(json["year"], 2025);
        assert_eq!(json["preliminaryCurrentYearPlus3"], "250.00");
        assert!(json["budgetProposalCurrentYearPlus0"].is_null());

        let back: BudgetLedger = serde_json::from_value(json).unwrap();
        assert_eq!(back, ledger);
    }
}
