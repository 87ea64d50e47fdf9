//! Wire-format dates
//!
//! Provides [`PlainDate`], a strongly-typed wrapper over [`chrono::NaiveDate`]
//! that parses and renders the `dd.mm.yyyy` form used by the patch boundary.
//! Year arithmetic keeps day and month fixed; 29.02 clamps to 28.02 when the
//! target year is not a leap year.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::ModelError;

const WIRE_FORMAT: &str = "%d.%m.%Y";

/// A calendar date in the `dd.mm.yyyy` wire format
///
/// Immutable and cheap to clone (Copy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainDate(NaiveDate);

impl PlainDate {
    /// Create a date from calendar components
    ///
    /// # Errors
    /// Returns an error if the components do not form a real date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ModelError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ModelError::InvalidDate {
                value: format!("{day:02}.{month:02}.{year:04}"),
            })
    }

    /// First of January of the given year
    #[inline]
    #[must_use]
    pub fn first_of(year: i32) -> Self {
        // 01.01 exists in every year
        Self(NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default())
    }

    /// Thirty-first of December of the given year
    #[inline]
    #[must_use]
    pub fn last_of(year: i32) -> Self {
        Self(NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or_default())
    }

    /// Calendar year of this date
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Same day and month in a different year
    ///
    /// 29.02 clamps to 28.02 when the target year is not a leap year.
    #[must_use]
    pub fn with_year(&self, year: i32) -> Self {
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, self.0.month(), 28))
            .map_or(*self, Self)
    }

    /// Shift by whole years, keeping day and month
    #[inline]
    #[must_use]
    pub fn plus_years(&self, years: i32) -> Self {
        self.with_year(self.0.year() + years)
    }
}

impl Display for PlainDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(WIRE_FORMAT))
    }
}

impl FromStr for PlainDate {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), WIRE_FORMAT)
            .map(Self)
            .map_err(|_| ModelError::InvalidDate {
                value: s.to_string(),
            })
    }
}

impl serde::Serialize for PlainDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for PlainDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
