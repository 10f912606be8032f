//! # Period Module
//!
//! A `Period` is the calendar month+year bucket used for goal assignment,
//! progress, and ranking. Every sale belongs to exactly one period, derived
//! from its `sale_date`.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use showroom_core::period::Period;
//!
//! let period = Period::new(2026, 5).unwrap();
//! let sale_date = NaiveDate::from_ymd_opt(2026, 5, 17).unwrap();
//!
//! assert_eq!(Period::from_date(sale_date), period);
//! assert_eq!(period.to_string(), "2026-05");
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;

/// Calendar years accepted for goals and reports. Wide enough for any
/// real ledger, narrow enough to catch swapped month/year input.
const MIN_YEAR: i32 = 1970;
const MAX_YEAR: i32 = 9999;

/// A calendar month+year bucket.
///
/// Ordering is chronological (year first, then month), so periods sort
/// naturally in reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Period {
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
}

impl Period {
    /// Creates a period, validating month and year bounds.
    ///
    /// ## Example
    /// ```rust
    /// use showroom_core::period::Period;
    ///
    /// assert!(Period::new(2026, 5).is_ok());
    /// assert!(Period::new(2026, 13).is_err());
    /// assert!(Period::new(26, 5).is_err()); // swapped/two-digit year
    /// ```
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::OutOfRange {
                field: "month".to_string(),
                min: 1,
                max: 12,
            });
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ValidationError::OutOfRange {
                field: "year".to_string(),
                min: MIN_YEAR as i64,
                max: MAX_YEAR as i64,
            });
        }
        Ok(Period { year, month })
    }

    /// Creates a period from components already known to be valid
    /// (e.g. read back from the database, where bounds are enforced).
    #[inline]
    pub const fn new_unchecked(year: i32, month: u32) -> Self {
        Period { year, month }
    }

    /// Derives the period a date belongs to.
    #[inline]
    pub fn from_date(date: NaiveDate) -> Self {
        Period {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The period immediately after this one.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the period.
    pub fn first_day(&self) -> NaiveDate {
        // Month is 1-12 and year is within chrono's range by construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("period holds a valid month and year")
    }

    /// Half-open date range `[first_day, next period's first_day)`.
    ///
    /// Shaped for SQL range filters on `sale_date`: the ledger query
    /// becomes `sale_date >= start AND sale_date < end`, which stays
    /// index-friendly and handles month lengths and leap years for free.
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.first_day(), self.next().first_day())
    }

    /// Whether a date falls inside this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        Period::from_date(date) == *self
    }
}

/// Displays as `YYYY-MM`, matching the report and API convention.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
