//! # Domain Types
//!
//! Core domain types for the commission and quota engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Seller      │   │   SaleRecord    │   │   SalesGoal     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  rate (bps)     │   │  status         │   │  month, year    │       │
//! │  │  active         │   │  price_cents    │   │  goal_quantity  │       │
//! │  │  hire_date      │   │  rate snapshot  │   │  goal_value     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ CommissionRate  │   │   SaleStatus    │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  Pending        │                             │
//! │  │  300 = 3.00%    │   │  Approved       │                             │
//! │  └─────────────────┘   │  Completed      │                             │
//! │                        │  Cancelled      │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Invariant
//! `SaleRecord.commission_rate_applied_bps` and `commission_value_cents` are
//! written exactly once, at sale creation, from the seller's rate *at that
//! moment*. A later rate change on the seller never touches existing sales.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::period::Period;
use crate::MAX_COMMISSION_RATE_BPS;

// =============================================================================
// Commission Rate
// =============================================================================

/// Commission (or bonus) rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 300 bps = 3.00% (a typical dealership seller rate)
///
/// Integer bps keep the rate exact through arithmetic; the percentage form
/// exists only for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionRate(u32);

impl CommissionRate {
    /// Creates a rate from basis points without bounds checking.
    ///
    /// For values already validated at the boundary (e.g. read back from
    /// the database). Use [`CommissionRate::try_from_bps`] for user input.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CommissionRate(bps)
    }

    /// Creates a rate from basis points, rejecting values above 100%.
    ///
    /// ## Example
    /// ```rust
    /// use showroom_core::types::CommissionRate;
    ///
    /// assert!(CommissionRate::try_from_bps(300).is_ok());   // 3.00%
    /// assert!(CommissionRate::try_from_bps(10_001).is_err()); // > 100%
    /// ```
    pub fn try_from_bps(bps: u32) -> Result<Self, ValidationError> {
        if bps > MAX_COMMISSION_RATE_BPS {
            return Err(ValidationError::OutOfRange {
                field: "commission_rate".to_string(),
                min: 0,
                max: MAX_COMMISSION_RATE_BPS as i64,
            });
        }
        Ok(CommissionRate(bps))
    }

    /// Creates a rate from a percentage, rejecting values outside [0, 100].
    ///
    /// Convenience for admin input ("3" meaning 3%). Fractional percentages
    /// are kept to bps precision (2.5 → 250 bps).
    pub fn try_from_percentage(pct: f64) -> Result<Self, ValidationError> {
        if !pct.is_finite() || pct < 0.0 || pct > 100.0 {
            return Err(ValidationError::OutOfRange {
                field: "commission_rate".to_string(),
                min: 0,
                max: 100,
            });
        }
        Ok(CommissionRate((pct * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        CommissionRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for CommissionRate {
    fn default() -> Self {
        CommissionRate::zero()
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale record in the ledger.
///
/// ## Lifecycle
/// ```text
/// pending ──► approved ──► completed ──► cancelled
///    │            │            ▲             ▲
///    │            └────────────┼─────────────┤
///    └─────────────────────────┴─────────────┘
/// ```
/// Only `approved` and `completed` sales are **qualifying**: they count
/// toward commission totals, goal progress, and ranking. `cancelled` is
/// terminal and permanently non-qualifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Sale was entered but not yet confirmed by the back-office.
    Pending,
    /// Sale confirmed; counts toward commissions, goals, and ranking.
    Approved,
    /// Sale fully concluded (delivery done); still qualifying.
    Completed,
    /// Sale fell through; permanently excluded from all aggregates.
    Cancelled,
}

impl SaleStatus {
    /// Whether a sale in this status contributes to commission totals,
    /// goal progress, and ranking.
    #[inline]
    pub const fn is_qualifying(&self) -> bool {
        matches!(self, SaleStatus::Approved | SaleStatus::Completed)
    }

    /// Whether this status admits no further transitions.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, SaleStatus::Cancelled)
    }

    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// Transitions only move forward; `cancelled` is a dead end and a sale
    /// never re-enters a previous status.
    pub const fn can_transition_to(&self, next: SaleStatus) -> bool {
        match (self, next) {
            (SaleStatus::Pending, SaleStatus::Approved)
            | (SaleStatus::Pending, SaleStatus::Completed)
            | (SaleStatus::Pending, SaleStatus::Cancelled)
            | (SaleStatus::Approved, SaleStatus::Completed)
            | (SaleStatus::Approved, SaleStatus::Cancelled)
            | (SaleStatus::Completed, SaleStatus::Cancelled) => true,
            _ => false,
        }
    }

    /// Stable lowercase name, matching both the serde and column encodings.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Pending => "pending",
            SaleStatus::Approved => "approved",
            SaleStatus::Completed => "completed",
            SaleStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Pending
    }
}

// =============================================================================
// Seller
// =============================================================================

/// A seller on the dealership floor.
///
/// The `commission_rate_bps` field is the seller's *current* rate: it is
/// consulted once per sale, at creation, and snapshotted onto the record.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Seller {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on leaderboards and payout reports.
    pub name: String,

    /// Current commission rate in basis points (300 = 3.00%).
    pub commission_rate_bps: u32,

    /// Whether the seller is active (inactive sellers keep their history
    /// but leave the ranking).
    pub active: bool,

    /// First day on the floor.
    #[ts(as = "String")]
    pub hire_date: NaiveDate,

    /// When the seller record was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the seller record was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Seller {
    /// Returns the seller's current commission rate.
    #[inline]
    pub fn commission_rate(&self) -> CommissionRate {
        CommissionRate::from_bps(self.commission_rate_bps)
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// A finalized sale entry in the ledger.
///
/// ## Snapshot Pattern
/// `commission_rate_applied_bps` and `commission_value_cents` are frozen at
/// creation time from the seller's rate of that moment. Historical payouts
/// are therefore immune to later rate changes.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleRecord {
    pub id: String,
    pub seller_id: String,
    /// Free-text label for the vehicle sold ("2022 Honda Civic EX").
    pub vehicle: String,
    /// Negotiated final price in cents. Always > 0.
    pub final_price_cents: i64,
    pub status: SaleStatus,
    /// Date of the sale; determines the goal/ranking period.
    #[ts(as = "String")]
    pub sale_date: NaiveDate,
    /// Rate snapshotted at creation (bps). Never updated.
    pub commission_rate_applied_bps: u32,
    /// Commission derived at creation, rounded once. Never updated.
    pub commission_value_cents: i64,
    /// One-way paid flag, flipped by the payment ledger only.
    pub commission_paid: bool,
    #[ts(as = "Option<String>")]
    pub commission_paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Returns the final price as Money.
    #[inline]
    pub fn final_price(&self) -> Money {
        Money::from_cents(self.final_price_cents)
    }

    /// Returns the snapshotted commission rate.
    #[inline]
    pub fn commission_rate_applied(&self) -> CommissionRate {
        CommissionRate::from_bps(self.commission_rate_applied_bps)
    }

    /// Returns the snapshotted commission value as Money.
    #[inline]
    pub fn commission_value(&self) -> Money {
        Money::from_cents(self.commission_value_cents)
    }

    /// The calendar period this sale belongs to (from `sale_date`).
    #[inline]
    pub fn period(&self) -> Period {
        Period::from_date(self.sale_date)
    }

    /// Whether this sale counts toward aggregates.
    #[inline]
    pub fn is_qualifying(&self) -> bool {
        self.status.is_qualifying()
    }
}

// =============================================================================
// Sales Goal
// =============================================================================

/// A seller's assigned quota for one calendar month.
///
/// Unique per (seller_id, month, year). Quantity and value are independent
/// tracks: either, both, or neither may be set. `goal_quantity = 0` means
/// the quantity track is unset, mirroring `goal_value_cents = NULL` for the
/// value track.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SalesGoal {
    pub id: String,
    pub seller_id: String,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Target number of qualifying sales (0 = no quantity track).
    pub goal_quantity: i64,
    /// Target summed final price in cents (None = no value track).
    pub goal_value_cents: Option<i64>,
    /// Bonus rate in bps applied to period commissions when the quantity
    /// goal is met.
    pub bonus_percentage_bps: u32,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl SalesGoal {
    /// The period this goal targets.
    #[inline]
    pub fn period(&self) -> Period {
        Period::new_unchecked(self.year, self.month)
    }

    /// Returns the value target as Money, if the value track is set.
    #[inline]
    pub fn goal_value(&self) -> Option<Money> {
        self.goal_value_cents.map(Money::from_cents)
    }

    /// Returns the bonus rate.
    #[inline]
    pub fn bonus_percentage(&self) -> CommissionRate {
        CommissionRate::from_bps(self.bonus_percentage_bps)
    }

    /// Whether a quantity target is assigned.
    #[inline]
    pub fn has_quantity_track(&self) -> bool {
        self.goal_quantity > 0
    }

    /// Whether a value target is assigned.
    #[inline]
    pub fn has_value_track(&self) -> bool {
        self.goal_value_cents.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps_bounds() {
        assert_eq!(CommissionRate::try_from_bps(300).unwrap().bps(), 300);
        assert_eq!(CommissionRate::try_from_bps(10_000).unwrap().bps(), 10_000);
        assert!(CommissionRate::try_from_bps(10_001).is_err());
    }

    #[test]
    fn test_rate_from_percentage() {
        assert_eq!(CommissionRate::try_from_percentage(3.0).unwrap().bps(), 300);
        assert_eq!(CommissionRate::try_from_percentage(2.5).unwrap().bps(), 250);
        assert!(CommissionRate::try_from_percentage(-0.1).is_err());
        assert!(CommissionRate::try_from_percentage(100.5).is_err());
        assert!(CommissionRate::try_from_percentage(f64::NAN).is_err());
    }

    #[test]
    fn test_rate_percentage_display() {
        let rate = CommissionRate::from_bps(325);
        assert!((rate.percentage() - 3.25).abs() < 1e-9);
    }

    #[test]
    fn test_status_qualifying() {
        assert!(!SaleStatus::Pending.is_qualifying());
        assert!(SaleStatus::Approved.is_qualifying());
        assert!(SaleStatus::Completed.is_qualifying());
        assert!(!SaleStatus::Cancelled.is_qualifying());
    }

    #[test]
    fn test_status_transitions() {
        use SaleStatus::*;

        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Approved.can_transition_to(Completed));
        assert!(Approved.can_transition_to(Cancelled));
        assert!(Completed.can_transition_to(Cancelled));

        // No backwards or self transitions
        assert!(!Approved.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Approved));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Approved));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_status_serde_wire_format() {
        // The wire format is snake_case and must stay stable for consumers
        assert_eq!(
            serde_json::to_string(&SaleStatus::Approved).unwrap(),
            "\"approved\""
        );
        let parsed: SaleStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, SaleStatus::Cancelled);
    }

    #[test]
    fn test_goal_tracks() {
        let now = Utc::now();
        let goal = SalesGoal {
            id: "g1".to_string(),
            seller_id: "s1".to_string(),
            month: 5,
            year: 2026,
            goal_quantity: 2,
            goal_value_cents: None,
            bonus_percentage_bps: 1000,
            created_at: now,
            updated_at: now,
        };

        assert!(goal.has_quantity_track());
        assert!(!goal.has_value_track());
        assert_eq!(goal.period().to_string(), "2026-05");
        assert_eq!(goal.bonus_percentage().bps(), 1000);
    }
}
