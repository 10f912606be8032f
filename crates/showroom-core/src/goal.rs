//! # Goal Tracker
//!
//! Compares a seller's qualifying sales in a period against the assigned
//! quota and reports progress and achievement per track.
//!
//! ## Two Independent Tracks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SalesGoal (admin-assigned, per seller+month+year)                      │
//! │                                                                         │
//! │  quantity track: goal_quantity > 0     value track: goal_value set      │
//! │       │                                     │                           │
//! │       ▼                                     ▼                           │
//! │  actual_count ≥ goal_quantity?         actual_value ≥ goal_value?       │
//! │       │                                     │                           │
//! │       ▼                                     ▼                           │
//! │  quantity_achieved                     value_achieved                   │
//! │                                                                         │
//! │  A seller may meet one, both, or neither. Only quantity_achieved        │
//! │  feeds bonus eligibility (see the bonus module).                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## "No goal" is not an error
//! `has_goal = false` is a first-class state distinct from 0% progress, so
//! callers can tell "no quota assigned" from "quota not yet met".

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::SalesGoal;

/// A seller's progress against their quota for one period.
///
/// Produced fresh from ledger aggregates on every query; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GoalProgress {
    /// Number of qualifying sales in the period.
    pub actual_count: i64,
    /// Summed final price of those sales.
    pub actual_value: Money,
    /// Progress on the quantity track as a percentage.
    /// `None` when no goal exists or the quantity track is unset.
    pub quantity_pct: Option<f64>,
    /// Progress on the value track as a percentage.
    /// `None` when no goal exists or the value track is unset.
    pub value_pct: Option<f64>,
    /// Whether a SalesGoal row exists for (seller, period).
    pub has_goal: bool,
    /// Quantity track met (`actual_count >= goal_quantity`).
    /// Always false when the quantity track is unset.
    pub quantity_achieved: bool,
    /// Value track met (`actual_value >= goal_value`).
    /// Always false when the value track is unset.
    pub value_achieved: bool,
}

impl GoalProgress {
    /// Evaluates progress from the period's ledger aggregates.
    ///
    /// `goal` is `None` when no quota was assigned for the period - that
    /// is a valid state, not an error (see module docs).
    ///
    /// Percentages are raw ratios; rounding to one decimal happens only in
    /// the display helpers, never here, so downstream math stays exact.
    pub fn evaluate(goal: Option<&SalesGoal>, actual_count: i64, actual_value: Money) -> Self {
        let Some(goal) = goal else {
            return GoalProgress {
                actual_count,
                actual_value,
                quantity_pct: None,
                value_pct: None,
                has_goal: false,
                quantity_achieved: false,
                value_achieved: false,
            };
        };

        let quantity_pct = goal
            .has_quantity_track()
            .then(|| actual_count as f64 / goal.goal_quantity as f64 * 100.0);
        let quantity_achieved = goal.has_quantity_track() && actual_count >= goal.goal_quantity;

        let value_pct = match goal.goal_value_cents {
            Some(target) if target > 0 => {
                Some(actual_value.cents() as f64 / target as f64 * 100.0)
            }
            // A zero value target is trivially met; the ratio is undefined
            Some(_) => None,
            None => None,
        };
        let value_achieved = goal
            .goal_value_cents
            .is_some_and(|target| actual_value.cents() >= target);

        GoalProgress {
            actual_count,
            actual_value,
            quantity_pct,
            value_pct,
            has_goal: true,
            quantity_achieved,
            value_achieved,
        }
    }

    /// Quantity progress rounded to one decimal, for display only.
    pub fn quantity_pct_display(&self) -> Option<f64> {
        self.quantity_pct.map(round_one_decimal)
    }

    /// Value progress rounded to one decimal, for display only.
    pub fn value_pct_display(&self) -> Option<f64> {
        self.value_pct.map(round_one_decimal)
    }
}

fn round_one_decimal(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}

// =============================================================================
// Unit Tests
// =============================================================================
