//! # Bonus Evaluator
//!
//! Determines bonus eligibility and amount from goal achievement and the
//! period's earned commissions.
//!
//! ## Eligibility Rule
//! Only the **quantity** goal gates the bonus: that is the assigned-quota
//! model. Meeting the value goal alone never triggers a bonus.
//!
//! ## Provisional by Design
//! Evaluation is live: it may report eligibility mid-period, before the
//! period closes. The result is informational - a dashboard figure, not a
//! payment trigger. Actual payout always flows through the commission
//! payment ledger (`mark_commission_paid` in showroom-db).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::goal::GoalProgress;
use crate::money::Money;
use crate::types::CommissionRate;

/// Result of a bonus evaluation for one seller and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BonusOutcome {
    /// True iff the quantity goal is achieved.
    pub eligible: bool,
    /// `commissions_earned × bonus_percentage` when eligible, else zero.
    pub amount: Money,
}

/// Evaluates the bonus for a seller's period.
///
/// ## Inputs
/// - `progress` - the Goal Tracker's achievement flags for the period
/// - `bonus_rate` - the goal's `bonus_percentage`
/// - `commissions_earned` - sum of `commission_value` over the period's
///   qualifying sales (already rounded per sale; not re-rounded here)
///
/// ## Example
/// ```rust
/// use showroom_core::bonus::evaluate_bonus;
/// use showroom_core::goal::GoalProgress;
/// use showroom_core::money::Money;
/// use showroom_core::types::CommissionRate;
///
/// # let progress = GoalProgress {
/// #     actual_count: 2,
/// #     actual_value: Money::from_cents(15_000_000),
/// #     quantity_pct: Some(100.0),
/// #     value_pct: None,
/// #     has_goal: true,
/// #     quantity_achieved: true,
/// #     value_achieved: false,
/// # };
/// let rate = CommissionRate::try_from_bps(1000).unwrap(); // 10%
/// let outcome = evaluate_bonus(&progress, rate, Money::from_cents(450_000));
///
/// assert!(outcome.eligible);
/// assert_eq!(outcome.amount.cents(), 45_000); // $450.00
/// ```
pub fn evaluate_bonus(
    progress: &GoalProgress,
    bonus_rate: CommissionRate,
    commissions_earned: Money,
) -> BonusOutcome {
    let eligible = progress.quantity_achieved;

    BonusOutcome {
        eligible,
        amount: if eligible {
            commissions_earned.apply_rate(bonus_rate)
        } else {
            Money::zero()
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
