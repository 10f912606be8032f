//! # Commission Calculator
//!
//! Derives the commission snapshot for a sale at creation time.
//!
//! ## Snapshot Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale entry (external)                                                  │
//! │       │  final_price, seller                                            │
//! │       ▼                                                                 │
//! │  compute_commission(price, seller's CURRENT rate)  ← THIS MODULE        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Commission { rate_applied, value }                                     │
//! │       │  persisted atomically with the sale insert                      │
//! │       ▼                                                                 │
//! │  Never called again for the same sale.                                  │
//! │  Later seller-rate changes affect FUTURE sales only.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The computation is a pure function of its two inputs, so re-running it
//! against the *stored* `commission_rate_applied` always reproduces the
//! stored `commission_value` - the audit property the ledger relies on.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::CommissionRate;
use crate::validation::{validate_final_price_cents, validate_rate_bps};

/// The commission snapshot persisted onto a new sale record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Commission {
    /// The rate that was applied (frozen onto the sale).
    pub rate_applied: CommissionRate,
    /// The derived commission, rounded half-up to whole cents exactly once.
    pub value: Money,
}

/// Computes the commission snapshot for a sale draft.
///
/// ## Errors
/// - [`ValidationError::MustBePositive`](crate::error::ValidationError) if
///   `final_price` is zero or negative
/// - [`ValidationError::OutOfRange`](crate::error::ValidationError) if the
///   rate exceeds 100% (possible via `CommissionRate::from_bps`, which
///   trusts its caller)
///
/// ## Guarantee
/// Idempotent given the same inputs. Recomputation from the stored
/// `rate_applied` (not the seller's live rate) always yields the stored
/// `value`, so historical commissions are immune to later rate changes.
///
/// ## Example
/// ```rust
/// use showroom_core::commission::compute_commission;
/// use showroom_core::money::Money;
/// use showroom_core::types::CommissionRate;
///
/// let rate = CommissionRate::try_from_bps(300).unwrap(); // 3.00%
/// let commission = compute_commission(Money::from_cents(10_000_000), rate).unwrap();
/// assert_eq!(commission.value.cents(), 300_000); // $3,000.00
/// ```
pub fn compute_commission(final_price: Money, rate: CommissionRate) -> CoreResult<Commission> {
    validate_final_price_cents(final_price.cents())?;
    validate_rate_bps(rate.bps())?;

    Ok(Commission {
        rate_applied: rate,
        value: final_price.apply_rate(rate),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
