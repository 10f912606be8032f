//! # showroom-core: Pure Business Logic for Showroom
//!
//! This crate is the **heart** of the Showroom back-office. It contains the
//! commission, quota, and ranking logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Showroom Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Storefront / Back-office (external)                 │   │
//! │  │    Sales entry ──► Seller dashboard ──► Admin payments          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ showroom-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌──────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ commission │  │   goal   │  │  ranking  │  │   │
//! │  │   │  Seller   │  │  snapshot  │  │ progress │  │ leaderbrd │  │   │
//! │  │   │SaleRecord │  │   math     │  │  bonus   │  │  ordering │  │   │
//! │  │   └───────────┘  └────────────┘  └──────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  showroom-db (Database Layer)                   │   │
//! │  │        SQLite sale ledger, repositories, reporting queries      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Seller, SaleRecord, SalesGoal, CommissionRate)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`period`] - Calendar month+year buckets for goals and rankings
//! - [`commission`] - Commission snapshot calculation
//! - [`goal`] - Goal progress and achievement evaluation
//! - [`bonus`] - Bonus eligibility and amount evaluation
//! - [`ranking`] - Deterministic seller leaderboard ordering
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use showroom_core::money::Money;
//! use showroom_core::types::CommissionRate;
//! use showroom_core::commission::compute_commission;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(10_000_000); // $100,000.00
//!
//! // Snapshot the seller's current rate and derive the commission
//! let rate = CommissionRate::try_from_bps(300).unwrap(); // 3.00%
//! let commission = compute_commission(price, rate).unwrap();
//!
//! // $100,000.00 × 3% = $3,000.00
//! assert_eq!(commission.value.cents(), 300_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bonus;
pub mod commission;
pub mod error;
pub mod goal;
pub mod money;
pub mod period;
pub mod ranking;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use showroom_core::Money` instead of
// `use showroom_core::money::Money`

pub use bonus::{evaluate_bonus, BonusOutcome};
pub use commission::{compute_commission, Commission};
pub use error::{CoreError, ValidationError};
pub use goal::GoalProgress;
pub use money::Money;
pub use period::Period;
pub use ranking::{position, rank, RankingEntry};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum commission rate in basis points (10000 bps = 100%)
///
/// ## Business Reason
/// A commission can never exceed the sale price itself. Rates above 100%
/// are always data-entry mistakes and are rejected at the boundary.
pub const MAX_COMMISSION_RATE_BPS: u32 = 10_000;

/// Maximum length of a seller display name
///
/// ## Business Reason
/// Keeps leaderboard and payout reports printable. Generous enough for
/// legal names, tight enough to catch pasted garbage.
pub const MAX_SELLER_NAME_LEN: usize = 120;
