//! # Error Types
//!
//! Domain-specific error types for showroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  showroom-core errors (this file)                                       │
//! │  ├── CoreError        - Domain rule violations                          │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  showroom-db errors (separate crate)                                    │
//! │  └── DbError          - Ledger/storage failures (incl. Conflict)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → API boundary             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (seller id, sale id, field)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to an actionable user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic
/// failures. They should be caught and translated to user-friendly
/// messages at the API boundary.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Seller cannot be found.
    #[error("Seller not found: {0}")]
    SellerNotFound(String),

    /// Sale cannot be found in the ledger.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// Seller exists but is no longer active.
    ///
    /// ## When This Occurs
    /// - Entering a new sale for a seller who has left the floor
    #[error("Seller {0} is inactive")]
    SellerInactive(String),

    /// Sale is not in a status that allows the requested transition.
    ///
    /// ## When This Occurs
    /// - Approving an already-cancelled sale
    /// - Any backwards move in the pending → approved/completed →
    ///   cancelled lifecycle
    #[error("Sale {sale_id} is {current_status}, cannot transition to {requested_status}")]
    InvalidStatusTransition {
        sale_id: String,
        current_status: String,
        requested_status: String,
    },

    /// Commission was already paid out for this sale.
    ///
    /// ## When This Occurs
    /// - Two admin operators race on the same payout; exactly one wins
    #[error("Commission for sale {0} is already paid")]
    CommissionAlreadyPaid(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs; messages name
/// the offending field so callers can surface them directly.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidStatusTransition {
            sale_id: "sale-1".to_string(),
            current_status: "cancelled".to_string(),
            requested_status: "approved".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Sale sale-1 is cancelled, cannot transition to approved"
        );

        let err = CoreError::CommissionAlreadyPaid("sale-2".to_string());
        assert_eq!(err.to_string(), "Commission for sale sale-2 is already paid");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "final_price".to_string(),
        };
        assert_eq!(err.to_string(), "final_price must be positive");

        let err = ValidationError::OutOfRange {
            field: "commission_rate".to_string(),
            min: 0,
            max: 10_000,
        };
        assert_eq!(
            err.to_string(),
            "commission_rate must be between 0 and 10000"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "seller_id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
