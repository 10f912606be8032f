//! # Validation Module
//!
//! Input validation for the commission engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront / back-office forms (external)                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                        │
//! │  └── Runs before any ledger write                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  ├── CHECK constraints (price > 0, month 1-12)                         │
//! │  ├── UNIQUE constraints (seller+month+year goal)                       │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use showroom_core::validation::{validate_final_price_cents, validate_rate_bps};
//!
//! // Validate inputs before creating a sale
//! validate_final_price_cents(10_000_000).unwrap();
//! validate_rate_bps(300).unwrap();
//! ```

use crate::error::ValidationError;
use crate::{MAX_COMMISSION_RATE_BPS, MAX_SELLER_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale's final price in cents.
///
/// ## Rules
/// - Must be strictly positive (> 0)
/// - A zero-price or negative sale can never carry a commission
///
/// ## Example
/// ```rust
/// use showroom_core::validation::validate_final_price_cents;
///
/// assert!(validate_final_price_cents(10_000_000).is_ok()); // $100,000.00
/// assert!(validate_final_price_cents(0).is_err());
/// assert!(validate_final_price_cents(-100).is_err());
/// ```
pub fn validate_final_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "final_price".to_string(),
        });
    }

    Ok(())
}

/// Validates a commission or bonus rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
/// - Typical seller rates are 100-1000 bps (1% to 10%)
pub fn validate_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_COMMISSION_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: "commission_rate".to_string(),
            min: 0,
            max: MAX_COMMISSION_RATE_BPS as i64,
        });
    }

    Ok(())
}

/// Validates a goal quantity target.
///
/// ## Rules
/// - Must be non-negative; 0 means "no quantity track assigned"
pub fn validate_goal_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "goal_quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a goal value target in cents, when the value track is set.
///
/// ## Rules
/// - Must be non-negative
pub fn validate_goal_value_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "goal_value".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a seller display name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most MAX_SELLER_NAME_LEN characters
pub fn validate_seller_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_SELLER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_SELLER_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a vehicle label on a sale record.
///
/// ## Rules
/// - Must not be empty (the payout report must identify the sale)
/// - Must be at most 200 characters
pub fn validate_vehicle_label(vehicle: &str) -> ValidationResult<()> {
    let vehicle = vehicle.trim();

    if vehicle.is_empty() {
        return Err(ValidationError::Required {
            field: "vehicle".to_string(),
        });
    }

    if vehicle.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "vehicle".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use showroom_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_final_price_cents() {
        assert!(validate_final_price_cents(1).is_ok());
        assert!(validate_final_price_cents(10_000_000).is_ok());

        assert!(validate_final_price_cents(0).is_err());
        assert!(validate_final_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps(0).is_ok());
        assert!(validate_rate_bps(300).is_ok());
        assert!(validate_rate_bps(10_000).is_ok());
        assert!(validate_rate_bps(10_001).is_err());
    }

    #[test]
    fn test_validate_goal_targets() {
        assert!(validate_goal_quantity(0).is_ok());
        assert!(validate_goal_quantity(10).is_ok());
        assert!(validate_goal_quantity(-1).is_err());

        assert!(validate_goal_value_cents(0).is_ok());
        assert!(validate_goal_value_cents(50_000_000).is_ok());
        assert!(validate_goal_value_cents(-1).is_err());
    }

    #[test]
    fn test_validate_seller_name() {
        assert!(validate_seller_name("Ana Souza").is_ok());
        assert!(validate_seller_name("").is_err());
        assert!(validate_seller_name("   ").is_err());
        assert!(validate_seller_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_vehicle_label() {
        assert!(validate_vehicle_label("2022 Honda Civic EX").is_ok());
        assert!(validate_vehicle_label("").is_err());
        assert!(validate_vehicle_label(&"V".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
