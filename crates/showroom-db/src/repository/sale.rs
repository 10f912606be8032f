//! # Sale Repository
//!
//! Database operations for the sale ledger and the commission payment
//! ledger.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create_sale() → SaleRecord { status: Pending }                 │
//! │         • seller's CURRENT rate is snapshotted onto the row            │
//! │         • commission_value is derived and persisted in the same        │
//! │           INSERT - the fields are never written again                  │
//! │                                                                         │
//! │  2. CONFIRM                                                            │
//! │     └── approve_sale() / complete_sale() → qualifying                  │
//! │         (enters goal progress, ranking, pending totals on next read)   │
//! │                                                                         │
//! │  3. (OPTIONAL) CANCEL                                                  │
//! │     └── cancel_sale() → permanently non-qualifying                     │
//! │         (aggregates reflect it on next read - nothing to invalidate)   │
//! │                                                                         │
//! │  4. PAY OUT                                                            │
//! │     └── mark_commission_paid() → guarded compare-and-set               │
//! │         (second attempt fails with Conflict, paid_at untouched)        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::seller::SellerRepository;
use showroom_core::commission::compute_commission;
use showroom_core::validation::{validate_final_price_cents, validate_vehicle_label};
use showroom_core::{CoreError, Money, SaleRecord, SaleStatus};

/// Columns selected for a full SaleRecord row.
const SALE_COLUMNS: &str = r#"
    id, seller_id, vehicle, final_price_cents, status, sale_date,
    commission_rate_applied_bps, commission_value_cents,
    commission_paid, commission_paid_at, notes, created_at, updated_at
"#;

/// Repository for sale ledger operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Creates a new sale record with its commission snapshot.
    ///
    /// ## Snapshot Pattern
    /// The seller's current rate is read here, once, and both
    /// `commission_rate_applied` and `commission_value` are persisted in
    /// the same INSERT as the rest of the row. No code path ever writes
    /// these fields again, so later rate changes cannot leak into history.
    ///
    /// ## Errors
    /// - `Validation` for non-positive price or empty vehicle label
    /// - `NotFound` for an unknown seller
    /// - `InvalidState` for an inactive seller
    pub async fn create_sale(
        &self,
        seller_id: &str,
        vehicle: &str,
        final_price_cents: i64,
        sale_date: NaiveDate,
        notes: Option<&str>,
    ) -> DbResult<SaleRecord> {
        validate_final_price_cents(final_price_cents)?;
        validate_vehicle_label(vehicle)?;

        let seller = SellerRepository::new(self.pool.clone())
            .get_by_id(seller_id)
            .await?
            .ok_or_else(|| DbError::not_found("Seller", seller_id))?;

        if !seller.active {
            return Err(DbError::invalid_state("Seller", seller_id, "inactive"));
        }

        let commission =
            compute_commission(Money::from_cents(final_price_cents), seller.commission_rate())
                .map_err(|e| match e {
                    CoreError::Validation(v) => DbError::Validation(v),
                    other => DbError::Internal(other.to_string()),
                })?;

        let now = Utc::now();
        let sale = SaleRecord {
            id: generate_sale_id(),
            seller_id: seller.id,
            vehicle: vehicle.trim().to_string(),
            final_price_cents,
            status: SaleStatus::Pending,
            sale_date,
            commission_rate_applied_bps: commission.rate_applied.bps(),
            commission_value_cents: commission.value.cents(),
            commission_paid: false,
            commission_paid_at: None,
            notes: notes.map(|n| n.to_string()),
            created_at: now,
            updated_at: now,
        };

        debug!(
            id = %sale.id,
            seller_id = %sale.seller_id,
            commission = %commission.value,
            "Creating sale"
        );

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, seller_id, vehicle, final_price_cents, status, sale_date,
                commission_rate_applied_bps, commission_value_cents,
                commission_paid, commission_paid_at, notes,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8,
                ?9, ?10, ?11,
                ?12, ?13
            )
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.seller_id)
        .bind(&sale.vehicle)
        .bind(sale.final_price_cents)
        .bind(sale.status)
        .bind(sale.sale_date)
        .bind(sale.commission_rate_applied_bps)
        .bind(sale.commission_value_cents)
        .bind(sale.commission_paid)
        .bind(sale.commission_paid_at)
        .bind(&sale.notes)
        .bind(sale.created_at)
        .bind(sale.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets a sale by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<SaleRecord>> {
        let sale = sqlx::query_as::<_, SaleRecord>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Approves a pending sale, making it qualifying.
    pub async fn approve_sale(&self, sale_id: &str) -> DbResult<()> {
        debug!(id = %sale_id, "Approving sale");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                status = 'approved',
                updated_at = ?2
            WHERE id = ?1 AND status = 'pending'
            "#,
        )
        .bind(sale_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.transition_failure(sale_id).await);
        }

        Ok(())
    }

    /// Completes a sale (delivery done). Pending sales may complete
    /// directly; the sale is (or stays) qualifying.
    pub async fn complete_sale(&self, sale_id: &str) -> DbResult<()> {
        debug!(id = %sale_id, "Completing sale");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                status = 'completed',
                updated_at = ?2
            WHERE id = ?1 AND status IN ('pending', 'approved')
            "#,
        )
        .bind(sale_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.transition_failure(sale_id).await);
        }

        Ok(())
    }

    /// Cancels a sale, permanently excluding it from all aggregates.
    ///
    /// No rollback of stored aggregates is needed: nothing is materialized,
    /// so the next goal-progress/ranking/pending query simply no longer
    /// sees the row.
    pub async fn cancel_sale(&self, sale_id: &str) -> DbResult<()> {
        debug!(id = %sale_id, "Cancelling sale");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                status = 'cancelled',
                updated_at = ?2
            WHERE id = ?1 AND status IN ('pending', 'approved', 'completed')
            "#,
        )
        .bind(sale_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.transition_failure(sale_id).await);
        }

        Ok(())
    }

    /// Marks a sale's commission as paid out.
    ///
    /// ## Compare-and-Set
    /// The UPDATE is guarded on `commission_paid = 0` (and a qualifying
    /// status), so under concurrent admin action exactly one caller wins;
    /// the loser gets `Conflict` and `commission_paid_at` stays untouched.
    /// The flag is one-way - there is no unpay operation.
    pub async fn mark_commission_paid(&self, sale_id: &str) -> DbResult<()> {
        debug!(id = %sale_id, "Marking commission paid");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE sales SET
                commission_paid = 1,
                commission_paid_at = ?2,
                updated_at = ?2
            WHERE id = ?1
              AND commission_paid = 0
              AND status IN ('approved', 'completed')
            "#,
        )
        .bind(sale_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Lost the CAS or targeted a bad sale; disambiguate for the caller
            return Err(match self.get_by_id(sale_id).await? {
                None => DbError::not_found("Sale", sale_id),
                Some(sale) if sale.commission_paid => {
                    DbError::conflict("Sale", sale_id, "commission already paid")
                }
                Some(sale) => DbError::invalid_state("Sale", sale_id, sale.status.as_str()),
            });
        }

        Ok(())
    }

    /// Sum of unpaid commissions over qualifying sales for a seller.
    ///
    /// Recomputed from the ledger on every call - a cancellation or payout
    /// is reflected by the very next invocation.
    pub async fn pending_commissions_total(&self, seller_id: &str) -> DbResult<Money> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(commission_value_cents), 0)
            FROM sales
            WHERE seller_id = ?1
              AND status IN ('approved', 'completed')
              AND commission_paid = 0
            "#,
        )
        .bind(seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Money::from_cents(total))
    }

    /// Builds the error for a status transition whose guarded UPDATE
    /// matched no rows: either the sale is missing or its current status
    /// forbids the move.
    async fn transition_failure(&self, sale_id: &str) -> DbError {
        match self.get_by_id(sale_id).await {
            Ok(None) => DbError::not_found("Sale", sale_id),
            Ok(Some(sale)) => DbError::invalid_state("Sale", sale_id, sale.status.as_str()),
            Err(e) => e,
        }
    }
}

/// Helper to generate a new sale ID.
pub fn generate_sale_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use showroom_core::Seller;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seller_with_rate(db: &Database, name: &str, rate_bps: u32) -> Seller {
        db.sellers()
            .create_seller(name, rate_bps, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            .await
            .unwrap()
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
    }

    #[tokio::test]
    async fn test_create_sale_snapshots_commission() {
        let db = test_db().await;
        let seller = seller_with_rate(&db, "Ana", 300).await;

        let sale = db
            .sales()
            .create_sale(&seller.id, "2022 Honda Civic EX", 10_000_000, may(10), None)
            .await
            .unwrap();

        assert_eq!(sale.status, SaleStatus::Pending);
        assert_eq!(sale.commission_rate_applied_bps, 300);
        assert_eq!(sale.commission_value_cents, 300_000); // 3% of $100,000.00
        assert!(!sale.commission_paid);
        assert!(sale.commission_paid_at.is_none());

        // Round-trips through the ledger unchanged
        let fetched = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.commission_value_cents, 300_000);
        assert_eq!(fetched.status, SaleStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_sale_rejects_bad_input() {
        let db = test_db().await;
        let seller = seller_with_rate(&db, "Ana", 300).await;

        let err = db
            .sales()
            .create_sale(&seller.id, "Car", 0, may(10), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = db
            .sales()
            .create_sale(&seller.id, "", 100, may(10), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let err = db
            .sales()
            .create_sale("missing", "Car", 100, may(10), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_sale_rejects_inactive_seller() {
        let db = test_db().await;
        let seller = seller_with_rate(&db, "Ana", 300).await;
        db.sellers().set_active(&seller.id, false).await.unwrap();

        let err = db
            .sales()
            .create_sale(&seller.id, "Car", 100, may(10), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn test_rate_change_never_touches_existing_sales() {
        let db = test_db().await;
        let seller = seller_with_rate(&db, "Zed", 200).await;

        // Sale entered at 2%, commission computed at 2%
        let old_sale = db
            .sales()
            .create_sale(&seller.id, "2021 Fiat Argo", 10_000_000, may(3), None)
            .await
            .unwrap();
        db.sales().complete_sale(&old_sale.id).await.unwrap();
        assert_eq!(old_sale.commission_value_cents, 200_000);

        // Rate goes to 3% afterwards
        db.sellers()
            .update_commission_rate(&seller.id, 300)
            .await
            .unwrap();

        // Stored snapshot is untouched...
        let fetched = db.sales().get_by_id(&old_sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.commission_rate_applied_bps, 200);
        assert_eq!(fetched.commission_value_cents, 200_000);

        // ...while a new sale picks up the new rate
        let new_sale = db
            .sales()
            .create_sale(&seller.id, "2023 Jeep Renegade", 10_000_000, may(20), None)
            .await
            .unwrap();
        assert_eq!(new_sale.commission_rate_applied_bps, 300);
        assert_eq!(new_sale.commission_value_cents, 300_000);
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let db = test_db().await;
        let seller = seller_with_rate(&db, "Ana", 300).await;
        let sale = db
            .sales()
            .create_sale(&seller.id, "Car", 5_000_000, may(10), None)
            .await
            .unwrap();

        db.sales().approve_sale(&sale.id).await.unwrap();
        db.sales().complete_sale(&sale.id).await.unwrap();
        db.sales().cancel_sale(&sale.id).await.unwrap();

        let fetched = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, SaleStatus::Cancelled);

        // Cancelled is terminal: no further transitions
        let err = db.sales().approve_sale(&sale.id).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidState { .. }));
        let err = db.sales().complete_sale(&sale.id).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidState { .. }));

        // Unknown sale surfaces as NotFound
        let err = db.sales().approve_sale("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_mark_paid_is_non_reentrant() {
        let db = test_db().await;
        let seller = seller_with_rate(&db, "Ana", 300).await;
        let sale = db
            .sales()
            .create_sale(&seller.id, "Car", 5_000_000, may(10), None)
            .await
            .unwrap();
        db.sales().approve_sale(&sale.id).await.unwrap();

        db.sales().mark_commission_paid(&sale.id).await.unwrap();

        let paid = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert!(paid.commission_paid);
        let first_paid_at = paid.commission_paid_at.unwrap();

        // Second attempt loses the CAS and changes nothing
        let err = db.sales().mark_commission_paid(&sale.id).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        let still_paid = db.sales().get_by_id(&sale.id).await.unwrap().unwrap();
        assert_eq!(still_paid.commission_paid_at.unwrap(), first_paid_at);
    }

    #[tokio::test]
    async fn test_mark_paid_requires_qualifying_status() {
        let db = test_db().await;
        let seller = seller_with_rate(&db, "Ana", 300).await;
        let sale = db
            .sales()
            .create_sale(&seller.id, "Car", 5_000_000, may(10), None)
            .await
            .unwrap();

        // Still pending: not payable
        let err = db.sales().mark_commission_paid(&sale.id).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidState { .. }));

        let err = db.sales().mark_commission_paid("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_pending_commissions_total() {
        let db = test_db().await;
        let seller = seller_with_rate(&db, "Ana", 300).await;
        let sales = db.sales();

        // Two qualifying sales: 3,000.00 + 1,500.00 pending
        let a = sales
            .create_sale(&seller.id, "Car A", 10_000_000, may(5), None)
            .await
            .unwrap();
        let b = sales
            .create_sale(&seller.id, "Car B", 5_000_000, may(6), None)
            .await
            .unwrap();
        sales.approve_sale(&a.id).await.unwrap();
        sales.complete_sale(&b.id).await.unwrap();

        // One pending sale that must not count
        sales
            .create_sale(&seller.id, "Car C", 20_000_000, may(7), None)
            .await
            .unwrap();

        let total = sales.pending_commissions_total(&seller.id).await.unwrap();
        assert_eq!(total.cents(), 450_000);

        // Paying one immediately drops it from the next read
        sales.mark_commission_paid(&a.id).await.unwrap();
        let total = sales.pending_commissions_total(&seller.id).await.unwrap();
        assert_eq!(total.cents(), 150_000);

        // Cancelling the other removes it as well - no stale aggregate
        sales.cancel_sale(&b.id).await.unwrap();
        let total = sales.pending_commissions_total(&seller.id).await.unwrap();
        assert_eq!(total.cents(), 0);
    }
}
