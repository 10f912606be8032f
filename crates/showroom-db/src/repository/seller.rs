//! # Seller Repository
//!
//! Database operations for the seller registry.
//!
//! ## Rate Changes and History
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update_commission_rate(seller, 3%)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sellers.commission_rate_bps = 300   ← only the registry row changes   │
//! │                                                                         │
//! │  Existing sales keep their snapshotted rate and value untouched;       │
//! │  the new rate applies to FUTURE sales only, because the snapshot is    │
//! │  taken inside create_sale.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use showroom_core::validation::{validate_rate_bps, validate_seller_name};
use showroom_core::Seller;

/// Repository for seller registry operations.
#[derive(Debug, Clone)]
pub struct SellerRepository {
    pool: SqlitePool,
}

impl SellerRepository {
    /// Creates a new SellerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SellerRepository { pool }
    }

    /// Creates a new active seller.
    ///
    /// ## Arguments
    /// * `name` - Display name for leaderboards and payout reports
    /// * `commission_rate_bps` - Starting rate in basis points (300 = 3%)
    /// * `hire_date` - First day on the floor
    pub async fn create_seller(
        &self,
        name: &str,
        commission_rate_bps: u32,
        hire_date: NaiveDate,
    ) -> DbResult<Seller> {
        validate_seller_name(name)?;
        validate_rate_bps(commission_rate_bps)?;

        let now = Utc::now();
        let seller = Seller {
            id: generate_seller_id(),
            name: name.trim().to_string(),
            commission_rate_bps,
            active: true,
            hire_date,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %seller.id, name = %seller.name, "Creating seller");

        sqlx::query(
            r#"
            INSERT INTO sellers (
                id, name, commission_rate_bps, active,
                hire_date, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&seller.id)
        .bind(&seller.name)
        .bind(seller.commission_rate_bps)
        .bind(seller.active)
        .bind(seller.hire_date)
        .bind(seller.created_at)
        .bind(seller.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(seller)
    }

    /// Gets a seller by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Seller>> {
        let seller = sqlx::query_as::<_, Seller>(
            r#"
            SELECT id, name, commission_rate_bps, active,
                   hire_date, created_at, updated_at
            FROM sellers
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seller)
    }

    /// Lists all active sellers, ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<Seller>> {
        let sellers = sqlx::query_as::<_, Seller>(
            r#"
            SELECT id, name, commission_rate_bps, active,
                   hire_date, created_at, updated_at
            FROM sellers
            WHERE active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sellers)
    }

    /// Updates a seller's commission rate.
    ///
    /// Applies to future sales only: existing sale records carry their own
    /// snapshotted rate and are never revisited.
    pub async fn update_commission_rate(&self, id: &str, rate_bps: u32) -> DbResult<()> {
        validate_rate_bps(rate_bps)?;

        debug!(id = %id, rate_bps = %rate_bps, "Updating seller commission rate");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE sellers SET
                commission_rate_bps = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(rate_bps)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Seller", id));
        }

        Ok(())
    }

    /// Sets a seller's active flag.
    ///
    /// Inactive sellers keep their ledger history but drop out of the
    /// ranking; new sales cannot be entered for them.
    pub async fn set_active(&self, id: &str, active: bool) -> DbResult<()> {
        debug!(id = %id, active = %active, "Updating seller active flag");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE sellers SET
                active = ?2,
                updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Seller", id));
        }

        Ok(())
    }
}

/// Helper to generate a new seller ID.
pub fn generate_seller_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn hire_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_seller() {
        let db = test_db().await;
        let repo = db.sellers();

        let created = repo.create_seller("Ana Souza", 300, hire_date()).await.unwrap();
        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Ana Souza");
        assert_eq!(fetched.commission_rate_bps, 300);
        assert!(fetched.active);
        assert_eq!(fetched.hire_date, hire_date());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input() {
        let db = test_db().await;
        let repo = db.sellers();

        assert!(repo.create_seller("", 300, hire_date()).await.is_err());
        assert!(repo.create_seller("Ana", 10_001, hire_date()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_commission_rate() {
        let db = test_db().await;
        let repo = db.sellers();

        let seller = repo.create_seller("Bruno Lima", 200, hire_date()).await.unwrap();
        repo.update_commission_rate(&seller.id, 300).await.unwrap();

        let fetched = repo.get_by_id(&seller.id).await.unwrap().unwrap();
        assert_eq!(fetched.commission_rate_bps, 300);

        // Unknown seller surfaces as NotFound
        let err = repo.update_commission_rate("missing", 300).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_active_removes_from_active_list() {
        let db = test_db().await;
        let repo = db.sellers();

        let a = repo.create_seller("Ana", 300, hire_date()).await.unwrap();
        let b = repo.create_seller("Bruno", 250, hire_date()).await.unwrap();

        repo.set_active(&b.id, false).await.unwrap();

        let active = repo.list_active().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, a.id);
    }
}
