//! # Reporting Repository
//!
//! The read-only query surface of the commission engine.
//!
//! ## No Materialized Aggregates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every method below is a pure query over the sale ledger:               │
//! │                                                                         │
//! │    SQL aggregate (COUNT/SUM over qualifying sales)                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    showroom-core evaluation (GoalProgress, BonusOutcome, rank)          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    Fixed, typed result shape                                            │
//! │                                                                         │
//! │  Nothing is cached or stored, so a status transition (say,              │
//! │  approved → cancelled) is reflected by the very next call with no       │
//! │  invalidation step. Two calls over the same ledger snapshot always      │
//! │  return identical results.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::seller::SellerRepository;
use showroom_core::{
    evaluate_bonus, rank, BonusOutcome, GoalProgress, Money, Period, RankingEntry, SalesGoal,
    Seller,
};

// =============================================================================
// Result Shapes
// =============================================================================

/// A seller's commission totals for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionSummary {
    pub seller_id: String,
    pub period: Period,
    /// Number of qualifying sales in the period.
    pub sale_count: i64,
    /// Summed final price of those sales, in cents.
    pub total_sales_cents: i64,
    /// Summed per-sale commission values (each rounded once at creation;
    /// the sum is never re-rounded).
    pub commissions_earned_cents: i64,
    /// Portion of earned commissions already paid out.
    pub commissions_paid_cents: i64,
    /// Portion still awaiting payout.
    pub commissions_pending_cents: i64,
}

impl CommissionSummary {
    /// Summed sale value as Money.
    #[inline]
    pub fn total_sales(&self) -> Money {
        Money::from_cents(self.total_sales_cents)
    }

    /// Earned commissions as Money.
    #[inline]
    pub fn commissions_earned(&self) -> Money {
        Money::from_cents(self.commissions_earned_cents)
    }
}

/// A seller's unpaid commissions across all periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCommissions {
    pub seller_id: String,
    /// Number of qualifying, unpaid sales.
    pub sale_count: i64,
    /// Summed unpaid commission value, in cents.
    pub total_cents: i64,
}

impl PendingCommissions {
    /// Unpaid total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Read-only query surface over the sale ledger.
#[derive(Debug, Clone)]
pub struct ReportingRepository {
    pool: SqlitePool,
}

impl ReportingRepository {
    /// Creates a new ReportingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportingRepository { pool }
    }

    /// Commission totals for a seller's period.
    pub async fn commission_summary(
        &self,
        seller_id: &str,
        period: Period,
    ) -> DbResult<CommissionSummary> {
        self.seller_or_not_found(seller_id).await?;

        let (sale_count, total_sales, earned, paid) =
            self.qualifying_aggregates(seller_id, period).await?;

        Ok(CommissionSummary {
            seller_id: seller_id.to_string(),
            period,
            sale_count,
            total_sales_cents: total_sales,
            commissions_earned_cents: earned,
            commissions_paid_cents: paid,
            commissions_pending_cents: earned - paid,
        })
    }

    /// Goal progress for a seller's period.
    ///
    /// A missing quota is reported as `has_goal = false`, never as an
    /// error - callers can tell "no quota assigned" from "quota not met".
    pub async fn goal_progress(&self, seller_id: &str, period: Period) -> DbResult<GoalProgress> {
        self.seller_or_not_found(seller_id).await?;

        let goal = self.goal_for(seller_id, period).await?;
        let (sale_count, total_sales, _, _) =
            self.qualifying_aggregates(seller_id, period).await?;

        Ok(GoalProgress::evaluate(
            goal.as_ref(),
            sale_count,
            Money::from_cents(total_sales),
        ))
    }

    /// Bonus eligibility and amount for a seller's period.
    ///
    /// Live and provisional: may report eligibility mid-period. This is an
    /// informational figure; payout still goes through
    /// `SaleRepository::mark_commission_paid`.
    pub async fn bonus_eligibility(
        &self,
        seller_id: &str,
        period: Period,
    ) -> DbResult<BonusOutcome> {
        self.seller_or_not_found(seller_id).await?;

        let goal = self.goal_for(seller_id, period).await?;
        let (sale_count, total_sales, earned, _) =
            self.qualifying_aggregates(seller_id, period).await?;

        let progress =
            GoalProgress::evaluate(goal.as_ref(), sale_count, Money::from_cents(total_sales));

        let bonus_rate = goal
            .map(|g| g.bonus_percentage())
            .unwrap_or_default();

        Ok(evaluate_bonus(&progress, bonus_rate, Money::from_cents(earned)))
    }

    /// The period's leaderboard over active sellers.
    ///
    /// Aggregation happens in SQL; the deterministic total order (count
    /// desc, value desc, seller_id asc) is applied by `showroom_core`.
    pub async fn ranking(&self, period: Period) -> DbResult<Vec<RankingEntry>> {
        let (start, end) = period.date_range();

        debug!(period = %period, "Computing ranking");

        let rows = sqlx::query_as::<_, RankingEntry>(
            r#"
            SELECT s.id AS seller_id,
                   s.name AS seller_name,
                   COUNT(sa.id) AS actual_count,
                   COALESCE(SUM(sa.final_price_cents), 0) AS actual_value_cents
            FROM sellers s
            LEFT JOIN sales sa
                   ON sa.seller_id = s.id
                  AND sa.status IN ('approved', 'completed')
                  AND sa.sale_date >= ?1
                  AND sa.sale_date < ?2
            WHERE s.active = 1
            GROUP BY s.id, s.name
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rank(rows))
    }

    /// 1-based leaderboard position for a seller.
    ///
    /// Returns `Ok(None)` for a seller who is unranked: inactive, or with
    /// zero qualifying sales in the period. An unknown seller is NotFound.
    pub async fn position(&self, seller_id: &str, period: Period) -> DbResult<Option<usize>> {
        self.seller_or_not_found(seller_id).await?;

        let board = self.ranking(period).await?;
        let ranked = board
            .iter()
            .find(|entry| entry.seller_id == seller_id)
            .filter(|entry| entry.actual_count > 0)
            .is_some();

        if !ranked {
            return Ok(None);
        }

        Ok(showroom_core::position(&board, seller_id))
    }

    /// Unpaid commissions for a seller across all periods.
    ///
    /// Read-after-write consistent: a `mark_commission_paid` that has
    /// returned is reflected by the next call.
    pub async fn pending_commissions(&self, seller_id: &str) -> DbResult<PendingCommissions> {
        self.seller_or_not_found(seller_id).await?;

        let (sale_count, total): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(commission_value_cents), 0)
            FROM sales
            WHERE seller_id = ?1
              AND status IN ('approved', 'completed')
              AND commission_paid = 0
            "#,
        )
        .bind(seller_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(PendingCommissions {
            seller_id: seller_id.to_string(),
            sale_count,
            total_cents: total,
        })
    }

    // =========================================================================
    // Internal helpers
    // =========================================================================

    async fn seller_or_not_found(&self, seller_id: &str) -> DbResult<Seller> {
        SellerRepository::new(self.pool.clone())
            .get_by_id(seller_id)
            .await?
            .ok_or_else(|| DbError::not_found("Seller", seller_id))
    }

    async fn goal_for(&self, seller_id: &str, period: Period) -> DbResult<Option<SalesGoal>> {
        crate::repository::goal::GoalRepository::new(self.pool.clone())
            .get_for_period(seller_id, period)
            .await
    }

    /// Qualifying-sale aggregates for (seller, period):
    /// (count, summed price, summed commission, summed paid commission).
    async fn qualifying_aggregates(
        &self,
        seller_id: &str,
        period: Period,
    ) -> DbResult<(i64, i64, i64, i64)> {
        let (start, end) = period.date_range();

        let row: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(final_price_cents), 0),
                   COALESCE(SUM(commission_value_cents), 0),
                   COALESCE(SUM(CASE WHEN commission_paid = 1
                                     THEN commission_value_cents
                                     ELSE 0 END), 0)
            FROM sales
            WHERE seller_id = ?1
              AND status IN ('approved', 'completed')
              AND sale_date >= ?2
              AND sale_date < ?3
            "#,
        )
        .bind(seller_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seller(db: &Database, name: &str, rate_bps: u32) -> String {
        db.sellers()
            .create_seller(name, rate_bps, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            .await
            .unwrap()
            .id
    }

    /// Creates a sale and moves it straight to `completed`.
    async fn completed_sale(db: &Database, seller_id: &str, price_cents: i64, date: NaiveDate) {
        let sale = db
            .sales()
            .create_sale(seller_id, "Vehicle", price_cents, date, None)
            .await
            .unwrap();
        db.sales().complete_sale(&sale.id).await.unwrap();
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, day).unwrap()
    }

    fn may_period() -> Period {
        Period::new(2026, 5).unwrap()
    }

    #[tokio::test]
    async fn test_goal_bonus_and_summary_for_a_full_month() {
        // Seller at 3% with two completed sales of 100,000.00 and 50,000.00,
        // a quantity goal of 2 and a 10% bonus rate
        let db = test_db().await;
        let x = seller(&db, "Seller X", 300).await;

        completed_sale(&db, &x, 10_000_000, may(5)).await;
        completed_sale(&db, &x, 5_000_000, may(20)).await;
        db.goals()
            .upsert_goal(&x, may_period(), 2, None, 1000)
            .await
            .unwrap();

        let progress = db.reports().goal_progress(&x, may_period()).await.unwrap();
        assert_eq!(progress.actual_count, 2);
        assert_eq!(progress.actual_value.cents(), 15_000_000);
        assert!(progress.has_goal);
        assert_eq!(progress.quantity_pct, Some(100.0));
        assert!(progress.quantity_achieved);

        // Commissions: 3,000.00 + 1,500.00 = 4,500.00; bonus 10% → 450.00
        let summary = db
            .reports()
            .commission_summary(&x, may_period())
            .await
            .unwrap();
        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.commissions_earned_cents, 450_000);
        assert_eq!(summary.commissions_paid_cents, 0);
        assert_eq!(summary.commissions_pending_cents, 450_000);

        let bonus = db
            .reports()
            .bonus_eligibility(&x, may_period())
            .await
            .unwrap();
        assert!(bonus.eligible);
        assert_eq!(bonus.amount.cents(), 45_000);
    }

    #[tokio::test]
    async fn test_pending_sales_are_invisible_to_aggregates() {
        // A pending 200,000.00 sale must not appear anywhere until approved
        let db = test_db().await;
        let y = seller(&db, "Seller Y", 300).await;

        let sale = db
            .sales()
            .create_sale(&y, "2024 Toyota Hilux", 20_000_000, may(8), None)
            .await
            .unwrap();

        let progress = db.reports().goal_progress(&y, may_period()).await.unwrap();
        assert_eq!(progress.actual_count, 0);
        assert_eq!(progress.actual_value.cents(), 0);

        let summary = db
            .reports()
            .commission_summary(&y, may_period())
            .await
            .unwrap();
        assert_eq!(summary.commissions_earned_cents, 0);

        assert_eq!(db.reports().position(&y, may_period()).await.unwrap(), None);

        // Approval flips all of it on the very next read
        db.sales().approve_sale(&sale.id).await.unwrap();

        let progress = db.reports().goal_progress(&y, may_period()).await.unwrap();
        assert_eq!(progress.actual_count, 1);
        assert_eq!(progress.actual_value.cents(), 20_000_000);
        assert_eq!(
            db.reports().position(&y, may_period()).await.unwrap(),
            Some(1)
        );
    }

    #[tokio::test]
    async fn test_ranking_order_and_tie_breaks() {
        // A and B tie on count (3 each); A's 300,000.00 beats B's 280,000.00
        let db = test_db().await;
        let a = seller(&db, "Seller A", 300).await;
        let b = seller(&db, "Seller B", 300).await;
        let c = seller(&db, "Seller C", 300).await;

        for price in [10_000_000, 10_000_000, 10_000_000] {
            completed_sale(&db, &a, price, may(10)).await;
        }
        for price in [10_000_000, 10_000_000, 8_000_000] {
            completed_sale(&db, &b, price, may(11)).await;
        }
        completed_sale(&db, &c, 50_000_000, may(12)).await;

        let board = db.reports().ranking(may_period()).await.unwrap();
        let order: Vec<&str> = board.iter().map(|e| e.seller_id.as_str()).collect();
        assert_eq!(order, vec![a.as_str(), b.as_str(), c.as_str()]);

        assert_eq!(board[0].actual_count, 3);
        assert_eq!(board[0].actual_value_cents, 30_000_000);
        assert_eq!(board[1].actual_value_cents, 28_000_000);

        assert_eq!(db.reports().position(&a, may_period()).await.unwrap(), Some(1));
        assert_eq!(db.reports().position(&b, may_period()).await.unwrap(), Some(2));
        assert_eq!(db.reports().position(&c, may_period()).await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_reads_are_idempotent_over_unchanged_ledger() {
        let db = test_db().await;
        let a = seller(&db, "Seller A", 300).await;
        let b = seller(&db, "Seller B", 300).await;
        completed_sale(&db, &a, 10_000_000, may(10)).await;
        completed_sale(&db, &b, 12_000_000, may(11)).await;

        let first_board = db.reports().ranking(may_period()).await.unwrap();
        let second_board = db.reports().ranking(may_period()).await.unwrap();
        assert_eq!(first_board, second_board);

        let first = db.reports().goal_progress(&a, may_period()).await.unwrap();
        let second = db.reports().goal_progress(&a, may_period()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_cancellation_is_reflected_on_next_read() {
        let db = test_db().await;
        let a = seller(&db, "Seller A", 300).await;
        db.goals()
            .upsert_goal(&a, may_period(), 1, None, 1000)
            .await
            .unwrap();

        let sale = db
            .sales()
            .create_sale(&a, "Vehicle", 10_000_000, may(10), None)
            .await
            .unwrap();
        db.sales().approve_sale(&sale.id).await.unwrap();

        let progress = db.reports().goal_progress(&a, may_period()).await.unwrap();
        assert!(progress.quantity_achieved);
        assert_eq!(
            db.reports()
                .pending_commissions(&a)
                .await
                .unwrap()
                .total_cents,
            300_000
        );

        db.sales().cancel_sale(&sale.id).await.unwrap();

        // Goal progress, ranking, and pending totals all drop the sale at once
        let progress = db.reports().goal_progress(&a, may_period()).await.unwrap();
        assert_eq!(progress.actual_count, 0);
        assert!(!progress.quantity_achieved);

        assert_eq!(db.reports().position(&a, may_period()).await.unwrap(), None);

        let pending = db.reports().pending_commissions(&a).await.unwrap();
        assert_eq!(pending.sale_count, 0);
        assert_eq!(pending.total_cents, 0);
    }

    #[tokio::test]
    async fn test_no_goal_is_distinct_from_zero_progress() {
        let db = test_db().await;
        let a = seller(&db, "Seller A", 300).await;
        completed_sale(&db, &a, 10_000_000, may(10)).await;

        // Sales exist, but no quota was assigned
        let progress = db.reports().goal_progress(&a, may_period()).await.unwrap();
        assert!(!progress.has_goal);
        assert_eq!(progress.actual_count, 1);
        assert_eq!(progress.quantity_pct, None);

        // And without a goal there is never a bonus
        let bonus = db
            .reports()
            .bonus_eligibility(&a, may_period())
            .await
            .unwrap();
        assert!(!bonus.eligible);
        assert_eq!(bonus.amount.cents(), 0);
    }

    #[tokio::test]
    async fn test_inactive_sellers_leave_the_ranking() {
        let db = test_db().await;
        let a = seller(&db, "Seller A", 300).await;
        let b = seller(&db, "Seller B", 300).await;
        completed_sale(&db, &a, 10_000_000, may(10)).await;
        completed_sale(&db, &b, 12_000_000, may(11)).await;

        db.sellers().set_active(&b, false).await.unwrap();

        let board = db.reports().ranking(may_period()).await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].seller_id, a);

        assert_eq!(db.reports().position(&b, may_period()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_periods_are_isolated() {
        let db = test_db().await;
        let a = seller(&db, "Seller A", 300).await;

        completed_sale(&db, &a, 10_000_000, may(31)).await;
        completed_sale(&db, &a, 5_000_000, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()).await;

        let progress = db.reports().goal_progress(&a, may_period()).await.unwrap();
        assert_eq!(progress.actual_count, 1);
        assert_eq!(progress.actual_value.cents(), 10_000_000);

        let june = db
            .reports()
            .goal_progress(&a, Period::new(2026, 6).unwrap())
            .await
            .unwrap();
        assert_eq!(june.actual_count, 1);
        assert_eq!(june.actual_value.cents(), 5_000_000);
    }

    #[tokio::test]
    async fn test_pending_commissions_read_after_write() {
        let db = test_db().await;
        let a = seller(&db, "Seller A", 300).await;

        let sale = db
            .sales()
            .create_sale(&a, "Vehicle", 10_000_000, may(10), None)
            .await
            .unwrap();
        db.sales().approve_sale(&sale.id).await.unwrap();

        let pending = db.reports().pending_commissions(&a).await.unwrap();
        assert_eq!(pending.sale_count, 1);
        assert_eq!(pending.total_cents, 300_000);

        // Once mark_commission_paid returns, the next read reflects it
        db.sales().mark_commission_paid(&sale.id).await.unwrap();

        let pending = db.reports().pending_commissions(&a).await.unwrap();
        assert_eq!(pending.sale_count, 0);
        assert_eq!(pending.total_cents, 0);

        let summary = db
            .reports()
            .commission_summary(&a, may_period())
            .await
            .unwrap();
        assert_eq!(summary.commissions_paid_cents, 300_000);
        assert_eq!(summary.commissions_pending_cents, 0);
    }

    #[tokio::test]
    async fn test_unknown_seller_is_not_found() {
        let db = test_db().await;

        let err = db
            .reports()
            .goal_progress("missing", may_period())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = db
            .reports()
            .position("missing", may_period())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = db.reports().pending_commissions("missing").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
