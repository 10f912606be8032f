//! # Goal Repository
//!
//! Database operations for admin-assigned sales quotas.
//!
//! One `sales_goals` row exists per (seller, month, year); assignment is an
//! upsert so an admin can revise a quota mid-month. The engine itself only
//! ever reads these rows.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::seller::SellerRepository;
use showroom_core::validation::{
    validate_goal_quantity, validate_goal_value_cents, validate_rate_bps,
};
use showroom_core::{Period, SalesGoal};

/// Columns selected for a full SalesGoal row.
const GOAL_COLUMNS: &str = r#"
    id, seller_id, month, year, goal_quantity, goal_value_cents,
    bonus_percentage_bps, created_at, updated_at
"#;

/// Repository for sales goal operations.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    pool: SqlitePool,
}

impl GoalRepository {
    /// Creates a new GoalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GoalRepository { pool }
    }

    /// Assigns (or revises) a seller's quota for a period.
    ///
    /// ## Independent Tracks
    /// `goal_quantity = 0` leaves the quantity track unset;
    /// `goal_value_cents = None` leaves the value track unset. Either,
    /// both, or neither may be given.
    pub async fn upsert_goal(
        &self,
        seller_id: &str,
        period: Period,
        goal_quantity: i64,
        goal_value_cents: Option<i64>,
        bonus_percentage_bps: u32,
    ) -> DbResult<SalesGoal> {
        validate_goal_quantity(goal_quantity)?;
        if let Some(value) = goal_value_cents {
            validate_goal_value_cents(value)?;
        }
        validate_rate_bps(bonus_percentage_bps)?;

        SellerRepository::new(self.pool.clone())
            .get_by_id(seller_id)
            .await?
            .ok_or_else(|| DbError::not_found("Seller", seller_id))?;

        let now = Utc::now();
        let id = generate_goal_id();

        debug!(
            seller_id = %seller_id,
            period = %period,
            goal_quantity = %goal_quantity,
            "Upserting sales goal"
        );

        // Revising a quota keeps the original row id and created_at
        sqlx::query(
            r#"
            INSERT INTO sales_goals (
                id, seller_id, month, year,
                goal_quantity, goal_value_cents, bonus_percentage_bps,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
            ON CONFLICT (seller_id, month, year) DO UPDATE SET
                goal_quantity = excluded.goal_quantity,
                goal_value_cents = excluded.goal_value_cents,
                bonus_percentage_bps = excluded.bonus_percentage_bps,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&id)
        .bind(seller_id)
        .bind(period.month)
        .bind(period.year)
        .bind(goal_quantity)
        .bind(goal_value_cents)
        .bind(bonus_percentage_bps)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get_for_period(seller_id, period)
            .await?
            .ok_or_else(|| DbError::Internal("goal vanished after upsert".to_string()))
    }

    /// Fetches the quota for (seller, period), if one is assigned.
    ///
    /// `Ok(None)` is a first-class result: the Goal Tracker reports it as
    /// `has_goal = false`, not as an error.
    pub async fn get_for_period(
        &self,
        seller_id: &str,
        period: Period,
    ) -> DbResult<Option<SalesGoal>> {
        let goal = sqlx::query_as::<_, SalesGoal>(&format!(
            r#"
            SELECT {GOAL_COLUMNS}
            FROM sales_goals
            WHERE seller_id = ?1 AND month = ?2 AND year = ?3
            "#
        ))
        .bind(seller_id)
        .bind(period.month)
        .bind(period.year)
        .fetch_optional(&self.pool)
        .await?;

        Ok(goal)
    }
}

/// Helper to generate a new goal ID.
pub fn generate_goal_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
