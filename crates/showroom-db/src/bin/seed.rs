//! # Seed Data Generator
//!
//! Populates the database with development data: a small sales floor, a
//! few months of ledger history, and current-month quotas.
//!
//! ## Usage
//! ```bash
//! # Seed into the default database file
//! cargo run -p showroom-db --bin seed
//!
//! # Specify database path
//! cargo run -p showroom-db --bin seed -- --db ./data/showroom.db
//! ```
//!
//! ## Generated Data
//! - Sellers with realistic commission rates (2.0% - 3.5%)
//! - Sales spread over the current and previous month, cycling through
//!   pending / approved / completed / cancelled statuses
//! - Current-month quotas with a 10% bonus rate
//!
//! Finishes by printing the current-month leaderboard so the seeded state
//! is visible at a glance.

use chrono::{Datelike, Utc};
use std::env;

use showroom_core::Period;
use showroom_db::{Database, DbConfig, DbError};

/// Sellers for the development floor: (name, commission rate in bps).
const SELLERS: &[(&str, u32)] = &[
    ("Ana Souza", 300),
    ("Bruno Lima", 250),
    ("Carla Mendes", 350),
    ("Diego Rocha", 200),
    ("Elisa Ferreira", 300),
];

/// Vehicles with list prices in cents.
const VEHICLES: &[(&str, i64)] = &[
    ("2021 Fiat Argo Drive", 7_490_000),
    ("2022 Honda Civic EX", 13_990_000),
    ("2023 Jeep Renegade Sport", 11_750_000),
    ("2020 Toyota Corolla XEi", 10_990_000),
    ("2024 Hyundai HB20 Vision", 8_690_000),
    ("2022 Chevrolet Onix LT", 7_990_000),
    ("2023 VW T-Cross Comfortline", 13_490_000),
    ("2019 Renault Kwid Zen", 4_690_000),
];

#[tokio::main]
async fn main() -> Result<(), DbError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let db_path = parse_db_path();
    tracing::info!(path = %db_path, "Seeding database");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    let today = Utc::now().date_naive();
    let this_month = Period::from_date(today);
    let last_month = previous(this_month);

    // -------------------------------------------------------------------------
    // Sellers
    // -------------------------------------------------------------------------
    let mut seller_ids = Vec::new();
    for (i, (name, rate_bps)) in SELLERS.iter().enumerate() {
        let hire_date = last_month
            .first_day()
            .with_year(last_month.year - 1 - i as i32 % 3)
            .unwrap_or_else(|| last_month.first_day());

        let seller = db.sellers().create_seller(name, *rate_bps, hire_date).await?;
        tracing::info!(id = %seller.id, name = %seller.name, rate_bps = %rate_bps, "Created seller");
        seller_ids.push(seller.id);
    }

    // -------------------------------------------------------------------------
    // Sales: spread across last month and this month, cycling statuses
    // -------------------------------------------------------------------------
    let mut created = 0usize;
    for (i, seller_id) in seller_ids.iter().enumerate() {
        // Busier sellers get more tickets
        let sale_count = 3 + i % 4;

        for n in 0..sale_count {
            let (vehicle, price_cents) = VEHICLES[(i * 3 + n) % VEHICLES.len()];
            let period = if n % 2 == 0 { this_month } else { last_month };
            let day = 1 + ((i * 7 + n * 5) % 27) as u32;
            let sale_date = period
                .first_day()
                .with_day(day)
                .unwrap_or_else(|| period.first_day());

            let sale = db
                .sales()
                .create_sale(seller_id, vehicle, price_cents, sale_date, None)
                .await?;

            // 0: stays pending, 1: approved, 2: completed, 3: cancelled
            match n % 4 {
                1 => db.sales().approve_sale(&sale.id).await?,
                2 => db.sales().complete_sale(&sale.id).await?,
                3 => db.sales().cancel_sale(&sale.id).await?,
                _ => {}
            }
            created += 1;
        }
    }
    tracing::info!(count = created, "Created sales");

    // -------------------------------------------------------------------------
    // Current-month quotas with a 10% bonus rate
    // -------------------------------------------------------------------------
    for (i, seller_id) in seller_ids.iter().enumerate() {
        let quantity = 2 + (i % 3) as i64;
        let value = (i % 2 == 0).then_some(25_000_000 + i as i64 * 5_000_000);

        db.goals()
            .upsert_goal(seller_id, this_month, quantity, value, 1000)
            .await?;
    }
    tracing::info!(count = seller_ids.len(), "Assigned goals");

    // -------------------------------------------------------------------------
    // Show the result
    // -------------------------------------------------------------------------
    let board = db.reports().ranking(this_month).await?;
    println!("\nLeaderboard {this_month}");
    println!("{:<4} {:<20} {:>6} {:>16}", "#", "Seller", "Sales", "Value");
    for (idx, entry) in board.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:>6} {:>16}",
            idx + 1,
            entry.seller_name,
            entry.actual_count,
            entry.actual_value().to_string()
        );
    }

    for seller_id in &seller_ids {
        let pending = db.reports().pending_commissions(seller_id).await?;
        let progress = db.reports().goal_progress(seller_id, this_month).await?;
        tracing::info!(
            seller_id = %seller_id,
            pending = %pending.total(),
            quantity_pct = ?progress.quantity_pct_display(),
            "Seeded seller state"
        );
    }

    db.close().await;
    Ok(())
}

/// Parses `--db <path>` from the command line, defaulting to ./showroom.db
fn parse_db_path() -> String {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
        .unwrap_or_else(|| "./showroom.db".to_string())
}

/// The period immediately before `period`.
fn previous(period: Period) -> Period {
    if period.month == 1 {
        Period::new_unchecked(period.year - 1, 12)
    } else {
        Period::new_unchecked(period.year, period.month - 1)
    }
}
