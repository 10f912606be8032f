//! # showroom-db: Database Layer for Showroom
//!
//! This crate provides database access for the commission, quota, and
//! ranking engine. It uses SQLite for storage with sqlx for async
//! operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Showroom Data Flow                               │
//! │                                                                         │
//! │  Back-office request (goal progress, ranking, mark paid)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    showroom-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  seller.rs    │    │  (embedded)  │  │   │
//! │  │   │               │    │  sale.rs      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  goal.rs      │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │  reporting.rs │    │ ...          │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database (the sale ledger is the single source of truth;       │
//! │  every aggregate is recomputed from it on each query)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (seller, sale, goal,
//!   reporting)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use showroom_core::Period;
//! use showroom_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/showroom.db")).await?;
//!
//! // Enter a sale: the commission snapshot is computed and persisted here
//! let sale = db.sales()
//!     .create_sale(&seller.id, "2022 Honda Civic EX", 10_000_000, sale_date, None)
//!     .await?;
//!
//! // Read-side queries recompute from the ledger on every call
//! let progress = db.reports().goal_progress(&seller.id, Period::new(2026, 5)?).await?;
//! let board = db.reports().ranking(Period::new(2026, 5)?).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::goal::GoalRepository;
pub use repository::reporting::{
    CommissionSummary, PendingCommissions, ReportingRepository,
};
pub use repository::sale::SaleRepository;
pub use repository::seller::SellerRepository;
