//! # Repository Module
//!
//! Database repository implementations for the commission engine.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Back-office request                                                   │
//! │       │                                                                 │
//! │       │  db.reports().goal_progress(seller_id, period)                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  ReportingRepository                                                   │
//! │  ├── commission_summary(&self, seller_id, period)                      │
//! │  ├── goal_progress(&self, seller_id, period)                           │
//! │  ├── bonus_eligibility(&self, seller_id, period)                       │
//! │  └── ranking(&self, period)                                            │
//! │       │                                                                 │
//! │       │  SQL aggregate + pure evaluation in showroom-core              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Fixed, typed result shapes, testable independent of storage         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`seller::SellerRepository`] - Seller registry (rates, active flag)
//! - [`sale::SaleRepository`] - Sale ledger + commission payment ledger
//! - [`goal::GoalRepository`] - Quota assignments per seller and month
//! - [`reporting::ReportingRepository`] - Read-only query surface

pub mod goal;
pub mod reporting;
pub mod sale;
pub mod seller;
