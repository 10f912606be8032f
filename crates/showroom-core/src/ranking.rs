//! # Ranking Aggregator
//!
//! Produces the deterministic seller leaderboard for a period.
//!
//! ## Total Order
//! ```text
//! 1. actual_count   descending   (most qualifying sales first)
//! 2. actual_value   descending   (tie-break: higher summed price)
//! 3. seller_id      ascending    (tie-break: total determinism)
//! ```
//! No two runs over the same ledger snapshot may disagree - the seller_id
//! tie-break guarantees a total order even for sellers with identical
//! numbers.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

use crate::money::Money;

/// One leaderboard row: a seller's qualifying aggregates for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct RankingEntry {
    pub seller_id: String,
    /// Display name carried along for leaderboard rendering.
    pub seller_name: String,
    /// Number of qualifying sales in the period.
    pub actual_count: i64,
    /// Summed final price of those sales, in cents.
    pub actual_value_cents: i64,
}

impl RankingEntry {
    /// Returns the summed sale value as Money.
    #[inline]
    pub fn actual_value(&self) -> Money {
        Money::from_cents(self.actual_value_cents)
    }
}

/// Orders leaderboard entries into the deterministic total order.
///
/// Pure function over the rows the ledger produced; calling it twice on
/// the same input yields identical output.
///
/// ## Example
/// ```rust
/// use showroom_core::ranking::{rank, RankingEntry};
///
/// let rows = vec![
///     RankingEntry { seller_id: "b".into(), seller_name: "B".into(), actual_count: 3, actual_value_cents: 28_000_000 },
///     RankingEntry { seller_id: "a".into(), seller_name: "A".into(), actual_count: 3, actual_value_cents: 30_000_000 },
/// ];
/// let ranked = rank(rows);
/// assert_eq!(ranked[0].seller_id, "a"); // same count, higher value wins
/// ```
pub fn rank(mut entries: Vec<RankingEntry>) -> Vec<RankingEntry> {
    entries.sort_by(compare);
    entries
}

/// 1-based position of a seller in an already-ranked leaderboard.
///
/// Returns `None` when the seller does not appear in the slice. Whether a
/// seller with zero qualifying sales counts as ranked is the caller's
/// policy - the reporting layer treats them as unranked.
pub fn position(ranked: &[RankingEntry], seller_id: &str) -> Option<usize> {
    ranked
        .iter()
        .position(|entry| entry.seller_id == seller_id)
        .map(|idx| idx + 1)
}

fn compare(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.actual_count
        .cmp(&a.actual_count)
        .then_with(|| b.actual_value_cents.cmp(&a.actual_value_cents))
        .then_with(|| a.seller_id.cmp(&b.seller_id))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(seller_id: &str, count: i64, value_cents: i64) -> RankingEntry {
        RankingEntry {
            seller_id: seller_id.to_string(),
            seller_name: seller_id.to_uppercase(),
            actual_count: count,
            actual_value_cents: value_cents,
        }
    }

    #[test]
    fn test_count_dominates() {
        let ranked = rank(vec![
            entry("low-count-high-value", 1, 90_000_000),
            entry("high-count", 4, 10_000_000),
        ]);

        assert_eq!(ranked[0].seller_id, "high-count");
    }

    #[test]
    fn test_value_breaks_count_tie() {
        // Equal counts: 300,000.00 beats 280,000.00
        let ranked = rank(vec![
            entry("seller-b", 3, 28_000_000),
            entry("seller-a", 3, 30_000_000),
        ]);

        assert_eq!(ranked[0].seller_id, "seller-a");
        assert_eq!(ranked[1].seller_id, "seller-b");
    }

    #[test]
    fn test_seller_id_breaks_full_tie() {
        let ranked = rank(vec![
            entry("zzz", 2, 10_000_000),
            entry("aaa", 2, 10_000_000),
        ]);

        assert_eq!(ranked[0].seller_id, "aaa");
        assert_eq!(ranked[1].seller_id, "zzz");
    }

    #[test]
    fn test_total_order_is_deterministic() {
        let rows = vec![
            entry("c", 2, 5_000_000),
            entry("a", 2, 5_000_000),
            entry("b", 3, 1_000_000),
            entry("d", 0, 0),
        ];

        let first = rank(rows.clone());
        let second = rank(rows);
        assert_eq!(first, second);

        let order: Vec<&str> = first.iter().map(|e| e.seller_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_position_lookup() {
        let ranked = rank(vec![
            entry("a", 3, 30_000_000),
            entry("b", 3, 28_000_000),
            entry("c", 1, 5_000_000),
        ]);

        assert_eq!(position(&ranked, "a"), Some(1));
        assert_eq!(position(&ranked, "b"), Some(2));
        assert_eq!(position(&ranked, "c"), Some(3));
        assert_eq!(position(&ranked, "nobody"), None);
    }

    #[test]
    fn test_empty_leaderboard() {
        assert!(rank(Vec::new()).is_empty());
        assert_eq!(position(&[], "a"), None);
    }
}
