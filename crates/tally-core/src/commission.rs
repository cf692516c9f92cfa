//! # Commission Engine
//!
//! Turns a sequence of sales into per-seller commission totals.
//!
//! ## Tier Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sale amount              Tier        Rate                              │
//! │  ───────────────────────  ──────────  ─────                             │
//! │  amount <  100.00         None        0%                                │
//! │  100.00 <= amount < 500   Standard    1%                                │
//! │  amount >= 500.00         Premium     5%                                │
//! │                                                                         │
//! │  Boundaries belong to the HIGHER tier: 100.00 → 1%, 500.00 → 5%.       │
//! │  Negative amounts fall in the None tier (0 commission).                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure: [`aggregate_commissions`] rebuilds the totals
//! from scratch on every call and [`CommissionReport`] is derived from the
//! totals on demand, so nothing can go stale.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Rate, Sale};

/// Lower bound (inclusive) of the 1% tier.
pub const STANDARD_TIER_FLOOR: Money = Money::new(Decimal::from_parts(100, 0, 0, false, 0));

/// Lower bound (inclusive) of the 5% tier.
pub const PREMIUM_TIER_FLOOR: Money = Money::new(Decimal::from_parts(500, 0, 0, false, 0));

// =============================================================================
// Tiers
// =============================================================================

/// Commission bracket a single sale falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommissionTier {
    /// Below 100.00: no commission.
    None,
    /// 100.00 up to (not including) 500.00: 1%.
    Standard,
    /// 500.00 and above: 5%.
    Premium,
}

impl CommissionTier {
    /// Picks the tier for a sale amount.
    pub fn for_amount(amount: Money) -> Self {
        if amount < STANDARD_TIER_FLOOR {
            CommissionTier::None
        } else if amount < PREMIUM_TIER_FLOOR {
            CommissionTier::Standard
        } else {
            CommissionTier::Premium
        }
    }

    /// Rate paid in this tier.
    pub fn rate(&self) -> Rate {
        match self {
            CommissionTier::None => Rate::zero(),
            CommissionTier::Standard => Rate::from_bps(100),
            CommissionTier::Premium => Rate::from_bps(500),
        }
    }
}

/// Commission earned on a single sale. Never rounded.
///
/// ## Example
/// ```rust
/// use tally_core::commission::calculate_commission;
/// use tally_core::Money;
///
/// assert_eq!(calculate_commission(Money::from_cents(9999)), Money::zero());
/// assert_eq!(calculate_commission(Money::from_cents(10000)), Money::from_major(1));
/// assert_eq!(calculate_commission(Money::from_cents(50000)), Money::from_major(25));
/// ```
pub fn calculate_commission(amount: Money) -> Money {
    let tier = CommissionTier::for_amount(amount);
    if tier == CommissionTier::None {
        return Money::zero();
    }
    amount.apply_rate(tier.rate())
}

// =============================================================================
// Aggregation
// =============================================================================

/// Accumulated commission per seller.
///
/// Sellers without sales are absent, not present with zero. Iteration is in
/// seller-name order so two aggregations of the same input are identical.
///
/// The grand total is kept alongside the per-seller map. Commissions are
/// never negative, so no seller total can exceed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommissionTotals {
    by_seller: BTreeMap<String, Money>,
    total: Money,
}

impl CommissionTotals {
    /// Commission of one seller, if they sold anything.
    pub fn get(&self, seller: &str) -> Option<Money> {
        self.by_seller.get(seller).copied()
    }

    /// Number of sellers with at least one sale.
    pub fn len(&self) -> usize {
        self.by_seller.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_seller.is_empty()
    }

    /// `(seller, total)` pairs in seller-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.by_seller.iter().map(|(seller, total)| (seller.as_str(), *total))
    }

    /// Sum of every seller's commission.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Seller's fraction of the grand total; 0 when the grand total is 0
    /// or the seller is unknown.
    pub fn share(&self, seller: &str) -> Decimal {
        self.get(seller)
            .map(|amount| amount.ratio_of(self.total()))
            .unwrap_or(Decimal::ZERO)
    }

    /// Builds the presentation report (sorted, with percentages).
    pub fn report(&self) -> CommissionReport {
        CommissionReport::from(self)
    }
}

/// Sums the commission of every sale into its seller's running total.
///
/// ## Example
/// ```rust
/// use tally_core::commission::aggregate_commissions;
/// use tally_core::{Money, Sale};
///
/// let sales = vec![
///     Sale::new("Ana Paula", Money::from_major(650)),
///     Sale::new("Ana Paula", Money::from_major(500)),
///     Sale::new("David Rocha", Money::from_major(50)),
/// ];
/// let totals = aggregate_commissions(&sales).unwrap();
/// assert_eq!(totals.get("Ana Paula"), Some(Money::from_cents(5750)));
/// assert_eq!(totals.get("David Rocha"), Some(Money::zero()));
/// assert_eq!(totals.total(), Money::from_cents(5750));
/// ```
///
/// ## Errors
/// `InvalidInput` when the grand total no longer fits in a `Decimal`.
pub fn aggregate_commissions(sales: &[Sale]) -> CoreResult<CommissionTotals> {
    let mut by_seller: BTreeMap<String, Money> = BTreeMap::new();
    let mut total = Money::zero();

    for sale in sales {
        let commission = calculate_commission(sale.amount);
        // Seller totals are bounded by the grand total, so one check covers both.
        total = total
            .checked_add(commission)
            .ok_or_else(|| CoreError::invalid_input("sale amount", "too large"))?;
        *by_seller.entry(sale.seller.clone()).or_default() += commission;
    }

    Ok(CommissionTotals { by_seller, total })
}

// =============================================================================
// Report
// =============================================================================

/// One line of the commission table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionRow {
    pub seller: String,
    #[ts(as = "String")]
    pub total: Money,
    /// Share of the grand total in percent, two decimal places.
    #[ts(as = "String")]
    pub share_percent: Decimal,
}

/// Commission table: rows sorted by total (highest first) plus the grand
/// total row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionReport {
    pub rows: Vec<CommissionRow>,
    #[ts(as = "String")]
    pub grand_total: Money,
}

impl From<&CommissionTotals> for CommissionReport {
    fn from(totals: &CommissionTotals) -> Self {
        let grand_total = totals.total();

        let mut rows: Vec<CommissionRow> = totals
            .iter()
            .map(|(seller, total)| CommissionRow {
                seller: seller.to_string(),
                total,
                share_percent: (total.ratio_of(grand_total) * Decimal::ONE_HUNDRED)
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            })
            .collect();

        // Highest total first; equal totals keep seller-name order.
        rows.sort_by(|a, b| match b.total.cmp(&a.total) {
            Ordering::Equal => a.seller.cmp(&b.seller),
            other => other,
        });

        CommissionReport { rows, grand_total }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(d: Decimal) -> Money {
        Money::new(d)
    }

    fn demo_sales() -> Vec<Sale> {
        vec![
            Sale::new("Ana Paula", money(dec!(650.00))),
            Sale::new("Carlos Silva", money(dec!(1200.00))),
            Sale::new("Ana Paula", money(dec!(500.00))),
            Sale::new("Bianca Lima", money(dec!(250.00))),
            Sale::new("Carlos Silva", money(dec!(150.00))),
            Sale::new("Bianca Lima", money(dec!(499.99))),
            Sale::new("David Rocha", money(dec!(99.99))),
            Sale::new("David Rocha", money(dec!(50.00))),
            Sale::new("Ana Paula", money(dec!(800.00))),
            Sale::new("Carlos Silva", money(dec!(300.00))),
        ]
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(calculate_commission(money(dec!(99.99))), Money::zero());
        assert_eq!(calculate_commission(money(dec!(100.00))), money(dec!(1.00)));
        assert_eq!(calculate_commission(money(dec!(499.99))), money(dec!(4.9999)));
        assert_eq!(calculate_commission(money(dec!(500.00))), money(dec!(25.00)));
    }

    #[test]
    fn test_tier_for_amount() {
        assert_eq!(CommissionTier::for_amount(money(dec!(0))), CommissionTier::None);
        assert_eq!(
            CommissionTier::for_amount(money(dec!(100))),
            CommissionTier::Standard
        );
        assert_eq!(
            CommissionTier::for_amount(money(dec!(500))),
            CommissionTier::Premium
        );
    }

    #[test]
    fn test_negative_amount_earns_nothing() {
        assert_eq!(calculate_commission(money(dec!(-750))), Money::zero());
    }

    #[test]
    fn test_aggregate_demo_sales() {
        let totals = aggregate_commissions(&demo_sales()).unwrap();

        // 32.50 + 25.00 + 40.00
        assert_eq!(totals.get("Ana Paula"), Some(money(dec!(97.50))));
        // 60.00 + 1.50 + 3.00
        assert_eq!(totals.get("Carlos Silva"), Some(money(dec!(64.50))));
        // 2.50 + 4.9999
        assert_eq!(totals.get("Bianca Lima"), Some(money(dec!(7.4999))));
        assert_eq!(totals.get("David Rocha"), Some(Money::zero()));
        assert_eq!(totals.total(), money(dec!(169.4999)));
    }

    #[test]
    fn test_sellers_without_sales_are_absent() {
        let totals = aggregate_commissions(&[Sale::new("Ana Paula", money(dec!(10)))]).unwrap();
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("Carlos Silva"), None);
        assert!(aggregate_commissions(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_aggregation_is_repeatable() {
        let sales = demo_sales();
        assert_eq!(
            aggregate_commissions(&sales).unwrap(),
            aggregate_commissions(&sales).unwrap()
        );
    }

    #[test]
    fn test_share_with_zero_total() {
        let totals = aggregate_commissions(&[Sale::new("David Rocha", money(dec!(50)))]).unwrap();
        assert_eq!(totals.share("David Rocha"), Decimal::ZERO);
        assert_eq!(totals.share("Nobody"), Decimal::ZERO);

        let report = totals.report();
        assert_eq!(report.rows[0].share_percent, Decimal::ZERO);
        assert_eq!(report.grand_total, Money::zero());
    }

    #[test]
    fn test_report_sorted_descending() {
        let report = aggregate_commissions(&demo_sales()).unwrap().report();
        let sellers: Vec<&str> = report.rows.iter().map(|r| r.seller.as_str()).collect();
        assert_eq!(
            sellers,
            vec!["Ana Paula", "Carlos Silva", "Bianca Lima", "David Rocha"]
        );
        assert_eq!(report.rows[0].share_percent, dec!(57.52));
        assert_eq!(report.rows[3].share_percent, dec!(0.00));
    }

    #[test]
    fn test_report_ties_ordered_by_name() {
        let sales = vec![
            Sale::new("Zeca", money(dec!(100))),
            Sale::new("Bruna", money(dec!(100))),
        ];
        let report = aggregate_commissions(&sales).unwrap().report();
        assert_eq!(report.rows[0].seller, "Bruna");
        assert_eq!(report.rows[1].seller, "Zeca");
        assert_eq!(report.rows[0].share_percent, dec!(50.00));
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        // Twenty-one 5% commissions on Decimal::MAX add up past it.
        let sales = vec![
            Sale::new("Ana Paula", Money::new(Decimal::MAX)),
            Sale::new("Bianca Lima", Money::new(Decimal::MAX)),
            Sale::new("Ana Paula", Money::new(Decimal::MAX)),
        ];
        let sales: Vec<Sale> = std::iter::repeat(sales).take(7).flatten().collect();

        assert!(matches!(
            aggregate_commissions(&sales),
            Err(CoreError::InvalidInput { ref field, ref reason })
                if field == "sale amount" && reason == "too large"
        ));
    }

    #[test]
    fn test_large_sales_within_range() {
        let sales = vec![
            Sale::new("Ana Paula", Money::new(Decimal::MAX)),
            Sale::new("Bianca Lima", Money::new(Decimal::MAX)),
        ];
        let totals = aggregate_commissions(&sales).unwrap();
        assert_eq!(totals.total(), totals.get("Ana Paula").unwrap() * 2_i64);
        assert_eq!(totals.report().rows[0].share_percent, dec!(50.00));
    }
}
