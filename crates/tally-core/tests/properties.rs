//! Property-based tests for the business rules.
//!
//! Invariants verified:
//! - Aggregated totals are exactly the pointwise sum of per-sale commissions
//! - Report shares add up to 100% whenever any commission was earned
//! - Rejected movements neither mutate the ledger nor consume a movement id
//! - Quantities never go negative, whatever the movement sequence
//! - Overdue totals always equal principal + fine + interest
//! - Huge principals or date gaps are rejected, never a panic

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::stock::{MovementRequest, StockLedger};
use tally_core::{
    aggregate_commissions, calculate_commission, compute_interest, CoreError, InterestResult,
    Money, MovementKind, Product, Sale,
};

// ── Helpers
// ───────────────────────────────────────────────────────────────────

const SELLERS: [&str; 4] = ["Ana Paula", "Bianca Lima", "Carlos Silva", "David Rocha"];

/// Amounts in cents from -100.00 to 2000.00, covering every tier.
fn sale_strat() -> impl Strategy<Value = Sale> {
    (0usize..SELLERS.len(), -10_000i64..=200_000i64)
        .prop_map(|(seller, cents)| Sale::new(SELLERS[seller], Money::from_cents(cents)))
}

fn movement_strat() -> impl Strategy<Value = MovementRequest> {
    (1000i64..=1004, any::<bool>(), -5i64..=80).prop_map(|(code, inflow, quantity)| {
        let kind = if inflow {
            MovementKind::Inflow
        } else {
            MovementKind::Outflow
        };
        MovementRequest::new(code, kind, quantity)
    })
}

fn seed_ledger() -> StockLedger {
    StockLedger::new(vec![
        Product::new(1001, "Notebook Gamer X-Pro", 45),
        Product::new(1002, "Monitor Curvo UltraWide", 120),
        Product::new(1003, "Teclado Mecânico RGB", 210),
        Product::new(1004, "Mouse Sem Fio Ergonômico", 88),
    ])
    .expect("seed is valid")
}

// ── All property tests
// ────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Σ totals == Σ calculate_commission(sale.amount)
    #[test]
    fn aggregation_is_pointwise_sum(sales in prop::collection::vec(sale_strat(), 0..40)) {
        let totals = aggregate_commissions(&sales).expect("amounts in range");
        let expected = Money::checked_sum(sales.iter().map(|s| calculate_commission(s.amount)));
        prop_assert_eq!(Some(totals.total()), expected);
        prop_assert_eq!(Money::checked_sum(totals.iter().map(|(_, total)| total)), expected);
    }

    /// Re-aggregating the same input reproduces the same output.
    #[test]
    fn aggregation_is_deterministic(sales in prop::collection::vec(sale_strat(), 0..40)) {
        prop_assert_eq!(
            aggregate_commissions(&sales).expect("amounts in range"),
            aggregate_commissions(&sales).expect("amounts in range")
        );
    }

    /// Rounded shares sum to 100% within the rounding of each row.
    #[test]
    fn shares_sum_to_one_hundred(sales in prop::collection::vec(sale_strat(), 1..40)) {
        let report = aggregate_commissions(&sales).expect("amounts in range").report();
        prop_assume!(report.grand_total.is_positive());

        let sum: Decimal = report.rows.iter().map(|r| r.share_percent).sum();
        let epsilon = dec!(0.005) * Decimal::from(report.rows.len() as u64);
        prop_assert!((sum - dec!(100)).abs() <= epsilon, "shares summed to {}", sum);
    }

    /// Report rows are never out of order.
    #[test]
    fn report_is_sorted_descending(sales in prop::collection::vec(sale_strat(), 0..40)) {
        let report = aggregate_commissions(&sales).expect("amounts in range").report();
        for pair in report.rows.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
        }
    }

    /// Ids advance by exactly one per accepted movement; failures leave the
    /// ledger byte-for-byte unchanged.
    #[test]
    fn rejected_movements_change_nothing(moves in prop::collection::vec(movement_strat(), 1..60)) {
        let mut ledger = seed_ledger();
        let mut accepted = 0u64;

        for request in &moves {
            let before = ledger.snapshot();
            let next_id = ledger.next_movement_id();

            match ledger.apply_movement(request) {
                Ok(result) => {
                    accepted += 1;
                    prop_assert_eq!(result.movement_id, next_id);
                    prop_assert_eq!(ledger.next_movement_id(), next_id + 1);
                }
                Err(_) => {
                    prop_assert_eq!(ledger.snapshot(), before);
                    prop_assert_eq!(ledger.next_movement_id(), next_id);
                }
            }

            prop_assert!(ledger.products().iter().all(|p| p.quantity >= 0));
        }

        prop_assert_eq!(ledger.next_movement_id(), accepted + 1);
    }

    /// total_due = principal + fixed_fine + accrued_interest, and lateness
    /// only ever adds to what is owed.
    #[test]
    fn overdue_total_is_sum_of_parts(cents in 1i64..=10_000_000, days in 0u64..=400) {
        let principal = Money::from_cents(cents);
        let due = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid date");
        let paid = due.checked_add_days(Days::new(days)).expect("valid date");

        match compute_interest(principal, Some(due), Some(paid)).expect("valid input") {
            InterestResult::OnTime { principal: owed } => {
                prop_assert_eq!(days, 0);
                prop_assert_eq!(owed, principal);
            }
            InterestResult::Overdue { days_overdue, fixed_fine, accrued_interest, total_due } => {
                prop_assert_eq!(days_overdue as u64, days);
                prop_assert_eq!(total_due, principal + fixed_fine + accrued_interest);
                prop_assert!(total_due > principal);
            }
        }
    }

    /// Any positive principal over any gap up to ~8000 years either computes
    /// or is rejected as too large.
    #[test]
    fn huge_principals_never_panic(
        lo in any::<u32>(),
        mid in any::<u32>(),
        hi in any::<u32>(),
        scale in 0u32..=28,
        days in 0u64..=3_000_000,
    ) {
        let principal = Money::new(Decimal::from_parts(lo, mid, hi, false, scale));
        prop_assume!(principal.is_positive());
        let due = NaiveDate::from_ymd_opt(1, 1, 1).expect("valid date");
        let paid = due.checked_add_days(Days::new(days)).expect("valid date");

        match compute_interest(principal, Some(due), Some(paid)) {
            Ok(result) => prop_assert!(result.total_due() >= principal),
            Err(CoreError::InvalidInput { field, reason }) => {
                prop_assert_eq!(field, "principal");
                prop_assert_eq!(reason, "too large");
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }
}
