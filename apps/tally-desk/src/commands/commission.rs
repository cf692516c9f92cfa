//! # Commission Commands
//!
//! ## Report Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  COMMISSIONS                                                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Ana Paula             R$ 97,50            57,52%                       │
//! │  Carlos Silva          R$ 64,50            38,05%                       │
//! │  ...                                                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Grand total           R$ 169,50          100,00%                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use tally_core::CommissionReport;
use tracing::debug;
use ts_rs::TS;

use crate::state::{DeskConfig, SalesState};

/// A report row formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionLine {
    pub seller: String,
    pub commission: String,
    pub share: String,
}

/// Commission report with raw values and display strings.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommissionReportResponse {
    pub report: CommissionReport,
    pub lines: Vec<CommissionLine>,
    pub grand_total: String,
    /// `100,00%` when any commission was earned, `0,00%` otherwise.
    pub grand_total_share: String,
}

/// Builds the commission table from the recorded sales.
pub fn commission_report(config: &DeskConfig, sales: &SalesState) -> CommissionReportResponse {
    debug!(sellers = sales.totals().len(), "commission_report command");

    let report = sales.totals().report();
    let lines = report
        .rows
        .iter()
        .map(|row| CommissionLine {
            seller: row.seller.clone(),
            commission: config.format_money(row.total),
            share: config.currency.format_percent(row.share_percent, 2),
        })
        .collect();
    let grand_total = config.format_money(report.grand_total);
    let grand_total_share = if report.grand_total.is_positive() {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    CommissionReportResponse {
        grand_total_share: config.currency.format_percent(grand_total_share, 2),
        report,
        lines,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use crate::state::Currency;
    use tally_core::{Money, Sale};

    #[test]
    fn test_demo_report() {
        let config = DeskConfig::default();
        let sales = SalesState::new(SeedData::demo().sales).unwrap();

        let response = commission_report(&config, &sales);

        assert_eq!(response.lines.len(), 4);
        assert_eq!(response.lines[0].seller, "Ana Paula");
        assert_eq!(response.lines[0].commission, "R$ 97,50");
        assert_eq!(response.lines[3].seller, "David Rocha");
        assert_eq!(response.lines[3].commission, "R$ 0,00");
        assert_eq!(response.lines[3].share, "0,00%");
        assert_eq!(response.grand_total, "R$ 169,50");
        assert_eq!(response.grand_total_share, "100,00%");
    }

    #[test]
    fn test_empty_sales() {
        let config = DeskConfig {
            currency: Currency::Usd,
            ..DeskConfig::default()
        };
        let response = commission_report(&config, &SalesState::default());
        assert!(response.lines.is_empty());
        assert_eq!(response.grand_total, "$0.00");
        assert_eq!(response.grand_total_share, "0.00%");
    }

    #[test]
    fn test_zero_commission_share() {
        let config = DeskConfig::default();
        let sales = SalesState::new(vec![Sale::new("David Rocha", Money::from_major(50))]).unwrap();

        let response = commission_report(&config, &sales);
        assert_eq!(response.lines[0].share, "0,00%");
        assert_eq!(response.grand_total, "R$ 0,00");
        assert_eq!(response.grand_total_share, "0,00%");
    }
}
