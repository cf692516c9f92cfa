//! # Sales State
//!
//! The recorded sales. Read-only after initialization, so no mutex needed;
//! totals are aggregated once at startup.

use tally_core::{aggregate_commissions, CommissionTotals, CoreResult, Sale};

#[derive(Debug, Clone, Default)]
pub struct SalesState {
    sales: Vec<Sale>,
    totals: CommissionTotals,
}

impl SalesState {
    /// Records the sales and aggregates their commissions.
    ///
    /// ## Errors
    /// `InvalidInput` when the commission total overflows.
    pub fn new(sales: Vec<Sale>) -> CoreResult<Self> {
        let totals = aggregate_commissions(&sales)?;
        Ok(SalesState { sales, totals })
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Commission per seller.
    pub fn totals(&self) -> &CommissionTotals {
        &self.totals
    }
}
