//! # Overdue Interest Calculator
//!
//! Late-payment charges on a bill: a one-time fine plus pro-rata daily
//! interest.
//!
//! ## Rules (default policy)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  paid on or before due date ──► OnTime { principal }                    │
//! │                                                                         │
//! │  paid after due date:                                                   │
//! │    days_overdue     = payment_date - due_date   (whole calendar days)   │
//! │    fixed_fine       = principal × 2%            (once, however late)    │
//! │    daily_rate       = 1% / 30                   (1% a month, pro rata)  │
//! │    accrued_interest = principal × daily_rate × days_overdue             │
//! │    total_due        = principal + fixed_fine + accrued_interest         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dates carry no time of day. Inputs that do have one (timestamps) are
//! truncated to their date by [`parse_date`], which is the same as comparing
//! at midnight. Calendar-date subtraction always yields whole days, so
//! there are no daylight-saving artefacts to round away.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Rate;

// =============================================================================
// Policy
// =============================================================================

/// Late-payment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestPolicy {
    /// One-time fine applied as soon as a payment is late.
    pub fine_rate: Rate,
    /// Interest per month of delay.
    pub monthly_rate: Rate,
    /// Month length used to prorate `monthly_rate` per day.
    pub days_per_month: u32,
}

impl Default for InterestPolicy {
    /// 2% fine, 1% a month over a 30-day month.
    fn default() -> Self {
        InterestPolicy {
            fine_rate: Rate::from_bps(200),
            monthly_rate: Rate::from_bps(100),
            days_per_month: 30,
        }
    }
}

impl InterestPolicy {
    /// Interest per day of delay.
    pub fn daily_rate(&self) -> Rate {
        self.monthly_rate.per_period(self.days_per_month)
    }

    /// Computes the charges for paying `principal` on `payment_date` when it
    /// was due on `due_date`.
    ///
    /// ## Errors
    /// `InvalidInput` when the principal is not positive, a date is missing,
    /// or the charges do not fit in a `Decimal`.
    pub fn compute(
        &self,
        principal: Money,
        due_date: Option<NaiveDate>,
        payment_date: Option<NaiveDate>,
    ) -> CoreResult<InterestResult> {
        if !principal.is_positive() {
            return Err(CoreError::invalid_input("principal", "must be greater than zero"));
        }
        let due_date = due_date.ok_or_else(|| CoreError::invalid_input("due date", "is required"))?;
        let payment_date =
            payment_date.ok_or_else(|| CoreError::invalid_input("payment date", "is required"))?;

        if payment_date <= due_date {
            return Ok(InterestResult::OnTime { principal });
        }

        let days_overdue = (payment_date - due_date).num_days();
        let too_large = || CoreError::invalid_input("principal", "too large");

        let fixed_fine = principal.checked_apply_rate(self.fine_rate).ok_or_else(too_large)?;
        let accrued_interest = principal
            .checked_apply_rate(self.daily_rate())
            .and_then(|daily| daily.checked_mul(Decimal::from(days_overdue)))
            .ok_or_else(too_large)?;
        let total_due = principal
            .checked_add(fixed_fine)
            .and_then(|sum| sum.checked_add(accrued_interest))
            .ok_or_else(too_large)?;

        Ok(InterestResult::Overdue {
            days_overdue,
            fixed_fine,
            accrued_interest,
            total_due,
        })
    }
}

// =============================================================================
// Result
// =============================================================================

/// Outcome of an interest calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum InterestResult {
    /// Paid on or before the due date: no charges.
    OnTime {
        #[ts(as = "String")]
        principal: Money,
    },
    /// Paid late.
    Overdue {
        #[serde(rename = "daysOverdue")]
        days_overdue: i64,
        #[serde(rename = "fixedFine")]
        #[ts(as = "String")]
        fixed_fine: Money,
        #[serde(rename = "accruedInterest")]
        #[ts(as = "String")]
        accrued_interest: Money,
        #[serde(rename = "totalDue")]
        #[ts(as = "String")]
        total_due: Money,
    },
}

impl InterestResult {
    pub fn is_overdue(&self) -> bool {
        matches!(self, InterestResult::Overdue { .. })
    }

    /// Amount the payer owes in total.
    pub fn total_due(&self) -> Money {
        match self {
            InterestResult::OnTime { principal } => *principal,
            InterestResult::Overdue { total_due, .. } => *total_due,
        }
    }
}

/// [`InterestPolicy::compute`] under the default policy.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tally_core::interest::{compute_interest, InterestResult};
/// use tally_core::Money;
///
/// let due = NaiveDate::from_ymd_opt(2024, 3, 1);
/// let paid = NaiveDate::from_ymd_opt(2024, 3, 8);
/// let result = compute_interest(Money::from_major(500), due, paid).unwrap();
///
/// match result {
///     InterestResult::Overdue { days_overdue, fixed_fine, .. } => {
///         assert_eq!(days_overdue, 7);
///         assert_eq!(fixed_fine, Money::from_major(10));
///     }
///     InterestResult::OnTime { .. } => unreachable!(),
/// }
/// ```
pub fn compute_interest(
    principal: Money,
    due_date: Option<NaiveDate>,
    payment_date: Option<NaiveDate>,
) -> CoreResult<InterestResult> {
    InterestPolicy::default().compute(principal, due_date, payment_date)
}

// =============================================================================
// Date Parsing
// =============================================================================

/// Parses a user-supplied date and drops any time of day.
///
/// ## Accepted Forms
/// - `2024-03-08` (ISO date, what HTML date inputs send)
/// - `08/03/2024` (day/month/year)
/// - `2024-03-08T17:45:00` or `2024-03-08 17:45`
/// - `2024-03-08T17:45:00-03:00` (RFC 3339; the local date is kept)
///
/// ## Errors
/// `InvalidInput` for an empty or unrecognised value.
pub fn parse_date(field: &str, input: &str) -> CoreResult<NaiveDate> {
    let input = input.trim();

    if input.is_empty() {
        return Err(CoreError::invalid_input(field, "is required"));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%d/%m/%Y") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.naive_local().date());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(timestamp.date());
        }
    }

    Err(CoreError::invalid_input(
        field,
        format!("'{}' is not a valid date", input),
    ))
}

/// Parses an optional date field: blank means missing.
pub fn parse_optional_date(field: &str, input: Option<&str>) -> CoreResult<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(field, value).map(Some),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
