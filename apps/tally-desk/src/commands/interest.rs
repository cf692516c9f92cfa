//! # Interest Commands
//!
//! Overdue interest calculator: principal and two dates in, breakdown out.

use chrono::NaiveDate;
use serde::Serialize;
use tally_core::interest::parse_optional_date;
use tally_core::validation::parse_amount;
use tally_core::{CoreError, Feedback, InterestPolicy, InterestResult};
use tracing::debug;
use ts_rs::TS;

use super::timed;
use crate::error::AppError;
use crate::state::DeskConfig;

/// Calculation result plus a display breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InterestResponse {
    pub result: InterestResult,
    pub feedback: Feedback,
}

/// Computes fine and interest for a payment.
///
/// ## Arguments
/// * `principal` - Amount as typed (`"500.00"` or `"500,00"`)
/// * `due_date` / `payment_date` - Dates as typed; blank means missing
///
/// ## Returns
/// `success` feedback when paid on time, `danger` feedback with the
/// breakdown when overdue. Both echo the dates in the currency's locale.
///
/// ## Errors
/// `INVALID_INPUT` for a missing, non-positive or too large principal and
/// for missing or unparseable dates.
pub fn calculate_interest(
    config: &DeskConfig,
    principal: &str,
    due_date: Option<&str>,
    payment_date: Option<&str>,
) -> Result<InterestResponse, AppError> {
    debug!(principal = %principal, ?due_date, ?payment_date, "calculate_interest command");

    let policy = InterestPolicy::default();
    let amount = parse_amount("principal", principal)
        .map_err(|err| CoreError::invalid_input("principal", err.to_string()))?;
    let due = parse_optional_date("due date", due_date)?;
    let paid = parse_optional_date("payment date", payment_date)?;

    let result = policy.compute(amount, due, paid)?;
    let money = |m| config.format_money(m);
    let date = |d: Option<NaiveDate>| d.map(|d| config.currency.format_date(d)).unwrap_or_default();
    let (due, paid) = (date(due), date(paid));

    let feedback = match &result {
        InterestResult::OnTime { principal } => Feedback::success(format!(
            "Paid on time. No fine or interest. Amount due: {}. Due {}, paid {}.",
            money(*principal),
            due,
            paid
        )),
        InterestResult::Overdue {
            days_overdue,
            fixed_fine,
            accrued_interest,
            total_due,
        } => Feedback::danger(format!(
            "Paid {} day(s) late (due {}, paid {}).\n\
             Principal: {}\n\
             Fine ({}): {}\n\
             Interest ({} per day): {}\n\
             Total due: {}",
            days_overdue,
            due,
            paid,
            money(amount),
            config.currency.format_percent(policy.fine_rate.percentage(), 2),
            money(*fixed_fine),
            config.currency.format_percent(policy.daily_rate().percentage(), 4),
            money(*accrued_interest),
            money(*total_due)
        )),
    };

    Ok(InterestResponse {
        result,
        feedback: timed(config, feedback),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::Currency;
    use tally_core::{Money, Severity};

    #[test]
    fn test_on_time() {
        let config = DeskConfig::default();
        let response =
            calculate_interest(&config, "500", Some("2024-03-01"), Some("2024-03-01")).unwrap();
        assert!(!response.result.is_overdue());
        assert_eq!(response.feedback.severity, Severity::Success);
        assert!(response.feedback.message.contains("R$ 500,00"));
        assert!(response
            .feedback
            .message
            .ends_with("Due 01/03/2024, paid 01/03/2024."));
    }

    #[test]
    fn test_seven_days_late() {
        let config = DeskConfig::default();
        let response =
            calculate_interest(&config, "500,00", Some("01/03/2024"), Some("2024-03-08")).unwrap();

        assert_eq!(response.feedback.severity, Severity::Danger);
        assert_eq!(response.result.total_due().round_cents(), Money::from_cents(51117));

        let message = &response.feedback.message;
        assert!(message.starts_with("Paid 7 day(s) late (due 01/03/2024, paid 08/03/2024)."));
        assert!(message.contains("Fine (2,00%): R$ 10,00"));
        assert!(message.contains("Interest (0,0333% per day): R$ 1,17"));
        assert!(message.contains("Total due: R$ 511,17"));
    }

    #[test]
    fn test_invalid_inputs() {
        let config = DeskConfig::default();

        let err = calculate_interest(&config, "-5", Some("2024-03-01"), Some("2024-03-08"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = calculate_interest(&config, "abc", Some("2024-03-01"), Some("2024-03-08"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = calculate_interest(&config, "500", None, Some("2024-03-08")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);

        let err = calculate_interest(&config, "500", Some("yesterday"), Some("2024-03-08"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_dates_follow_currency_locale() {
        let config = DeskConfig {
            currency: Currency::Usd,
            ..DeskConfig::default()
        };
        let response =
            calculate_interest(&config, "500", Some("2024-03-01"), Some("2024-03-08")).unwrap();
        assert!(response
            .feedback
            .message
            .starts_with("Paid 7 day(s) late (due 03/01/2024, paid 03/08/2024)."));
    }

    #[test]
    fn test_too_large_principal() {
        let config = DeskConfig::default();

        // Principal plus fine overflows after a single day.
        let err = calculate_interest(
            &config,
            "79228162514264337593543950335",
            Some("2024-03-01"),
            Some("2024-03-02"),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.message, "Invalid input for principal: too large");

        // Interest over the widest date range overflows.
        let err = calculate_interest(
            &config,
            "100000000000000000000000000",
            Some("0001-01-01"),
            Some("9999-12-31"),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
    }
}
