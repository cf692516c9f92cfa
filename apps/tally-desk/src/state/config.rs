//! # Configuration State
//!
//! Stores desk configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tally_core::{Money, DEFAULT_FEEDBACK_DISPLAY_MS};
use tracing::warn;

/// Desk configuration.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// Currency (and locale) used for display.
    pub currency: Currency,

    /// Optional JSON seed file; demo data when absent.
    pub seed_path: Option<PathBuf>,

    /// How long feedback messages stay visible.
    pub feedback_display_ms: u64,

    /// Quantity used when a movement is entered without one.
    pub default_quantity: i64,

    /// Description used when a movement is entered without one.
    pub default_description: String,
}

/// Supported display currencies.
///
/// Each currency implies its locale: separators, symbol placement and date
/// order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Currency {
    /// Brazilian real: `R$ 1.234,56`, dates as `08/03/2024`
    #[default]
    Brl,

    /// US dollar: `$1,234.56`, dates as `03/08/2024`
    Usd,
}

impl Currency {
    /// Parses an ISO 4217 code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "BRL" => Some(Currency::Brl),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
        }
    }

    fn separators(&self) -> (char, char) {
        // (decimal, thousands)
        match self {
            Currency::Brl => (',', '.'),
            Currency::Usd => ('.', ','),
        }
    }

    /// Formats an amount rounded to cents.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::Money;
    /// use tally_desk::state::Currency;
    ///
    /// assert_eq!(Currency::Brl.format(Money::from_cents(123456)), "R$ 1.234,56");
    /// assert_eq!(Currency::Usd.format(Money::from_cents(123456)), "$1,234.56");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let rounded = amount.round_cents();
        let sign = if rounded.is_negative() { "-" } else { "" };
        let number = self.format_number(rounded.abs().amount(), 2);

        match self {
            Currency::Brl => format!("{}R$ {}", sign, number),
            Currency::Usd => format!("{}${}", sign, number),
        }
    }

    /// Formats a percentage with `decimals` places: `57,52%` / `57.52%`.
    pub fn format_percent(&self, percent: Decimal, decimals: u32) -> String {
        let sign = if percent.is_sign_negative() && !percent.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}%", sign, self.format_number(percent.abs(), decimals))
    }

    /// Formats a calendar date in the currency's locale.
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Currency::Brl => date.format("%d/%m/%Y").to_string(),
            Currency::Usd => date.format("%m/%d/%Y").to_string(),
        }
    }

    /// Non-negative number with grouped thousands and fixed decimals.
    fn format_number(&self, value: Decimal, decimals: u32) -> String {
        let (decimal_sep, thousands_sep) = self.separators();

        let mut rounded =
            value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(decimals);
        let text = rounded.to_string();

        let (whole, fraction) = match text.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (text.as_str(), None),
        };

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(thousands_sep);
            }
            grouped.push(digit);
        }

        match fraction {
            Some(fraction) => format!("{}{}{}", grouped, decimal_sep, fraction),
            None => grouped,
        }
    }
}

impl Default for DeskConfig {
    /// Returns default configuration.
    ///
    /// ## Default Values
    /// - Currency: BRL (R$)
    /// - Seed: built-in demo data
    /// - Feedback: 5000 ms
    /// - Movement defaults: 10 units, "Ajuste Padrão"
    fn default() -> Self {
        DeskConfig {
            currency: Currency::Brl,
            seed_path: None,
            feedback_display_ms: DEFAULT_FEEDBACK_DISPLAY_MS,
            default_quantity: 10,
            default_description: "Ajuste Padrão".to_string(),
        }
    }
}

impl DeskConfig {
    /// Creates a DeskConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TALLY_CURRENCY`: `BRL` or `USD`
    /// - `TALLY_SEED_PATH`: JSON seed file
    /// - `TALLY_FEEDBACK_MS`: feedback display time in milliseconds
    /// - `TALLY_DEFAULT_QUANTITY`: default movement quantity (positive)
    /// - `TALLY_DEFAULT_DESCRIPTION`: default movement description
    pub fn from_env() -> Self {
        DeskConfig::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key/value source. Invalid values are logged
    /// and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DeskConfig::default();

        if let Some(code) = lookup("TALLY_CURRENCY") {
            match Currency::from_code(&code) {
                Some(currency) => config.currency = currency,
                None => warn!(value = %code, "ignoring unsupported TALLY_CURRENCY"),
            }
        }

        if let Some(path) = lookup("TALLY_SEED_PATH") {
            if !path.trim().is_empty() {
                config.seed_path = Some(PathBuf::from(path));
            }
        }

        if let Some(raw) = lookup("TALLY_FEEDBACK_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.feedback_display_ms = ms,
                Err(_) => warn!(value = %raw, "ignoring invalid TALLY_FEEDBACK_MS"),
            }
        }

        if let Some(raw) = lookup("TALLY_DEFAULT_QUANTITY") {
            match raw.trim().parse::<i64>() {
                Ok(qty) if qty > 0 => config.default_quantity = qty,
                _ => warn!(value = %raw, "ignoring invalid TALLY_DEFAULT_QUANTITY"),
            }
        }

        if let Some(description) = lookup("TALLY_DEFAULT_DESCRIPTION") {
            if !description.trim().is_empty() {
                config.default_description = description;
            }
        }

        config
    }

    /// Formats money in the configured currency.
    pub fn format_money(&self, amount: Money) -> String {
        self.currency.format(amount)
    }
}
