//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    499.99 * 0.01 = 4.9998999999999995  ❌ WRONG!                         │
//! │                                                                         │
//! │  Commission tiers need sub-cent precision (1% of 499.99 = 4.9999),      │
//! │  so integer cents are not enough either.                                │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    499.99 * 0.01 = 4.9999 exactly                                       │
//! │    Rounding happens once, at display time                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tally_core::money::Money;
//!
//! let price = Money::from_cents(49999); // 499.99
//! let total = price + Money::from_cents(1); // 500.00
//! assert_eq!(total, Money::from_cents(50000));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in major units (reais, dollars) with exact decimals.
///
/// ## Design Decisions
/// - **Decimal (signed)**: negative values are representable; the engines
///   decide what a negative amount means
/// - **No rounding on arithmetic**: intermediate results keep full precision
/// - **Serialized as a string**: `"499.99"`, never a float
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents (hundredths of the major unit).
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.amount(), Decimal::new(1099, 2));
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a rate without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::types::Rate;
    /// use rust_decimal::Decimal;
    ///
    /// let sale = Money::from_cents(49999);
    /// let commission = sale.apply_rate(Rate::from_bps(100)); // 1%
    /// assert_eq!(commission.amount(), Decimal::new(49999, 4)); // 4.9999
    /// ```
    #[inline]
    pub fn apply_rate(&self, rate: Rate) -> Money {
        Money(self.0 * rate.fraction())
    }

    /// Like [`Money::apply_rate`], but `None` when the product does not fit
    /// in a `Decimal`.
    #[inline]
    pub fn checked_apply_rate(&self, rate: Rate) -> Option<Money> {
        self.0.checked_mul(rate.fraction()).map(Money)
    }

    /// Addition that returns `None` instead of panicking on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Multiplication by a plain factor, `None` on overflow.
    #[inline]
    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Sums a sequence of amounts, `None` as soon as a partial sum
    /// overflows.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let amounts = [Money::from_cents(150), Money::from_cents(250)];
    /// assert_eq!(Money::checked_sum(amounts), Some(Money::from_major(4)));
    /// assert_eq!(Money::checked_sum([Money::new(Decimal::MAX), Money::from_major(1)]), None);
    /// ```
    pub fn checked_sum<I: IntoIterator<Item = Money>>(amounts: I) -> Option<Money> {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |total, amount| total.checked_add(amount))
    }

    /// Rounds to cents, half away from zero.
    ///
    /// Only used for display and percentages; the engines never round.
    pub fn round_cents(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Money(rounded)
    }

    /// Returns `self / whole` as a fraction, or zero when `whole` is zero.
    pub fn ratio_of(&self, whole: Money) -> Decimal {
        if whole.is_zero() {
            Decimal::ZERO
        } else {
            self.0 / whole.0
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to cents without a currency symbol.
///
/// ## Note
/// Currency symbols and separators are a presentation concern; the desk
/// formats money according to its configured currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.round_cents().0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a plain decimal factor (e.g., a day count).
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: i64) -> Self {
        Money(self.0 * Decimal::from(factor))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
        assert_eq!(Money::from_major(500).amount(), dec!(500));
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_major(25).to_string(), "25.00");
        assert_eq!(Money::new(dec!(4.9999)).to_string(), "5.00");
        assert_eq!(Money::new(dec!(1.165)).to_string(), "1.17");
        assert_eq!(Money::new(dec!(-5.5)).to_string(), "-5.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!(a + b, Money::from_major(15));
        assert_eq!(a - b, Money::from_major(5));
        assert_eq!(a * 3_i64, Money::from_major(30));
        assert_eq!(a * dec!(0.5), Money::from_major(5));
    }

    #[test]
    fn test_apply_rate_is_exact() {
        let sale = Money::from_cents(49999);
        assert_eq!(sale.apply_rate(Rate::from_bps(100)).amount(), dec!(4.9999));
        assert_eq!(
            Money::from_major(500).apply_rate(Rate::from_bps(500)),
            Money::from_major(25)
        );
    }

    #[test]
    fn test_checked_sum() {
        let values = [Money::from_cents(150), Money::from_cents(250)];
        assert_eq!(Money::checked_sum(values), Some(Money::from_major(4)));
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));
    }

    #[test]
    fn test_checked_ops_report_overflow() {
        let max = Money::new(Decimal::MAX);

        assert_eq!(max.checked_add(Money::from_major(1)), None);
        assert_eq!(max.checked_mul(dec!(2)), None);
        assert_eq!(Money::checked_sum([max, Money::from_major(1)]), None);

        assert_eq!(max.checked_add(Money::zero()), Some(max));
        assert_eq!(
            Money::from_major(10).checked_mul(dec!(0.5)),
            Some(Money::from_major(5))
        );
        assert_eq!(
            Money::from_major(500).checked_apply_rate(Rate::from_bps(200)),
            Some(Money::from_major(10))
        );
    }

    #[test]
    fn test_ratio_of_zero_whole() {
        assert_eq!(Money::from_major(3).ratio_of(Money::zero()), Decimal::ZERO);
        assert_eq!(Money::from_major(1).ratio_of(Money::from_major(4)), dec!(0.25));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs(), Money::from_cents(100));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(49999)).unwrap();
        assert_eq!(json, "\"499.99\"");
    }
}
