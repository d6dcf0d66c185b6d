//! # Money Module
//!
//! Provides the `Money` type for cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The products API sends prices as JSON numbers (179.9, 139.9).         │
//! │  Summing those as f64 drifts:                                          │
//! │                                                                         │
//! │     139.9 * 3 = 419.70000000000005                                      │
//! │                                                                         │
//! │  Prices are converted to integer cents ONCE, at the edge, then every   │
//! │  line total and subtotal is exact integer math.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rocketshoes_core::money::Money;
//!
//! let price = Money::from_decimal(139.9);
//! assert_eq!(price.cents(), 13990);
//!
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.to_string(), "R$ 419,70");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents (centavos).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// let price = Money::from_cents(17990);
    /// assert_eq!(price.cents(), 17990);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal price as sent by the API into cents.
    ///
    /// Rounds half away from zero, so `139.9` (stored as 139.8999…) is
    /// 13990 and not 13989. Non-finite input is treated as zero.
    pub fn from_decimal(value: f64) -> Self {
        if !value.is_finite() {
            return Money::zero();
        }
        Money((value * 100.0).round() as i64)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-currency portion (reais).
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use rocketshoes_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(17990);
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 35980);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Formats as Brazilian Real: `R$ 1.234,56`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.reais().abs().to_string();

        // Group thousands with '.'
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        write!(f, "{}R$ {},{:02}", sign, grouped, self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i64) -> Self::Output {
        self.multiply_quantity(rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds_to_cents() {
        assert_eq!(Money::from_decimal(139.9).cents(), 13990);
        assert_eq!(Money::from_decimal(179.9).cents(), 17990);
        assert_eq!(Money::from_decimal(0.005).cents(), 1);
        assert_eq!(Money::from_decimal(f64::NAN).cents(), 0);
    }

    #[test]
    fn test_display_brl() {
        assert_eq!(Money::from_cents(13990).to_string(), "R$ 139,90");
        assert_eq!(Money::from_cents(123456).to_string(), "R$ 1.234,56");
        assert_eq!(Money::from_cents(100000000).to_string(), "R$ 1.000.000,00");
        assert_eq!(Money::from_cents(5).to_string(), "R$ 0,05");
        assert_eq!(Money::from_cents(-550).to_string(), "-R$ 5,50");
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 350);
    }

    #[test]
    fn test_multiply() {
        let price = Money::from_cents(13990);
        assert_eq!((price * 3).cents(), 41970);
        assert_eq!(price.multiply_quantity(3), price * 3);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_decimal(1e17);
        assert_eq!(huge.cents(), i64::MAX);
        assert_eq!(huge.multiply_quantity(2).cents(), i64::MAX);
        assert_eq!((huge + Money::from_cents(1)).cents(), i64::MAX);

        let total: Money = [huge, huge].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        let mut running = Money::from_cents(i64::MAX - 1);
        running += Money::from_cents(10);
        assert_eq!(running.cents(), i64::MAX);
        assert_eq!(Money::from_cents(-5).multiply_quantity(i64::MAX).cents(), i64::MIN);
    }
}
