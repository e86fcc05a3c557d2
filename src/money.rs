// 💵 Amount - Exact two-decimal money values
//
// Receipt prices and totals arrive as strings like "6.49". They are parsed
// straight into integer cents so the scoring checks ("round dollar",
// "multiple of 0.25", "ceil(price * 0.2)") never touch floating point.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// AMOUNT
// ============================================================================

/// A non-negative amount held as integer cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Creates an amount from cents.
    #[inline]
    pub const fn from_cents(cents: u64) -> Self {
        Amount(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// Whole-dollar part.
    #[inline]
    pub const fn dollars(&self) -> u64 {
        self.0 / 100
    }

    /// Fractional part in cents (0-99).
    #[inline]
    pub const fn cents_part(&self) -> u64 {
        self.0 % 100
    }

    /// True when the fractional part is `.00`.
    pub const fn is_whole_dollar(&self) -> bool {
        self.cents_part() == 0
    }

    /// True when the amount is an exact multiple of `step` (also in cents).
    ///
    /// A zero step never divides anything.
    pub const fn is_multiple_of(&self, step: Amount) -> bool {
        step.0 != 0 && self.0 % step.0 == 0
    }

    /// Multiplies by `numerator / denominator` and rounds any remainder up
    /// to the next whole dollar.
    ///
    /// ## Example
    /// `6.49 * 1/5 = 1.298` rounds up to `2`.
    pub const fn scaled_ceil_dollars(&self, numerator: u64, denominator: u64) -> u64 {
        // cents * n / d is in cents; dividing by 100 more gives dollars
        let divisor = denominator * 100;
        let scaled = self.0 * numerator;
        scaled / divisor + if scaled % divisor == 0 { 0 } else { 1 }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.dollars(), self.cents_part())
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// PARSING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("expected a decimal with exactly two fractional digits, e.g. \"6.49\"")]
    Format,

    #[error("amount is too large")]
    Overflow,
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses `^\d+\.\d{2}$`. Signs, exponents, and whitespace are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (whole, frac) = s.split_once('.').ok_or(AmountError::Format)?;

        if whole.is_empty()
            || frac.len() != 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AmountError::Format);
        }

        let dollars = whole
            .bytes()
            .try_fold(0u64, |acc, b| {
                acc.checked_mul(10)?.checked_add(u64::from(b - b'0'))
            })
            .ok_or(AmountError::Overflow)?;
        let cents = frac
            .bytes()
            .fold(0u64, |acc, b| acc * 10 + u64::from(b - b'0'));

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            // keep headroom so scaling by small rule factors cannot overflow
            .filter(|c| *c <= u64::MAX / 1_000)
            .map(Amount)
            .ok_or(AmountError::Overflow)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_valid_amounts() {
        assert_eq!(amount("6.49").cents(), 649);
        assert_eq!(amount("0.00").cents(), 0);
        assert_eq!(amount("100.00").cents(), 10_000);
        assert_eq!(amount("007.05").cents(), 705);
    }

    #[test]
    fn test_parse_rejects_malformed_amounts() {
        for bad in ["", "6", "6.4", "6.490", ".49", "-6.49", "+6.49", "6,49", " 6.49", "6.49 ", "1e2.00", "six.49"] {
            assert_eq!(bad.parse::<Amount>(), Err(AmountError::Format), "input {:?}", bad);
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        assert_eq!(
            "99999999999999999999.00".parse::<Amount>(),
            Err(AmountError::Overflow)
        );
    }

    #[test]
    fn test_display_round_trips_format() {
        assert_eq!(amount("6.49").to_string(), "6.49");
        assert_eq!(amount("10.00").to_string(), "10.00");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn test_whole_dollar() {
        assert!(amount("100.00").is_whole_dollar());
        assert!(amount("0.00").is_whole_dollar());
        assert!(!amount("100.01").is_whole_dollar());
    }

    #[test]
    fn test_multiple_of_quarter() {
        let quarter = Amount::from_cents(25);
        for ok in ["10.25", "10.50", "10.75", "10.00"] {
            assert!(amount(ok).is_multiple_of(quarter), "{}", ok);
        }
        assert!(!amount("10.10").is_multiple_of(quarter));
        assert!(!amount("10.00").is_multiple_of(Amount::ZERO));
    }

    #[test]
    fn test_scaled_ceil_rounds_up() {
        // 6.49 * 0.2 = 1.298
        assert_eq!(amount("6.49").scaled_ceil_dollars(1, 5), 2);
        // 5.00 * 0.2 = 1.0 exactly, no rounding
        assert_eq!(amount("5.00").scaled_ceil_dollars(1, 5), 1);
        // 5.01 * 0.2 = 1.002
        assert_eq!(amount("5.01").scaled_ceil_dollars(1, 5), 2);
        assert_eq!(amount("0.00").scaled_ceil_dollars(1, 5), 0);
        assert_eq!(amount("0.01").scaled_ceil_dollars(1, 5), 1);
    }
}
