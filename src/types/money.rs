//! Monetary amount type for the transfer engine
//!
//! `Money` wraps a `rust_decimal::Decimal` and enforces the single invariant
//! the domain cares about: an amount can never be *constructed* negative.
//! Arithmetic results are deliberately unchecked against that invariant:
//! subtraction may go below zero, and callers must verify sufficiency before
//! committing a difference as a new balance.

use std::fmt;
use std::ops::{Add, Sub};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::TransferError;

/// Immutable monetary amount
///
/// Value semantics throughout: every operation produces a new `Money`.
/// Equality, ordering, and hashing follow the numeric value, so `1.0` and
/// `1.00` are the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// The zero amount
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Create a `Money` from a decimal amount
    ///
    /// # Returns
    ///
    /// * `Ok(Money)` - If the amount is zero or positive
    /// * `Err(TransferError::InvalidAmount)` - If the amount is negative
    pub fn of(amount: Decimal) -> Result<Self, TransferError> {
        if amount < Decimal::ZERO {
            return Err(TransferError::invalid_amount(amount));
        }
        Ok(Money(amount))
    }

    /// The underlying decimal value
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl Add for Money {
    type Output = Money;

    /// Sum of two amounts; never negative since both inputs are non-negative
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    /// Difference of two amounts
    ///
    /// The result may be negative. The invariant is enforced at construction
    /// only; whoever trusts a difference as a new balance must first check
    /// that `self >= rhs`.
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = TransferError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Money::of(amount)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Decimal {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(Decimal::ZERO)]
    #[case::positive(Decimal::new(10000, 4))]
    #[case::fractional(Decimal::new(105, 1))]
    fn test_of_accepts_non_negative_amounts(#[case] amount: Decimal) {
        let money = Money::of(amount).unwrap();
        assert_eq!(money.amount(), amount);
    }

    #[rstest]
    #[case::one_cent(Decimal::new(-1, 2))]
    #[case::large(Decimal::new(-1_000_000, 0))]
    fn test_of_rejects_negative_amounts(#[case] amount: Decimal) {
        let result = Money::of(amount);
        assert!(matches!(
            result,
            Err(TransferError::InvalidAmount { amount: a }) if a == amount
        ));
    }

    #[test]
    fn test_add_produces_sum() {
        let a = Money::of(Decimal::new(1000, 1)).unwrap(); // 100.0
        let b = Money::of(Decimal::new(105, 1)).unwrap(); // 10.5
        assert_eq!(a + b, Money::of(Decimal::new(1105, 1)).unwrap());
    }

    #[test]
    fn test_subtract_may_go_negative() {
        let a = Money::of(Decimal::new(100, 0)).unwrap();
        let b = Money::of(Decimal::new(1505, 1)).unwrap(); // 150.5
        let difference = a - b;
        assert_eq!(difference.amount(), Decimal::new(-505, 1));
    }

    #[test]
    fn test_equality_is_by_numeric_value() {
        let a = Money::of(Decimal::new(10, 1)).unwrap(); // 1.0
        let b = Money::of(Decimal::new(100, 2)).unwrap(); // 1.00
        assert_eq!(a, b);
    }

    #[test]
    fn test_ordering_is_by_numeric_value() {
        let small = Money::of(Decimal::new(5, 0)).unwrap();
        let large = Money::of(Decimal::new(6, 0)).unwrap();
        assert!(small < large);
        assert!(large > Money::ZERO);
    }

    #[test]
    fn test_try_from_revalidates() {
        assert!(Money::try_from(Decimal::new(-1, 2)).is_err());
        assert!(Money::try_from(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display_shows_decimal_value() {
        let money = Money::of(Decimal::new(895, 1)).unwrap();
        assert_eq!(money.to_string(), "89.5");
    }
}
