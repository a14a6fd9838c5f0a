//! Credit amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal`. Amounts are bounded by what a
//! balance column can hold exactly: at most 4 decimal places and at most
//! `MAX_BALANCE`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places a balance keeps.
pub const BALANCE_SCALE: u32 = 4;

/// Largest balance a wallet may hold, `999_999_999_999_999.9999`.
///
/// Matches `NUMERIC(19, 4)`. A single credit can never exceed it either.
pub const MAX_BALANCE: Decimal =
    Decimal::from_parts(0x89E7_FFFF, 0x8AC7_2304, 0, false, BALANCE_SCALE);

/// Why a decimal is not a valid credit amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAmount {
    /// Below zero.
    #[error("credit amount cannot be negative: {0}")]
    Negative(Decimal),

    /// More fractional digits than a balance stores.
    #[error("credit amount has more than 4 decimal places: {0}")]
    TooPrecise(Decimal),

    /// Larger than any balance can hold.
    #[error("credit amount exceeds the maximum balance: {0}")]
    TooLarge(Decimal),
}

/// A non-negative amount to credit into a wallet.
///
/// Zero is allowed and credits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct CreditAmount(Decimal);

impl CreditAmount {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a credit amount.
    ///
    /// Trailing zeros do not count towards the scale, so `1.50000` is
    /// accepted while `0.00001` is not.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if `amount` is negative, has more than
    /// `BALANCE_SCALE` significant decimal places, or exceeds `MAX_BALANCE`.
    pub fn new(amount: Decimal) -> Result<Self, InvalidAmount> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(InvalidAmount::Negative(amount));
        }
        // -0 normalizes to 0
        let amount = amount.abs();

        if amount.normalize().scale() > BALANCE_SCALE {
            return Err(InvalidAmount::TooPrecise(amount));
        }
        if amount > MAX_BALANCE {
            return Err(InvalidAmount::TooLarge(amount));
        }
        Ok(Self(amount))
    }

    /// Returns the inner decimal.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Adds this amount to `balance`, or `None` if the result would exceed
    /// `MAX_BALANCE`.
    #[must_use]
    pub fn credit_to(self, balance: Decimal) -> Option<Decimal> {
        balance
            .checked_add(self.0)
            .filter(|total| *total <= MAX_BALANCE)
    }
}

impl TryFrom<Decimal> for CreditAmount {
    type Error = InvalidAmount;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CreditAmount> for Decimal {
    fn from(amount: CreditAmount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for CreditAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_amount_accepted() {
        let amount = CreditAmount::new(dec!(50.25)).unwrap();
        assert_eq!(amount.value(), dec!(50.25));
        assert!(!amount.is_zero());
    }

    #[test]
    fn test_zero_amount_accepted() {
        assert!(CreditAmount::new(Decimal::ZERO).unwrap().is_zero());
        assert_eq!(CreditAmount::ZERO.value(), Decimal::ZERO);
    }

    #[test]
    fn test_negative_zero_normalized() {
        let mut neg_zero = Decimal::ZERO;
        neg_zero.set_sign_negative(true);
        let amount = CreditAmount::new(neg_zero).unwrap();
        assert!(!amount.value().is_sign_negative());
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert_eq!(
            CreditAmount::new(dec!(-10)),
            Err(InvalidAmount::Negative(dec!(-10)))
        );
        assert_eq!(
            CreditAmount::new(dec!(-0.0001)).unwrap_err().to_string(),
            "credit amount cannot be negative: -0.0001"
        );
    }

    #[test]
    fn test_max_balance_matches_column() {
        assert_eq!(MAX_BALANCE, dec!(999999999999999.9999));
        assert_eq!(MAX_BALANCE.scale(), BALANCE_SCALE);
    }

    #[test]
    fn test_four_decimal_places_accepted() {
        assert_eq!(CreditAmount::new(dec!(0.0001)).unwrap().value(), dec!(0.0001));
        assert_eq!(CreditAmount::new(dec!(1.50000)).unwrap().value(), dec!(1.5));
    }

    #[test]
    fn test_five_decimal_places_rejected() {
        assert_eq!(
            CreditAmount::new(dec!(0.00001)),
            Err(InvalidAmount::TooPrecise(dec!(0.00001)))
        );
        assert_eq!(
            CreditAmount::new(dec!(0.00006)),
            Err(InvalidAmount::TooPrecise(dec!(0.00006)))
        );
    }

    #[test]
    fn test_maximum_accepted_and_beyond_rejected() {
        assert_eq!(CreditAmount::new(MAX_BALANCE).unwrap().value(), MAX_BALANCE);
        assert_eq!(
            CreditAmount::new(dec!(1000000000000000)),
            Err(InvalidAmount::TooLarge(dec!(1000000000000000)))
        );
        assert!(matches!(
            CreditAmount::new(Decimal::MAX),
            Err(InvalidAmount::TooLarge(_))
        ));
    }

    #[test]
    fn test_credit_to_is_checked() {
        let one = CreditAmount::new(dec!(1)).unwrap();
        assert_eq!(one.credit_to(dec!(2.5)), Some(dec!(3.5)));
        assert_eq!(one.credit_to(MAX_BALANCE), None);
        assert_eq!(one.credit_to(Decimal::MAX), None);
        assert_eq!(CreditAmount::ZERO.credit_to(MAX_BALANCE), Some(MAX_BALANCE));
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let amount: CreditAmount = serde_json::from_str("1.1").unwrap();
        assert_eq!(amount.value(), dec!(1.1));
        assert!(serde_json::from_str::<CreditAmount>("-1").is_err());
        assert!(serde_json::from_str::<CreditAmount>("0.00001").is_err());
        assert!(serde_json::from_str::<CreditAmount>("1e16").is_err());
    }
}
