//! Fixed-point decimal types for prices and quantities
//!
//! Thin wrappers over `rust_decimal::Decimal` for deterministic arithmetic
//! (no floating-point errors). `Price` is totally ordered and usable as a
//! price-ladder key; `Quantity` is non-negative by construction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// An exact decimal price.
///
/// `Price::ZERO` is the market-order sentinel: an order carrying it has no
/// limit price and crosses at whatever the contra side offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The market-order sentinel.
    pub const ZERO: Price = Price(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_str(s: &str) -> Result<Self, rust_decimal::Error> {
        s.parse::<Decimal>().map(Self)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative order quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    pub const ZERO: Quantity = Quantity(Decimal::ZERO);

    /// Wrap a decimal, rejecting negative values.
    pub fn try_new(value: Decimal) -> Option<Self> {
        if value.is_sign_negative() && !value.is_zero() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_u64(value: u64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_str(s: &str) -> Result<Self, rust_decimal::Error> {
        let value = s.parse::<Decimal>()?;
        Self::try_new(value)
            .ok_or_else(|| rust_decimal::Error::ErrorString("quantity must not be negative".into()))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract, returning `None` if the result would go negative.
    pub fn checked_sub(&self, other: Quantity) -> Option<Self> {
        Self::try_new(self.0 - other.0)
    }
}

impl Add for Quantity {
    type Output = Quantity;

    fn add(self, rhs: Quantity) -> Quantity {
        Quantity(self.0 + rhs.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_ordering() {
        let low = Price::from_str("9.99").unwrap();
        let high = Price::from_u64(10);
        assert!(low < high);
        assert_eq!(high, Price::from_str("10.00").unwrap());
    }

    #[test]
    fn test_price_market_sentinel() {
        assert!(Price::ZERO.is_zero());
        assert!(!Price::from_u64(1).is_zero());
        assert!(!Price::ZERO.is_negative());
    }

    #[test]
    fn test_price_negative() {
        let px = Price::from_str("-1.50").unwrap();
        assert!(px.is_negative());
    }

    #[test]
    fn test_quantity_rejects_negative() {
        assert!(Quantity::try_new(Decimal::from(-1)).is_none());
        assert!(Quantity::from_str("-2").is_err());
        assert_eq!(Quantity::try_new(Decimal::ZERO), Some(Quantity::ZERO));
    }

    #[test]
    fn test_quantity_arithmetic() {
        let a = Quantity::from_u64(100);
        let b = Quantity::from_u64(60);

        assert_eq!(a.checked_sub(b), Some(Quantity::from_u64(40)));
        assert_eq!(b.checked_sub(a), None);
        assert_eq!(a + b, Quantity::from_u64(160));
    }

    #[test]
    fn test_quantity_min_for_fills() {
        let taker = Quantity::from_str("0.5").unwrap();
        let maker = Quantity::from_str("1.0").unwrap();
        assert_eq!(std::cmp::min(taker, maker), taker);
    }

    #[test]
    fn test_serialization_as_string() {
        let px = Price::from_str("10.25").unwrap();
        let json = serde_json::to_string(&px).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(px, back);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn quantity_checked_sub_never_negative(a in 0u64..1_000_000, b in 0u64..1_000_000) {
                let qa = Quantity::from_u64(a);
                let qb = Quantity::from_u64(b);
                match qa.checked_sub(qb) {
                    Some(diff) => prop_assert_eq!(diff, Quantity::from_u64(a - b)),
                    None => prop_assert!(a < b),
                }
            }

            #[test]
            fn quantity_add_commutes(a in 0u64..1_000_000, b in 0u64..1_000_000) {
                let qa = Quantity::from_u64(a);
                let qb = Quantity::from_u64(b);
                prop_assert_eq!(qa + qb, qb + qa);
            }
        }
    }
}
