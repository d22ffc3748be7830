//! Pricing Rules

use rust_decimal::{Decimal, prelude::FromPrimitive};
use thiserror::Error;

use crate::offers::OfferType;

/// Invalid arguments passed to a pricing rule.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RuleError {
    /// Quantity was below zero.
    #[error("quantity cannot be negative, got {0}")]
    NegativeQuantity(i64),

    /// Unit price was NaN.
    #[error("unit price cannot be NaN")]
    NanUnitPrice,

    /// Unit price was positive or negative infinity.
    #[error("unit price cannot be infinite")]
    InfiniteUnitPrice,

    /// Unit price was below zero.
    #[error("unit price cannot be negative, got {0}")]
    NegativeUnitPrice(f64),

    /// Unit price is finite but cannot be represented as a decimal, either
    /// because it is too large or because a nonzero price would become zero.
    #[error("unit price {0} cannot be represented as a decimal")]
    UnrepresentableUnitPrice(f64),

    /// The charge for the line does not fit in the decimal range.
    #[error("charge for {quantity} units at {unit_price} overflowed")]
    ChargeOverflow {
        /// Unit price of the line
        unit_price: Decimal,

        /// Quantity of the line
        quantity: i64,
    },
}

/// Validated unit price and the charge computed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Unit price as a decimal
    pub unit_price: Decimal,

    /// Amount charged for the line
    pub charged: Decimal,
}

/// Rule used to turn a unit price and quantity into a charge.
///
/// Each variant is a pure function of its inputs; the same inputs always
/// produce the same charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricingRule {
    /// Every unit at full price.
    NoDiscount,

    /// Every second unit free; a leftover single unit is charged.
    BuyOneGetOne,

    /// Every third unit free; units outside a full group are charged.
    ThreeForTwo,
}

impl PricingRule {
    /// Rule applied for an offer type.
    pub fn for_offer(offer: OfferType) -> Self {
        match offer {
            OfferType::NoOffer => PricingRule::NoDiscount,
            OfferType::Bogo => PricingRule::BuyOneGetOne,
            OfferType::ThreeForTwo => PricingRule::ThreeForTwo,
        }
    }

    /// Number of units actually charged for `quantity` units.
    ///
    /// `quantity` must be non-negative.
    pub fn payable_units(self, quantity: i64) -> i64 {
        match self {
            PricingRule::NoDiscount => quantity,
            PricingRule::BuyOneGetOne => quantity / 2 + quantity % 2,
            PricingRule::ThreeForTwo => (quantity / 3) * 2 + quantity % 3,
        }
    }

    /// Calculate the charge for `quantity` units at `unit_price`.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] if the quantity is negative, the unit price is
    /// NaN, infinite, negative or unrepresentable, or if the charge overflows.
    pub fn price(self, unit_price: f64, quantity: i64) -> Result<Decimal, RuleError> {
        self.quote(unit_price, quantity).map(|quote| quote.charged)
    }

    /// Like [`PricingRule::price`], also returning the converted unit price.
    ///
    /// # Errors
    ///
    /// Same as [`PricingRule::price`].
    pub fn quote(self, unit_price: f64, quantity: i64) -> Result<Quote, RuleError> {
        if quantity < 0 {
            return Err(RuleError::NegativeQuantity(quantity));
        }

        let unit_price = validate_unit_price(unit_price)?;

        let charged = Decimal::from(self.payable_units(quantity))
            .checked_mul(unit_price)
            .ok_or(RuleError::ChargeOverflow {
                unit_price,
                quantity,
            })?;

        Ok(Quote {
            unit_price,
            charged,
        })
    }
}

/// Check that a unit price is a usable amount and convert it to a decimal.
///
/// The conversion picks the shortest decimal that round-trips, so `0.6`
/// becomes exactly `0.6`.
///
/// # Errors
///
/// Returns a [`RuleError`] if the price is NaN, infinite, negative or cannot
/// be held by a [`Decimal`] without changing its value to zero.
pub fn validate_unit_price(unit_price: f64) -> Result<Decimal, RuleError> {
    if unit_price.is_nan() {
        return Err(RuleError::NanUnitPrice);
    }

    if unit_price.is_infinite() {
        return Err(RuleError::InfiniteUnitPrice);
    }

    if unit_price < 0.0 {
        return Err(RuleError::NegativeUnitPrice(unit_price));
    }

    let price = Decimal::from_f64(unit_price)
        .map(|price| price.normalize())
        .ok_or(RuleError::UnrepresentableUnitPrice(unit_price))?;

    if price.is_zero() && unit_price > 0.0 {
        return Err(RuleError::UnrepresentableUnitPrice(unit_price));
    }

    Ok(price)
}
