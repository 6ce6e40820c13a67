use rust_decimal::{Decimal, RoundingStrategy};

use crate::pricing_rule::{DELIVERY_FLAT_FEE, SERVICE_TAX_RATE_PERCENT};

// monetary amounts are kept at 2 decimal places, midpoint rounds away
// from zero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, PartialEq, Eq)]
pub enum CheckoutAmountError {
    DiscountOutOfRange(Decimal),
}

// discount comes as a fraction in the range [0, 1)
pub fn discounted_unit_price(
    unit_price: Decimal,
    discount: Decimal,
) -> Result<Decimal, CheckoutAmountError> {
    if discount < Decimal::ZERO || discount >= Decimal::ONE {
        return Err(CheckoutAmountError::DiscountOutOfRange(discount));
    }
    Ok(round_money(unit_price * (Decimal::ONE - discount)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutAmountModel {
    pub subtotal: Decimal,
    pub delivery_charge: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl CheckoutAmountModel {
    // product checkout, the flat delivery fee always applies regardless
    // of cart size, no tax line on products
    pub fn product_cart(subtotal: Decimal) -> Self {
        let subtotal = round_money(subtotal);
        let delivery_charge = Decimal::from(DELIVERY_FLAT_FEE);
        Self {
            subtotal,
            delivery_charge,
            tax: Decimal::ZERO,
            total: round_money(subtotal + delivery_charge),
        }
    }

    pub fn buy_now(
        unit_price: Decimal,
        discount: Decimal,
    ) -> Result<Self, CheckoutAmountError> {
        let effective = discounted_unit_price(unit_price, discount)?;
        Ok(Self::product_cart(effective))
    }

    // service bookings carry the tax line instead of a delivery fee
    pub fn service_booking(subtotal: Decimal) -> Self {
        let subtotal = round_money(subtotal);
        let rate = Decimal::from(SERVICE_TAX_RATE_PERCENT) / Decimal::ONE_HUNDRED;
        let tax = round_money(subtotal * rate);
        Self {
            subtotal,
            delivery_charge: Decimal::ZERO,
            tax,
            total: round_money(subtotal + tax),
        }
    }
} // end of impl CheckoutAmountModel
