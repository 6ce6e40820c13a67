use rust_decimal::Decimal;

use crate::api::dto::{CartDto, CartItemDto};

use super::checkout::round_money;

#[derive(Debug, PartialEq, Eq)]
pub enum CartModelError {
    ZeroQuantity(String),
    NegativePrice(String),
    TotalMismatch { given: Decimal, expect: Decimal },
}

#[derive(Debug, Clone)]
pub struct CartItemModel {
    pub item_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub category: String,
    pub image: String,
}

// server-authoritative cart snapshot, the stored total has to agree
// with the line items or the snapshot is rejected as corrupted
#[derive(Debug, Clone)]
pub struct CartModel {
    pub id: String,
    pub items: Vec<CartItemModel>,
    pub total_amount: Decimal,
}

impl From<CartItemDto> for CartItemModel {
    fn from(value: CartItemDto) -> Self {
        Self {
            item_id: value.item_id,
            name: value.name,
            unit_price: value.price,
            quantity: value.quantity,
            category: value.category,
            image: value.image,
        }
    }
}

impl TryFrom<CartDto> for CartModel {
    type Error = Vec<CartModelError>;
    fn try_from(value: CartDto) -> Result<Self, Self::Error> {
        let mut errors = value
            .items
            .iter()
            .filter_map(|d| {
                if d.quantity == 0 {
                    Some(CartModelError::ZeroQuantity(d.item_id.clone()))
                } else if d.price < Decimal::ZERO {
                    Some(CartModelError::NegativePrice(d.item_id.clone()))
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();
        let expect = round_money(
            value
                .items
                .iter()
                .map(|d| d.price * Decimal::from(d.quantity))
                .sum::<Decimal>(),
        );
        let given = round_money(value.total_amount);
        if given != expect {
            errors.push(CartModelError::TotalMismatch { given, expect });
        }
        if errors.is_empty() {
            Ok(Self {
                id: value.id,
                items: value.items.into_iter().map(CartItemModel::from).collect(),
                total_amount: given,
            })
        } else {
            Err(errors)
        }
    } // end of fn try_from
}

impl CartModel {
    pub fn subtotal(&self) -> Decimal {
        round_money(
            self.items
                .iter()
                .map(|it| it.unit_price * Decimal::from(it.quantity))
                .sum::<Decimal>(),
        )
    }
    pub fn num_items(&self) -> u32 {
        self.items.iter().map(|it| it.quantity).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
} // end of impl CartModel
