use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use storefront_common::model::RecipientModel;

use crate::api::dto::{
    OrderAddressDto, OrderLineDto, OrderPlaceReqDto, OrderServiceLineDto, PaymentDetailDto,
};

use super::cart::CartModel;
use super::booking::ServiceCartModel;
use super::checkout::CheckoutAmountModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum PaymentMethod {
    CashOnDelivery, Razorpay, Stripe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum OrderKind {
    Product, Service,
}

impl PaymentMethod {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cod",
            Self::Razorpay => "razorpay",
            Self::Stripe => "stripe",
        }
    }
    // gateway methods hand control to an external payment surface
    // before the order request may be posted
    pub fn requires_gateway(&self) -> bool {
        !matches!(self, Self::CashOnDelivery)
    }
}

impl OrderKind {
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Service => "service",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProductLineModel {
    pub item_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone)]
pub struct ServiceLineModel {
    pub service_id: String,
    pub count: u32,
    pub unit_price: Decimal,
}

// validated draft carried across the external-payment hop, the final
// request is assembled from it exactly once
pub struct PendingOrderModel {
    pub user_id: String,
    pub kind: OrderKind,
    pub recipient: RecipientModel,
    pub product_lines: Vec<ProductLineModel>,
    pub service_lines: Vec<ServiceLineModel>,
    pub amounts: CheckoutAmountModel,
    pub method: PaymentMethod,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone)]
pub struct PaymentDetailModel {
    pub method: PaymentMethod,
    pub transaction_id: String,
    pub paid_at: DateTime<FixedOffset>,
}

pub struct OrderRequestModel {
    draft: PendingOrderModel,
    payment: PaymentDetailModel,
}

impl PendingOrderModel {
    pub fn from_product_cart(
        user_id: &str,
        cart: &CartModel,
        recipient: RecipientModel,
        method: PaymentMethod,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let product_lines = cart
            .items
            .iter()
            .map(|it| ProductLineModel {
                item_id: it.item_id.clone(),
                quantity: it.quantity,
                unit_price: it.unit_price,
            })
            .collect();
        Self {
            user_id: user_id.to_string(),
            kind: OrderKind::Product,
            recipient,
            product_lines,
            service_lines: Vec::new(),
            amounts: CheckoutAmountModel::product_cart(cart.subtotal()),
            method,
            created_at: now,
        }
    }

    pub fn from_service_cart(
        user_id: &str,
        svc_cart: &ServiceCartModel,
        recipient: RecipientModel,
        method: PaymentMethod,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let service_lines = svc_cart
            .bookings
            .iter()
            .map(|b| ServiceLineModel {
                service_id: b.service_id.clone(),
                count: b.count,
                unit_price: b.unit_price,
            })
            .collect();
        Self {
            user_id: user_id.to_string(),
            kind: OrderKind::Service,
            recipient,
            product_lines: Vec::new(),
            service_lines,
            amounts: svc_cart.amounts(),
            method,
            created_at: now,
        }
    }
} // end of impl PendingOrderModel

impl OrderRequestModel {
    pub const INITIAL_STATUS: &'static str = "ORDERED";

    pub fn assemble(draft: PendingOrderModel, payment: PaymentDetailModel) -> Self {
        Self { draft, payment }
    }
    pub fn amounts(&self) -> &CheckoutAmountModel {
        &self.draft.amounts
    }
    pub fn payment(&self) -> &PaymentDetailModel {
        &self.payment
    }
}

impl From<&OrderRequestModel> for OrderPlaceReqDto {
    fn from(value: &OrderRequestModel) -> Self {
        let d = &value.draft;
        let contact = &d.recipient.contact;
        let addr = &d.recipient.address;
        let products = d
            .product_lines
            .iter()
            .map(|line| OrderLineDto {
                product: line.item_id.clone(),
                quantity: line.quantity,
                price: line.unit_price,
            })
            .collect();
        let services = d
            .service_lines
            .iter()
            .map(|line| OrderServiceLineDto {
                service_id: line.service_id.clone(),
                count: line.count,
                price: line.unit_price,
            })
            .collect();
        Self {
            user_id: d.user_id.clone(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            order_type: d.kind.as_label().to_string(),
            products,
            services,
            delivery_charge: d.amounts.delivery_charge,
            total_amount: d.amounts.total,
            status: OrderRequestModel::INITIAL_STATUS.to_string(),
            payment_details: PaymentDetailDto {
                method: value.payment.method.as_label().to_string(),
                transaction_id: value.payment.transaction_id.clone(),
                paid_at: value.payment.paid_at.to_rfc3339(),
            },
            address: OrderAddressDto {
                street: addr.street.clone(),
                city: addr.city.clone(),
                state: addr.state.clone(),
                zip_code: addr.zip_code.clone(),
                country: String::from(addr.country.clone()),
            },
            created_at: d.created_at.to_rfc3339(),
        }
    } // end of fn from
}

// flattened rows for the order-history screen, one row per product
// line or booked service across all past orders
#[derive(Debug, Clone)]
pub struct OrderProductRowModel {
    pub order_id: String,
    pub item_id: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub status: String,
    pub pay_method: String,
    pub updated_at: String,
}

#[derive(Debug, Clone)]
pub struct OrderServiceRowModel {
    pub order_id: String,
    pub booking: super::booking::ServiceBookingModel,
    pub status: String,
    pub pay_method: String,
    pub updated_at: String,
}
