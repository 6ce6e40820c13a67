mod cart;
mod order;

use rust_decimal::Decimal;

use storefront::api::dto::{CartDto, CartItemDto, ServiceBookingDto};

pub(crate) fn ut_cart_item_dto(item_id: &str, price: i64, quantity: u32) -> CartItemDto {
    CartItemDto {
        item_id: item_id.to_string(),
        name: format!("product-{item_id}"),
        price: Decimal::from(price),
        quantity,
        category: "electronics".to_string(),
        image: format!("https://img.example.com/{item_id}.jpg"),
    }
}

pub(crate) fn ut_cart_dto(items: Vec<CartItemDto>) -> CartDto {
    let total_amount = items
        .iter()
        .map(|it| it.price * Decimal::from(it.quantity))
        .sum::<Decimal>();
    CartDto {
        id: "ut-cart-0001".to_string(),
        items,
        total_amount,
    }
}

pub(crate) fn ut_booking_dto(id: &str, price: i64, count: u32) -> ServiceBookingDto {
    ServiceBookingDto {
        id: id.to_string(),
        service_id: format!("svc-{id}"),
        name: format!("deep-clean-{id}"),
        price: Decimal::from(price),
        count,
        scheduled_for: Some("2026-09-14T10:30:00+05:30".to_string()),
        status: Some("pending".to_string()),
        payment_status: Some("pending".to_string()),
        additional_works: Vec::new(),
        additional_work_paid: false,
    }
}
