use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use storefront_common::api::dto::{ContactDto, CountryCode, ShipAddrDto};
use storefront_common::model::RecipientModel;

use storefront::api::dto::OrderPlaceReqDto;
use storefront::model::{
    CartModel, OrderKind, OrderRequestModel, PaymentDetailModel, PaymentMethod, PendingOrderModel,
};

use super::{ut_cart_dto, ut_cart_item_dto};

fn ut_recipient() -> RecipientModel {
    let contact = ContactDto {
        first_name: "Asha".to_string(),
        last_name: "Iyer".to_string(),
        email: "asha.iyer@example.com".to_string(),
        phone: "9876501234".to_string(),
    };
    let address = ShipAddrDto {
        street: "21 Gandhi Road".to_string(),
        city: "Tirumala".to_string(),
        state: "Andhra Pradesh".to_string(),
        zip_code: "517504".to_string(),
        country: CountryCode::IN,
    };
    RecipientModel::try_from((contact, address)).unwrap()
}

fn ut_time() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2026-08-30T11:45:00+05:30").unwrap()
}

#[test]
fn order_request_from_product_cart() {
    let cart = CartModel::try_from(ut_cart_dto(vec![
        ut_cart_item_dto("item-88", 1500, 2),
        ut_cart_item_dto("item-91", 249, 1),
    ]))
    .unwrap();
    let draft = PendingOrderModel::from_product_cart(
        "usr-0187",
        &cart,
        ut_recipient(),
        PaymentMethod::CashOnDelivery,
        ut_time(),
    );
    assert_eq!(draft.kind, OrderKind::Product);
    assert_eq!(draft.amounts.total, Decimal::from(3548)); // 3249 + 299
    let payment = PaymentDetailModel {
        method: PaymentMethod::CashOnDelivery,
        transaction_id: String::new(),
        paid_at: ut_time(),
    };
    let request = OrderRequestModel::assemble(draft, payment);
    let dto = OrderPlaceReqDto::from(&request);
    assert_eq!(dto.user_id.as_str(), "usr-0187");
    assert_eq!(dto.order_type.as_str(), "product");
    assert_eq!(dto.status.as_str(), OrderRequestModel::INITIAL_STATUS);
    assert_eq!(dto.products.len(), 2);
    assert!(dto.services.is_empty());
    assert_eq!(dto.delivery_charge, Decimal::from(299));
    assert_eq!(dto.total_amount, Decimal::from(3548));
    assert_eq!(dto.payment_details.method.as_str(), "cod");
    assert!(dto.payment_details.transaction_id.is_empty());
    assert_eq!(dto.address.zip_code.as_str(), "517504");
    assert_eq!(dto.address.country.as_str(), "IN");
} // end of fn order_request_from_product_cart

#[test]
fn order_request_wire_field_names() {
    let cart = CartModel::try_from(ut_cart_dto(vec![ut_cart_item_dto("item-88", 1000, 1)])).unwrap();
    let draft = PendingOrderModel::from_product_cart(
        "usr-0187",
        &cart,
        ut_recipient(),
        PaymentMethod::Razorpay,
        ut_time(),
    );
    let payment = PaymentDetailModel {
        method: PaymentMethod::Razorpay,
        transaction_id: "pay_ut0001".to_string(),
        paid_at: ut_time(),
    };
    let request = OrderRequestModel::assemble(draft, payment);
    let dto = OrderPlaceReqDto::from(&request);
    let value = serde_json::to_value(&dto).unwrap();
    assert!(value.get("userId").is_some());
    assert!(value.get("orderFirstName").is_some());
    assert!(value.get("orderType").is_some());
    assert!(value.get("deliveryCharge").is_some());
    assert!(value.get("paymentDetails").is_some());
    // money fields serialise as plain JSON numbers
    assert!(value["totalAmount"].is_f64() || value["totalAmount"].is_u64());
    assert_eq!(value["address"]["zipCode"].as_str(), Some("517504"));
    assert_eq!(
        value["paymentDetails"]["transactionId"].as_str(),
        Some("pay_ut0001")
    );
}
