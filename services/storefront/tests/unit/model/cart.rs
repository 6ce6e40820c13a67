use rust_decimal::Decimal;

use storefront::model::{CartModel, CartModelError};

use super::{ut_cart_dto, ut_cart_item_dto};

#[test]
fn cart_convert_ok() {
    let dto = ut_cart_dto(vec![
        ut_cart_item_dto("item-88", 1500, 2),
        ut_cart_item_dto("item-91", 249, 1),
    ]);
    let result = CartModel::try_from(dto);
    assert!(result.is_ok());
    let m = result.unwrap();
    assert_eq!(m.items.len(), 2);
    assert_eq!(m.num_items(), 3);
    assert_eq!(m.subtotal(), Decimal::from(3249));
    assert_eq!(m.total_amount, m.subtotal());
}

#[test]
fn cart_total_must_match_line_items() {
    let mut dto = ut_cart_dto(vec![ut_cart_item_dto("item-88", 1500, 2)]);
    dto.total_amount = Decimal::from(2999);
    let result = CartModel::try_from(dto);
    assert!(result.is_err());
    let errors = result.err().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        errors[0],
        CartModelError::TotalMismatch { given, expect }
            if given == Decimal::from(2999) && expect == Decimal::from(3000)
    ));
}

#[test]
fn cart_rejects_zero_quantity_line() {
    let mut item = ut_cart_item_dto("item-88", 1500, 0);
    item.quantity = 0;
    let mut dto = ut_cart_dto(vec![item, ut_cart_item_dto("item-91", 249, 1)]);
    dto.total_amount = Decimal::from(249);
    let result = CartModel::try_from(dto);
    assert!(result.is_err());
    let errors = result.err().unwrap();
    assert!(errors
        .iter()
        .any(|e| matches!(e, CartModelError::ZeroQuantity(id) if id.as_str() == "item-88")));
}

#[test]
fn cart_rejects_negative_price_line() {
    let mut item = ut_cart_item_dto("item-13", 0, 1);
    item.price = Decimal::from(-50);
    let dto = ut_cart_dto(vec![item]);
    let result = CartModel::try_from(dto);
    assert!(result.is_err());
    let errors = result.err().unwrap();
    assert!(errors
        .iter()
        .any(|e| matches!(e, CartModelError::NegativePrice(id) if id.as_str() == "item-13")));
}

#[test]
fn empty_cart_is_valid() {
    let dto = ut_cart_dto(Vec::new());
    let m = CartModel::try_from(dto).unwrap();
    assert!(m.is_empty());
    assert_eq!(m.num_items(), 0);
    assert_eq!(m.subtotal(), Decimal::ZERO);
}
