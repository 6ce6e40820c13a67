use rust_decimal::Decimal;

use storefront::api::dto::{
    OrderLineDto, OrderReplicaDto, PaymentDetailDto, ServiceBookingDto,
};
use storefront::model::BookingPayStatus;
use storefront::usecase::{OrderHistoryUcError, OrderHistoryUseCase};

use super::super::model::ut_booking_dto;
use super::super::ut_setup_sharestate;
use super::{ut_active_session, ut_mock_backend};

fn ut_order_replica(
    order_id: &str,
    products: Vec<OrderLineDto>,
    services: Vec<ServiceBookingDto>,
) -> OrderReplicaDto {
    OrderReplicaDto {
        id: order_id.to_string(),
        status: "ORDERED".to_string(),
        payment_details: PaymentDetailDto {
            method: "cod".to_string(),
            transaction_id: String::new(),
            paid_at: "2026-08-30T11:45:00+05:30".to_string(),
        },
        products,
        services,
        updated_at: "2026-08-30T11:45:00+05:30".to_string(),
    }
}

fn ut_order_line(item_id: &str, price: i64, quantity: u32) -> OrderLineDto {
    OrderLineDto {
        product: item_id.to_string(),
        quantity,
        price: Decimal::from(price),
    }
}

#[tokio::test]
async fn history_flattens_orders_to_rows() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_order(ut_order_replica(
        "ord-01",
        vec![ut_order_line("item-88", 1500, 2), ut_order_line("item-91", 249, 1)],
        vec![ut_booking_dto("bk-01", 700, 1)],
    ))
    .await;
    mock.seed_order(ut_order_replica(
        "ord-02",
        Vec::new(),
        vec![ut_booking_dto("bk-02", 300, 2)],
    ))
    .await;
    let uc = OrderHistoryUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let history = uc.load().await.unwrap();
    assert_eq!(history.product_rows.len(), 2);
    assert_eq!(history.product_rows[0].order_id.as_str(), "ord-01");
    assert_eq!(history.product_rows[0].item_id.as_str(), "item-88");
    assert_eq!(history.product_rows[0].quantity, 2);
    assert_eq!(history.product_rows[0].pay_method.as_str(), "cod");
    // booked services come back newest first
    assert_eq!(history.service_rows.len(), 2);
    assert_eq!(history.service_rows[0].order_id.as_str(), "ord-02");
    assert_eq!(history.service_rows[0].booking.booking_id.as_str(), "bk-02");
    assert_eq!(history.service_rows[1].order_id.as_str(), "ord-01");
} // end of fn history_flattens_orders_to_rows

#[tokio::test]
async fn corrupted_booking_record_skipped_not_fatal() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    let mut broken = ut_booking_dto("bk-broken", 700, 1);
    broken.scheduled_for = Some("next tuesday".to_string());
    mock.seed_order(ut_order_replica(
        "ord-01",
        vec![ut_order_line("item-88", 1500, 1)],
        vec![broken, ut_booking_dto("bk-ok", 300, 1)],
    ))
    .await;
    let uc = OrderHistoryUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let history = uc.load().await.unwrap();
    assert_eq!(history.product_rows.len(), 1);
    assert_eq!(history.service_rows.len(), 1);
    assert_eq!(history.service_rows[0].booking.booking_id.as_str(), "bk-ok");
}

#[tokio::test]
async fn cancel_order_acknowledged() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_order(ut_order_replica(
        "ord-01",
        vec![ut_order_line("item-88", 1500, 1)],
        Vec::new(),
    ))
    .await;
    let uc = OrderHistoryUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    uc.cancel_order("ord-01").await.unwrap();
    let history = uc.load().await.unwrap();
    assert_eq!(history.product_rows[0].status.as_str(), "CANCELLED");

    let result = uc.cancel_order("ord-unknown").await;
    assert!(matches!(result, Err(OrderHistoryUcError::RemoteRejected(_))));
}

#[tokio::test]
async fn settle_additional_work_clears_outstanding_due() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    let mut booking = ut_booking_dto("bk-01", 700, 1);
    booking.additional_works = vec![storefront::api::dto::AdditionalWorkDto {
        description: "extra gas refill".to_string(),
        price: Decimal::from(240),
    }];
    mock.seed_order(ut_order_replica("ord-01", Vec::new(), vec![booking])).await;
    let uc = OrderHistoryUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let history = uc.load().await.unwrap();
    let row = &history.service_rows[0];
    assert_eq!(row.booking.additional_work_due(), Decimal::from(240));
    assert_eq!(row.booking.payment_status, BookingPayStatus::Pending);

    uc.settle_additional_work("bk-01").await.unwrap();
    let history = uc.load().await.unwrap();
    assert_eq!(
        history.service_rows[0].booking.additional_work_due(),
        Decimal::ZERO
    );
} // end of fn settle_additional_work_clears_outstanding_due

#[tokio::test]
async fn cancel_booking_reflected_in_history() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_order(ut_order_replica(
        "ord-01",
        Vec::new(),
        vec![ut_booking_dto("bk-01", 700, 1)],
    ))
    .await;
    let uc = OrderHistoryUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    uc.cancel_booking("bk-01").await.unwrap();
    let history = uc.load().await.unwrap();
    assert_eq!(
        history.service_rows[0].booking.status.as_deref(),
        Some("cancelled")
    );
}
