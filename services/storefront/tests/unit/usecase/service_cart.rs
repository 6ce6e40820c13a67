use std::time::Duration;

use chrono::DateTime;
use rust_decimal::Decimal;

use storefront::usecase::{NewBookingModel, ServiceCartUseCase};

use super::super::model::ut_booking_dto;
use super::super::ut_setup_sharestate;
use super::{ut_active_session, ut_mock_backend};

fn ut_new_booking(service_id: &str, price: i64, count: u32) -> NewBookingModel {
    NewBookingModel {
        service_id: service_id.to_string(),
        name: format!("deep-clean-{service_id}"),
        unit_price: Decimal::from(price),
        count,
        scheduled_for: Some(DateTime::parse_from_rfc3339("2026-09-14T10:30:00+05:30").unwrap()),
    }
}

#[tokio::test]
async fn booking_roundtrip_with_tax() {
    let shr_state = ut_setup_sharestate();
    let (_mock, backend) = ut_mock_backend();
    let uc = ServiceCartUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let m = uc.add_booking(ut_new_booking("svc-ac", 700, 1)).await.unwrap();
    assert_eq!(m.num_bookings(), 1);
    let m = uc.add_booking(ut_new_booking("svc-sofa", 300, 1)).await.unwrap();
    assert_eq!(m.subtotal(), Decimal::from(1000));
    let amounts = uc.amounts().await.unwrap();
    assert_eq!(amounts.tax, Decimal::from(180));
    assert_eq!(amounts.total, Decimal::from(1180));
}

#[tokio::test]
async fn update_count_to_zero_removes_booking() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_booking(ut_booking_dto("bk-01", 700, 1)).await;
    mock.seed_booking(ut_booking_dto("bk-02", 300, 2)).await;
    let uc = ServiceCartUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let m = uc.update_count("bk-02", 0).await.unwrap();
    assert_eq!(m.bookings.len(), 1);
    assert_eq!(m.bookings[0].booking_id.as_str(), "bk-01");
}

#[tokio::test]
async fn remove_absent_booking_is_noop() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_booking(ut_booking_dto("bk-01", 700, 1)).await;
    let uc = ServiceCartUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let m = uc.remove_booking("bk-unknown").await.unwrap();
    assert_eq!(m.bookings.len(), 1);
}

#[tokio::test]
async fn count_update_recomputes_amounts() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_booking(ut_booking_dto("bk-01", 500, 1)).await;
    let uc = ServiceCartUseCase::new(backend, ut_active_session().await, shr_state.log_context());
    let _m = uc.refresh().await.unwrap();

    let m = uc.update_count("bk-01", 3).await.unwrap();
    assert_eq!(m.subtotal(), Decimal::from(1500));
    let amounts = uc.amounts().await.unwrap();
    assert_eq!(amounts.total, Decimal::from(1770)); // 1500 * 1.18
}

// same guarantee as the product cart, logout mid-flight leaves the
// booking mirror destroyed when the late reply lands
#[tokio::test]
async fn reset_discards_in_flight_reply() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_booking(ut_booking_dto("bk-01", 700, 1)).await;
    mock.plan_latency(vec![Duration::from_millis(50)]).await;
    let uc = ServiceCartUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let (inflight, _) = tokio::join!(uc.refresh(), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        uc.reset().await;
    });
    assert!(inflight.is_ok());
    assert!(uc.snapshot().await.is_none());
    assert!(uc.amounts().await.is_none());
}
