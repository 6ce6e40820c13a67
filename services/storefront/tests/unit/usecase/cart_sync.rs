use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use storefront::adapter::backend::{AbstractStorefrontBackend, MockBackendFailure};
use storefront::auth::AppSessionState;
use storefront::usecase::{CartSyncUseCase, CartUcError, NewCartItemModel};

use super::super::model::ut_cart_item_dto;
use super::super::ut_setup_sharestate;
use super::{ut_active_session, ut_mock_backend};

fn ut_new_item(item_id: &str, list_price: i64, discount_pct: i64) -> NewCartItemModel {
    NewCartItemModel {
        item_id: item_id.to_string(),
        name: format!("product-{item_id}"),
        list_price: Decimal::from(list_price),
        discount: Decimal::new(discount_pct, 2),
        category: "appliances".to_string(),
        image: format!("https://img.example.com/{item_id}.jpg"),
    }
}

#[tokio::test]
async fn add_update_remove_roundtrip() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let m = uc.add_item(ut_new_item("item-88", 1000, 0)).await.unwrap();
    assert_eq!(m.num_items(), 1);
    assert_eq!(m.total_amount, Decimal::from(1000));

    let m = uc.update_quantity("item-88", 4).await.unwrap();
    assert_eq!(m.num_items(), 4);
    // snapshot total always equals the sum of its line items
    assert_eq!(m.total_amount, m.subtotal());
    assert_eq!(m.total_amount, Decimal::from(4000));

    let m = uc.remove_item("item-88").await.unwrap();
    assert!(m.is_empty());
    assert_eq!(m.total_amount, Decimal::ZERO);
    drop(mock);
}

#[tokio::test]
async fn discount_applied_to_stored_line_price() {
    let shr_state = ut_setup_sharestate();
    let (_mock, backend) = ut_mock_backend();
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());
    // 10% off 999
    let mut item = ut_new_item("item-21", 999, 10);
    item.list_price = Decimal::from(999);
    let m = uc.add_item(item).await.unwrap();
    assert_eq!(m.items[0].unit_price, Decimal::new(89910, 2)); // 899.10
}

#[tokio::test]
async fn update_to_zero_behaves_as_removal() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_cart_item(ut_cart_item_dto("item-88", 1000, 2)).await;
    mock.seed_cart_item(ut_cart_item_dto("item-91", 250, 1)).await;
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let m = uc.update_quantity("item-88", 0).await.unwrap();
    assert_eq!(m.items.len(), 1);
    assert_eq!(m.items[0].item_id.as_str(), "item-91");
    assert_eq!(m.total_amount, Decimal::from(250));
}

#[tokio::test]
async fn remove_absent_item_is_noop() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_cart_item(ut_cart_item_dto("item-91", 250, 1)).await;
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let m = uc.remove_item("item-never-added").await.unwrap();
    assert_eq!(m.items.len(), 1);
    assert_eq!(m.total_amount, Decimal::from(250));
}

#[tokio::test]
async fn unauthenticated_mutation_short_circuits() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    let session = Arc::new(AppSessionState::new()); // never logged in
    let uc = CartSyncUseCase::new(backend, session, shr_state.log_context());

    let result = uc.add_item(ut_new_item("item-88", 1000, 0)).await;
    assert!(matches!(result, Err(CartUcError::AuthRequired)));
    // nothing reached the backend, nothing applied locally
    let remote = mock.fetch_cart().await.unwrap();
    assert!(remote.items.is_empty());
    assert!(uc.snapshot().await.is_none());
}

#[tokio::test]
async fn failed_mutation_leaves_state_untouched() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_cart_item(ut_cart_item_dto("item-88", 1000, 2)).await;
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());
    let before = uc.refresh().await.unwrap();

    mock.set_fail_next(MockBackendFailure::Network).await;
    let result = uc.update_quantity("item-88", 5).await;
    assert!(matches!(result, Err(CartUcError::NetworkFailure(_))));
    let after = uc.snapshot().await.unwrap();
    assert_eq!(after.num_items(), before.num_items());
    assert_eq!(after.total_amount, before.total_amount);
}

#[tokio::test]
async fn corrupted_snapshot_rejected() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_cart_item(ut_cart_item_dto("item-88", 1000, 2)).await;
    mock.corrupt_cart_total(Decimal::from(1)).await;
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let result = uc.refresh().await;
    assert!(matches!(result, Err(CartUcError::CorruptedSnapshot(_))));
    assert!(uc.snapshot().await.is_none());
}

// the slower reply carries the older ticket, it must not overwrite
// the newer snapshot that already arrived
#[tokio::test]
async fn stale_reply_discarded() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_cart_item(ut_cart_item_dto("item-88", 1000, 1)).await;
    mock.plan_latency(vec![Duration::from_millis(50), Duration::from_millis(1)])
        .await;
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let (slow, fast) = tokio::join!(
        uc.update_quantity("item-88", 2),
        uc.update_quantity("item-88", 3),
    );
    assert!(slow.is_ok());
    assert!(fast.is_ok());
    let final_state = uc.snapshot().await.unwrap();
    assert_eq!(final_state.items[0].quantity, 3);
    // the slow call also observes the newer snapshot, not its own
    assert_eq!(slow.unwrap().items[0].quantity, 3);
}

#[tokio::test]
async fn reset_destroys_local_mirror() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_cart_item(ut_cart_item_dto("item-88", 1000, 2)).await;
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());
    let _m = uc.refresh().await.unwrap();
    assert_eq!(uc.num_items().await, 2);

    uc.reset().await;
    assert!(uc.snapshot().await.is_none());
    assert_eq!(uc.num_items().await, 0);
}

// a reply still in flight when the user logs out carries a pre-reset
// ticket, it must not repopulate the destroyed mirror
#[tokio::test]
async fn reset_discards_in_flight_reply() {
    let shr_state = ut_setup_sharestate();
    let (mock, backend) = ut_mock_backend();
    mock.seed_cart_item(ut_cart_item_dto("item-88", 1000, 2)).await;
    mock.plan_latency(vec![Duration::from_millis(50)]).await;
    let uc = CartSyncUseCase::new(backend, ut_active_session().await, shr_state.log_context());

    let (inflight, _) = tokio::join!(uc.refresh(), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        uc.reset().await;
    });
    assert!(inflight.is_ok());
    assert!(uc.snapshot().await.is_none());
    assert_eq!(uc.num_items().await, 0);

    // a request issued after the reset applies normally
    let m = uc.refresh().await.unwrap();
    assert_eq!(m.num_items(), 2);
    assert_eq!(uc.num_items().await, 2);
}
