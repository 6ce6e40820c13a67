mod cart_sync;
mod order_history;
mod pincode;
mod service_cart;

use std::boxed::Box;
use std::sync::Arc;

use storefront_common::api::dto::{ContactDto, CountryCode, ShipAddrDto};

use storefront::adapter::backend::{AbstractStorefrontBackend, MockStorefrontBackend};
use storefront::auth::AppSessionState;

pub(crate) fn ut_mock_backend() -> (Arc<MockStorefrontBackend>, Arc<Box<dyn AbstractStorefrontBackend>>)
{
    let concrete = Arc::new(MockStorefrontBackend::build());
    let shared = SharedMockBackend(concrete.clone());
    (concrete, Arc::new(Box::new(shared)))
}

pub(crate) async fn ut_active_session() -> Arc<AppSessionState> {
    let session = Arc::new(AppSessionState::new());
    session.start("ut-session-token-0001".to_string()).await;
    session
}

pub(crate) fn ut_contact_dto() -> ContactDto {
    ContactDto {
        first_name: "Asha".to_string(),
        last_name: "Iyer".to_string(),
        email: "asha.iyer@example.com".to_string(),
        phone: "9876501234".to_string(),
    }
}

pub(crate) fn ut_addr_dto() -> ShipAddrDto {
    ShipAddrDto {
        street: "21 Gandhi Road".to_string(),
        city: "Tirumala".to_string(),
        state: "Andhra Pradesh".to_string(),
        zip_code: "517504".to_string(),
        country: CountryCode::IN,
    }
}

// forwards the trait through a shared handle so tests keep access to
// the mock internals after handing the backend to a use case
struct SharedMockBackend(Arc<MockStorefrontBackend>);

use async_trait::async_trait;

use storefront::adapter::backend::BackendApiError;
use storefront::api::dto::{
    CartAddReqDto, CartDto, CartRemoveReqDto, CartUpdateReqDto, GatewayOrderDto,
    GatewayOrderReqDto, LoginReqDto, OrderPlaceReqDto, OrderReplicaDto, PaymentIntentDto,
    PaymentIntentReqDto, ServiceBookingCreateReqDto, ServiceBookingDto,
    ServiceBookingRemoveReqDto, ServiceBookingUpdateReqDto, SignupReqDto, UserProfileDto,
};

#[async_trait]
impl AbstractStorefrontBackend for SharedMockBackend {
    async fn verify_session(&self) -> Result<UserProfileDto, BackendApiError> {
        self.0.verify_session().await
    }
    async fn login(&self, req: LoginReqDto) -> Result<(String, UserProfileDto), BackendApiError> {
        self.0.login(req).await
    }
    async fn signup(&self, req: SignupReqDto) -> Result<(), BackendApiError> {
        self.0.signup(req).await
    }
    async fn fetch_cart(&self) -> Result<CartDto, BackendApiError> {
        self.0.fetch_cart().await
    }
    async fn add_cart_item(&self, req: CartAddReqDto) -> Result<CartDto, BackendApiError> {
        self.0.add_cart_item(req).await
    }
    async fn update_cart_item(&self, req: CartUpdateReqDto) -> Result<CartDto, BackendApiError> {
        self.0.update_cart_item(req).await
    }
    async fn remove_cart_item(&self, req: CartRemoveReqDto) -> Result<CartDto, BackendApiError> {
        self.0.remove_cart_item(req).await
    }
    async fn fetch_service_bookings(&self) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        self.0.fetch_service_bookings().await
    }
    async fn create_service_booking(
        &self,
        req: ServiceBookingCreateReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        self.0.create_service_booking(req).await
    }
    async fn update_service_booking(
        &self,
        req: ServiceBookingUpdateReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        self.0.update_service_booking(req).await
    }
    async fn remove_service_booking(
        &self,
        req: ServiceBookingRemoveReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        self.0.remove_service_booking(req).await
    }
    async fn place_order(&self, req: OrderPlaceReqDto) -> Result<String, BackendApiError> {
        self.0.place_order(req).await
    }
    async fn list_orders(&self) -> Result<Vec<OrderReplicaDto>, BackendApiError> {
        self.0.list_orders().await
    }
    async fn cancel_order(&self, order_id: &str) -> Result<(), BackendApiError> {
        self.0.cancel_order(order_id).await
    }
    async fn cancel_service_booking(&self, booking_id: &str) -> Result<(), BackendApiError> {
        self.0.cancel_service_booking(booking_id).await
    }
    async fn settle_additional_work(&self, booking_id: &str) -> Result<(), BackendApiError> {
        self.0.settle_additional_work(booking_id).await
    }
    async fn create_gateway_order(
        &self,
        req: GatewayOrderReqDto,
    ) -> Result<GatewayOrderDto, BackendApiError> {
        self.0.create_gateway_order(req).await
    }
    async fn create_payment_intent(
        &self,
        req: PaymentIntentReqDto,
    ) -> Result<PaymentIntentDto, BackendApiError> {
        self.0.create_payment_intent(req).await
    }
} // end of impl SharedMockBackend
