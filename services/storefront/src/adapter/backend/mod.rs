mod client;
mod mock;

use std::boxed::Box;
use std::sync::Arc;

use async_trait::async_trait;

use storefront_common::config::AppRemoteHostCfg;
use storefront_common::logging::AppLogContext;

use crate::api::dto::{
    CartAddReqDto, CartDto, CartRemoveReqDto, CartUpdateReqDto, GatewayOrderDto,
    GatewayOrderReqDto, LoginReqDto, OrderPlaceReqDto, OrderReplicaDto, PaymentIntentDto,
    PaymentIntentReqDto, ServiceBookingCreateReqDto, ServiceBookingDto,
    ServiceBookingRemoveReqDto, ServiceBookingUpdateReqDto, SignupReqDto, UserProfileDto,
};
use crate::auth::{AppAuthError, AppSessionState, AuthErrorReason};

use self::client::AppBackendClientCtx;
pub use self::mock::{MockBackendFailure, MockStorefrontBackend};
use super::BaseClientError;

#[derive(Debug)]
pub enum BackendApiErrorReason {
    AuthRequired,
    SessionExpired,
    LowLvlNet(BaseClientError),
    RemoteRejected(String),
    DecodeFailure(String, u16),
    SerialiseFailure(String),
}

#[derive(Debug)]
pub struct BackendApiError {
    pub reason: BackendApiErrorReason,
}

impl From<BaseClientError> for BackendApiError {
    fn from(value: BaseClientError) -> Self {
        Self {
            reason: BackendApiErrorReason::LowLvlNet(value),
        }
    }
}
impl From<AppAuthError> for BackendApiError {
    fn from(value: AppAuthError) -> Self {
        let reason = match value.reason {
            AuthErrorReason::LoggedOut => BackendApiErrorReason::AuthRequired,
            AuthErrorReason::SessionExpired => BackendApiErrorReason::SessionExpired,
        };
        Self { reason }
    }
}

// application backend behind the REST facade, all storefront traffic
// except postal lookup and gateway confirmation goes through here
#[async_trait]
pub trait AbstractStorefrontBackend: Send + Sync {
    async fn verify_session(&self) -> Result<UserProfileDto, BackendApiError>;
    async fn login(&self, req: LoginReqDto) -> Result<(String, UserProfileDto), BackendApiError>;
    async fn signup(&self, req: SignupReqDto) -> Result<(), BackendApiError>;

    async fn fetch_cart(&self) -> Result<CartDto, BackendApiError>;
    async fn add_cart_item(&self, req: CartAddReqDto) -> Result<CartDto, BackendApiError>;
    async fn update_cart_item(&self, req: CartUpdateReqDto) -> Result<CartDto, BackendApiError>;
    async fn remove_cart_item(&self, req: CartRemoveReqDto) -> Result<CartDto, BackendApiError>;

    async fn fetch_service_bookings(&self) -> Result<Vec<ServiceBookingDto>, BackendApiError>;
    async fn create_service_booking(
        &self,
        req: ServiceBookingCreateReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError>;
    async fn update_service_booking(
        &self,
        req: ServiceBookingUpdateReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError>;
    async fn remove_service_booking(
        &self,
        req: ServiceBookingRemoveReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError>;

    async fn place_order(&self, req: OrderPlaceReqDto) -> Result<String, BackendApiError>;
    async fn list_orders(&self) -> Result<Vec<OrderReplicaDto>, BackendApiError>;
    async fn cancel_order(&self, order_id: &str) -> Result<(), BackendApiError>;
    async fn cancel_service_booking(&self, booking_id: &str) -> Result<(), BackendApiError>;
    async fn settle_additional_work(&self, booking_id: &str) -> Result<(), BackendApiError>;

    async fn create_gateway_order(
        &self,
        req: GatewayOrderReqDto,
    ) -> Result<GatewayOrderDto, BackendApiError>;
    async fn create_payment_intent(
        &self,
        req: PaymentIntentReqDto,
    ) -> Result<PaymentIntentDto, BackendApiError>;
} // end of trait AbstractStorefrontBackend

pub fn app_backend_context(
    cfg: &AppRemoteHostCfg,
    session: Arc<AppSessionState>,
    logctx: Arc<AppLogContext>,
) -> Result<Box<dyn AbstractStorefrontBackend>, BackendApiError> {
    let ctx = AppBackendClientCtx::try_build(cfg, session, logctx)?;
    Ok(Box::new(ctx))
}
