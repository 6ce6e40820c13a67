use std::sync::Arc;

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use tokio_native_tls::TlsConnector;

use storefront_common::config::AppRemoteHostCfg;
use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::api::dto::{
    CartAddReqDto, CartDto, CartRemoveReqDto, CartRespDto, CartUpdateReqDto,
    AdditionalWorkPayReqDto, GatewayOrderDto, GatewayOrderReqDto, GatewayOrderRespDto,
    GenericRespDto, LoginReqDto, LoginRespDto, OrderCancelReqDto, OrderListRespDto,
    OrderPlaceReqDto, OrderPlaceRespDto, OrderReplicaDto, PaymentIntentDto, PaymentIntentReqDto,
    PaymentIntentRespDto, ServiceBookingCreateReqDto, ServiceBookingDto,
    ServiceBookingRemoveReqDto, ServiceBookingUpdateReqDto, ServiceCancelReqDto,
    ServiceCartRespDto, SessionVerifyReqDto, SessionVerifyRespDto, SignupReqDto, UserProfileDto,
};
use crate::auth::AppSessionState;

use super::super::base_client::{build_secure_connector, BaseClient};
use super::{AbstractStorefrontBackend, BackendApiError, BackendApiErrorReason};

mod resource_path {
    pub(super) const SESSION_VERIFY: &str = "/api/user/session";
    pub(super) const LOGIN: &str = "/api/user/login";
    pub(super) const SIGNUP: &str = "/api/user/register";
    pub(super) const CART_GET: &str = "/api/cart/get";
    pub(super) const CART_ADD: &str = "/api/cart/add";
    pub(super) const CART_UPDATE: &str = "/api/cart/update";
    pub(super) const CART_REMOVE: &str = "/api/cart/remove";
    pub(super) const SVC_CART_GET: &str = "/api/servicecart/get";
    pub(super) const SVC_CART_ADD: &str = "/api/servicecart/add";
    pub(super) const SVC_CART_UPDATE: &str = "/api/servicecart/update";
    pub(super) const SVC_CART_REMOVE: &str = "/api/servicecart/remove";
    pub(super) const ORDER_PLACE: &str = "/api/order/place";
    pub(super) const ORDER_LIST: &str = "/api/order/userorders";
    pub(super) const ORDER_CANCEL: &str = "/api/order/cancelorder";
    pub(super) const SVC_BOOKING_CANCEL: &str = "/api/order/cancelservice";
    pub(super) const ADDITIONAL_WORK_PAY: &str = "/api/services/additionalworkpayment";
    pub(super) const GATEWAY_ORDER: &str = "/api/order/razorpay";
    pub(super) const PAYMENT_INTENT: &str = "/api/order/paymentintent";
}

pub(super) struct AppBackendClientCtx {
    cfg: AppRemoteHostCfg,
    secure_connector: TlsConnector,
    session: Arc<AppSessionState>,
    logctx: Arc<AppLogContext>,
}

impl AppBackendClientCtx {
    pub(super) fn try_build(
        cfg: &AppRemoteHostCfg,
        session: Arc<AppSessionState>,
        logctx: Arc<AppLogContext>,
    ) -> Result<Self, BackendApiError> {
        let secure_connector = build_secure_connector()?;
        Ok(Self {
            cfg: cfg.clone(),
            secure_connector,
            session,
            logctx,
        })
    }

    async fn _call<S, D>(
        &self,
        method: Method,
        path: &str,
        body: Option<&S>,
        authed: bool,
    ) -> Result<D, BackendApiError>
    where
        S: Serialize + Sync,
        D: DeserializeOwned,
    {
        let mut headers = vec![(
            ACCEPT,
            HeaderValue::from_static("application/json"),
        )];
        if authed {
            let token = self.session.bearer().await?;
            let value = format!("Bearer {token}");
            let parsed = HeaderValue::from_str(value.as_str()).map_err(|_e| BackendApiError {
                reason: BackendApiErrorReason::SerialiseFailure(
                    "auth-header-parse-fail".to_string(),
                ),
            })?;
            headers.push((AUTHORIZATION, parsed));
        }
        let raw_body = match body {
            Some(obj) => {
                headers.push((CONTENT_TYPE, HeaderValue::from_static("application/json")));
                let serial = serde_json::to_vec(obj).map_err(|e| BackendApiError {
                    reason: BackendApiErrorReason::SerialiseFailure(e.to_string()),
                })?;
                Bytes::from(serial)
            }
            None => Bytes::new(),
        };
        let mut client = BaseClient::try_build(
            self.logctx.clone(),
            &self.secure_connector,
            self.cfg.host.clone(),
            self.cfg.port,
        )
        .await?;
        let (raw_resp, status) = client.execute(path, method, raw_body, headers).await?;
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(BackendApiError {
                reason: BackendApiErrorReason::AuthRequired,
            });
        }
        serde_json::from_slice::<D>(raw_resp.as_slice()).map_err(|e| {
            let logctx_p = &self.logctx;
            app_log_event!(
                logctx_p,
                AppLogLevel::WARNING,
                "path:{path}, status:{}, decode-err:{:?}",
                status.as_u16(),
                e
            );
            BackendApiError {
                reason: BackendApiErrorReason::DecodeFailure(e.to_string(), status.as_u16()),
            }
        })
    } // end of fn _call

    fn reject_reason(message: Option<String>) -> BackendApiError {
        BackendApiError {
            reason: BackendApiErrorReason::RemoteRejected(
                message.unwrap_or_else(|| "unknown-backend-failure".to_string()),
            ),
        }
    }

    fn missing_payload(label: &str) -> BackendApiError {
        BackendApiError {
            reason: BackendApiErrorReason::DecodeFailure(
                format!("missing-payload, {label}"),
                StatusCode::OK.as_u16(),
            ),
        }
    }

    fn extract_cart(resp: CartRespDto) -> Result<CartDto, BackendApiError> {
        if resp.success {
            resp.cart.ok_or_else(|| Self::missing_payload("cart"))
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }

    fn extract_bookings(resp: ServiceCartRespDto) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        if resp.success {
            resp.bookings
                .ok_or_else(|| Self::missing_payload("service-cart"))
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }

    fn ack_only(resp: GenericRespDto) -> Result<(), BackendApiError> {
        if resp.success {
            Ok(())
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }
} // end of impl AppBackendClientCtx

#[async_trait]
impl AbstractStorefrontBackend for AppBackendClientCtx {
    async fn verify_session(&self) -> Result<UserProfileDto, BackendApiError> {
        let session_id = self.session.bearer().await?;
        let req = SessionVerifyReqDto { session_id };
        let resp = self
            ._call::<_, SessionVerifyRespDto>(
                Method::POST,
                resource_path::SESSION_VERIFY,
                Some(&req),
                true,
            )
            .await?;
        if resp.success {
            resp.user.ok_or_else(|| Self::missing_payload("user"))
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }

    async fn login(&self, req: LoginReqDto) -> Result<(String, UserProfileDto), BackendApiError> {
        let resp = self
            ._call::<_, LoginRespDto>(Method::POST, resource_path::LOGIN, Some(&req), false)
            .await?;
        if resp.success {
            let token = resp
                .session_token
                .ok_or_else(|| Self::missing_payload("session-token"))?;
            let user = resp.user.ok_or_else(|| Self::missing_payload("user"))?;
            Ok((token, user))
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }

    async fn signup(&self, req: SignupReqDto) -> Result<(), BackendApiError> {
        let resp = self
            ._call::<_, GenericRespDto>(Method::POST, resource_path::SIGNUP, Some(&req), false)
            .await?;
        Self::ack_only(resp)
    }

    async fn fetch_cart(&self) -> Result<CartDto, BackendApiError> {
        let resp = self
            ._call::<(), CartRespDto>(Method::GET, resource_path::CART_GET, None, true)
            .await?;
        Self::extract_cart(resp)
    }

    async fn add_cart_item(&self, req: CartAddReqDto) -> Result<CartDto, BackendApiError> {
        let resp = self
            ._call::<_, CartRespDto>(Method::POST, resource_path::CART_ADD, Some(&req), true)
            .await?;
        Self::extract_cart(resp)
    }

    async fn update_cart_item(&self, req: CartUpdateReqDto) -> Result<CartDto, BackendApiError> {
        let resp = self
            ._call::<_, CartRespDto>(Method::POST, resource_path::CART_UPDATE, Some(&req), true)
            .await?;
        Self::extract_cart(resp)
    }

    async fn remove_cart_item(&self, req: CartRemoveReqDto) -> Result<CartDto, BackendApiError> {
        let resp = self
            ._call::<_, CartRespDto>(Method::POST, resource_path::CART_REMOVE, Some(&req), true)
            .await?;
        Self::extract_cart(resp)
    }

    async fn fetch_service_bookings(&self) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        let resp = self
            ._call::<(), ServiceCartRespDto>(Method::GET, resource_path::SVC_CART_GET, None, true)
            .await?;
        Self::extract_bookings(resp)
    }

    async fn create_service_booking(
        &self,
        req: ServiceBookingCreateReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        let resp = self
            ._call::<_, ServiceCartRespDto>(
                Method::POST,
                resource_path::SVC_CART_ADD,
                Some(&req),
                true,
            )
            .await?;
        Self::extract_bookings(resp)
    }

    async fn update_service_booking(
        &self,
        req: ServiceBookingUpdateReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        let resp = self
            ._call::<_, ServiceCartRespDto>(
                Method::POST,
                resource_path::SVC_CART_UPDATE,
                Some(&req),
                true,
            )
            .await?;
        Self::extract_bookings(resp)
    }

    async fn remove_service_booking(
        &self,
        req: ServiceBookingRemoveReqDto,
    ) -> Result<Vec<ServiceBookingDto>, BackendApiError> {
        let resp = self
            ._call::<_, ServiceCartRespDto>(
                Method::POST,
                resource_path::SVC_CART_REMOVE,
                Some(&req),
                true,
            )
            .await?;
        Self::extract_bookings(resp)
    }

    async fn place_order(&self, req: OrderPlaceReqDto) -> Result<String, BackendApiError> {
        let resp = self
            ._call::<_, OrderPlaceRespDto>(
                Method::POST,
                resource_path::ORDER_PLACE,
                Some(&req),
                true,
            )
            .await?;
        if resp.success {
            resp.order
                .map(|o| o.id)
                .ok_or_else(|| Self::missing_payload("order"))
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }

    async fn list_orders(&self) -> Result<Vec<OrderReplicaDto>, BackendApiError> {
        let resp = self
            ._call::<(), OrderListRespDto>(Method::GET, resource_path::ORDER_LIST, None, true)
            .await?;
        if resp.success {
            resp.orders.ok_or_else(|| Self::missing_payload("orders"))
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }

    async fn cancel_order(&self, order_id: &str) -> Result<(), BackendApiError> {
        let req = OrderCancelReqDto {
            order_id: order_id.to_string(),
        };
        let resp = self
            ._call::<_, GenericRespDto>(
                Method::POST,
                resource_path::ORDER_CANCEL,
                Some(&req),
                true,
            )
            .await?;
        Self::ack_only(resp)
    }

    async fn cancel_service_booking(&self, booking_id: &str) -> Result<(), BackendApiError> {
        let req = ServiceCancelReqDto {
            service_id: booking_id.to_string(),
        };
        let resp = self
            ._call::<_, GenericRespDto>(
                Method::POST,
                resource_path::SVC_BOOKING_CANCEL,
                Some(&req),
                true,
            )
            .await?;
        Self::ack_only(resp)
    }

    async fn settle_additional_work(&self, booking_id: &str) -> Result<(), BackendApiError> {
        let req = AdditionalWorkPayReqDto {
            service_id: booking_id.to_string(),
        };
        let resp = self
            ._call::<_, GenericRespDto>(
                Method::POST,
                resource_path::ADDITIONAL_WORK_PAY,
                Some(&req),
                true,
            )
            .await?;
        Self::ack_only(resp)
    }

    async fn create_gateway_order(
        &self,
        req: GatewayOrderReqDto,
    ) -> Result<GatewayOrderDto, BackendApiError> {
        let resp = self
            ._call::<_, GatewayOrderRespDto>(
                Method::POST,
                resource_path::GATEWAY_ORDER,
                Some(&req),
                true,
            )
            .await?;
        if resp.success {
            resp.order
                .ok_or_else(|| Self::missing_payload("gateway-order"))
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }

    async fn create_payment_intent(
        &self,
        req: PaymentIntentReqDto,
    ) -> Result<PaymentIntentDto, BackendApiError> {
        let resp = self
            ._call::<_, PaymentIntentRespDto>(
                Method::POST,
                resource_path::PAYMENT_INTENT,
                Some(&req),
                true,
            )
            .await?;
        if resp.success {
            resp.intent
                .ok_or_else(|| Self::missing_payload("payment-intent"))
        } else {
            Err(Self::reject_reason(resp.message))
        }
    }
} // end of impl AppBackendClientCtx
