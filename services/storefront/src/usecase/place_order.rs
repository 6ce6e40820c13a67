use std::boxed::Box;
use std::sync::Arc;

use chrono::Local;

use storefront_common::api::dto::{ContactDto, ShipAddrDto};
use storefront_common::api::web::dto::RecipientErrorDto;
use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};
use storefront_common::model::RecipientModel;

use crate::adapter::backend::{AbstractStorefrontBackend, BackendApiError, BackendApiErrorReason};
use crate::adapter::processor::{
    AbstractPaymentProcessor, AppProcessorError, PaymentHandoffModel,
};
use crate::adapter::BaseClientError;
use crate::api::dto::OrderPlaceReqDto;
use crate::auth::{AppSessionState, AuthErrorReason};
use crate::model::{
    CartModel, OrderRequestModel, PaymentDetailModel, PaymentMethod, PendingOrderModel,
    ServiceCartModel,
};

#[derive(Debug)]
pub enum PlaceOrderFailure {
    // every failing field reported at once, nothing was sent upstream
    Validation(RecipientErrorDto),
    AuthRequired,
    SessionExpired,
    EmptyCart,
    PaymentStart(AppProcessorError),
    PaymentComplete(AppProcessorError),
    Network(BaseClientError),
    RemoteRejected(String),
    CorruptedReply(String),
}

// One submission attempt walks Idle -> (validation, payment) ->
// Success or Failed in a single pass, except the gateway methods which
// pause at AwaitingExternalPayment until `resume_after_payment` is
// called with that state. Terminal states never retry on their own, a
// new attempt starts over from the carts.
pub enum PlaceOrderState {
    Idle,
    AwaitingExternalPayment {
        draft: PendingOrderModel,
        handoff: PaymentHandoffModel,
    },
    Success {
        order_id: String,
    },
    Failed(PlaceOrderFailure),
}

pub struct PlaceOrderUseCase {
    backend: Arc<Box<dyn AbstractStorefrontBackend>>,
    processors: Arc<Box<dyn AbstractPaymentProcessor>>,
    session: Arc<AppSessionState>,
    logctx: Arc<AppLogContext>,
}

impl PlaceOrderUseCase {
    pub fn new(
        backend: Arc<Box<dyn AbstractStorefrontBackend>>,
        processors: Arc<Box<dyn AbstractPaymentProcessor>>,
        session: Arc<AppSessionState>,
        logctx: Arc<AppLogContext>,
    ) -> Self {
        Self {
            backend,
            processors,
            session,
            logctx,
        }
    }

    pub async fn submit_product_order(
        &self,
        user_id: &str,
        cart: &CartModel,
        contact: ContactDto,
        address: ShipAddrDto,
        method: PaymentMethod,
    ) -> PlaceOrderState {
        let recipient = match RecipientModel::try_from((contact, address)) {
            Ok(m) => m,
            Err(e) => return PlaceOrderState::Failed(PlaceOrderFailure::Validation(e)),
        };
        if cart.is_empty() {
            return PlaceOrderState::Failed(PlaceOrderFailure::EmptyCart);
        }
        if let Some(failed) = self.require_session().await {
            return failed;
        }
        let now = Local::now().fixed_offset();
        let draft = PendingOrderModel::from_product_cart(user_id, cart, recipient, method, now);
        self.start_payment(draft).await
    } // end of fn submit_product_order

    pub async fn submit_service_order(
        &self,
        user_id: &str,
        svc_cart: &ServiceCartModel,
        contact: ContactDto,
        address: ShipAddrDto,
        method: PaymentMethod,
    ) -> PlaceOrderState {
        let recipient = match RecipientModel::try_from((contact, address)) {
            Ok(m) => m,
            Err(e) => return PlaceOrderState::Failed(PlaceOrderFailure::Validation(e)),
        };
        if svc_cart.is_empty() {
            return PlaceOrderState::Failed(PlaceOrderFailure::EmptyCart);
        }
        if let Some(failed) = self.require_session().await {
            return failed;
        }
        let now = Local::now().fixed_offset();
        let draft = PendingOrderModel::from_service_cart(user_id, svc_cart, recipient, method, now);
        self.start_payment(draft).await
    } // end of fn submit_service_order

    // only meaningful on AwaitingExternalPayment, any other state is a
    // finished attempt and passes through untouched
    pub async fn resume_after_payment(&self, state: PlaceOrderState) -> PlaceOrderState {
        match state {
            PlaceOrderState::AwaitingExternalPayment { draft, handoff } => {
                match self.processors.pay_in_complete(handoff).await {
                    Ok(payment) => self.post_order(draft, payment).await,
                    Err(e) => PlaceOrderState::Failed(PlaceOrderFailure::PaymentComplete(e)),
                }
            }
            other => other,
        }
    }

    async fn require_session(&self) -> Option<PlaceOrderState> {
        match self.session.bearer().await {
            Ok(_token) => None,
            Err(e) => {
                let failure = match e.reason {
                    AuthErrorReason::LoggedOut => PlaceOrderFailure::AuthRequired,
                    AuthErrorReason::SessionExpired => PlaceOrderFailure::SessionExpired,
                };
                Some(PlaceOrderState::Failed(failure))
            }
        }
    }

    async fn start_payment(&self, draft: PendingOrderModel) -> PlaceOrderState {
        if !draft.method.requires_gateway() {
            // cash on delivery bypasses every gateway surface
            let payment = PaymentDetailModel {
                method: PaymentMethod::CashOnDelivery,
                transaction_id: String::new(),
                paid_at: draft.created_at,
            };
            return self.post_order(draft, payment).await;
        }
        let reference = draft.user_id.clone();
        match self
            .processors
            .pay_in_start(&draft.method, &draft.amounts, reference.as_str())
            .await
        {
            Ok(handoff) => PlaceOrderState::AwaitingExternalPayment { draft, handoff },
            Err(e) => PlaceOrderState::Failed(PlaceOrderFailure::PaymentStart(e)),
        }
    } // end of fn start_payment

    async fn post_order(
        &self,
        draft: PendingOrderModel,
        payment: PaymentDetailModel,
    ) -> PlaceOrderState {
        let request = OrderRequestModel::assemble(draft, payment);
        let req_dto = OrderPlaceReqDto::from(&request);
        match self.backend.place_order(req_dto).await {
            Ok(order_id) => {
                let logctx_p = &self.logctx;
                app_log_event!(
                    logctx_p,
                    AppLogLevel::INFO,
                    "order-placed:{order_id}, method:{}",
                    request.payment().method.as_label()
                );
                PlaceOrderState::Success { order_id }
            }
            Err(e) => PlaceOrderState::Failed(Self::submit_failure(e)),
        }
    }

    fn submit_failure(value: BackendApiError) -> PlaceOrderFailure {
        match value.reason {
            BackendApiErrorReason::AuthRequired => PlaceOrderFailure::AuthRequired,
            BackendApiErrorReason::SessionExpired => PlaceOrderFailure::SessionExpired,
            BackendApiErrorReason::LowLvlNet(e) => PlaceOrderFailure::Network(e),
            BackendApiErrorReason::RemoteRejected(msg) => PlaceOrderFailure::RemoteRejected(msg),
            BackendApiErrorReason::DecodeFailure(d, _status) => PlaceOrderFailure::CorruptedReply(d),
            BackendApiErrorReason::SerialiseFailure(d) => PlaceOrderFailure::CorruptedReply(d),
        }
    }
} // end of impl PlaceOrderUseCase
