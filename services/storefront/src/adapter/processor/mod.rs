mod razorpay;
mod stripe;

use std::boxed::Box;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use rust_decimal::Decimal;

use storefront_common::api::dto::CurrencyDto;
use storefront_common::confidentiality::AbstractConfidentiality;
use storefront_common::config::App3rdPartyCfg;
use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::api::dto::{GatewayOrderReqDto, PaymentIntentReqDto};
use crate::model::{CheckoutAmountModel, PaymentDetailModel, PaymentMethod};

use self::razorpay::{AbstRazorpayContext, AppRazorpaySdkCtx, MockRazorpaySdkCtx};
use self::stripe::{AbstStripeContext, AppStripeSheetCtx, MockStripeSheetCtx};
use super::backend::{AbstractStorefrontBackend, BackendApiError};
use super::base_client::BaseClientError;

#[derive(Debug)]
pub enum AppProcessorErrorReason {
    InvalidConfig,
    MissingCredential,
    CredentialCorrupted,
    NotSupport,
    LowLvlNet(BaseClientError),
    GatewayDeclined(String),
    BackendApi(BackendApiError),
}

#[derive(Debug)]
#[rustfmt::skip]
pub enum AppProcessorFnLabel {
    TryBuild, PayInStart, PayInComplete,
}

#[derive(Debug)]
pub struct AppProcessorError {
    pub reason: AppProcessorErrorReason,
    pub fn_label: AppProcessorFnLabel,
}

impl From<BaseClientError> for AppProcessorErrorReason {
    fn from(value: BaseClientError) -> Self {
        Self::LowLvlNet(value)
    }
}
impl From<BackendApiError> for AppProcessorErrorReason {
    fn from(value: BackendApiError) -> Self {
        Self::BackendApi(value)
    }
}

// what the checkout flow receives after a payment attempt starts, the
// gateway variants must complete externally before the order request
// may be posted
#[derive(Debug)]
pub enum PaymentHandoffModel {
    CashOnDelivery,
    NativeSdk {
        gateway_order_id: String,
        key_id: String,
        amount: Decimal,
        currency: String,
    },
    PaymentSheet {
        intent_id: String,
        client_secret: String,
    },
}

#[async_trait]
pub trait AbstractPaymentProcessor: Send + Sync {
    async fn pay_in_start(
        &self,
        method: &PaymentMethod,
        amounts: &CheckoutAmountModel,
        reference: &str,
    ) -> Result<PaymentHandoffModel, AppProcessorError>;

    async fn pay_in_complete(
        &self,
        handoff: PaymentHandoffModel,
    ) -> Result<PaymentDetailModel, AppProcessorError>;
}

struct AppProcessorContext {
    _backend: Arc<Box<dyn AbstractStorefrontBackend>>,
    _razorpay: Box<dyn AbstRazorpayContext>,
    _stripe: Box<dyn AbstStripeContext>,
    _logctx: Arc<AppLogContext>,
}

pub fn app_processor_context(
    cfgs3pt: &[Arc<App3rdPartyCfg>],
    backend: Arc<Box<dyn AbstractStorefrontBackend>>,
    cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
    logctx: Arc<AppLogContext>,
) -> Result<Box<dyn AbstractPaymentProcessor>, AppProcessorError> {
    let mut errors = Vec::new();
    let mut result_razorpay: Option<Box<dyn AbstRazorpayContext>> = None;
    let mut result_stripe: Option<Box<dyn AbstStripeContext>> = None;
    cfgs3pt
        .iter()
        .map(|c| match c.as_ref() {
            App3rdPartyCfg::dev {
                name,
                host,
                port,
                confidentiality_path,
            } => match name.to_lowercase().as_str() {
                "razorpay" => {
                    if result_razorpay.is_none() {
                        result_razorpay = AppRazorpaySdkCtx::try_build(
                            confidentiality_path.as_str(),
                            cfdntl.clone(),
                            logctx.clone(),
                        )
                        .map_err(|e| errors.push(e))
                        .ok();
                    }
                }
                "stripe" => {
                    if result_stripe.is_none() {
                        result_stripe = AppStripeSheetCtx::try_build(
                            host.as_str(),
                            *port,
                            confidentiality_path.as_str(),
                            cfdntl.clone(),
                            logctx.clone(),
                        )
                        .map_err(|e| errors.push(e))
                        .ok();
                    }
                }
                _others => {}
            },
            // `data_src` chooses the canned behaviour, "decline"
            // yields a gateway that refuses every attempt
            App3rdPartyCfg::test { name, data_src } => match name.to_lowercase().as_str() {
                "razorpay" => {
                    if result_razorpay.is_none() {
                        result_razorpay = Some(if data_src.as_str() == "decline" {
                            MockRazorpaySdkCtx::build_declined()
                        } else {
                            MockRazorpaySdkCtx::build()
                        });
                    }
                }
                "stripe" => {
                    if result_stripe.is_none() {
                        result_stripe = Some(if data_src.as_str() == "decline" {
                            MockStripeSheetCtx::build_declined()
                        } else {
                            MockStripeSheetCtx::build()
                        });
                    }
                }
                _others => {}
            },
        })
        .count();
    if let Some(reason) = errors.pop() {
        return Err(AppProcessorError {
            reason,
            fn_label: AppProcessorFnLabel::TryBuild,
        });
    }
    match (result_razorpay, result_stripe) {
        (Some(_razorpay), Some(_stripe)) => Ok(Box::new(AppProcessorContext {
            _backend: backend,
            _razorpay,
            _stripe,
            _logctx: logctx,
        })),
        _others => Err(AppProcessorError {
            reason: AppProcessorErrorReason::InvalidConfig,
            fn_label: AppProcessorFnLabel::TryBuild,
        }),
    }
} // end of fn app_processor_context

#[async_trait]
impl AbstractPaymentProcessor for AppProcessorContext {
    async fn pay_in_start(
        &self,
        method: &PaymentMethod,
        amounts: &CheckoutAmountModel,
        reference: &str,
    ) -> Result<PaymentHandoffModel, AppProcessorError> {
        let currency = CurrencyDto::INR.to_string();
        match method {
            PaymentMethod::CashOnDelivery => Ok(PaymentHandoffModel::CashOnDelivery),
            PaymentMethod::Razorpay => {
                let req = GatewayOrderReqDto {
                    amount: amounts.total,
                    currency: currency.clone(),
                    receipt: reference.to_string(),
                };
                let order = self
                    ._backend
                    .create_gateway_order(req)
                    .await
                    .map_err(|e| AppProcessorError {
                        reason: e.into(),
                        fn_label: AppProcessorFnLabel::PayInStart,
                    })?;
                let key_id = order
                    .key_id
                    .unwrap_or_else(|| self._razorpay.key_id().to_string());
                Ok(PaymentHandoffModel::NativeSdk {
                    gateway_order_id: order.id,
                    key_id,
                    amount: order.amount,
                    currency,
                })
            }
            PaymentMethod::Stripe => {
                let req = PaymentIntentReqDto {
                    amount: amounts.total,
                    currency,
                };
                let intent = self
                    ._backend
                    .create_payment_intent(req)
                    .await
                    .map_err(|e| AppProcessorError {
                        reason: e.into(),
                        fn_label: AppProcessorFnLabel::PayInStart,
                    })?;
                Ok(PaymentHandoffModel::PaymentSheet {
                    intent_id: intent.id,
                    client_secret: intent.client_secret,
                })
            }
        }
    } // end of fn pay_in_start

    async fn pay_in_complete(
        &self,
        handoff: PaymentHandoffModel,
    ) -> Result<PaymentDetailModel, AppProcessorError> {
        let paid_at = Local::now().fixed_offset();
        match handoff {
            // nothing to confirm, settlement happens at delivery time
            PaymentHandoffModel::CashOnDelivery => Ok(PaymentDetailModel {
                method: PaymentMethod::CashOnDelivery,
                transaction_id: String::new(),
                paid_at,
            }),
            PaymentHandoffModel::NativeSdk {
                gateway_order_id,
                key_id: _,
                amount,
                currency,
            } => {
                let payment_id = self
                    ._razorpay
                    .launch_checkout(gateway_order_id.as_str(), amount, currency.as_str())
                    .await
                    .map_err(|reason| AppProcessorError {
                        reason,
                        fn_label: AppProcessorFnLabel::PayInComplete,
                    })?;
                let logctx_p = &self._logctx;
                app_log_event!(
                    logctx_p,
                    AppLogLevel::INFO,
                    "gateway-order:{gateway_order_id}, payment:{payment_id}"
                );
                Ok(PaymentDetailModel {
                    method: PaymentMethod::Razorpay,
                    transaction_id: payment_id,
                    paid_at,
                })
            }
            PaymentHandoffModel::PaymentSheet {
                intent_id,
                client_secret,
            } => {
                let confirmed_id = self
                    ._stripe
                    .confirm_intent(intent_id.as_str(), client_secret.as_str())
                    .await
                    .map_err(|reason| AppProcessorError {
                        reason,
                        fn_label: AppProcessorFnLabel::PayInComplete,
                    })?;
                Ok(PaymentDetailModel {
                    method: PaymentMethod::Stripe,
                    transaction_id: confirmed_id,
                    paid_at,
                })
            }
        }
    } // end of fn pay_in_complete
}
