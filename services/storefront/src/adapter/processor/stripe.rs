use std::boxed::Box;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::body::Bytes;
use hyper::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use hyper::Method;
use serde::{Deserialize, Serialize};
use tokio_native_tls::TlsConnector;

use storefront_common::confidentiality::AbstractConfidentiality;
use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use super::super::base_client::{
    build_secure_connector, BaseClient, BaseClientError, BaseClientErrorReason,
};
use super::AppProcessorErrorReason;

const API_VERSION: &str = "v1";

// sheet submissions carry the tokenised test method until real card
// collection exists in this runtime
const DEFAULT_PAYMENT_METHOD: &str = "pm_card_visa";

#[derive(Serialize)]
struct ConfirmIntentForm {
    client_secret: String,
    payment_method: String,
}

#[derive(Deserialize, Debug)]
struct PaymentIntentResource {
    id: String,
    status: String,
}

#[async_trait]
pub(super) trait AbstStripeContext: Send + Sync {
    async fn confirm_intent(
        &self,
        intent_id: &str,
        client_secret: &str,
    ) -> Result<String, AppProcessorErrorReason>;
}

pub(super) struct AppStripeSheetCtx {
    host: String,
    port: u16,
    secure_connector: TlsConnector,
    api_key: String,
    logctx: Arc<AppLogContext>,
}

impl AppStripeSheetCtx {
    pub(super) fn try_build(
        host: &str,
        port: u16,
        confidential_path: &str,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
        logctx: Arc<AppLogContext>,
    ) -> Result<Box<dyn AbstStripeContext>, AppProcessorErrorReason> {
        let serial = cfdntl
            .try_get_payload(confidential_path)
            .map_err(|_e| AppProcessorErrorReason::MissingCredential)?;
        let api_key = serde_json::from_str::<String>(serial.as_str())
            .map_err(|_e| AppProcessorErrorReason::CredentialCorrupted)?;
        let secure_connector =
            build_secure_connector().map_err(AppProcessorErrorReason::LowLvlNet)?;
        Ok(Box::new(Self {
            host: host.to_string(),
            port,
            secure_connector,
            api_key,
            logctx,
        }))
    } // end of fn try_build
}

#[async_trait]
impl AbstStripeContext for AppStripeSheetCtx {
    async fn confirm_intent(
        &self,
        intent_id: &str,
        client_secret: &str,
    ) -> Result<String, AppProcessorErrorReason> {
        let form = ConfirmIntentForm {
            client_secret: client_secret.to_string(),
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
        };
        let serial = serde_qs::to_string(&form).map_err(|e| {
            AppProcessorErrorReason::LowLvlNet(BaseClientError {
                reason: BaseClientErrorReason::SerialiseFailure(e.to_string()),
            })
        })?;
        let auth_value =
            HeaderValue::from_str(format!("Bearer {}", self.api_key).as_str()).map_err(|_e| {
                AppProcessorErrorReason::LowLvlNet(BaseClientError {
                    reason: BaseClientErrorReason::HttpRequest("auth-header-parse-fail".to_string()),
                })
            })?;
        let headers = vec![
            (AUTHORIZATION, auth_value),
            (ACCEPT, HeaderValue::from_static("application/json")),
            (
                CONTENT_TYPE,
                HeaderValue::from_static("application/x-www-form-urlencoded"),
            ),
        ];
        let mut client = BaseClient::try_build(
            self.logctx.clone(),
            &self.secure_connector,
            self.host.clone(),
            self.port,
        )
        .await
        .map_err(AppProcessorErrorReason::LowLvlNet)?;
        let path = format!("/{API_VERSION}/payment_intents/{intent_id}/confirm");
        let (raw, status) = client
            .execute(
                path.as_str(),
                Method::POST,
                Bytes::from(serial),
                headers,
            )
            .await
            .map_err(AppProcessorErrorReason::LowLvlNet)?;
        let resource = serde_json::from_slice::<PaymentIntentResource>(raw.as_slice())
            .map_err(|e| {
                AppProcessorErrorReason::LowLvlNet(BaseClientError {
                    reason: BaseClientErrorReason::DeserialiseFailure(
                        e.to_string(),
                        status.as_u16(),
                    ),
                })
            })?;
        if resource.status.as_str() == "succeeded" {
            Ok(resource.id)
        } else {
            let logctx_p = &self.logctx;
            app_log_event!(
                logctx_p,
                AppLogLevel::WARNING,
                "intent:{intent_id}, status:{}",
                resource.status.as_str()
            );
            Err(AppProcessorErrorReason::GatewayDeclined(resource.status))
        }
    } // end of fn confirm_intent
}

pub(super) struct MockStripeSheetCtx {
    decline: bool,
}

impl MockStripeSheetCtx {
    pub(super) fn build() -> Box<dyn AbstStripeContext> {
        Box::new(Self { decline: false })
    }
    pub(super) fn build_declined() -> Box<dyn AbstStripeContext> {
        Box::new(Self { decline: true })
    }
}

#[async_trait]
impl AbstStripeContext for MockStripeSheetCtx {
    async fn confirm_intent(
        &self,
        intent_id: &str,
        _client_secret: &str,
    ) -> Result<String, AppProcessorErrorReason> {
        if self.decline {
            Err(AppProcessorErrorReason::GatewayDeclined(
                "requires_payment_method".to_string(),
            ))
        } else {
            Ok(intent_id.to_string())
        }
    }
}
