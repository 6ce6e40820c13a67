use std::boxed::Box;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use storefront_common::confidentiality::AbstractConfidentiality;
use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use super::AppProcessorErrorReason;

#[async_trait]
pub(super) trait AbstRazorpayContext: Send + Sync {
    fn key_id(&self) -> &str;
    async fn launch_checkout(
        &self,
        gateway_order_id: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<String, AppProcessorErrorReason>;
}

// the hosted checkout UI runs in the vendor surface outside this
// runtime, confirmation comes back through the simulated path until
// the native bridge is wired in
pub(super) struct AppRazorpaySdkCtx {
    key_id: String,
    logctx: Arc<AppLogContext>,
}

impl AppRazorpaySdkCtx {
    pub(super) fn try_build(
        confidential_path: &str,
        cfdntl: Arc<Box<dyn AbstractConfidentiality>>,
        logctx: Arc<AppLogContext>,
    ) -> Result<Box<dyn AbstRazorpayContext>, AppProcessorErrorReason> {
        let serial = cfdntl
            .try_get_payload(confidential_path)
            .map_err(|_e| AppProcessorErrorReason::MissingCredential)?;
        let key_id = serde_json::from_str::<String>(serial.as_str())
            .map_err(|_e| AppProcessorErrorReason::CredentialCorrupted)?;
        Ok(Box::new(Self { key_id, logctx }))
    }
}

#[async_trait]
impl AbstRazorpayContext for AppRazorpaySdkCtx {
    fn key_id(&self) -> &str {
        self.key_id.as_str()
    }
    async fn launch_checkout(
        &self,
        gateway_order_id: &str,
        amount: Decimal,
        currency: &str,
    ) -> Result<String, AppProcessorErrorReason> {
        let logctx_p = &self.logctx;
        app_log_event!(
            logctx_p,
            AppLogLevel::INFO,
            "checkout-launch, order:{gateway_order_id}, amount:{amount} {currency}"
        );
        Ok(format!("pay_sim_{gateway_order_id}"))
    }
} // end of impl AppRazorpaySdkCtx

pub(super) struct MockRazorpaySdkCtx {
    decline: bool,
}

impl MockRazorpaySdkCtx {
    pub(super) fn build() -> Box<dyn AbstRazorpayContext> {
        Box::new(Self { decline: false })
    }
    pub(super) fn build_declined() -> Box<dyn AbstRazorpayContext> {
        Box::new(Self { decline: true })
    }
}

#[async_trait]
impl AbstRazorpayContext for MockRazorpaySdkCtx {
    fn key_id(&self) -> &str {
        "rzp_test_ut00000000001"
    }
    async fn launch_checkout(
        &self,
        _gateway_order_id: &str,
        _amount: Decimal,
        _currency: &str,
    ) -> Result<String, AppProcessorErrorReason> {
        if self.decline {
            Err(AppProcessorErrorReason::GatewayDeclined(
                "mock-declined".to_string(),
            ))
        } else {
            Ok("ut-rzp-pay-0001".to_string())
        }
    }
}
