use std::boxed::Box;
use std::sync::Arc;

use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::adapter::backend::{AbstractStorefrontBackend, BackendApiError, BackendApiErrorReason};
use crate::adapter::BaseClientError;
use crate::auth::{AppAuthError, AppSessionState, AuthErrorReason};
use crate::model::{
    OrderProductRowModel, OrderServiceRowModel, ServiceBookingModel,
};

#[derive(Debug)]
pub enum OrderHistoryUcError {
    AuthRequired,
    SessionExpired,
    NetworkFailure(BaseClientError),
    RemoteRejected(String),
    CorruptedReply(String),
}

impl From<BackendApiError> for OrderHistoryUcError {
    fn from(value: BackendApiError) -> Self {
        match value.reason {
            BackendApiErrorReason::AuthRequired => Self::AuthRequired,
            BackendApiErrorReason::SessionExpired => Self::SessionExpired,
            BackendApiErrorReason::LowLvlNet(e) => Self::NetworkFailure(e),
            BackendApiErrorReason::RemoteRejected(msg) => Self::RemoteRejected(msg),
            BackendApiErrorReason::DecodeFailure(d, _status) => Self::CorruptedReply(d),
            BackendApiErrorReason::SerialiseFailure(d) => Self::CorruptedReply(d),
        }
    }
}
impl From<AppAuthError> for OrderHistoryUcError {
    fn from(value: AppAuthError) -> Self {
        match value.reason {
            AuthErrorReason::LoggedOut => Self::AuthRequired,
            AuthErrorReason::SessionExpired => Self::SessionExpired,
        }
    }
}

pub struct OrderHistoryModel {
    pub product_rows: Vec<OrderProductRowModel>,
    pub service_rows: Vec<OrderServiceRowModel>,
}

pub struct OrderHistoryUseCase {
    backend: Arc<Box<dyn AbstractStorefrontBackend>>,
    session: Arc<AppSessionState>,
    logctx: Arc<AppLogContext>,
}

impl OrderHistoryUseCase {
    pub fn new(
        backend: Arc<Box<dyn AbstractStorefrontBackend>>,
        session: Arc<AppSessionState>,
        logctx: Arc<AppLogContext>,
    ) -> Self {
        Self {
            backend,
            session,
            logctx,
        }
    }

    // flattens past orders to one row per product line and one per
    // booked service, service rows come back newest first
    pub async fn load(&self) -> Result<OrderHistoryModel, OrderHistoryUcError> {
        let _token = self.session.bearer().await?;
        let orders = self.backend.list_orders().await?;
        let mut product_rows = Vec::new();
        let mut service_rows = Vec::new();
        for order in orders {
            for line in order.products.iter() {
                product_rows.push(OrderProductRowModel {
                    order_id: order.id.clone(),
                    item_id: line.product.clone(),
                    quantity: line.quantity,
                    unit_price: line.price,
                    status: order.status.clone(),
                    pay_method: order.payment_details.method.clone(),
                    updated_at: order.updated_at.clone(),
                });
            }
            for svc_dto in order.services.into_iter() {
                let booking_id = svc_dto.id.clone();
                match ServiceBookingModel::try_from(svc_dto) {
                    Ok(booking) => service_rows.push(OrderServiceRowModel {
                        order_id: order.id.clone(),
                        booking,
                        status: order.status.clone(),
                        pay_method: order.payment_details.method.clone(),
                        updated_at: order.updated_at.clone(),
                    }),
                    Err(e) => {
                        // a single corrupted record never hides the
                        // rest of the history
                        let logctx_p = &self.logctx;
                        app_log_event!(
                            logctx_p,
                            AppLogLevel::WARNING,
                            "order:{}, booking:{booking_id}, skipped:{:?}",
                            order.id.as_str(),
                            e
                        );
                    }
                }
            }
        }
        service_rows.reverse();
        Ok(OrderHistoryModel {
            product_rows,
            service_rows,
        })
    } // end of fn load

    pub async fn cancel_order(&self, order_id: &str) -> Result<(), OrderHistoryUcError> {
        let _token = self.session.bearer().await?;
        self.backend.cancel_order(order_id).await?;
        Ok(())
    }

    pub async fn cancel_booking(&self, booking_id: &str) -> Result<(), OrderHistoryUcError> {
        let _token = self.session.bearer().await?;
        self.backend.cancel_service_booking(booking_id).await?;
        Ok(())
    }

    pub async fn settle_additional_work(
        &self,
        booking_id: &str,
    ) -> Result<(), OrderHistoryUcError> {
        let _token = self.session.bearer().await?;
        self.backend.settle_additional_work(booking_id).await?;
        Ok(())
    }
} // end of impl OrderHistoryUseCase
