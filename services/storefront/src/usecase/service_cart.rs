use std::boxed::Box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::adapter::backend::{AbstractStorefrontBackend, BackendApiError, BackendApiErrorReason};
use crate::adapter::BaseClientError;
use crate::api::dto::{
    ServiceBookingCreateReqDto, ServiceBookingDto, ServiceBookingRemoveReqDto,
    ServiceBookingUpdateReqDto,
};
use crate::auth::{AppAuthError, AppSessionState, AuthErrorReason};
use crate::model::{BookingModelError, CheckoutAmountModel, ServiceCartModel};

#[derive(Debug)]
pub enum ServiceCartUcError {
    AuthRequired,
    SessionExpired,
    NetworkFailure(BaseClientError),
    RemoteRejected(String),
    CorruptedReply(String),
    CorruptedSnapshot(Vec<BookingModelError>),
}

impl From<BackendApiError> for ServiceCartUcError {
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
impl From<AppAuthError> for ServiceCartUcError {
    fn from(value: AppAuthError) -> Self {
        match value.reason {
            AuthErrorReason::LoggedOut => Self::AuthRequired,
            AuthErrorReason::SessionExpired => Self::SessionExpired,
        }
    }
}
impl From<Vec<BookingModelError>> for ServiceCartUcError {
    fn from(value: Vec<BookingModelError>) -> Self {
        Self::CorruptedSnapshot(value)
    }
}

pub struct NewBookingModel {
    pub service_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub count: u32,
    pub scheduled_for: Option<DateTime<FixedOffset>>,
}

// booked-services counterpart of the product cart mirror, same ticket
// rule keeps slow replies from rolling the state back
pub struct ServiceCartUseCase {
    backend: Arc<Box<dyn AbstractStorefrontBackend>>,
    session: Arc<AppSessionState>,
    logctx: Arc<AppLogContext>,
    applied: Mutex<(u64, Option<ServiceCartModel>)>,
    issued_seq: AtomicU64,
}

impl ServiceCartUseCase {
    pub fn new(
        backend: Arc<Box<dyn AbstractStorefrontBackend>>,
        session: Arc<AppSessionState>,
        logctx: Arc<AppLogContext>,
    ) -> Self {
        Self {
            backend,
            session,
            logctx,
            applied: Mutex::new((0, None)),
            issued_seq: AtomicU64::new(0),
        }
    }

    fn issue_ticket(&self) -> u64 {
        self.issued_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn apply_reply(
        &self,
        ticket: u64,
        dtos: Vec<ServiceBookingDto>,
    ) -> Result<ServiceCartModel, ServiceCartUcError> {
        let incoming = ServiceCartModel::try_from(dtos)?;
        let mut guard = self.applied.lock().await;
        if ticket > guard.0 {
            guard.0 = ticket;
            guard.1 = Some(incoming.clone());
            Ok(incoming)
        } else {
            let logctx_p = &self.logctx;
            app_log_event!(
                logctx_p,
                AppLogLevel::DEBUG,
                "stale-reply, ticket:{ticket}, applied:{}",
                guard.0
            );
            Ok(guard.1.clone().unwrap_or(incoming))
        }
    }

    pub async fn refresh(&self) -> Result<ServiceCartModel, ServiceCartUcError> {
        let _token = self.session.bearer().await?;
        let ticket = self.issue_ticket();
        let dtos = self.backend.fetch_service_bookings().await?;
        self.apply_reply(ticket, dtos).await
    }

    pub async fn add_booking(
        &self,
        req: NewBookingModel,
    ) -> Result<ServiceCartModel, ServiceCartUcError> {
        let _token = self.session.bearer().await?;
        let dto = ServiceBookingCreateReqDto {
            service_id: req.service_id,
            name: req.name,
            price: req.unit_price,
            count: req.count.max(1),
            scheduled_for: req.scheduled_for.map(|t| t.to_rfc3339()),
        };
        let ticket = self.issue_ticket();
        let dtos = self.backend.create_service_booking(dto).await?;
        self.apply_reply(ticket, dtos).await
    }

    pub async fn update_count(
        &self,
        booking_id: &str,
        count: u32,
    ) -> Result<ServiceCartModel, ServiceCartUcError> {
        if count == 0 {
            return self.remove_booking(booking_id).await;
        }
        let _token = self.session.bearer().await?;
        let req = ServiceBookingUpdateReqDto {
            booking_id: booking_id.to_string(),
            count,
        };
        let ticket = self.issue_ticket();
        let dtos = self.backend.update_service_booking(req).await?;
        self.apply_reply(ticket, dtos).await
    }

    pub async fn remove_booking(
        &self,
        booking_id: &str,
    ) -> Result<ServiceCartModel, ServiceCartUcError> {
        let _token = self.session.bearer().await?;
        let req = ServiceBookingRemoveReqDto {
            booking_id: booking_id.to_string(),
        };
        let ticket = self.issue_ticket();
        let dtos = self.backend.remove_service_booking(req).await?;
        self.apply_reply(ticket, dtos).await
    }

    pub async fn snapshot(&self) -> Option<ServiceCartModel> {
        let guard = self.applied.lock().await;
        guard.1.clone()
    }

    pub async fn amounts(&self) -> Option<CheckoutAmountModel> {
        let guard = self.applied.lock().await;
        guard.1.as_ref().map(ServiceCartModel::amounts)
    }

    // same rule as the product cart, the applied ticket jumps ahead of
    // every issued one so an in-flight reply lands stale
    pub async fn reset(&self) {
        let mut guard = self.applied.lock().await;
        guard.0 = self.issued_seq.load(Ordering::SeqCst);
        guard.1 = None;
    }
} // end of impl ServiceCartUseCase
