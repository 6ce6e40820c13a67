use std::boxed::Box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::Mutex;

use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::adapter::backend::{AbstractStorefrontBackend, BackendApiError, BackendApiErrorReason};
use crate::adapter::BaseClientError;
use crate::api::dto::{CartAddReqDto, CartDto, CartRemoveReqDto, CartUpdateReqDto};
use crate::auth::{AppAuthError, AppSessionState, AuthErrorReason};
use crate::model::{discounted_unit_price, CartModel, CartModelError, CheckoutAmountError};

#[derive(Debug)]
pub enum CartUcError {
    AuthRequired,
    SessionExpired,
    NetworkFailure(BaseClientError),
    RemoteRejected(String),
    CorruptedReply(String),
    CorruptedSnapshot(Vec<CartModelError>),
    InvalidDiscount(Decimal),
}

impl From<BackendApiError> for CartUcError {
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
impl From<AppAuthError> for CartUcError {
    fn from(value: AppAuthError) -> Self {
        match value.reason {
            AuthErrorReason::LoggedOut => Self::AuthRequired,
            AuthErrorReason::SessionExpired => Self::SessionExpired,
        }
    }
}
impl From<Vec<CartModelError>> for CartUcError {
    fn from(value: Vec<CartModelError>) -> Self {
        Self::CorruptedSnapshot(value)
    }
}
impl From<CheckoutAmountError> for CartUcError {
    fn from(value: CheckoutAmountError) -> Self {
        let CheckoutAmountError::DiscountOutOfRange(d) = value;
        Self::InvalidDiscount(d)
    }
}

// product picked from the catalogue screen, the stored line price is
// the discounted unit price, never the list price
pub struct NewCartItemModel {
    pub item_id: String,
    pub name: String,
    pub list_price: Decimal,
    pub discount: Decimal,
    pub category: String,
    pub image: String,
}

impl NewCartItemModel {
    fn try_into_req(self) -> Result<CartAddReqDto, CartUcError> {
        let price = discounted_unit_price(self.list_price, self.discount)?;
        Ok(CartAddReqDto {
            item_id: self.item_id,
            name: self.name,
            price,
            category: self.category,
            image: self.image,
        })
    }
}

// Locally held cart state mirrors whatever snapshot the backend
// returned last. Each outbound request takes a monotonically growing
// ticket, a reply is applied only when its ticket is newer than the
// one applied so far, so a slow reply can never roll the mirror back.
pub struct CartSyncUseCase {
    backend: Arc<Box<dyn AbstractStorefrontBackend>>,
    session: Arc<AppSessionState>,
    logctx: Arc<AppLogContext>,
    applied: Mutex<(u64, Option<CartModel>)>,
    issued_seq: AtomicU64,
}

impl CartSyncUseCase {
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

    async fn apply_reply(&self, ticket: u64, dto: CartDto) -> Result<CartModel, CartUcError> {
        let incoming = CartModel::try_from(dto)?;
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
            // the mirror already holds a newer snapshot, hand that
            // back instead of the stale one
            Ok(guard.1.clone().unwrap_or(incoming))
        }
    } // end of fn apply_reply

    pub async fn refresh(&self) -> Result<CartModel, CartUcError> {
        let _token = self.session.bearer().await?;
        let ticket = self.issue_ticket();
        let dto = self.backend.fetch_cart().await?;
        self.apply_reply(ticket, dto).await
    }

    pub async fn add_item(&self, item: NewCartItemModel) -> Result<CartModel, CartUcError> {
        let _token = self.session.bearer().await?;
        let req = item.try_into_req()?;
        let ticket = self.issue_ticket();
        let dto = self.backend.add_cart_item(req).await?;
        self.apply_reply(ticket, dto).await
    }

    // quantity below one is a removal, the backend holds the same rule
    pub async fn update_quantity(
        &self,
        item_id: &str,
        quantity: u32,
    ) -> Result<CartModel, CartUcError> {
        if quantity == 0 {
            return self.remove_item(item_id).await;
        }
        let _token = self.session.bearer().await?;
        let req = CartUpdateReqDto {
            item_id: item_id.to_string(),
            quantity,
        };
        let ticket = self.issue_ticket();
        let dto = self.backend.update_cart_item(req).await?;
        self.apply_reply(ticket, dto).await
    }

    pub async fn remove_item(&self, item_id: &str) -> Result<CartModel, CartUcError> {
        let _token = self.session.bearer().await?;
        let req = CartRemoveReqDto {
            item_id: item_id.to_string(),
        };
        let ticket = self.issue_ticket();
        let dto = self.backend.remove_cart_item(req).await?;
        self.apply_reply(ticket, dto).await
    }

    pub async fn snapshot(&self) -> Option<CartModel> {
        let guard = self.applied.lock().await;
        guard.1.clone()
    }

    pub async fn num_items(&self) -> u32 {
        let guard = self.applied.lock().await;
        guard.1.as_ref().map(CartModel::num_items).unwrap_or(0)
    }

    // logout destroys the mirror, nothing is sent to the backend; the
    // applied ticket jumps to the latest issued one, so a reply still
    // in flight at that moment is stale and cannot repopulate the
    // mirror
    pub async fn reset(&self) {
        let mut guard = self.applied.lock().await;
        guard.0 = self.issued_seq.load(Ordering::SeqCst);
        guard.1 = None;
    }
} // end of impl CartSyncUseCase
