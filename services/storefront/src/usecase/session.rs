use std::boxed::Box;
use std::sync::Arc;

use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use crate::adapter::backend::{AbstractStorefrontBackend, BackendApiError, BackendApiErrorReason};
use crate::adapter::BaseClientError;
use crate::api::dto::{LoginReqDto, SignupReqDto, UserProfileDto};
use crate::auth::AppSessionState;

#[derive(Debug)]
pub enum SessionUcError {
    EmptyCredential,
    AuthRequired,
    SessionExpired,
    NetworkFailure(BaseClientError),
    Rejected(String),
    CorruptedReply(String),
}

impl From<BackendApiError> for SessionUcError {
    fn from(value: BackendApiError) -> Self {
        match value.reason {
            BackendApiErrorReason::AuthRequired => Self::AuthRequired,
            BackendApiErrorReason::SessionExpired => Self::SessionExpired,
            BackendApiErrorReason::LowLvlNet(e) => Self::NetworkFailure(e),
            BackendApiErrorReason::RemoteRejected(msg) => Self::Rejected(msg),
            BackendApiErrorReason::DecodeFailure(d, _status) => Self::CorruptedReply(d),
            BackendApiErrorReason::SerialiseFailure(d) => Self::CorruptedReply(d),
        }
    }
}

pub struct SessionUseCase {
    backend: Arc<Box<dyn AbstractStorefrontBackend>>,
    session: Arc<AppSessionState>,
    logctx: Arc<AppLogContext>,
}

impl SessionUseCase {
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

    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserProfileDto, SessionUcError> {
        if email.is_empty() || password.is_empty() {
            return Err(SessionUcError::EmptyCredential);
        }
        let req = LoginReqDto {
            email: email.to_string(),
            password: password.to_string(),
        };
        let (token, user) = self.backend.login(req).await?;
        self.session.start(token).await;
        let logctx_p = &self.logctx;
        app_log_event!(logctx_p, AppLogLevel::INFO, "login, user:{}", user.id.as_str());
        Ok(user)
    }

    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), SessionUcError> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(SessionUcError::EmptyCredential);
        }
        let req = SignupReqDto {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.backend.signup(req).await?;
        Ok(())
    }

    // purely local, the token is dropped without telling the backend
    pub async fn logout(&self) {
        self.session.discard().await;
    }

    pub async fn verify(&self) -> Result<UserProfileDto, SessionUcError> {
        match self.backend.verify_session().await {
            Ok(user) => Ok(user),
            Err(e) => {
                let converted = SessionUcError::from(e);
                if matches!(
                    converted,
                    SessionUcError::AuthRequired | SessionUcError::SessionExpired
                ) {
                    // stale token is useless, drop it right away
                    self.session.discard().await;
                }
                Err(converted)
            }
        }
    }
} // end of impl SessionUseCase
