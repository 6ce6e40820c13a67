use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[rustfmt::skip]
pub enum AuthErrorReason {
    LoggedOut, SessionExpired,
}

#[derive(Debug)]
pub struct AppAuthError {
    pub reason: AuthErrorReason,
}

#[derive(Deserialize)]
struct RawClaimSet {
    exp: Option<i64>,
}

// the backend may hand out either a JWT or an opaque session id, for
// JWTs the expiry claim is read locally so an expired session is
// caught before any request leaves this client. The signature is NOT
// checked here, verification belongs to the server side.
pub struct SessionTokenModel {
    raw: String,
    exp: Option<DateTime<Utc>>,
}

impl SessionTokenModel {
    pub fn new(raw: String) -> Self {
        let exp = Self::decode_exp(raw.as_str());
        Self { raw, exp }
    }

    fn decode_exp(raw: &str) -> Option<DateTime<Utc>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();
        decode::<RawClaimSet>(raw, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .and_then(|d| d.claims.exp)
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }

    // opaque tokens carry no expiry, they only die server-side
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.map(|t| t <= now).unwrap_or(false)
    }
    pub fn as_raw(&self) -> &str {
        self.raw.as_str()
    }
} // end of impl SessionTokenModel

#[derive(Default)]
pub struct AppSessionState {
    inner: RwLock<Option<SessionTokenModel>>,
}

impl AppSessionState {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    pub async fn start(&self, raw_token: String) {
        let mut guard = self.inner.write().await;
        *guard = Some(SessionTokenModel::new(raw_token));
    }

    pub async fn discard(&self) {
        let mut guard = self.inner.write().await;
        *guard = None;
    }

    pub async fn bearer(&self) -> Result<String, AppAuthError> {
        let guard = self.inner.read().await;
        match guard.as_ref() {
            None => Err(AppAuthError {
                reason: AuthErrorReason::LoggedOut,
            }),
            Some(t) if t.expired_at(Utc::now()) => Err(AppAuthError {
                reason: AuthErrorReason::SessionExpired,
            }),
            Some(t) => Ok(t.as_raw().to_string()),
        }
    }

    pub async fn authorized(&self) -> bool {
        self.bearer().await.is_ok()
    }
} // end of impl AppSessionState
