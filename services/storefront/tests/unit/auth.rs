use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

use storefront::auth::{AppSessionState, AuthErrorReason, SessionTokenModel};

#[derive(Serialize)]
struct UtClaimSet {
    sub: String,
    exp: i64,
}

fn ut_jwt_with_exp(offset: Duration) -> String {
    let claims = UtClaimSet {
        sub: "ut-usr-0187".to_string(),
        exp: (Utc::now() + offset).timestamp(),
    };
    let header = Header::new(Algorithm::HS256);
    encode(&header, &claims, &EncodingKey::from_secret(b"ut-secret")).unwrap()
}

#[tokio::test]
async fn opaque_token_never_expires_locally() {
    let session = AppSessionState::new();
    session.start("ut-opaque-session-id-0001".to_string()).await;
    let token = session.bearer().await.unwrap();
    assert_eq!(token.as_str(), "ut-opaque-session-id-0001");
    assert!(session.authorized().await);
}

#[tokio::test]
async fn jwt_expiry_read_without_signature_check() {
    // signed with a key this client never sees, only the exp claim
    // matters here
    let session = AppSessionState::new();
    session.start(ut_jwt_with_exp(Duration::hours(2))).await;
    assert!(session.authorized().await);
}

#[tokio::test]
async fn expired_jwt_caught_before_any_request() {
    let session = AppSessionState::new();
    session.start(ut_jwt_with_exp(-Duration::hours(2))).await;
    let result = session.bearer().await;
    assert_eq!(result.unwrap_err().reason, AuthErrorReason::SessionExpired);
    assert!(!session.authorized().await);
}

#[tokio::test]
async fn missing_token_means_logged_out() {
    let session = AppSessionState::new();
    let result = session.bearer().await;
    assert_eq!(result.unwrap_err().reason, AuthErrorReason::LoggedOut);
}

#[tokio::test]
async fn discard_drops_an_active_session() {
    let session = AppSessionState::new();
    session.start("ut-opaque-session-id-0001".to_string()).await;
    assert!(session.authorized().await);
    session.discard().await;
    let result = session.bearer().await;
    assert_eq!(result.unwrap_err().reason, AuthErrorReason::LoggedOut);
}

#[test]
fn token_model_expiry_boundary() {
    let now = Utc::now();
    let live = SessionTokenModel::new(ut_jwt_with_exp(Duration::minutes(5)));
    assert!(!live.expired_at(now));
    assert!(live.expired_at(now + Duration::minutes(6)));
    // malformed JWTs degrade to opaque tokens
    let garbled = SessionTokenModel::new("not.a.jwt".to_string());
    assert!(!garbled.expired_at(now));
}
