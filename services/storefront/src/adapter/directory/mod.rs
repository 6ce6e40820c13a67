use std::boxed::Box;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::header::{HeaderValue, ACCEPT};
use hyper::Method;
use serde::Deserialize;
use tokio_native_tls::TlsConnector;

use storefront_common::config::AppRemoteHostCfg;
use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};

use super::base_client::{build_secure_connector, BaseClient, BaseClientError};

#[derive(Debug)]
pub enum DirectoryLookupErrorReason {
    LowLvlNet(BaseClientError),
    DecodeFailure(String, u16),
}

#[derive(Debug)]
pub struct DirectoryLookupError {
    pub reason: DirectoryLookupErrorReason,
}

impl From<BaseClientError> for DirectoryLookupError {
    fn from(value: BaseClientError) -> Self {
        Self {
            reason: DirectoryLookupErrorReason::LowLvlNet(value),
        }
    }
}

// one delivery area served by a postal code, several of them may share
// the same code within a district
#[derive(Deserialize, Debug, Clone)]
pub struct PostalAreaDto {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "State")]
    pub state: String,
}

#[derive(Deserialize, Debug)]
struct PincodeLookupEntryDto {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "PostOffice")]
    post_office: Option<Vec<PostalAreaDto>>,
}

// an unknown code is a successful lookup with zero areas, only
// transport and decode problems surface as errors
#[async_trait]
pub trait AbstractPostalDirectory: Send + Sync {
    async fn lookup_by_pincode(
        &self,
        code: &str,
    ) -> Result<Vec<PostalAreaDto>, DirectoryLookupError>;
}

struct AppPostalDirectoryCtx {
    cfg: AppRemoteHostCfg,
    secure_connector: TlsConnector,
    logctx: Arc<AppLogContext>,
}

pub fn app_postal_directory_context(
    cfg: &AppRemoteHostCfg,
    logctx: Arc<AppLogContext>,
) -> Result<Box<dyn AbstractPostalDirectory>, DirectoryLookupError> {
    let secure_connector = build_secure_connector()?;
    Ok(Box::new(AppPostalDirectoryCtx {
        cfg: cfg.clone(),
        secure_connector,
        logctx,
    }))
}

#[async_trait]
impl AbstractPostalDirectory for AppPostalDirectoryCtx {
    async fn lookup_by_pincode(
        &self,
        code: &str,
    ) -> Result<Vec<PostalAreaDto>, DirectoryLookupError> {
        let mut client = BaseClient::try_build(
            self.logctx.clone(),
            &self.secure_connector,
            self.cfg.host.clone(),
            self.cfg.port,
        )
        .await?;
        let path = format!("/pincode/{code}");
        let headers = vec![(ACCEPT, HeaderValue::from_static("application/json"))];
        let (raw, status) = client
            .execute(path.as_str(), Method::GET, hyper::body::Bytes::new(), headers)
            .await?;
        let entries = serde_json::from_slice::<Vec<PincodeLookupEntryDto>>(raw.as_slice())
            .map_err(|e| {
                let logctx_p = &self.logctx;
                app_log_event!(
                    logctx_p,
                    AppLogLevel::WARNING,
                    "pincode:{code}, status:{}, decode-err:{:?}",
                    status.as_u16(),
                    e
                );
                DirectoryLookupError {
                    reason: DirectoryLookupErrorReason::DecodeFailure(
                        e.to_string(),
                        status.as_u16(),
                    ),
                }
            })?;
        let areas = entries
            .into_iter()
            .next()
            .filter(|entry| entry.status.eq_ignore_ascii_case("success"))
            .and_then(|entry| entry.post_office)
            .unwrap_or_default();
        Ok(areas)
    } // end of fn lookup_by_pincode
}

// canned directory for tests and offline development
#[derive(Default)]
pub struct MockPostalDirectory {
    records: HashMap<String, Vec<PostalAreaDto>>,
}

impl MockPostalDirectory {
    pub fn build() -> Self {
        Self {
            records: HashMap::new(),
        }
    }
    pub fn with_areas(mut self, code: &str, areas: Vec<PostalAreaDto>) -> Self {
        let _old = self.records.insert(code.to_string(), areas);
        self
    }
}

#[async_trait]
impl AbstractPostalDirectory for MockPostalDirectory {
    async fn lookup_by_pincode(
        &self,
        code: &str,
    ) -> Result<Vec<PostalAreaDto>, DirectoryLookupError> {
        Ok(self.records.get(code).cloned().unwrap_or_default())
    }
}

// always-failing variant, for exercising the degraded path
pub struct BrokenPostalDirectory;

#[async_trait]
impl AbstractPostalDirectory for BrokenPostalDirectory {
    async fn lookup_by_pincode(
        &self,
        _code: &str,
    ) -> Result<Vec<PostalAreaDto>, DirectoryLookupError> {
        Err(DirectoryLookupError {
            reason: DirectoryLookupErrorReason::DecodeFailure("mock-broken".to_string(), 502),
        })
    }
}
