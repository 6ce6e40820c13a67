pub mod adapter;
pub mod api;
pub mod auth;
pub mod model;
pub mod usecase;

use std::boxed::Box;
use std::sync::Arc;

use storefront_common::config::AppConfig;
use storefront_common::confidentiality;
use storefront_common::error::AppConfidentialityError;
use storefront_common::logging::AppLogContext;

use adapter::backend::{app_backend_context, AbstractStorefrontBackend, BackendApiError};
use adapter::directory::{
    app_postal_directory_context, AbstractPostalDirectory, DirectoryLookupError,
};
use adapter::processor::{app_processor_context, AbstractPaymentProcessor, AppProcessorError};
use auth::AppSessionState;

pub mod pricing_rule {
    // flat delivery fee per product order, in whole currency units
    pub const DELIVERY_FLAT_FEE: u32 = 299;
    // GST applied to service bookings
    pub const SERVICE_TAX_RATE_PERCENT: u32 = 18;
}

#[derive(Debug)]
#[rustfmt::skip]
pub enum ShrStateInitProgress {
    Confidentiality, BackendApi, PostalDirectory, ExternalProcessor,
}

#[derive(Debug)]
pub struct ShrStateInitError {
    pub progress: ShrStateInitProgress,
}

impl From<AppConfidentialityError> for ShrStateInitError {
    fn from(_value: AppConfidentialityError) -> Self {
        Self {
            progress: ShrStateInitProgress::Confidentiality,
        }
    }
}
impl From<BackendApiError> for ShrStateInitError {
    fn from(_value: BackendApiError) -> Self {
        Self {
            progress: ShrStateInitProgress::BackendApi,
        }
    }
}
impl From<DirectoryLookupError> for ShrStateInitError {
    fn from(_value: DirectoryLookupError) -> Self {
        Self {
            progress: ShrStateInitProgress::PostalDirectory,
        }
    }
}
impl From<AppProcessorError> for ShrStateInitError {
    fn from(_value: AppProcessorError) -> Self {
        Self {
            progress: ShrStateInitProgress::ExternalProcessor,
        }
    }
}

pub struct AppSharedState {
    _config: Arc<AppConfig>,
    _log_ctx: Arc<AppLogContext>,
    _session: Arc<AppSessionState>,
    _backend: Arc<Box<dyn AbstractStorefrontBackend>>,
    _directory: Arc<Box<dyn AbstractPostalDirectory>>,
    _processors: Arc<Box<dyn AbstractPaymentProcessor>>,
}

impl AppSharedState {
    pub fn new(cfg: AppConfig) -> Result<Self, ShrStateInitError> {
        let log_ctx = AppLogContext::new(&cfg.basepath, &cfg.api_client.logging);
        let log_ctx = Arc::new(log_ctx);
        let session = Arc::new(AppSessionState::new());
        let cfdntl = confidentiality::build_context(&cfg)?;
        let cfdntl = Arc::new(cfdntl);
        let backend = app_backend_context(
            &cfg.api_client.backend,
            session.clone(),
            log_ctx.clone(),
        )?;
        let backend = Arc::new(backend);
        let directory =
            app_postal_directory_context(&cfg.api_client.postal_directory, log_ctx.clone())?;
        let processors = app_processor_context(
            cfg.api_client.third_parties.as_slice(),
            backend.clone(),
            cfdntl,
            log_ctx.clone(),
        )?;
        Ok(Self {
            _config: Arc::new(cfg),
            _log_ctx: log_ctx,
            _session: session,
            _backend: backend,
            _directory: Arc::new(directory),
            _processors: Arc::new(processors),
        })
    } // end of fn new

    pub fn config(&self) -> &Arc<AppConfig> {
        &self._config
    }
    pub fn log_context(&self) -> Arc<AppLogContext> {
        self._log_ctx.clone()
    }
    pub fn session(&self) -> Arc<AppSessionState> {
        self._session.clone()
    }
    pub fn backend(&self) -> Arc<Box<dyn AbstractStorefrontBackend>> {
        self._backend.clone()
    }
    pub fn postal_directory(&self) -> Arc<Box<dyn AbstractPostalDirectory>> {
        self._directory.clone()
    }
    pub fn processors(&self) -> Arc<Box<dyn AbstractPaymentProcessor>> {
        self._processors.clone()
    }
} // end of impl AppSharedState

impl Clone for AppSharedState {
    fn clone(&self) -> Self {
        Self {
            _config: self._config.clone(),
            _log_ctx: self._log_ctx.clone(),
            _session: self._session.clone(),
            _backend: self._backend.clone(),
            _directory: self._directory.clone(),
            _processors: self._processors.clone(),
        }
    }
}
