use std::boxed::Box;
use std::sync::Arc;

use storefront_common::api::web::dto::ZipCodeErrorReason;
use storefront_common::logging::{app_log_event, AppLogContext, AppLogLevel};
use storefront_common::model::ShipAddrModel;

use crate::adapter::directory::AbstractPostalDirectory;

#[derive(Debug, PartialEq, Eq)]
pub enum PincodeAutofillError {
    BadCode(ZipCodeErrorReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityOptionModel {
    pub value: String,
    pub label: String,
}

// What the address form does with a lookup result. A lone area fills
// both fields, several areas fill the state and leave the city to the
// user, no match at all falls back to free-text entry.
#[derive(Debug, PartialEq, Eq)]
pub enum PincodeAutofillOutcome {
    AutoFilled { state: String, city: String },
    Ambiguous { state: String, options: Vec<CityOptionModel> },
    ManualEntry,
}

pub struct PincodeAutofillUseCase {
    directory: Arc<Box<dyn AbstractPostalDirectory>>,
    logctx: Arc<AppLogContext>,
}

impl PincodeAutofillUseCase {
    pub fn new(directory: Arc<Box<dyn AbstractPostalDirectory>>, logctx: Arc<AppLogContext>) -> Self {
        Self { directory, logctx }
    }

    pub async fn execute(
        &self,
        code: &str,
    ) -> Result<PincodeAutofillOutcome, PincodeAutofillError> {
        if let Some(reason) = ShipAddrModel::check_zip_code(code) {
            return Err(PincodeAutofillError::BadCode(reason));
        }
        let areas = match self.directory.lookup_by_pincode(code).await {
            Ok(v) => v,
            Err(e) => {
                // lookup is best-effort, a directory outage degrades
                // to manual entry without surfacing an error
                let logctx_p = &self.logctx;
                app_log_event!(
                    logctx_p,
                    AppLogLevel::WARNING,
                    "pincode:{code}, lookup-degraded, {:?}",
                    e
                );
                return Ok(PincodeAutofillOutcome::ManualEntry);
            }
        };
        let outcome = match areas.as_slice() {
            [] => PincodeAutofillOutcome::ManualEntry,
            [lone] => PincodeAutofillOutcome::AutoFilled {
                state: lone.state.clone(),
                city: lone.name.clone(),
            },
            _many => {
                let state = areas
                    .first()
                    .map(|a| a.state.clone())
                    .unwrap_or_default();
                let options = areas
                    .iter()
                    .map(|a| CityOptionModel {
                        value: a.name.clone(),
                        label: format!("{} - {}", a.district, a.name),
                    })
                    .collect();
                PincodeAutofillOutcome::Ambiguous { state, options }
            }
        };
        Ok(outcome)
    } // end of fn execute
} // end of impl PincodeAutofillUseCase
