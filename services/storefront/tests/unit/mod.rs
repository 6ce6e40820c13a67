mod auth;
mod model;
mod usecase;

use std::collections::HashMap;
use std::sync::OnceLock;

use storefront_common::config::{AppCfgInitArgs, AppConfig};
use storefront_common::constant::env_vars::{CFG_FILEPATH, SERVICE_BASEPATH, SYS_BASEPATH};

use storefront::AppSharedState;

const EXAMPLE_REL_PATH: &str = "/tests/unit/examples/";

pub(crate) fn ut_setup_config(cfg_filename: &str) -> AppConfig {
    let basepath = env!("CARGO_MANIFEST_DIR").to_string();
    let env_var_map = HashMap::from([
        (SYS_BASEPATH.to_string(), basepath.clone()),
        (SERVICE_BASEPATH.to_string(), basepath),
        (
            CFG_FILEPATH.to_string(),
            EXAMPLE_REL_PATH.to_string() + cfg_filename,
        ),
    ]);
    AppConfig::new(AppCfgInitArgs { env_var_map }).unwrap()
}

pub(crate) fn ut_setup_sharestate() -> &'static AppSharedState {
    static SHARED: OnceLock<AppSharedState> = OnceLock::new();
    SHARED.get_or_init(|| {
        let cfg = ut_setup_config("config_ok.json");
        AppSharedState::new(cfg).unwrap()
    })
}
