use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::result::Result as DefaultResult;
use std::sync::Arc;

use serde::Deserialize;

use crate::constant::{env_vars, logging as const_log};
use crate::error::{AppCfgError, AppErrorCode};
use crate::AppLogAlias;

#[derive(Deserialize)]
pub struct AppLogHandlerCfg {
    pub min_level: const_log::Level,
    pub destination: const_log::Destination,
    pub alias: AppLogAlias,
    pub path: Option<String>,
}

#[derive(Deserialize)]
pub struct AppLoggerCfg {
    pub alias: AppLogAlias,
    pub handlers: Vec<String>,
    pub level: Option<const_log::Level>,
}

#[derive(Deserialize)]
pub struct AppLoggingCfg {
    pub handlers: Vec<AppLogHandlerCfg>,
    pub loggers: Vec<AppLoggerCfg>,
}

#[derive(Deserialize, Clone)]
pub struct AppRemoteHostCfg {
    #[serde(deserialize_with = "jsn_deny_empty_string")]
    pub host: String,
    pub port: u16,
}

// `dev` entries reach the real remote host, `test` entries switch the
// corresponding adapter to its mock implementation
#[allow(non_camel_case_types)]
#[derive(Deserialize)]
#[serde(tag = "mode")]
pub enum App3rdPartyCfg {
    dev {
        name: String,
        host: String,
        port: u16,
        confidentiality_path: String,
    },
    test {
        name: String,
        data_src: String,
    },
}

#[derive(Deserialize)]
#[serde(tag = "source")]
pub enum AppConfidentialCfg {
    UserSpace { sys_path: String },
}

pub struct AppBasepathCfg {
    pub system: String,
    pub app: String,
}

#[derive(Deserialize)]
pub struct AppApiClientCfg {
    pub logging: AppLoggingCfg,
    pub backend: AppRemoteHostCfg,
    pub postal_directory: AppRemoteHostCfg,
    pub third_parties: Vec<Arc<App3rdPartyCfg>>,
    pub confidentiality: AppConfidentialCfg,
}

pub struct AppConfig {
    pub basepath: AppBasepathCfg,
    pub api_client: AppApiClientCfg,
}

pub struct AppCfgInitArgs {
    pub env_var_map: HashMap<String, String>,
}

fn jsn_deny_empty_string<'de, D>(raw: D) -> DefaultResult<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let val = String::deserialize(raw)?;
    if val.is_empty() {
        let unexp = serde::de::Unexpected::Str("");
        let exp: &str = "non-empty-string";
        Err(serde::de::Error::invalid_value(unexp, &exp))
    } else {
        Ok(val)
    }
}

impl AppConfig {
    pub fn new(args: AppCfgInitArgs) -> DefaultResult<Self, AppCfgError> {
        let AppCfgInitArgs { env_var_map } = args;
        let sys_basepath = env_var_map
            .get(env_vars::SYS_BASEPATH)
            .ok_or(AppCfgError {
                code: AppErrorCode::MissingSysBasePath,
                detail: None,
            })?
            .clone();
        let app_basepath = env_var_map
            .get(env_vars::SERVICE_BASEPATH)
            .ok_or(AppCfgError {
                code: AppErrorCode::MissingAppBasePath,
                detail: None,
            })?
            .clone();
        let cfg_relpath = env_var_map.get(env_vars::CFG_FILEPATH).ok_or(AppCfgError {
            code: AppErrorCode::MissingConfigPath,
            detail: None,
        })?;
        let api_client = Self::load_file(app_basepath.as_str(), cfg_relpath.as_str())?;
        Self::validate_logging(&api_client.logging)?;
        Ok(Self {
            basepath: AppBasepathCfg {
                system: sys_basepath,
                app: app_basepath,
            },
            api_client,
        })
    } // end of fn new

    fn load_file(basepath: &str, relpath: &str) -> DefaultResult<AppApiClientCfg, AppCfgError> {
        let mut fullpath = basepath.to_string();
        if !fullpath.ends_with('/') && !relpath.starts_with('/') {
            fullpath += "/";
        }
        fullpath += relpath;
        let f = File::open(fullpath.as_str()).map_err(|e| AppCfgError {
            code: AppErrorCode::IOerror(e.kind()),
            detail: Some(fullpath.clone()),
        })?;
        let rdr = BufReader::new(f);
        serde_json::from_reader::<_, AppApiClientCfg>(rdr).map_err(|e| AppCfgError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: Some(e.to_string()),
        })
    }

    fn validate_logging(cfg: &AppLoggingCfg) -> DefaultResult<(), AppCfgError> {
        if cfg.handlers.is_empty() {
            return Err(AppCfgError {
                code: AppErrorCode::NoLogHandlerCfg,
                detail: None,
            });
        }
        if cfg.loggers.is_empty() {
            return Err(AppCfgError {
                code: AppErrorCode::NoLoggerCfg,
                detail: None,
            });
        }
        let hdlr_aliases = cfg
            .handlers
            .iter()
            .map(|h| h.alias.as_str())
            .collect::<Vec<_>>();
        for logger in cfg.loggers.iter() {
            if logger.handlers.is_empty() {
                return Err(AppCfgError {
                    code: AppErrorCode::NoHandlerInLoggerCfg,
                    detail: Some(logger.alias.as_ref().clone()),
                });
            }
            let missing = logger
                .handlers
                .iter()
                .find(|a| !hdlr_aliases.contains(&a.as_str()));
            if let Some(alias) = missing {
                return Err(AppCfgError {
                    code: AppErrorCode::InvalidHandlerLoggerCfg,
                    detail: Some(alias.clone()),
                });
            }
        }
        Ok(())
    }
} // end of impl AppConfig

impl App3rdPartyCfg {
    pub fn label(&self) -> &str {
        match self {
            Self::dev { name, .. } => name.as_str(),
            Self::test { name, .. } => name.as_str(),
        }
    }
}
