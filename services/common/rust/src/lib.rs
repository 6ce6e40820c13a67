pub mod api;
pub mod confidentiality;
pub mod config;
pub mod constant;
pub mod error;
pub mod logging;
pub mod model;

use std::sync::Arc;

pub(crate) type AppLogAlias = Arc<String>;
