pub mod backend;
mod base_client;
pub mod directory;
pub mod processor;

pub use base_client::{BaseClientError, BaseClientErrorReason};
