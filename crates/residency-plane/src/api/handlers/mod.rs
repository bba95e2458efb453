//! API request handlers

pub mod config;
pub mod hooks;

pub use config::{get_config, list_jurisdictions, ConfigResponse, JurisdictionsResponse};
pub use hooks::{pre_auth, pre_signup, HookEvent, PreAuthResponse, PreSignupResponse, UserAttributes};
