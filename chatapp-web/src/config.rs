//! Frontend configuration module
//!
//! Every value is read with `option_env!`, so it is fixed when the bundle is
//! built and never embedded as a literal in the source.

use shared::BackendConfig;
use shared::config::backend::{
    API_KEY_VAR, APP_ID_VAR, AUTH_DOMAIN_VAR, DATABASE_URL_VAR, MEASUREMENT_ID_VAR,
    MESSAGING_SENDER_ID_VAR, PROJECT_ID_VAR, STORAGE_BUCKET_VAR,
};

/// Element id the app mounts into.
pub const DEFAULT_MOUNT_ID: &str = "app";
/// Log filter used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Frontend configuration
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Settings handed to the backend SDK
    pub backend: BackendConfig,
    /// Public key used when requesting a push token
    pub vapid_key: Option<String>,
    /// `tracing` filter directive
    pub log_level: String,
    /// Id of the host element
    pub mount_id: String,
}

fn build_time(key: &str) -> Option<String> {
    let value = match key {
        API_KEY_VAR => option_env!("CHATAPP_FIREBASE_API_KEY"),
        AUTH_DOMAIN_VAR => option_env!("CHATAPP_FIREBASE_AUTH_DOMAIN"),
        DATABASE_URL_VAR => option_env!("CHATAPP_FIREBASE_DATABASE_URL"),
        PROJECT_ID_VAR => option_env!("CHATAPP_FIREBASE_PROJECT_ID"),
        STORAGE_BUCKET_VAR => option_env!("CHATAPP_FIREBASE_STORAGE_BUCKET"),
        MESSAGING_SENDER_ID_VAR => option_env!("CHATAPP_FIREBASE_MESSAGING_SENDER_ID"),
        APP_ID_VAR => option_env!("CHATAPP_FIREBASE_APP_ID"),
        MEASUREMENT_ID_VAR => option_env!("CHATAPP_FIREBASE_MEASUREMENT_ID"),
        _ => None,
    };
    value.map(str::to_string)
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::from_lookup(build_time),
            vapid_key: option_env!("CHATAPP_FIREBASE_VAPID_KEY")
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            log_level: option_env!("CHATAPP_LOG_LEVEL")
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
            mount_id: DEFAULT_MOUNT_ID.to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vapid_key(&self) -> Option<&str> {
        self.vapid_key.as_deref()
    }
}
