use crate::errors::{BackendError, BackendResult};
use serde::{Deserialize, Serialize};

/// Build-time key holding the web API key.
pub const API_KEY_VAR: &str = "CHATAPP_FIREBASE_API_KEY";
/// Build-time key holding the auth domain.
pub const AUTH_DOMAIN_VAR: &str = "CHATAPP_FIREBASE_AUTH_DOMAIN";
/// Build-time key holding the realtime database URL.
pub const DATABASE_URL_VAR: &str = "CHATAPP_FIREBASE_DATABASE_URL";
/// Build-time key holding the project id.
pub const PROJECT_ID_VAR: &str = "CHATAPP_FIREBASE_PROJECT_ID";
/// Build-time key holding the storage bucket.
pub const STORAGE_BUCKET_VAR: &str = "CHATAPP_FIREBASE_STORAGE_BUCKET";
/// Build-time key holding the messaging sender id.
pub const MESSAGING_SENDER_ID_VAR: &str = "CHATAPP_FIREBASE_MESSAGING_SENDER_ID";
/// Build-time key holding the app id.
pub const APP_ID_VAR: &str = "CHATAPP_FIREBASE_APP_ID";
/// Build-time key holding the optional analytics measurement id.
pub const MEASUREMENT_ID_VAR: &str = "CHATAPP_FIREBASE_MEASUREMENT_ID";

/// Static configuration handed to the backend SDK on initialization.
///
/// Field names serialize to the exact keys the SDK expects, so the struct can
/// be passed through as JSON without remapping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    /// Browser API key. Identifies the project, it is not a secret.
    pub api_key: String,
    /// Domain serving the hosted auth handlers
    pub auth_domain: String,
    /// Realtime database endpoint
    #[serde(rename = "databaseURL")]
    pub database_url: String,
    /// Project identifier
    pub project_id: String,
    /// Default storage bucket
    pub storage_bucket: String,
    /// Sender id used by push messaging
    pub messaging_sender_id: String,
    /// Registered web app id (`1:<sender>:web:<hash>`)
    pub app_id: String,
    /// Optional analytics measurement id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

impl BackendConfig {
    /// Builds a configuration from a key lookup, typically backed by
    /// `option_env!` so values are fixed at build time.
    ///
    /// `authDomain`, `storageBucket` and `databaseURL` default to the
    /// conventional hosts derived from the project id when not provided.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let project_id = value(PROJECT_ID_VAR).unwrap_or_default();

        Self {
            api_key: value(API_KEY_VAR).unwrap_or_default(),
            auth_domain: value(AUTH_DOMAIN_VAR)
                .unwrap_or_else(|| format!("{project_id}.firebaseapp.com")),
            database_url: value(DATABASE_URL_VAR)
                .unwrap_or_else(|| format!("https://{project_id}-default-rtdb.firebaseio.com")),
            storage_bucket: value(STORAGE_BUCKET_VAR)
                .unwrap_or_else(|| format!("{project_id}.appspot.com")),
            messaging_sender_id: value(MESSAGING_SENDER_ID_VAR).unwrap_or_default(),
            app_id: value(APP_ID_VAR).unwrap_or_default(),
            measurement_id: value(MEASUREMENT_ID_VAR),
            project_id,
        }
    }

    /// Checks that every field is present and well formed.
    ///
    /// # Errors
    /// Returns [`BackendError::InvalidConfiguration`] naming the first
    /// offending field.
    pub fn validate(&self) -> BackendResult<()> {
        require("apiKey", &self.api_key)?;
        require("projectId", &self.project_id)?;
        if !self
            .project_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(BackendError::invalid_config(
                "projectId",
                "only lowercase letters, digits and '-' are allowed",
            ));
        }
        require("authDomain", &self.auth_domain)?;
        require("storageBucket", &self.storage_bucket)?;
        if !self.database_url.starts_with("https://") {
            return Err(BackendError::invalid_config(
                "databaseURL",
                "must be an https:// URL",
            ));
        }
        require("messagingSenderId", &self.messaging_sender_id)?;
        if !self.messaging_sender_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(BackendError::invalid_config(
                "messagingSenderId",
                "must be numeric",
            ));
        }
        self.validate_app_id()
    }

    fn validate_app_id(&self) -> BackendResult<()> {
        require("appId", &self.app_id)?;
        let parts: Vec<&str> = self.app_id.split(':').collect();
        match parts.as_slice() {
            [version, sender, "web", hash] if !version.is_empty() && !hash.is_empty() => {
                if *sender == self.messaging_sender_id {
                    Ok(())
                } else {
                    Err(BackendError::invalid_config(
                        "appId",
                        "sender segment does not match messagingSenderId",
                    ))
                }
            }
            _ => Err(BackendError::invalid_config(
                "appId",
                "expected the form 1:<sender>:web:<hash>",
            )),
        }
    }
}

fn require(field: &str, value: &str) -> BackendResult<()> {
    if value.trim().is_empty() {
        Err(BackendError::invalid_config(field, "must not be empty"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn valid_config() -> BackendConfig {
        BackendConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "AIza-test-key"),
            (PROJECT_ID_VAR, "chatapp-test"),
            (MESSAGING_SENDER_ID_VAR, "806594827553"),
            (APP_ID_VAR, "1:806594827553:web:786e07011753d1b0"),
        ]))
    }

    #[test]
    fn test_defaults_derived_from_project_id() {
        let config = valid_config();
        assert_eq!(config.auth_domain, "chatapp-test.firebaseapp.com");
        assert_eq!(config.storage_bucket, "chatapp-test.appspot.com");
        assert_eq!(
            config.database_url,
            "https://chatapp-test-default-rtdb.firebaseio.com"
        );
        assert_eq!(config.measurement_id, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = BackendConfig::from_lookup(lookup_from(&[
            (PROJECT_ID_VAR, "chatapp-test"),
            (AUTH_DOMAIN_VAR, "login.example.com"),
            (MEASUREMENT_ID_VAR, "G-TEST"),
            (STORAGE_BUCKET_VAR, "  "),
        ]));
        assert_eq!(config.auth_domain, "login.example.com");
        assert_eq!(config.measurement_id.as_deref(), Some("G-TEST"));
        // blank values fall back to the derived default
        assert_eq!(config.storage_bucket, "chatapp-test.appspot.com");
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let mut config = valid_config();
        config.api_key.clear();
        let error = config.validate().unwrap_err();
        assert_eq!(error, BackendError::invalid_config("apiKey", "must not be empty"));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_project_id_charset() {
        let mut config = valid_config();
        config.project_id = "ChatApp".to_string();
        assert!(matches!(
            config.validate(),
            Err(BackendError::InvalidConfiguration { field, .. }) if field == "projectId"
        ));
    }

    #[test]
    fn test_database_url_must_be_https() {
        let mut config = valid_config();
        config.database_url = "http://insecure.example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(BackendError::InvalidConfiguration { field, .. }) if field == "databaseURL"
        ));
    }

    #[test]
    fn test_app_id_shape_and_sender() {
        let mut config = valid_config();
        config.app_id = "not-an-app-id".to_string();
        assert!(config.validate().is_err());

        config.app_id = "1:111:web:abc".to_string();
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("messagingSenderId"));
    }

    #[test]
    fn test_sender_id_must_be_numeric() {
        let mut config = valid_config();
        config.messaging_sender_id = "abc".to_string();
        config.app_id = "1:abc:web:123".to_string();
        assert!(matches!(
            config.validate(),
            Err(BackendError::InvalidConfiguration { field, .. }) if field == "messagingSenderId"
        ));
    }

    #[test]
    fn test_serializes_with_sdk_field_names() {
        let json = serde_json::to_value(valid_config()).unwrap();
        assert_eq!(json["apiKey"], "AIza-test-key");
        assert_eq!(json["projectId"], "chatapp-test");
        assert_eq!(json["messagingSenderId"], "806594827553");
        assert!(json.get("databaseURL").is_some());
        assert!(json.get("measurementId").is_none());
    }
}
