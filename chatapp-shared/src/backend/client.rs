use super::BackendPlatform;
use crate::config::BackendConfig;
use crate::errors::{BackendError, BackendResult};
use once_cell::unsync::OnceCell;
use std::fmt;
use std::rc::Rc;
use tracing::{info, warn};

/// Optional features the current platform turned out to support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether support for push messaging has been probed yet
    pub messaging_probed: bool,
    /// Whether push messaging is available
    pub has_messaging: bool,
}

/// Single entry point to the hosted backend.
///
/// Owns the application handle and hands out long-lived service handles.
/// Every handle is created at most once per client.
pub struct BackendClient<P: BackendPlatform> {
    platform: P,
    config: BackendConfig,
    app: OnceCell<P::App>,
    auth: OnceCell<Rc<P::Auth>>,
    store: OnceCell<Rc<P::Store>>,
    messaging: OnceCell<Option<Rc<P::Messaging>>>,
}

impl<P: BackendPlatform> BackendClient<P> {
    /// Create a client. Nothing talks to the SDK until [`Self::initialize`].
    #[must_use]
    pub fn new(platform: P, config: BackendConfig) -> Self {
        Self {
            platform,
            config,
            app: OnceCell::new(),
            auth: OnceCell::new(),
            store: OnceCell::new(),
            messaging: OnceCell::new(),
        }
    }

    /// Validate the configuration and create the application handle.
    /// Calling it again after success is a no-op.
    ///
    /// # Errors
    /// Returns [`BackendError::InvalidConfiguration`] for a malformed
    /// configuration, or the SDK's error if it refuses to initialize. Both
    /// are meant to abort startup.
    pub fn initialize(&self) -> BackendResult<()> {
        self.app.get_or_try_init(|| {
            self.config.validate()?;
            let app = self.platform.initialize_app(&self.config)?;
            info!(project_id = %self.config.project_id, "backend initialized");
            Ok::<_, BackendError>(app)
        })?;
        Ok(())
    }

    /// Whether [`Self::initialize`] has succeeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.app.get().is_some()
    }

    fn app(&self) -> BackendResult<&P::App> {
        self.app.get().ok_or(BackendError::NotInitialized)
    }

    /// The auth service handle.
    ///
    /// # Errors
    /// Returns [`BackendError::NotInitialized`] before [`Self::initialize`].
    pub fn auth_handle(&self) -> BackendResult<Rc<P::Auth>> {
        let app = self.app()?;
        Ok(Rc::clone(
            self.auth.get_or_init(|| Rc::new(self.platform.auth(app))),
        ))
    }

    /// The document store handle.
    ///
    /// # Errors
    /// Returns [`BackendError::NotInitialized`] before [`Self::initialize`].
    pub fn store_handle(&self) -> BackendResult<Rc<P::Store>> {
        let app = self.app()?;
        Ok(Rc::clone(
            self.store.get_or_init(|| Rc::new(self.platform.store(app))),
        ))
    }

    /// Probe push messaging support and create the handle if supported.
    ///
    /// The outcome is cached, so the probe runs once per client. `Ok(None)`
    /// means the platform does not support push messaging.
    ///
    /// # Errors
    /// Returns [`BackendError::NotInitialized`] before [`Self::initialize`],
    /// or the SDK's error when probing or creating the service fails.
    pub async fn init_messaging(&self) -> BackendResult<Option<Rc<P::Messaging>>> {
        if let Some(cached) = self.messaging.get() {
            return Ok(cached.clone());
        }
        let app = self.app()?;
        let handle = if self.platform.messaging_supported().await? {
            info!("push messaging available");
            Some(Rc::new(self.platform.messaging(app)?))
        } else {
            warn!("push messaging is not supported on this platform");
            None
        };
        // a concurrent probe may have finished first; keep whichever landed
        Ok(self.messaging.get_or_init(|| handle).clone())
    }

    /// Capability flags callers branch on.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        match self.messaging.get() {
            None => Capabilities::default(),
            Some(handle) => Capabilities {
                messaging_probed: true,
                has_messaging: handle.is_some(),
            },
        }
    }

    /// Registration token for push delivery, `None` when messaging is not
    /// supported or permission was not granted.
    ///
    /// # Errors
    /// Propagates probe and SDK failures.
    pub async fn push_token(&self, vapid_key: Option<&str>) -> BackendResult<Option<String>> {
        use super::MessagingService;

        match self.init_messaging().await? {
            Some(messaging) => messaging.get_token(vapid_key).await,
            None => Ok(None),
        }
    }
}

impl<P: BackendPlatform> fmt::Debug for BackendClient<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendClient")
            .field("project_id", &self.config.project_id)
            .field("initialized", &self.is_initialized())
            .field("capabilities", &self.capabilities())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakePlatform, test_config};
    use futures::executor::block_on;

    #[test]
    fn test_initialize_is_idempotent() {
        let platform = FakePlatform::default();
        let calls = platform.init_calls.clone();
        let client = BackendClient::new(platform, test_config());

        assert!(!client.is_initialized());
        client.initialize().unwrap();
        client.initialize().unwrap();
        assert!(client.is_initialized());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_malformed_config_fails_before_sdk_call() {
        let platform = FakePlatform::default();
        let calls = platform.init_calls.clone();
        let mut config = test_config();
        config.api_key.clear();
        let client = BackendClient::new(platform, config);

        let error = client.initialize().unwrap_err();
        assert!(error.is_fatal());
        assert_eq!(calls.get(), 0);
        assert!(!client.is_initialized());
    }

    #[test]
    fn test_handles_require_initialization() {
        let client = BackendClient::new(FakePlatform::default(), test_config());
        assert_eq!(client.auth_handle().unwrap_err(), BackendError::NotInitialized);
        assert_eq!(client.store_handle().unwrap_err(), BackendError::NotInitialized);
        assert_eq!(
            block_on(client.init_messaging()).unwrap_err(),
            BackendError::NotInitialized
        );
    }

    #[test]
    fn test_handles_are_long_lived() {
        let client = BackendClient::new(FakePlatform::default(), test_config());
        client.initialize().unwrap();
        let first = client.auth_handle().unwrap();
        let second = client.auth_handle().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        let store_a = client.store_handle().unwrap();
        let store_b = client.store_handle().unwrap();
        assert!(Rc::ptr_eq(&store_a, &store_b));
    }

    #[test]
    fn test_unsupported_messaging_is_absent_not_error() {
        let platform = FakePlatform {
            messaging_supported: false,
            ..FakePlatform::default()
        };
        let client = BackendClient::new(platform, test_config());
        client.initialize().unwrap();

        assert_eq!(client.capabilities(), Capabilities::default());
        assert!(block_on(client.init_messaging()).unwrap().is_none());
        assert_eq!(
            client.capabilities(),
            Capabilities {
                messaging_probed: true,
                has_messaging: false
            }
        );
        assert_eq!(block_on(client.push_token(Some("vapid"))).unwrap(), None);
    }

    #[test]
    fn test_supported_messaging_probes_once() {
        let platform = FakePlatform::default();
        let probes = platform.probe_calls.clone();
        let client = BackendClient::new(platform, test_config());
        client.initialize().unwrap();

        let first = block_on(client.init_messaging()).unwrap().unwrap();
        let second = block_on(client.init_messaging()).unwrap().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(probes.get(), 1);
        assert!(client.capabilities().has_messaging);
    }

    #[test]
    fn test_push_token_delegates_to_messaging() {
        let client = BackendClient::new(FakePlatform::default(), test_config());
        client.initialize().unwrap();
        assert_eq!(
            block_on(client.push_token(Some("vapid-key"))).unwrap(),
            Some("token-for-vapid-key".to_string())
        );
    }

    #[test]
    fn test_auth_handle_drives_attached_session() {
        use crate::backend::AuthService;
        use crate::session::SessionStore;

        let client = BackendClient::new(FakePlatform::default(), test_config());
        client.initialize().unwrap();
        let auth = client.auth_handle().unwrap();
        let session = SessionStore::new();
        session.attach(auth.as_ref());

        let rejected = block_on(auth.sign_in("ada@example.com", "nope")).unwrap_err();
        assert_eq!(rejected, BackendError::sdk("signIn", "auth/wrong-password"));
        assert!(!session.state().is_resolved());

        block_on(auth.sign_in("ada@example.com", "correct horse")).unwrap();
        assert!(session.state().is_authenticated());
        block_on(auth.sign_out()).unwrap();
        assert!(!session.state().is_authenticated());
        assert!(session.state().is_resolved());
    }

    #[test]
    fn test_store_handle_reads_what_it_wrote() {
        use crate::backend::DocumentStore;
        use crate::models::DocumentPath;

        let client = BackendClient::new(FakePlatform::default(), test_config());
        client.initialize().unwrap();
        let store = client.store_handle().unwrap();
        let path = DocumentPath::new("groups", "g-1").unwrap();

        assert_eq!(block_on(store.get(&path)).unwrap(), None);
        let data = serde_json::json!({"name": "Team"});
        block_on(store.set(&path, data.clone())).unwrap();
        assert_eq!(block_on(store.get(&path)).unwrap(), Some(data));
    }

    #[test]
    fn test_debug_output() {
        let client = BackendClient::new(FakePlatform::default(), test_config());
        let debug = format!("{client:?}");
        assert!(debug.contains("BackendClient"));
        assert!(debug.contains("chatapp-test"));
    }
}
