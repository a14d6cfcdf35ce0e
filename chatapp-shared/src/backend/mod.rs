//! # Backend Services
//!
//! Traits describing the hosted auth, document store and push messaging
//! services, plus the [`BackendClient`] facade that owns their handles.
//!
//! Everything here is single threaded: handles are shared through `Rc` and
//! futures are `?Send`, matching the browser event loop the client runs on.

mod client;

pub use client::{BackendClient, Capabilities};

use crate::config::BackendConfig;
use crate::errors::BackendResult;
use crate::models::{DocumentPath, PushPayload, Session};
use async_trait::async_trait;
use std::fmt;

/// Callback receiving every auth state change.
pub type AuthListener = Box<dyn Fn(Option<Session>)>;

/// Callback receiving every foreground push message.
pub type MessageListener = Box<dyn Fn(PushPayload)>;

/// A registered listener. Dropping it unregisters the listener.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap the function that unregisters the listener.
    #[must_use]
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Authentication service.
#[async_trait(?Send)]
pub trait AuthService {
    /// Register a listener for auth state changes. The SDK invokes it once
    /// with the restored state and again on every sign in or sign out.
    ///
    /// This is the only authoritative view of auth; the SDK's locally cached
    /// user may be stale while a persisted session is being restored.
    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription;

    /// Sign in with email and password.
    ///
    /// # Errors
    /// Returns [`crate::errors::BackendError::Sdk`] when the credentials are
    /// rejected or the service is unreachable.
    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session>;

    /// Create an account and sign it in.
    ///
    /// # Errors
    /// Returns [`crate::errors::BackendError::Sdk`] on rejection.
    async fn register(&self, email: &str, password: &str) -> BackendResult<Session>;

    /// Sign the current user out.
    ///
    /// # Errors
    /// Returns [`crate::errors::BackendError::Sdk`] on failure.
    async fn sign_out(&self) -> BackendResult<()>;
}

/// Document store service.
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Read one document, `None` when it does not exist.
    ///
    /// # Errors
    /// Returns [`crate::errors::BackendError::Sdk`] on failure.
    async fn get(&self, path: &DocumentPath) -> BackendResult<Option<serde_json::Value>>;

    /// Create or overwrite one document.
    ///
    /// # Errors
    /// Returns [`crate::errors::BackendError::Sdk`] on failure.
    async fn set(&self, path: &DocumentPath, data: serde_json::Value) -> BackendResult<()>;
}

/// Push messaging service.
#[async_trait(?Send)]
pub trait MessagingService {
    /// Register a listener for messages that arrive while the app is in the
    /// foreground.
    fn on_message(&self, listener: MessageListener) -> Subscription;

    /// Exchange the browser's push subscription for a registration token.
    /// `None` when the user has not granted notification permission.
    ///
    /// # Errors
    /// Returns [`crate::errors::BackendError::Sdk`] on failure.
    async fn get_token(&self, vapid_key: Option<&str>) -> BackendResult<Option<String>>;
}

/// Binding to a concrete backend SDK.
#[async_trait(?Send)]
pub trait BackendPlatform {
    /// Initialized application handle
    type App: Clone;
    /// Auth service handle
    type Auth: AuthService;
    /// Document store handle
    type Store: DocumentStore;
    /// Messaging handle
    type Messaging: MessagingService;

    /// Create the application handle.
    ///
    /// # Errors
    /// Returns an error when the SDK rejects the configuration.
    fn initialize_app(&self, config: &BackendConfig) -> BackendResult<Self::App>;

    /// Auth service bound to `app`.
    fn auth(&self, app: &Self::App) -> Self::Auth;

    /// Document store bound to `app`.
    fn store(&self, app: &Self::App) -> Self::Store;

    /// Whether this browser supports push messaging.
    ///
    /// # Errors
    /// Only for SDK failures. An unsupported platform is `Ok(false)`.
    async fn messaging_supported(&self) -> BackendResult<bool>;

    /// Messaging service bound to `app`. Only called after
    /// [`BackendPlatform::messaging_supported`] returned `true`.
    ///
    /// # Errors
    /// Returns an error when the SDK fails to create the service.
    fn messaging(&self, app: &Self::App) -> BackendResult<Self::Messaging>;
}
