//! In-memory stand-ins for the backend services used across unit tests.

use crate::backend::{
    AuthListener, AuthService, BackendPlatform, DocumentStore, MessageListener,
    MessagingService, Subscription,
};
use crate::config::BackendConfig;
use crate::errors::{BackendError, BackendResult};
use crate::models::{DocumentPath, PushPayload, Session};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub(crate) fn test_config() -> BackendConfig {
    BackendConfig {
        api_key: "AIza-test-key".to_string(),
        auth_domain: "chatapp-test.firebaseapp.com".to_string(),
        database_url: "https://chatapp-test-default-rtdb.firebaseio.com".to_string(),
        project_id: "chatapp-test".to_string(),
        storage_bucket: "chatapp-test.appspot.com".to_string(),
        messaging_sender_id: "806594827553".to_string(),
        app_id: "1:806594827553:web:786e07011753d1b0".to_string(),
        measurement_id: None,
    }
}

type Listeners<T> = Rc<RefCell<Vec<(u64, Rc<dyn Fn(T)>)>>>;

fn register<T: 'static>(listeners: &Listeners<T>, next_id: &Cell<u64>, listener: Rc<dyn Fn(T)>) -> Subscription {
    let id = next_id.get();
    next_id.set(id + 1);
    listeners.borrow_mut().push((id, listener));
    let listeners = Rc::downgrade(listeners);
    Subscription::new(move || {
        if let Some(listeners) = listeners.upgrade() {
            listeners.borrow_mut().retain(|(other, _)| *other != id);
        }
    })
}

fn emit<T: Clone>(listeners: &Listeners<T>, value: &T) {
    // snapshot so listeners may subscribe or unsubscribe while being called
    let snapshot: Vec<_> = listeners
        .borrow()
        .iter()
        .map(|(_, listener)| Rc::clone(listener))
        .collect();
    for listener in snapshot {
        listener(value.clone());
    }
}

fn signed_in(email: &str) -> Session {
    Session {
        email: Some(email.to_string()),
        ..Session::new(format!("uid-{email}"))
    }
}

/// Auth service whose state tests drive by hand.
#[derive(Clone, Default)]
pub(crate) struct FakeAuth {
    listeners: Listeners<Option<Session>>,
    next_id: Rc<Cell<u64>>,
    pub(crate) registrations: Rc<Cell<u32>>,
}

impl FakeAuth {
    /// Report a new auth state to every listener, like the SDK does.
    pub(crate) fn emit(&self, session: Option<Session>) {
        emit(&self.listeners, &session);
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl fmt::Debug for FakeAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeAuth")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl AuthService for FakeAuth {
    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        self.registrations.set(self.registrations.get() + 1);
        register(&self.listeners, &self.next_id, Rc::from(listener))
    }

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        if password == "correct horse" {
            let session = signed_in(email);
            self.emit(Some(session.clone()));
            Ok(session)
        } else {
            Err(BackendError::sdk("signIn", "auth/wrong-password"))
        }
    }

    async fn register(&self, email: &str, _password: &str) -> BackendResult<Session> {
        let session = signed_in(email);
        self.emit(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.emit(None);
        Ok(())
    }
}

/// Document store backed by a map.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeStore {
    documents: Rc<RefCell<HashMap<String, serde_json::Value>>>,
}

#[async_trait(?Send)]
impl DocumentStore for FakeStore {
    async fn get(&self, path: &DocumentPath) -> BackendResult<Option<serde_json::Value>> {
        Ok(self.documents.borrow().get(&path.to_string()).cloned())
    }

    async fn set(&self, path: &DocumentPath, data: serde_json::Value) -> BackendResult<()> {
        self.documents.borrow_mut().insert(path.to_string(), data);
        Ok(())
    }
}

/// Messaging service that delivers payloads on demand.
#[derive(Clone, Default)]
pub(crate) struct FakeMessaging {
    listeners: Listeners<PushPayload>,
    next_id: Rc<Cell<u64>>,
}

impl FakeMessaging {
    pub(crate) fn deliver(&self, payload: &PushPayload) {
        emit(&self.listeners, payload);
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl fmt::Debug for FakeMessaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeMessaging")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl MessagingService for FakeMessaging {
    fn on_message(&self, listener: MessageListener) -> Subscription {
        register(&self.listeners, &self.next_id, Rc::from(listener))
    }

    async fn get_token(&self, vapid_key: Option<&str>) -> BackendResult<Option<String>> {
        Ok(vapid_key.map(|key| format!("token-for-{key}")))
    }
}

/// Platform handing out the fakes above.
#[derive(Debug, Clone)]
pub(crate) struct FakePlatform {
    pub(crate) auth: FakeAuth,
    pub(crate) store: FakeStore,
    pub(crate) messaging: FakeMessaging,
    pub(crate) messaging_supported: bool,
    pub(crate) init_calls: Rc<Cell<u32>>,
    pub(crate) probe_calls: Rc<Cell<u32>>,
}

impl Default for FakePlatform {
    fn default() -> Self {
        Self {
            auth: FakeAuth::default(),
            store: FakeStore::default(),
            messaging: FakeMessaging::default(),
            messaging_supported: true,
            init_calls: Rc::new(Cell::new(0)),
            probe_calls: Rc::new(Cell::new(0)),
        }
    }
}

#[async_trait(?Send)]
impl BackendPlatform for FakePlatform {
    type App = ();
    type Auth = FakeAuth;
    type Store = FakeStore;
    type Messaging = FakeMessaging;

    fn initialize_app(&self, _config: &BackendConfig) -> BackendResult<Self::App> {
        self.init_calls.set(self.init_calls.get() + 1);
        Ok(())
    }

    fn auth(&self, _app: &Self::App) -> Self::Auth {
        self.auth.clone()
    }

    fn store(&self, _app: &Self::App) -> Self::Store {
        self.store.clone()
    }

    async fn messaging_supported(&self) -> BackendResult<bool> {
        self.probe_calls.set(self.probe_calls.get() + 1);
        Ok(self.messaging_supported)
    }

    fn messaging(&self, _app: &Self::App) -> BackendResult<Self::Messaging> {
        Ok(self.messaging.clone())
    }
}
