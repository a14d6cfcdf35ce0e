//! Binding of the backend traits to the Firebase web SDK.

use crate::config::FrontendConfig;
use async_trait::async_trait;
use once_cell::unsync::OnceCell;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_wasm_bindgen::{Serializer, from_value};
use shared::backend::{
    AuthListener, AuthService, BackendPlatform, DocumentStore, MessageListener,
    MessagingService, Subscription,
};
use shared::models::{DocumentPath, PushPayload, Session};
use shared::{BackendClient, BackendConfig, BackendError, BackendResult};
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/js/firebase.js")]
extern "C" {
    #[wasm_bindgen(catch, js_name = initApp)]
    fn init_app(config: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = authHandle)]
    fn auth_handle(app: &JsValue) -> JsValue;

    #[wasm_bindgen(js_name = storeHandle)]
    fn store_handle(app: &JsValue) -> JsValue;

    #[wasm_bindgen(js_name = watchAuthState)]
    fn watch_auth_state(auth: &JsValue, callback: &Closure<dyn FnMut(JsValue)>) -> js_sys::Function;

    #[wasm_bindgen(catch, js_name = signIn)]
    async fn sign_in(auth: &JsValue, email: &str, password: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = register)]
    async fn register(auth: &JsValue, email: &str, password: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = signOut)]
    async fn sign_out(auth: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = messagingSupported)]
    async fn messaging_supported() -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = messagingHandle)]
    fn messaging_handle(app: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = watchMessages)]
    fn watch_messages(messaging: &JsValue, callback: &Closure<dyn FnMut(JsValue)>) -> js_sys::Function;

    #[wasm_bindgen(catch, js_name = pushToken)]
    async fn push_token(messaging: &JsValue, vapid_key: Option<String>) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = getDocument)]
    async fn get_document(db: &JsValue, path: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_name = setDocument)]
    async fn set_document(db: &JsValue, path: &str, data: JsValue) -> Result<JsValue, JsValue>;
}

/// Client type used throughout the app.
pub type FirebaseClient = BackendClient<FirebasePlatform>;

thread_local! {
    static SHARED_CLIENT: OnceCell<Rc<FirebaseClient>> = OnceCell::new();
}

/// The process-wide backend client, built from the frontend configuration.
pub fn shared() -> Rc<FirebaseClient> {
    SHARED_CLIENT.with(|cell| {
        Rc::clone(cell.get_or_init(|| {
            let config = FrontendConfig::new();
            Rc::new(BackendClient::new(FirebasePlatform, config.backend))
        }))
    })
}

fn sdk_error(operation: &str, error: &JsValue) -> BackendError {
    let message = error
        .as_string()
        .unwrap_or_else(|| format!("{error:?}"));
    BackendError::sdk(operation, message)
}

fn from_js<T: DeserializeOwned>(operation: &str, value: JsValue) -> BackendResult<T> {
    from_value(value).map_err(|err| BackendError::sdk(operation, err.to_string()))
}

/// Maps become plain objects, which is what the SDK expects for documents
/// and options.
fn to_js<T: Serialize>(operation: &str, value: &T) -> BackendResult<JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| BackendError::sdk(operation, err.to_string()))
}

/// Turn an SDK listener registration into a [`Subscription`] that keeps the
/// callback alive until it is unregistered.
fn hold(closure: Closure<dyn FnMut(JsValue)>, unsubscribe: js_sys::Function) -> Subscription {
    Subscription::new(move || {
        if let Err(err) = unsubscribe.call0(&JsValue::NULL) {
            warn!(error = ?err, "failed to unregister listener");
        }
        drop(closure);
    })
}

/// Firebase web SDK.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirebasePlatform;

#[async_trait(?Send)]
impl BackendPlatform for FirebasePlatform {
    type App = JsValue;
    type Auth = FirebaseAuth;
    type Store = FirestoreStore;
    type Messaging = FirebaseMessaging;

    fn initialize_app(&self, config: &BackendConfig) -> BackendResult<Self::App> {
        let config = to_js("initializeApp", config)?;
        init_app(&config).map_err(|err| sdk_error("initializeApp", &err))
    }

    fn auth(&self, app: &Self::App) -> Self::Auth {
        FirebaseAuth {
            handle: auth_handle(app),
        }
    }

    fn store(&self, app: &Self::App) -> Self::Store {
        FirestoreStore {
            handle: store_handle(app),
        }
    }

    async fn messaging_supported(&self) -> BackendResult<bool> {
        let supported = messaging_supported()
            .await
            .map_err(|err| sdk_error("isSupported", &err))?;
        Ok(supported.as_bool().unwrap_or(false))
    }

    fn messaging(&self, app: &Self::App) -> BackendResult<Self::Messaging> {
        let handle = messaging_handle(app).map_err(|err| sdk_error("getMessaging", &err))?;
        Ok(FirebaseMessaging { handle })
    }
}

/// Firebase Auth handle.
#[derive(Debug, Clone)]
pub struct FirebaseAuth {
    handle: JsValue,
}

impl FirebaseAuth {
    fn session_from(operation: &str, user: JsValue) -> BackendResult<Option<Session>> {
        if user.is_null() || user.is_undefined() {
            return Ok(None);
        }
        from_js(operation, user).map(Some)
    }
}

#[async_trait(?Send)]
impl AuthService for FirebaseAuth {
    fn on_auth_state_changed(&self, listener: AuthListener) -> Subscription {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |user: JsValue| {
            match Self::session_from("onAuthStateChanged", user) {
                Ok(session) => listener(session),
                Err(err) => warn!(%err, "unreadable auth state"),
            }
        });
        let unsubscribe = watch_auth_state(&self.handle, &closure);
        hold(closure, unsubscribe)
    }

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        let user = sign_in(&self.handle, email, password)
            .await
            .map_err(|err| sdk_error("signIn", &err))?;
        from_js("signIn", user)
    }

    async fn register(&self, email: &str, password: &str) -> BackendResult<Session> {
        let user = register(&self.handle, email, password)
            .await
            .map_err(|err| sdk_error("register", &err))?;
        from_js("register", user)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        sign_out(&self.handle)
            .await
            .map_err(|err| sdk_error("signOut", &err))?;
        Ok(())
    }
}

/// Cloud Firestore handle.
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    handle: JsValue,
}

#[async_trait(?Send)]
impl DocumentStore for FirestoreStore {
    async fn get(&self, path: &DocumentPath) -> BackendResult<Option<serde_json::Value>> {
        let data = get_document(&self.handle, &path.to_string())
            .await
            .map_err(|err| sdk_error("getDoc", &err))?;
        if data.is_null() || data.is_undefined() {
            return Ok(None);
        }
        from_js("getDoc", data).map(Some)
    }

    async fn set(&self, path: &DocumentPath, data: serde_json::Value) -> BackendResult<()> {
        let data = to_js("setDoc", &data)?;
        set_document(&self.handle, &path.to_string(), data)
            .await
            .map_err(|err| sdk_error("setDoc", &err))?;
        Ok(())
    }
}

/// Firebase Cloud Messaging handle.
#[derive(Debug, Clone)]
pub struct FirebaseMessaging {
    handle: JsValue,
}

#[async_trait(?Send)]
impl MessagingService for FirebaseMessaging {
    fn on_message(&self, listener: MessageListener) -> Subscription {
        let closure = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            // a payload we cannot read still deserves a toast with defaults
            let payload: PushPayload = from_js("onMessage", payload).unwrap_or_default();
            listener(payload);
        });
        let unsubscribe = watch_messages(&self.handle, &closure);
        hold(closure, unsubscribe)
    }

    async fn get_token(&self, vapid_key: Option<&str>) -> BackendResult<Option<String>> {
        let token = push_token(&self.handle, vapid_key.map(str::to_string))
            .await
            .map_err(|err| sdk_error("getToken", &err))?;
        Ok(token.as_string())
    }
}
