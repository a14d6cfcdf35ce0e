use crate::components::{StoreToasts, Toaster};
use crate::config::FrontendConfig;
use crate::firebase;
use crate::models::app_state::AppState;
use crate::routes::{GuardedSwitch, RouterHandle};
use crate::storage::BrowserVisitStore;
use shared::backend::MessagingService;
use shared::routing::{NavigationGuard, RouteTable};
use shared::{NotificationBridge, SessionStore};
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::{Html, function_component, html, use_effect_with, use_memo, use_mut_ref};
use yew_router::prelude::*;
use yewdux::Dispatch;
use yewdux::prelude::use_dispatch;

/// Build the app's single guard. The session store subscribes to the auth
/// service here, once, and mirrors every change into [`AppState`].
fn build_guard(dispatch: Dispatch<AppState>) -> NavigationGuard {
    let session = SessionStore::new();
    session.watch(move |state| {
        let state = state.clone();
        dispatch.reduce_mut(|app| app.session = state);
    });
    match firebase::shared().auth_handle() {
        Ok(auth) => {
            session.attach(auth.as_ref());
        }
        Err(err) => error!(%err, "auth service unavailable, protected routes stay pending"),
    }
    NavigationGuard::new(
        RouteTable::standard(),
        session,
        Rc::new(BrowserVisitStore),
    )
}

/// Probe messaging, then route foreground messages to the toaster.
async fn start_notifications(dispatch: Dispatch<AppState>) -> Option<NotificationBridge> {
    let client = firebase::shared();
    let messaging = match client.init_messaging().await {
        Ok(messaging) => messaging,
        Err(err) => {
            warn!(%err, "push messaging failed to initialize");
            return None;
        }
    };
    let bridge = NotificationBridge::new(Rc::new(StoreToasts::new(dispatch)));
    let attached = bridge.attach(
        messaging
            .as_deref()
            .map(|messaging| messaging as &dyn MessagingService),
    );
    info!(capabilities = ?client.capabilities(), attached, "foreground notifications");

    if attached {
        let config = FrontendConfig::new();
        match client.push_token(config.vapid_key()).await {
            Ok(Some(token)) => debug!(%token, "push token issued"),
            Ok(None) => debug!("no push token, notification permission not granted"),
            Err(err) => warn!(%err, "push token request failed"),
        }
    }
    Some(bridge)
}

#[function_component(App)]
pub fn app() -> Html {
    let dispatch = use_dispatch::<AppState>();
    let guard = {
        let dispatch = dispatch.clone();
        use_memo((), move |_| build_guard(dispatch))
    };
    let bridge = use_mut_ref(|| None::<NotificationBridge>);

    use_effect_with((), move |_| {
        let slot = bridge.clone();
        spawn_local(async move {
            if let Some(started) = start_notifications(dispatch).await {
                *slot.borrow_mut() = Some(started);
            }
        });
        move || {
            // unregister the messaging listener with the root view
            bridge.borrow_mut().take();
        }
    });

    html! {
        <BrowserRouter>
            <GuardedSwitch guard={RouterHandle(guard)} />
            <Toaster />
        </BrowserRouter>
    }
}
