use crate::containers::layout::Page;
use crate::firebase;
use crate::models::app_state::AppState;
use crate::routes::MainRoute;
use shared::backend::AuthService;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_selector;

/// ProfileView page component
#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let session = use_selector(|state: &AppState| state.current_session().cloned());
    let navigator = use_navigator();

    let on_sign_out = Callback::from(move |event: MouseEvent| {
        event.prevent_default();
        let navigator = navigator.clone();
        spawn_local(async move {
            let result = match firebase::shared().auth_handle() {
                Ok(auth) => auth.sign_out().await,
                Err(err) => Err(err),
            };
            match result {
                Ok(()) => {
                    if let Some(navigator) = navigator {
                        navigator.push(&MainRoute::Welcoming);
                    }
                }
                Err(err) => tracing::error!(%err, "sign out failed"),
            }
        });
    });

    let Some(session) = (*session).clone() else {
        return html! {};
    };

    html! {
        <Page>
            <div class="p-4 space-y-6">
                <h1 class="text-2xl font-bold">{ session.label().to_string() }</h1>
                if let Some(email) = &session.email {
                    <p>{ email.clone() }</p>
                }
                <p class="text-sm text-base-content/70">{ format!("User id: {}", session.uid) }</p>
                <button class="btn btn-outline" onclick={on_sign_out}>{"Sign out"}</button>
            </div>
        </Page>
    }
}
