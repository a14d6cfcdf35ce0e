use crate::models::app_state::AppState;
use gloo_timers::callback::Timeout;
use shared::ToastDisplay;
use shared::models::Toast;
use yew::prelude::*;
use yewdux::Dispatch;
use yewdux::prelude::use_store;

/// How long a toast stays up before it dismisses itself.
pub const TOAST_LIFETIME_MS: u32 = 5_000;

/// Shows toasts by queueing them in [`AppState`]; the [`Toaster`] renders
/// the queue.
pub struct StoreToasts {
    dispatch: Dispatch<AppState>,
}

impl StoreToasts {
    pub fn new(dispatch: Dispatch<AppState>) -> Self {
        Self { dispatch }
    }
}

impl ToastDisplay for StoreToasts {
    fn display(&self, title: &str, body: &str, icon: Option<&str>) {
        let toast = Toast {
            title: title.to_string(),
            body: body.to_string(),
            icon: icon.map(str::to_string),
        };
        let mut id = None;
        self.dispatch.reduce_mut(|state| id = Some(state.push_toast(toast)));
        if let Some(id) = id {
            let dispatch = self.dispatch.clone();
            Timeout::new(TOAST_LIFETIME_MS, move || {
                dispatch.reduce_mut(|state| state.dismiss_toast(id));
            })
            .forget();
        }
    }
}

#[function_component(Toaster)]
pub fn toaster() -> Html {
    let (state, dispatch) = use_store::<AppState>();

    html! {
        <div class="toast toast-top toast-end z-50">
            { for state.toasts.iter().map(|entry| {
                let id = entry.id;
                let onclick = dispatch.reduce_mut_callback(move |state| state.dismiss_toast(id));
                html! {
                    <div key={id.to_string()} class="alert alert-info shadow-lg" {onclick}>
                        if let Some(icon) = &entry.toast.icon {
                            <img class="w-8 h-8 rounded" src={icon.clone()} alt="" />
                        }
                        <div>
                            <h3 class="font-bold">{ entry.toast.title.clone() }</h3>
                            <div class="text-sm">{ entry.toast.body.clone() }</div>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}
