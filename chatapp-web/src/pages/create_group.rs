use crate::containers::layout::Page;
use crate::firebase;
use crate::models::app_state::AppState;
use crate::models::directory::{GroupInfo, group_path};
use crate::routes::MainRoute;
use shared::backend::DocumentStore;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::hooks::use_navigator;
use yewdux::prelude::use_selector;

/// Form creating a group owned by the signed in user.
#[function_component(CreateGroupPage)]
pub fn create_group_page() -> Html {
    let name = use_state(String::new);
    let error = use_state(|| None::<String>);
    let navigator = use_navigator();
    let owner = use_selector(|state: &AppState| state.current_session().map(|s| s.uid.clone()));

    let oninput = {
        let name = name.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                name.set(input.value());
            }
        })
    };

    let onsubmit = {
        let name = name.clone();
        let error = error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let group_id = Uuid::new_v4().to_string();
            let owner = (*owner).clone().unwrap_or_default();
            let info = GroupInfo {
                name: name.trim().to_string(),
                members: vec![owner.clone()],
                owner,
                messages: Vec::new(),
            };
            let error = error.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = async {
                    let path = group_path(&group_id)?;
                    let data = serde_json::to_value(&info)
                        .map_err(|err| shared::BackendError::sdk("setDoc", err.to_string()))?;
                    firebase::shared().store_handle()?.set(&path, data).await
                };
                match result.await {
                    Ok(()) => {
                        if let Some(navigator) = navigator {
                            navigator.push(&MainRoute::GroupInfos { group_id });
                        }
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            });
        })
    };

    html! {
        <Page>
            <form class="card bg-base-200 max-w-md mx-auto card-body" {onsubmit}>
                <h1 class="card-title">{"New group"}</h1>
                if let Some(message) = &*error {
                    <div class="alert alert-error">{message.clone()}</div>
                }
                <input
                    class="input input-bordered"
                    placeholder="Group name"
                    required=true
                    value={(*name).clone()}
                    {oninput}
                />
                <button class="btn btn-primary" type="submit" disabled={name.trim().is_empty()}>
                    {"Create"}
                </button>
            </form>
        </Page>
    }
}
