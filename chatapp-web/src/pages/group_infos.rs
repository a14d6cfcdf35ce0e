use crate::containers::layout::Page;
use crate::hooks::{DocumentState, use_document};
use crate::models::directory::{GroupInfo, group_path};
use crate::routes::MainRoute;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Properties, PartialEq)]
pub struct GroupInfosPageProps {
    pub group_id: AttrValue,
}

#[function_component(GroupInfosPage)]
pub fn group_infos_page(props: &GroupInfosPageProps) -> Html {
    let document = use_document(group_path(&props.group_id));

    let body = match &*document.state {
        DocumentState::Loading => html! { <span class="loading loading-spinner"></span> },
        DocumentState::Failed(message) => html! { <div class="alert alert-error">{message.clone()}</div> },
        DocumentState::Ready(None) => html! { <p>{"This group does not exist."}</p> },
        DocumentState::Ready(Some(value)) => {
            let info: GroupInfo = serde_json::from_value(value.clone()).unwrap_or_default();
            html! {
                <div class="space-y-2">
                    <h1 class="text-2xl font-bold">{info.name}</h1>
                    <p>{format!("{} member(s)", info.members.len())}</p>
                    <p class="text-sm text-base-content/70">{format!("Created by {}", info.owner)}</p>
                    <Link<MainRoute>
                        to={MainRoute::GroupChat { group_id: props.group_id.to_string() }}
                        classes="btn btn-primary"
                    >
                        {"Open chat"}
                    </Link<MainRoute>>
                </div>
            }
        }
    };

    html! { <Page>{body}</Page> }
}
