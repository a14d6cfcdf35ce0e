use crate::containers::layout::Page;
use crate::firebase;
use crate::hooks::{DocumentState, use_document};
use crate::models::app_state::AppState;
use crate::models::directory::{ChatMessage, array_field, chat_path, group_path, with_message};
use crate::routes::MainRoute;
use shared::BackendResult;
use shared::backend::DocumentStore;
use shared::models::DocumentPath;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Properties, PartialEq)]
struct ConversationProps {
    path: BackendResult<DocumentPath>,
    title: AttrValue,
    #[prop_or_default]
    header: Html,
}

/// Messages stored in one document, with a box to append to them.
#[function_component(Conversation)]
fn conversation(props: &ConversationProps) -> Html {
    let document = use_document(props.path.clone());
    let draft = use_state(String::new);
    let sending = use_state(|| false);
    let author = use_selector(|state: &AppState| {
        state
            .current_session()
            .map(|session| session.label().to_string())
            .unwrap_or_default()
    });

    let oninput = {
        let draft = draft.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                draft.set(input.value());
            }
        })
    };

    let onsubmit = {
        let draft = draft.clone();
        let sending = sending.clone();
        let path = props.path.clone();
        let current = document.state.value().cloned();
        let reload = document.reload.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let text = draft.trim().to_string();
            let Ok(path) = path.clone() else { return };
            if text.is_empty() {
                return;
            }
            let message = ChatMessage {
                from: (*author).clone(),
                text,
            };
            let updated = with_message(current.clone(), &message);
            let draft = draft.clone();
            let sending = sending.clone();
            let reload = reload.clone();
            sending.set(true);
            spawn_local(async move {
                let result = match firebase::shared().store_handle() {
                    Ok(store) => store.set(&path, updated).await,
                    Err(err) => Err(err),
                };
                match result {
                    Ok(()) => {
                        draft.set(String::new());
                        reload.emit(());
                    }
                    Err(err) => tracing::warn!(%err, "message not sent"),
                }
                sending.set(false);
            });
        })
    };

    let body = match &*document.state {
        DocumentState::Loading => html! { <span class="loading loading-spinner"></span> },
        DocumentState::Failed(message) => html! { <div class="alert alert-error">{message.clone()}</div> },
        DocumentState::Ready(value) => {
            let messages: Vec<ChatMessage> = array_field(value.as_ref(), "messages");
            if messages.is_empty() {
                html! { <p class="text-base-content/70">{"No messages yet. Say hello!"}</p> }
            } else {
                html! {
                    { for messages.into_iter().map(|message| html! {
                        <div class="chat chat-start">
                            <div class="chat-header">{message.from}</div>
                            <div class="chat-bubble">{message.text}</div>
                        </div>
                    }) }
                }
            }
        }
    };

    html! {
        <Page>
            <div class="flex items-center justify-between mb-4">
                <h1 class="text-2xl font-bold">{props.title.clone()}</h1>
                {props.header.clone()}
            </div>
            <div class="space-y-2 mb-4">{body}</div>
            <form class="join w-full" {onsubmit}>
                <input
                    class="input input-bordered join-item flex-grow"
                    placeholder="Write a message"
                    value={(*draft).clone()}
                    {oninput}
                />
                <button class="btn btn-primary join-item" type="submit" disabled={*sending}>
                    {"Send"}
                </button>
            </form>
        </Page>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChatViewProps {
    pub chat_id: AttrValue,
}

/// One to one conversation at `/chat/:chatId`.
#[function_component(ChatView)]
pub fn chat_view(props: &ChatViewProps) -> Html {
    html! {
        <Conversation path={chat_path(&props.chat_id)} title={format!("Chat {}", props.chat_id)} />
    }
}

#[derive(Properties, PartialEq)]
pub struct GroupChatViewProps {
    pub group_id: AttrValue,
}

/// Group conversation at `/chat/group/:groupId`.
#[function_component(GroupChatView)]
pub fn group_chat_view(props: &GroupChatViewProps) -> Html {
    let info = html! {
        <Link<MainRoute>
            to={MainRoute::GroupInfos { group_id: props.group_id.to_string() }}
            classes="btn btn-ghost btn-sm"
        >
            {"Group info"}
        </Link<MainRoute>>
    };
    html! {
        <Conversation
            path={group_path(&props.group_id)}
            title={format!("Group {}", props.group_id)}
            header={info}
        />
    }
}
