use crate::hooks::{DocumentState, use_document};
use crate::models::app_state::AppState;
use crate::models::directory::{ListEntry, array_field, public_directory_path, user_path};
use crate::routes::MainRoute;
use shared::BackendError;
use yew::prelude::*;
use yew_router::prelude::Link;
use yewdux::prelude::use_selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Contact,
    Group,
}

#[derive(Properties, PartialEq)]
struct EntryListProps {
    state: DocumentState,
    field: AttrValue,
    kind: EntryKind,
    empty: AttrValue,
}

#[function_component(EntryList)]
fn entry_list(props: &EntryListProps) -> Html {
    let entries: Vec<ListEntry> = match &props.state {
        DocumentState::Loading => {
            return html! { <span class="loading loading-spinner"></span> };
        }
        DocumentState::Failed(message) => {
            return html! { <div class="alert alert-error">{message.clone()}</div> };
        }
        DocumentState::Ready(value) => array_field(value.as_ref(), &props.field),
    };
    if entries.is_empty() {
        return html! { <p class="text-base-content/70">{props.empty.clone()}</p> };
    }

    html! {
        <ul class="menu bg-base-200 rounded-box">
            { for entries.into_iter().map(|entry| {
                let label = if entry.name.is_empty() { entry.id.clone() } else { entry.name.clone() };
                let to = match props.kind {
                    EntryKind::Contact => MainRoute::Chat { chat_id: entry.id },
                    EntryKind::Group => MainRoute::GroupChat { group_id: entry.id },
                };
                html! { <li><Link<MainRoute> {to}>{label}</Link<MainRoute>></li> }
            }) }
        </ul>
    }
}

#[hook]
fn use_own_document() -> crate::hooks::UseDocumentHandle {
    let uid = use_selector(|state: &AppState| state.current_session().map(|s| s.uid.clone()));
    let path = (*uid)
        .as_deref()
        .map_or(Err(BackendError::NotInitialized), user_path);
    use_document(path)
}

/// Groups anyone can join.
#[function_component(DiscoverList)]
pub fn discover_list() -> Html {
    let document = use_document(public_directory_path());
    html! {
        <EntryList
            state={(*document.state).clone()}
            field="groups"
            kind={EntryKind::Group}
            empty="No public groups yet."
        />
    }
}

#[function_component(ContactsList)]
pub fn contacts_list() -> Html {
    let document = use_own_document();
    html! {
        <EntryList
            state={(*document.state).clone()}
            field="contacts"
            kind={EntryKind::Contact}
            empty="You have no contacts yet."
        />
    }
}

#[function_component(GroupsList)]
pub fn groups_list() -> Html {
    let document = use_own_document();
    html! {
        <>
            <EntryList
                state={(*document.state).clone()}
                field="groups"
                kind={EntryKind::Group}
                empty="You are not in any group yet."
            />
            <Link<MainRoute> to={MainRoute::CreateGroup} classes="btn btn-primary mt-4">
                {"Create a group"}
            </Link<MainRoute>>
        </>
    }
}
