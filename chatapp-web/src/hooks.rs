use crate::firebase;
use serde_json::Value;
use shared::BackendResult;
use shared::backend::DocumentStore;
use shared::models::DocumentPath;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Progress of a document read.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentState {
    Loading,
    /// `None` when the document does not exist
    Ready(Option<Value>),
    Failed(String),
}

impl DocumentState {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Ready(value) => value.as_ref(),
            _ => None,
        }
    }
}

pub struct UseDocumentHandle {
    pub state: UseStateHandle<DocumentState>,
    /// Read the document again
    pub reload: Callback<()>,
}

/// Read the document at `path` and re-read it whenever `path` changes or
/// `reload` is emitted.
#[hook]
pub fn use_document(path: BackendResult<DocumentPath>) -> UseDocumentHandle {
    let state = use_state(|| DocumentState::Loading);
    let version = use_state(|| 0_u32);

    {
        let state = state.clone();
        use_effect_with((path, *version), move |(path, _)| {
            state.set(DocumentState::Loading);
            let path = path.clone();
            spawn_local(async move {
                let result = match (path, firebase::shared().store_handle()) {
                    (Ok(path), Ok(store)) => store.get(&path).await,
                    (Err(err), _) | (_, Err(err)) => Err(err),
                };
                state.set(match result {
                    Ok(value) => DocumentState::Ready(value),
                    Err(err) => {
                        tracing::warn!(%err, "document read failed");
                        DocumentState::Failed(err.to_string())
                    }
                });
            });
            || ()
        });
    }

    let reload = {
        let version = version.clone();
        Callback::from(move |()| version.set(version.wrapping_add(1)))
    };

    UseDocumentHandle { state, reload }
}
