use gloo_storage::{LocalStorage, Storage};
use shared::routing::{VISITED_KEY, VisitStore};
use tracing::warn;

/// First-visit flag kept in the browser's local storage as `hasVisited`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserVisitStore;

impl VisitStore for BrowserVisitStore {
    fn has_visited(&self) -> bool {
        // written as JSON `true`, but accept the bare string too
        LocalStorage::raw()
            .get_item(VISITED_KEY)
            .ok()
            .flatten()
            .is_some_and(|value| value.trim_matches('"') == "true")
    }

    fn mark_visited(&self) {
        if let Err(err) = LocalStorage::set(VISITED_KEY, true) {
            warn!(%err, "could not persist first-visit flag");
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_flag_round_trips_through_local_storage() {
        LocalStorage::delete(VISITED_KEY);
        let store = BrowserVisitStore;
        assert!(!store.has_visited());
        store.mark_visited();
        assert!(store.has_visited());
        assert_eq!(
            LocalStorage::raw().get_item(VISITED_KEY).ok().flatten().as_deref(),
            Some("true")
        );
        LocalStorage::delete(VISITED_KEY);
    }

    #[wasm_bindgen_test]
    fn test_bare_string_counts_as_visited() {
        LocalStorage::raw().set_item(VISITED_KEY, "true").unwrap();
        assert!(BrowserVisitStore.has_visited());
        LocalStorage::delete(VISITED_KEY);
    }
}
