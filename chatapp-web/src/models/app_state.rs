use shared::models::{Session, SessionState, Toast};
use uuid::Uuid;
use yewdux::Store;

/// A toast currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastEntry {
    pub id: Uuid,
    pub toast: Toast,
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub session: SessionState,
    pub toasts: Vec<ToastEntry>,
}

impl AppState {
    pub fn current_session(&self) -> Option<&Session> {
        self.session.session()
    }

    /// Queue a toast and return its id.
    pub fn push_toast(&mut self, toast: Toast) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.push(ToastEntry { id, toast });
        id
    }

    pub fn dismiss_toast(&mut self, id: Uuid) {
        self.toasts.retain(|entry| entry.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(title: &str) -> Toast {
        Toast {
            title: title.to_string(),
            body: "body".to_string(),
            icon: None,
        }
    }

    #[test]
    fn test_toasts_keep_arrival_order() {
        let mut state = AppState::default();
        state.push_toast(toast("first"));
        state.push_toast(toast("second"));
        let titles: Vec<_> = state.toasts.iter().map(|e| e.toast.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut state = AppState::default();
        let first = state.push_toast(toast("first"));
        state.push_toast(toast("first"));
        state.dismiss_toast(first);
        assert_eq!(state.toasts.len(), 1);
        assert_ne!(state.toasts[0].id, first);
    }

    #[test]
    fn test_default_session_is_unknown() {
        let state = AppState::default();
        assert_eq!(state.session, SessionState::Unknown);
        assert!(state.current_session().is_none());
    }
}
