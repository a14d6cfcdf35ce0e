//! # Session Store
//!
//! Process-wide cache of the authentication state, fed by a single
//! long-lived auth listener.

use crate::backend::{AuthService, Subscription};
use crate::models::{Session, SessionState};
use futures::channel::oneshot;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::debug;

#[derive(Default)]
struct Inner {
    state: SessionState,
    waiters: Vec<oneshot::Sender<SessionState>>,
    subscription: Option<Subscription>,
    watchers: Vec<Rc<dyn Fn(&SessionState)>>,
}

/// Shared handle to the session cache. Clones observe the same state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Rc<RefCell<Inner>>,
}

impl SessionStore {
    /// A store in the `Unknown` state with no listener attached.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to auth state changes. Only the first call registers a
    /// listener; later calls return `false` and change nothing.
    #[allow(clippy::must_use_candidate)]
    pub fn attach(&self, auth: &dyn AuthService) -> bool {
        if self.inner.borrow().subscription.is_some() {
            return false;
        }
        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        let subscription = auth.on_auth_state_changed(Box::new(move |session| {
            if let Some(inner) = weak.upgrade() {
                Self { inner }.update(session);
            }
        }));
        self.inner.borrow_mut().subscription = Some(subscription);
        debug!("session store attached to auth service");
        true
    }

    /// Whether a listener is registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().subscription.is_some()
    }

    /// Apply an auth state report and wake everything waiting on it.
    pub fn update(&self, session: Option<Session>) {
        let state = SessionState::from(session);
        let (waiters, watchers) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == state {
                return;
            }
            debug!(from = %inner.state, to = %state, "session state changed");
            inner.state = state.clone();
            (std::mem::take(&mut inner.waiters), inner.watchers.clone())
        };
        for waiter in waiters {
            // the waiting navigation may have been dropped
            let _ = waiter.send(state.clone());
        }
        for watcher in watchers {
            watcher(&state);
        }
    }

    /// The cached state, possibly `Unknown`.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.borrow().state.clone()
    }

    /// Resolves once the auth service has reported at least once. Returns
    /// immediately when it already has.
    pub async fn resolved(&self) -> SessionState {
        let receiver = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_resolved() {
                return inner.state.clone();
            }
            let (sender, receiver) = oneshot::channel();
            inner.waiters.push(sender);
            receiver
        };
        receiver.await.unwrap_or_default()
    }

    /// Call `watcher` after every state change, for UI state mirrors.
    pub fn watch(&self, watcher: impl Fn(&SessionState) + 'static) {
        self.inner.borrow_mut().watchers.push(Rc::new(watcher));
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SessionStore")
            .field("state", &inner.state)
            .field("attached", &inner.subscription.is_some())
            .field("waiters", &inner.waiters.len())
            .finish_non_exhaustive()
    }
}
