//! # Foreground Notifications
//!
//! Turns push messages received while the app is open into in-app toasts.

use crate::backend::{MessagingService, Subscription};
use crate::models::{PushPayload, Toast};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Something that can show a toast.
pub trait ToastDisplay {
    /// Show one toast. `title` and `body` are never empty.
    fn display(&self, title: &str, body: &str, icon: Option<&str>);
}

/// Forwards foreground push messages to a [`ToastDisplay`].
///
/// Holds at most one messaging listener; it is released when the bridge is
/// dropped.
pub struct NotificationBridge {
    display: Rc<dyn ToastDisplay>,
    subscription: RefCell<Option<Subscription>>,
}

impl NotificationBridge {
    /// A bridge that is not listening yet.
    #[must_use]
    pub fn new(display: Rc<dyn ToastDisplay>) -> Self {
        Self {
            display,
            subscription: RefCell::new(None),
        }
    }

    /// Start listening on `messaging`.
    ///
    /// Returns `false` without registering anything when messaging is not
    /// available or a listener is already in place.
    #[allow(clippy::must_use_candidate)]
    pub fn attach(&self, messaging: Option<&dyn MessagingService>) -> bool {
        let Some(messaging) = messaging else {
            debug!("messaging unavailable, foreground notifications disabled");
            return false;
        };
        if self.subscription.borrow().is_some() {
            return false;
        }
        let display = Rc::clone(&self.display);
        let subscription = messaging.on_message(Box::new(move |payload| {
            forward(display.as_ref(), &payload);
        }));
        *self.subscription.borrow_mut() = Some(subscription);
        true
    }

    /// Whether a messaging listener is registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.subscription.borrow().is_some()
    }
}

impl fmt::Debug for NotificationBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBridge")
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

/// Show one payload.
pub fn forward(display: &dyn ToastDisplay, payload: &PushPayload) {
    debug!(?payload, "message received in foreground");
    let toast = Toast::from_payload(payload);
    display.display(&toast.title, &toast.body, toast.icon.as_deref());
}
