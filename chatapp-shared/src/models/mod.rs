//! Plain data carried between the backend services, the router, and the UI.

pub mod document;
pub mod notification;
pub mod session;

pub use document::DocumentPath;
pub use notification::{
    DEFAULT_TOAST_BODY, DEFAULT_TOAST_TITLE, NotificationContent, PushPayload, Toast,
};
pub use session::{Session, SessionState};
