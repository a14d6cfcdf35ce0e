use serde::{Deserialize, Serialize};

/// Title shown when a push message carries none.
pub const DEFAULT_TOAST_TITLE: &str = "New message";
/// Body shown when a push message carries none.
pub const DEFAULT_TOAST_BODY: &str = "You have a new notification";

/// Inbound foreground push message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PushPayload {
    /// Display block of the message; data-only messages omit it
    #[serde(default)]
    pub notification: Option<NotificationContent>,
}

/// The `notification` block of a push message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationContent {
    /// Headline
    #[serde(default)]
    pub title: Option<String>,
    /// Message text
    #[serde(default)]
    pub body: Option<String>,
    /// Icon URL
    #[serde(default)]
    pub icon: Option<String>,
}

/// What the UI renders for one foreground message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Headline, never empty
    pub title: String,
    /// Message text, never empty
    pub body: String,
    /// Icon URL when the message carried one
    pub icon: Option<String>,
}

impl Toast {
    /// Builds the toast for a payload, filling in the default title and body.
    ///
    /// Empty strings count as absent.
    #[must_use]
    pub fn from_payload(payload: &PushPayload) -> Self {
        let content = payload.notification.as_ref();
        let pick = |field: Option<&String>| {
            field
                .filter(|value| !value.is_empty())
                .cloned()
        };

        Self {
            title: pick(content.and_then(|c| c.title.as_ref()))
                .unwrap_or_else(|| DEFAULT_TOAST_TITLE.to_string()),
            body: pick(content.and_then(|c| c.body.as_ref()))
                .unwrap_or_else(|| DEFAULT_TOAST_BODY.to_string()),
            icon: pick(content.and_then(|c| c.icon.as_ref())),
        }
    }
}
