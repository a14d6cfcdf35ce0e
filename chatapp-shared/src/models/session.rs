use serde::{Deserialize, Serialize};
use std::fmt;

/// The identity the auth service currently reports as signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Stable user id assigned by the auth service
    pub uid: String,
    /// Email the account signed in with, when known
    #[serde(default)]
    pub email: Option<String>,
    /// Display name set on the profile
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Session {
    /// Create a session for the given user id.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
        }
    }

    /// Name to show in the UI: display name, then email, then uid.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.uid)
    }
}

/// Process-wide view of authentication.
///
/// Starts as [`SessionState::Unknown`] and only leaves it once the auth
/// service has reported for the first time; it never returns to `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// The auth service has not reported yet
    #[default]
    Unknown,
    /// A user is signed in
    Authenticated(Session),
    /// Nobody is signed in
    Unauthenticated,
}

impl SessionState {
    /// Whether the auth service has reported at least once.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}

impl From<Option<Session>> for SessionState {
    fn from(session: Option<Session>) -> Self {
        session.map_or(Self::Unauthenticated, Self::Authenticated)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            Self::Authenticated(session) => write!(f, "authenticated({})", session.uid),
            Self::Unauthenticated => f.write_str("unauthenticated"),
        }
    }
}
