use super::table::MatchedRoute;
use std::fmt;

/// A single navigation attempt handed to the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Target location, may carry a query or fragment
    pub to: String,
    /// Location the user is leaving, `None` on initial load
    pub from: Option<String>,
}

impl NavigationRequest {
    /// A navigation to `to` with no known origin.
    #[must_use]
    pub fn new(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            from: None,
        }
    }

    /// Record the location being left.
    #[must_use]
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Why the guard sent a navigation elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    /// First navigation ever on this client
    FirstVisit,
    /// Target requires a signed in user
    AuthRequired,
    /// Signed in users skip the welcome page
    AlreadySignedIn,
    /// No route matches the target
    UnknownRoute,
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstVisit => "first visit",
            Self::AuthRequired => "authentication required",
            Self::AlreadySignedIn => "already signed in",
            Self::UnknownRoute => "unknown route",
        })
    }
}

/// Terminal result of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// Render the target
    Allowed(MatchedRoute),
    /// Replace the target with another location
    Redirected {
        /// Location to navigate to instead
        to: String,
        /// Why the target was refused
        reason: RedirectReason,
    },
    /// A newer navigation was issued while this one waited; drop it
    Superseded,
}

impl NavigationOutcome {
    /// Whether the target may be rendered.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// Redirect location, if this is a redirect.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirected { to, .. } => Some(to.as_str()),
            _ => None,
        }
    }

    /// Redirect reason, if this is a redirect.
    #[must_use]
    pub const fn redirect_reason(&self) -> Option<RedirectReason> {
        match self {
            Self::Redirected { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = NavigationRequest::new("/home").from("/login");
        assert_eq!(request.to, "/home");
        assert_eq!(request.from.as_deref(), Some("/login"));
        assert_eq!(NavigationRequest::new("/").from, None);
    }

    #[test]
    fn test_outcome_accessors() {
        let redirect = NavigationOutcome::Redirected {
            to: "/".to_string(),
            reason: RedirectReason::AuthRequired,
        };
        assert!(!redirect.is_allowed());
        assert_eq!(redirect.redirect_target(), Some("/"));
        assert_eq!(redirect.redirect_reason(), Some(RedirectReason::AuthRequired));
        assert_eq!(NavigationOutcome::Superseded.redirect_target(), None);
        assert_eq!(RedirectReason::FirstVisit.to_string(), "first visit");
    }
}
