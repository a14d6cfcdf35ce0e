use super::navigation::{NavigationOutcome, NavigationRequest, RedirectReason};
use super::table::{MatchedRoute, RouteName, RouteTable};
use super::visit::VisitStore;
use crate::session::SessionStore;
use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;
use tracing::{debug, warn};

/// Decides, before every route transition, whether to render the target or
/// send the user elsewhere.
///
/// * First-visit interception runs once per process, on the first
///   navigation. If the durable flag is unset it is set, and anything but
///   the welcome page is redirected there.
/// * Routes that require auth, directly or through a parent, redirect to
///   `/` without a session.
/// * Signed in users landing on the welcome page go to `/home`.
///
/// Auth decisions wait until the session store has heard from the auth
/// service. A decision that completes after a newer navigation was issued
/// resolves to [`NavigationOutcome::Superseded`].
pub struct NavigationGuard {
    table: RouteTable,
    session: SessionStore,
    visits: Rc<dyn VisitStore>,
    first_visit_checked: Cell<bool>,
    generation: Cell<u64>,
}

impl NavigationGuard {
    /// `session` should already be attached to the auth service; the guard
    /// only reads it.
    #[must_use]
    pub fn new(table: RouteTable, session: SessionStore, visits: Rc<dyn VisitStore>) -> Self {
        Self {
            table,
            session,
            visits,
            first_visit_checked: Cell::new(false),
            generation: Cell::new(0),
        }
    }

    /// The table navigations are resolved against.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolve a navigation. The request is ordered against others when this
    /// is called, not when the returned future is first polled.
    pub fn resolve(
        &self,
        request: NavigationRequest,
    ) -> impl Future<Output = NavigationOutcome> + '_ {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        async move { self.decide(ticket, request).await }
    }

    async fn decide(&self, ticket: u64, request: NavigationRequest) -> NavigationOutcome {
        let Some(target) = self.table.resolve(&request.to) else {
            debug!(to = %request.to, "no route matches");
            return self.redirect(RouteName::Welcoming, RedirectReason::UnknownRoute);
        };

        if let Some(outcome) = self.first_visit(&target) {
            return outcome;
        }

        let is_welcome = target.name() == RouteName::Welcoming;
        if !target.requires_auth() && !is_welcome {
            return self.allow(target, &request);
        }

        let state = self.session.resolved().await;
        if self.generation.get() != ticket {
            warn!(to = %request.to, "dropping stale navigation decision");
            return NavigationOutcome::Superseded;
        }

        if target.requires_auth() && !state.is_authenticated() {
            return self.redirect(RouteName::Welcoming, RedirectReason::AuthRequired);
        }
        if is_welcome && state.is_authenticated() {
            return self.redirect(RouteName::Home, RedirectReason::AlreadySignedIn);
        }
        self.allow(target, &request)
    }

    fn first_visit(&self, target: &MatchedRoute) -> Option<NavigationOutcome> {
        if self.first_visit_checked.replace(true) || self.visits.has_visited() {
            return None;
        }
        self.visits.mark_visited();
        if target.name() == RouteName::Welcoming {
            return None;
        }
        Some(self.redirect(RouteName::Welcoming, RedirectReason::FirstVisit))
    }

    #[allow(clippy::unused_self)]
    fn allow(&self, target: MatchedRoute, request: &NavigationRequest) -> NavigationOutcome {
        debug!(
            to = %target.path,
            from = request.from.as_deref().unwrap_or("-"),
            route = %target.name(),
            "navigation allowed"
        );
        NavigationOutcome::Allowed(target)
    }

    fn redirect(&self, name: RouteName, reason: RedirectReason) -> NavigationOutcome {
        let to = self.table.href(name, &[]).unwrap_or_else(|| "/".to_string());
        debug!(%to, %reason, "navigation redirected");
        NavigationOutcome::Redirected { to, reason }
    }
}

impl fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("session", &self.session)
            .field("first_visit_checked", &self.first_visit_checked.get())
            .field("generation", &self.generation.get())
            .finish_non_exhaustive()
    }
}
