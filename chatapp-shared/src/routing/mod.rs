//! # Routing
//!
//! The route table, the navigation guard in front of it, and the durable
//! first-visit flag the guard consults.

pub mod guard;
pub mod navigation;
pub mod table;
pub mod visit;

pub use guard::NavigationGuard;
pub use navigation::{NavigationOutcome, NavigationRequest, RedirectReason};
pub use table::{
    LoadStrategy, MatchedRoute, RouteDescriptor, RouteMeta, RouteName, RouteTable,
    RouteTableError, standard_routes,
};
pub use visit::{MemoryVisitStore, VISITED_KEY, VisitStore};
