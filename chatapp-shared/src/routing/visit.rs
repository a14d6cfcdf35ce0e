use std::cell::Cell;

/// Local storage key of the first-visit flag.
pub const VISITED_KEY: &str = "hasVisited";

/// Durable client-local flag recording that the welcome page was shown.
pub trait VisitStore {
    /// Whether the flag is set.
    fn has_visited(&self) -> bool;

    /// Set the flag. It is never cleared.
    fn mark_visited(&self);
}

/// Flag kept in memory, used where durable storage is unavailable.
#[derive(Debug, Default)]
pub struct MemoryVisitStore {
    visited: Cell<bool>,
}

impl MemoryVisitStore {
    /// A store that already has the flag set.
    #[must_use]
    pub fn visited() -> Self {
        Self {
            visited: Cell::new(true),
        }
    }
}

impl VisitStore for MemoryVisitStore {
    fn has_visited(&self) -> bool {
        self.visited.get()
    }

    fn mark_visited(&self) {
        self.visited.set(true);
    }
}
