use crate::state::DashboardState;

/// Every display consumer must implement this trait.
///
/// Panels are purely reactive: they receive a read-only view of
/// `DashboardState` after each refresh and return the text to show, or
/// `None` when they have nothing to say yet (e.g. before the first tick).
pub trait Panel: Send + Sync + std::fmt::Debug {
    /// Unique string identifier, e.g. `"clock"` or `"trend"`.
    fn id(&self) -> &str;

    /// Render the current state.
    fn render(&self, state: &DashboardState) -> Option<String>;
}
