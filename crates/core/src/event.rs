use crate::state::Refresh;

/// All messages (events) that can flow through the dashboard event loop.
///
/// Sources:
/// - Refresh driver task  → `Refreshed`
/// - Config watcher task  → `ConfigReloaded`
/// - Signal handler       → `Shutdown`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Refresh driver ────────────────────────────────────────────────────────
    /// Result of one refresh cycle (generate → append → estimate).
    Refreshed(Refresh),

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk; triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Graceful shutdown requested.
    Shutdown,
}
