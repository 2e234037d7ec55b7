//! Seam for the external lobby service.
//!
//! The lobby hears about listed tables through fire-and-forget updates.
//! Publishing must never run while a table lock is held, so the registry
//! collects a pending update under the lock and hands it to the publisher
//! afterwards. Failures are the publisher's problem: logged and dropped,
//! never surfaced to a player.

/// Snapshot sent to the lobby when a table's membership changes.
#[derive(Clone, Debug, PartialEq)]
pub struct LobbyUpdate {
    /// Registry key, appended to the join URL.
    pub table: String,
    /// Human-facing room name.
    pub name: String,
    pub slots: usize,
    pub filled: usize,
}

pub trait LobbyPublisher: Send + Sync {
    /// Deliver (or schedule delivery of) one update. Must not block.
    fn publish(&self, update: LobbyUpdate);
}

/// Publisher for local development and mock-only deployments.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLobbyPublisher;

impl LobbyPublisher for NoopLobbyPublisher {
    fn publish(&self, update: LobbyUpdate) {
        log::debug!(
            "lobby publish suppressed: table '{}' {}/{}",
            update.table,
            update.filled,
            update.slots
        );
    }
}
