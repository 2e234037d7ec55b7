//! Table registry, per-table locking, and the lobby seam.

pub mod lobby;
pub mod registry;

pub use lobby::{LobbyPublisher, LobbyUpdate, NoopLobbyPublisher};
pub use registry::{TableListing, TableRegistry};
