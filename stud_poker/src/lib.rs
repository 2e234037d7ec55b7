//! # Stud Poker
//!
//! A limit five-card stud engine built for a polled, multi-table HTTP
//! server. The server holds many independent tables; every inbound request
//! takes the table's exclusive lock, advances the state machine one step
//! (absorbing any overdue bot moves), and projects the table from the
//! requesting seat's point of view.
//!
//! There is no background scheduler: turn clocks, bot play, and idle
//! eviction all ride on incoming requests. A table nobody polls has nobody
//! waiting on it.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, ranking, the betting state machine, and the
//!   per-viewer projection
//! - [`bot`]: the deterministic opponent policy
//! - [`table`]: the registry with per-table locks and the lobby seam
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use stud_poker::{NoopLobbyPublisher, TableRegistry};
//!
//! # async fn example() {
//! let registry = TableRegistry::new(Arc::new(NoopLobbyPublisher));
//! let view = registry
//!     .with_table("practice", "ann", 3, |state, viewer, now| {
//!         state.run_game_logic(viewer, now);
//!         state.client_view(viewer, now)
//!     })
//!     .await;
//! assert_eq!(view.players.len(), 3);
//! # }
//! ```

pub mod bot;
pub mod game;
pub mod table;

pub use game::{
    constants, entities, ranking, Card, Chips, ClientView, GameState, MoveCode,
    ParseMoveCodeError, SeatStatus, ValidMove,
};
pub use table::{LobbyPublisher, LobbyUpdate, NoopLobbyPublisher, TableListing, TableRegistry};
