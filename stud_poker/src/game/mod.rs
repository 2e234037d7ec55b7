//! Game engine for limit five-card stud: entities, ranking, the table
//! state machine, and the per-viewer projection.

pub mod constants;
pub mod entities;
pub mod ranking;
pub mod state;
pub mod view;

pub use entities::{Card, Chips, MoveCode, ParseMoveCodeError, Seat, SeatStatus, ValidMove};
pub use state::GameState;
pub use view::{ClientView, SeatView};
