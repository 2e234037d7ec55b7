//! Client-centric table projection.
//!
//! Every response carries the table as seen from one seat: the seat list is
//! rotated so the viewer sits at index 0, other seats' hole cards are
//! masked until a contested showdown, and the active seat becomes an offset
//! from the viewer. The rendered view carries a short stable hash so a
//! polling client can skip identical payloads.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::hash::{DefaultHasher, Hash, Hasher};

use super::entities::{Chips, SeatStatus, ValidMove};
use super::state::GameState;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeatView {
    pub name: String,
    pub status: u8,
    pub bet: Chips,
    #[serde(rename = "move")]
    pub last_move: String,
    pub purse: Chips,
    pub hand: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
    pub last_result: String,
    pub round: u8,
    pub pot: Chips,
    /// Offset of the active seat from the viewer; -1 while no move is
    /// awaited (between rounds, between hands, short table).
    pub active_player: i32,
    /// Whole seconds left on the active clock.
    pub move_time: i64,
    pub valid_moves: Vec<ValidMove>,
    pub players: Vec<SeatView>,
    pub hash: String,
}

impl GameState {
    /// Project the table for `viewer` (`None` = spectator).
    pub fn client_view(&self, viewer: Option<usize>, now: DateTime<Utc>) -> ClientView {
        let seat_total = self.seats.len();

        // At a round or hand boundary no seat is active; clients use this
        // to run their end-of-round presentation.
        let between = self.game_over || seat_total < 2 || self.round_complete();

        let base = viewer.unwrap_or(0);
        let mut active_player = -1;
        let mut players = Vec::with_capacity(seat_total);
        for offset in 0..seat_total {
            let idx = (base + offset) % seat_total;
            if !between && self.active_seat == Some(idx) {
                active_player = offset as i32;
            }
            let seat = &self.seats[idx];
            let hand = match seat.status {
                SeatStatus::Playing => {
                    let mut hand = String::new();
                    for (card_idx, card) in seat.cards.iter().enumerate() {
                        let own = viewer == Some(idx);
                        let shown_down = self.game_over && !self.won_by_folds;
                        if card_idx > 0 || own || shown_down {
                            hand.push_str(&card.to_string());
                        } else {
                            hand.push_str("??");
                        }
                    }
                    hand
                }
                SeatStatus::Folded => "??".to_string(),
                _ => String::new(),
            };
            players.push(SeatView {
                name: seat.name.clone(),
                status: seat.status.code(),
                bet: seat.bet,
                last_move: seat.last_move.clone(),
                purse: seat.purse,
                hand,
            });
        }

        let move_time = (self.move_deadline - now).num_seconds().max(0);
        let mut view = ClientView {
            last_result: self.last_result.clone(),
            round: self.round,
            pot: self.pot,
            active_player,
            move_time,
            valid_moves: Vec::new(),
            players,
            hash: String::new(),
        };
        if viewer.is_some() && view.active_player == 0 {
            view.valid_moves = self.valid_moves();
        }
        view.hash = view_hash(&view);
        view
    }
}

/// Short stable digest of the rendered view, excluding the hash field
/// itself. Stable within a process lifetime, which is all the poll cache
/// needs.
fn view_hash(view: &ClientView) -> String {
    let body = serde_json::to_string(view).unwrap_or_default();
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("{:08x}", hasher.finish() as u32)
}
