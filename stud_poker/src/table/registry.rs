//! Multi-table registry with per-table exclusive execution.
//!
//! Tables are keyed by case-folded name. Each table lives behind its own
//! async mutex, so steps on one table are totally ordered while different
//! tables run in parallel. Lock cells are created on first use and kept for
//! the life of the process; table names come from a small bounded set.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use super::lobby::LobbyPublisher;
use crate::game::constants::{DEFAULT_TABLE, MAX_SEATS};
use crate::game::state::GameState;

/// A real room known at startup, in listing order.
#[derive(Clone, Debug)]
struct Room {
    table: String,
    name: String,
}

/// Row of the `/tables` listing: lobby-registered real tables only, with
/// human capacity (total seats minus resident bots).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableListing {
    pub table: String,
    pub name: String,
    pub cur_players: usize,
    pub max_players: usize,
}

pub struct TableRegistry {
    tables: RwLock<HashMap<String, Arc<Mutex<GameState>>>>,
    rooms: RwLock<Vec<Room>>,
    publisher: Arc<dyn LobbyPublisher>,
}

impl TableRegistry {
    pub fn new(publisher: Arc<dyn LobbyPublisher>) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            rooms: RwLock::new(Vec::new()),
            publisher,
        }
    }

    fn normalize(table: &str) -> String {
        let table = table.trim();
        if table.is_empty() {
            DEFAULT_TABLE.to_lowercase()
        } else {
            table.to_lowercase()
        }
    }

    fn fresh_seed() -> u64 {
        rand::rng().random()
    }

    /// Create a live room at startup. Rooms are prepended so the listing
    /// shows the newest first.
    pub async fn create_real_table(
        &self,
        name: &str,
        table: &str,
        bot_count: usize,
        register_lobby: bool,
    ) {
        let key = Self::normalize(table);
        let now = Utc::now();
        let mut state = GameState::new_real(&key, name, bot_count, register_lobby, Self::fresh_seed(), now);
        let update = state.take_lobby_update();

        self.tables
            .write()
            .await
            .insert(key.clone(), Arc::new(Mutex::new(state)));
        self.rooms.write().await.insert(
            0,
            Room {
                table: key,
                name: name.to_string(),
            },
        );

        if let Some(update) = update {
            self.publisher.publish(update);
        }
    }

    async fn entry(&self, key: &str, seat_count: usize) -> Arc<Mutex<GameState>> {
        {
            let tables = self.tables.read().await;
            if let Some(cell) = tables.get(key) {
                return cell.clone();
            }
        }
        let mut tables = self.tables.write().await;
        tables
            .entry(key.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(GameState::new_mock(
                    key,
                    seat_count,
                    Self::fresh_seed(),
                    Utc::now(),
                )))
            })
            .clone()
    }

    /// Run `f` against the named table under its exclusive lock, resolving
    /// the requesting player to a seat first. Unknown tables come into
    /// existence as mock practice tables; `seat_count` (when 2..=8)
    /// reconciles a mock table's bot count, rebuilding it when it shrank.
    /// Any lobby update produced by the step is published after the lock is
    /// released.
    pub async fn with_table<R>(
        &self,
        table: &str,
        player: &str,
        seat_count: usize,
        f: impl FnOnce(&mut GameState, Option<usize>, chrono::DateTime<Utc>) -> R,
    ) -> R {
        let key = Self::normalize(table);
        let cell = self.entry(&key, seat_count).await;
        let mut state = cell.lock().await;
        let now = Utc::now();

        if state.is_mock
            && (2..=MAX_SEATS).contains(&seat_count)
            && seat_count != state.seats.len()
        {
            if state.seats.len() > seat_count {
                *state = GameState::new_mock(&key, seat_count, Self::fresh_seed(), now);
            } else {
                state.grow_mock(seat_count, now);
            }
        }

        let viewer = state.resolve_viewer(player, now);
        let result = f(&mut state, viewer, now);
        let update = state.take_lobby_update();
        drop(state);

        if let Some(update) = update {
            self.publisher.publish(update);
        }
        result
    }

    /// Rows for `/tables`: startup rooms that asked to be listed.
    pub async fn lobby_listing(&self) -> Vec<TableListing> {
        let rooms = self.rooms.read().await.clone();
        let mut listing = Vec::new();
        for room in rooms {
            let cell = {
                let tables = self.tables.read().await;
                tables.get(&room.table).cloned()
            };
            let Some(cell) = cell else { continue };
            let state = cell.lock().await;
            if !state.register_lobby {
                continue;
            }
            listing.push(TableListing {
                table: room.table.clone(),
                name: room.name.clone(),
                cur_players: state.human_count(),
                max_players: MAX_SEATS - state.bot_count(),
            });
        }
        listing
    }

    /// Force a lobby publish for every listed room, for when the lobby
    /// restarts and loses its state.
    pub async fn republish_all(&self) {
        let rooms = self.rooms.read().await.clone();
        for room in rooms {
            let cell = {
                let tables = self.tables.read().await;
                tables.get(&room.table).cloned()
            };
            let Some(cell) = cell else { continue };
            let update = {
                let mut state = cell.lock().await;
                state.mark_lobby_dirty();
                state.take_lobby_update()
            };
            if let Some(update) = update {
                self.publisher.publish(update);
            }
        }
    }
}
