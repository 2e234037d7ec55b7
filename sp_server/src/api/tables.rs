//! Game endpoints.
//!
//! Every handler follows the same request shape: resolve the table and
//! player from the query string, take one step under the table lock, and
//! render the viewer-centric state. Bad input never errors a request; an
//! invalid move simply leaves the table unchanged and the returned view
//! tells the client where things actually stand.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use stud_poker::MoveCode;

use super::serialize::{self, Format};
use super::AppState;

/// Query parameters shared by the game endpoints. Table names are
/// case-folded; everything else is taken as-is.
#[derive(Debug, Default, Deserialize)]
pub struct RequestParams {
    pub table: Option<String>,
    pub player: Option<String>,
    pub count: Option<usize>,
    pub hash: Option<String>,
    pub raw: Option<String>,
    pub lf: Option<String>,
    pub uc: Option<String>,
    pub lc: Option<String>,
}

impl RequestParams {
    fn table(&self) -> &str {
        self.table.as_deref().unwrap_or("")
    }

    fn player(&self) -> &str {
        self.player.as_deref().unwrap_or("")
    }

    fn count(&self) -> usize {
        self.count.unwrap_or(0)
    }

    fn format(&self) -> Format {
        let flag = |v: &Option<String>| v.as_deref() == Some("1");
        Format {
            raw: flag(&self.raw),
            lf: flag(&self.lf),
            uc: flag(&self.uc),
            lc: flag(&self.lc),
        }
    }
}

/// `GET/POST /state`: advance the table one step and return the caller's
/// view, or the scalar `"1"` when the caller's cached hash still matches.
pub async fn state(State(app): State<AppState>, Query(params): Query<RequestParams>) -> Response {
    let view = app
        .registry
        .with_table(params.table(), params.player(), params.count(), |state, viewer, now| {
            // Spectators observe; only resolved seats advance the clock.
            if viewer.is_some() {
                state.run_game_logic(viewer, now);
            }
            state.client_view(viewer, now)
        })
        .await;

    if params
        .hash
        .as_deref()
        .is_some_and(|h| !h.is_empty() && h == view.hash)
    {
        return serialize::respond(params.format(), &"1");
    }
    serialize::respond(params.format(), &view)
}

/// `GET/POST /move/{code}`: perform a move when the caller holds the
/// action. Unknown or out-of-turn codes fall through to a plain view.
pub async fn make_move(
    State(app): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<RequestParams>,
) -> Response {
    let code: Option<MoveCode> = code.parse().ok();
    let view = app
        .registry
        .with_table(params.table(), params.player(), 0, |state, viewer, now| {
            if let (Some(code), Some(seat)) = (code, viewer) {
                if state.active_seat == Some(seat) {
                    state.perform_move(code, now);
                }
            }
            state.client_view(viewer, now)
        })
        .await;
    serialize::respond(params.format(), &view)
}

/// `GET/POST /leave`: vacate the caller's seat.
pub async fn leave(State(app): State<AppState>, Query(params): Query<RequestParams>) -> Response {
    app.registry
        .with_table(params.table(), params.player(), 0, |state, viewer, now| {
            if let Some(seat) = viewer {
                state.client_leave(seat, now);
                state.mark_lobby_dirty();
            }
        })
        .await;
    serialize::respond(params.format(), &"bye")
}

/// `GET /view`: current view without stepping, for debugging next to a
/// live client.
pub async fn view(State(app): State<AppState>, Query(params): Query<RequestParams>) -> Response {
    let view = app
        .registry
        .with_table(params.table(), params.player(), 0, |state, viewer, now| {
            state.client_view(viewer, now)
        })
        .await;
    Json(view).into_response()
}

/// `GET /tables`: lobby-registered rooms with human player counts.
pub async fn tables(State(app): State<AppState>, Query(params): Query<RequestParams>) -> Response {
    let listing = app.registry.lobby_listing().await;
    serialize::respond(params.format(), &listing)
}

/// `GET /updateLobby`: force a republish of every listed room, for when
/// the lobby restarts and loses its state.
pub async fn update_lobby(
    State(app): State<AppState>,
    Query(params): Query<RequestParams>,
) -> Response {
    app.registry.republish_all().await;
    serialize::respond(params.format(), &"Lobby Updated")
}
