//! HTTP API for the stud server.
//!
//! The protocol is deliberately plain: every endpoint answers GET (and the
//! game endpoints POST) with query-string parameters, because the primary
//! clients are 8-bit machines that poll. There is no authentication; a
//! seat belongs to whoever names it. See [`tables`] for the handlers and
//! [`serialize`] for the raw rendering mode those clients rely on.
//!
//! # Endpoints
//!
//! ```text
//! GET/POST /state        - step the table, return the caller's view
//! GET/POST /move/{code}  - perform FO/CH/BB/BL/BH/CA/RL/RH
//! GET/POST /leave        - vacate the caller's seat
//! GET      /view         - peek without stepping (debug)
//! GET      /tables       - lobby-registered rooms
//! GET      /updateLobby  - force a lobby republish
//! GET      /health       - liveness probe
//! ```

pub mod serialize;
pub mod tables;

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use stud_poker::TableRegistry;
use tower_http::cors::CorsLayer;

/// Shared application state; cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TableRegistry>,
}

/// Build the complete router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/state", get(tables::state).post(tables::state))
        .route("/move/{code}", get(tables::make_move).post(tables::make_move))
        .route("/leave", get(tables::leave).post(tables::leave))
        .route("/view", get(tables::view))
        .route("/tables", get(tables::tables))
        .route("/updateLobby", get(tables::update_lobby))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
