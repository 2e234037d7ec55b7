//! Server library: router, configuration, logging, and the outbound lobby
//! client. The binary in `main.rs` wires these together; integration tests
//! drive the router in-process.

pub mod api;
pub mod config;
pub mod lobby_client;
pub mod logging;

use std::sync::Arc;
use stud_poker::TableRegistry;

/// Create the startup rooms. Rooms are prepended as they are created, so
/// the listing shows the most recently added first.
pub async fn initialize_real_tables(registry: &TableRegistry) {
    registry
        .create_real_table("The Basement", "basement", 0, true)
        .await;
    registry.create_real_table("The Den", "den", 0, true).await;
    registry
        .create_real_table("AI Room - 2 bots", "ai2", 2, true)
        .await;
    registry
        .create_real_table("AI Room - 4 bots", "ai4", 4, true)
        .await;
    registry
        .create_real_table("AI Room - 6 bots", "ai6", 6, true)
        .await;

    for i in 1..8 {
        registry
            .create_real_table(&format!("Dev Room - {i} bots"), &format!("dev{i}"), i, false)
            .await;
    }
}

/// Pick the lobby publisher for this process: HTTP when publishing is
/// enabled and an endpoint is configured, otherwise a logged no-op.
pub fn select_publisher(config: &config::ServerConfig) -> Arc<dyn stud_poker::LobbyPublisher> {
    match (&config.lobby_endpoint, config.update_lobby) {
        (Some(endpoint), true) => Arc::new(lobby_client::HttpLobbyPublisher::new(endpoint.clone())),
        _ => Arc::new(stud_poker::NoopLobbyPublisher),
    }
}
