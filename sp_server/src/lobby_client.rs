//! Outbound lobby publisher.
//!
//! Updates are delivered by a detached task so a slow lobby never holds up
//! a request, and never runs while a table lock is held. Delivery failures
//! are logged and dropped; the lobby can always be resynced through
//! `/updateLobby`.

use serde::Serialize;
use stud_poker::{LobbyPublisher, LobbyUpdate};

#[derive(Serialize)]
struct LobbyPayload {
    game: String,
    slots: usize,
    filled: usize,
    online: bool,
    url: String,
}

pub struct HttpLobbyPublisher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLobbyPublisher {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

impl LobbyPublisher for HttpLobbyPublisher {
    fn publish(&self, update: LobbyUpdate) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let payload = LobbyPayload {
            game: update.name,
            slots: update.slots,
            filled: update.filled,
            online: true,
            url: format!("?table={}", update.table),
        };
        tokio::spawn(async move {
            match client.post(&endpoint).json(&payload).send().await {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!(
                        status = %response.status(),
                        table = %payload.url,
                        "lobby rejected update"
                    );
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "lobby publish failed");
                }
            }
        });
    }
}
