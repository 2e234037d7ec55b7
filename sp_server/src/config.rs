//! Server configuration.
//!
//! Consolidates the environment reads in one validated struct. Production
//! drives everything through `PORT` and `GO_LOCAL`; the lobby endpoint is
//! configurable so staging servers can point at a scratch lobby.

use std::net::SocketAddr;

/// Developer account whose presence in `USER` keeps a workstation from
/// spamming the public lobby.
const LOCAL_DEV_USER: &str = "eric";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address.
    pub bind: SocketAddr,
    /// Whether membership changes are pushed to the external lobby.
    pub update_lobby: bool,
    /// Lobby service URL; `None` leaves publishing as a logged no-op.
    pub lobby_endpoint: Option<String>,
}

impl ServerConfig {
    /// Load configuration from the environment.
    ///
    /// `PORT` picks the listening port (default 8080). `GO_LOCAL=1`, or a
    /// `USER` matching the named developer, suppresses lobby publishing.
    pub fn from_env(bind_override: Option<SocketAddr>) -> Result<Self, ConfigError> {
        let port: u16 = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT".to_string(),
                reason: format!("not a port number: {raw}"),
            })?,
            Err(_) => 8080,
        };

        let bind = bind_override.unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], port)));

        let update_lobby = std::env::var("GO_LOCAL").as_deref() != Ok("1")
            && std::env::var("USER").as_deref() != Ok(LOCAL_DEV_USER);

        let lobby_endpoint = std::env::var("LOBBY_ENDPOINT").ok().filter(|s| !s.is_empty());

        Ok(Self {
            bind,
            update_lobby,
            lobby_endpoint,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind.port() == 0 {
            return Err(ConfigError::Invalid {
                var: "PORT".to_string(),
                reason: "must be non-zero".to_string(),
            });
        }
        if self.update_lobby && self.lobby_endpoint.is_none() {
            tracing::warn!("no LOBBY_ENDPOINT configured; lobby updates will only be logged");
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_port_fails_validation() {
        let config = ServerConfig {
            bind: "127.0.0.1:0".parse().unwrap(),
            update_lobby: false,
            lobby_endpoint: None,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_error_display_names_the_variable() {
        let err = ConfigError::Invalid {
            var: "PORT".to_string(),
            reason: "not a port number: abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("PORT"));
        assert!(msg.contains("abc"));
    }
}
