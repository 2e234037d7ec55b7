//! Multi-table five-card stud server.
//!
//! A pull-based game server: clients poll `/state`, and every poll advances
//! the table it names. No background scheduler, no sessions, no database:
//! the whole game lives in memory behind per-table locks.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Error};
use pico_args::Arguments;
use stud_poker::TableRegistry;

use sp_server::api::{create_router, AppState};
use sp_server::config::ServerConfig;
use sp_server::{initialize_real_tables, logging, select_publisher};

const HELP: &str = "\
Run a multi-table five-card stud server

USAGE:
  sp_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: 0.0.0.0:$PORT]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  PORT                     Listening port (default 8080)
  GO_LOCAL                 Set to 1 to suppress lobby publishing
  LOBBY_ENDPOINT           Lobby service URL for membership updates
  RUST_LOG                 Log filter (default info)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env if present; existing environment variables win.
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;

    logging::init();

    let config = ServerConfig::from_env(bind_override).context("loading configuration")?;
    config.validate().context("validating configuration")?;

    if !config.update_lobby {
        tracing::info!("running in local mode; not updating the lobby");
    }

    let publisher = select_publisher(&config);
    let registry = Arc::new(TableRegistry::new(publisher));

    initialize_real_tables(&registry).await;
    tracing::info!("startup rooms created");

    let state = AppState {
        registry: registry.clone(),
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding {}", config.bind))?;

    tracing::info!("listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutting down");

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
