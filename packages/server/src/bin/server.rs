//! AccentSwap matchmaking and signaling server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin accentswap-server -- --profiles packages/server/data/profiles.json
//! cargo run --bin accentswap-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use accentswap_server::{
    config::ServerConfig,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryMatchmakingRepository, InMemoryProfileRepository, InMemoryRoomRepository,
        },
    },
    ui::{AppState, Server},
};
use accentswap_shared::{logger::setup_logger, time::SystemClock};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(&[env!("CARGO_CRATE_NAME"), "tower_http"], &config.log_level);

    // Initialize dependencies in order:
    // 1. Profile store
    // 2. Repositories
    // 3. MessagePusher
    // 4. UseCases (AppState)
    // 5. Server

    // 1. Load profiles
    let profiles = match &config.profiles {
        Some(path) => match InMemoryProfileRepository::from_json_file(path).await {
            Ok(profiles) => profiles,
            Err(e) => {
                tracing::error!("Failed to load profiles from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("No profile file given; every join will fail with UserNotFound");
            InMemoryProfileRepository::default()
        }
    };
    tracing::info!("Loaded {} profile(s)", profiles.count().await);

    // 2. Create Repositories (in-memory)
    let matchmaking = Arc::new(InMemoryMatchmakingRepository::default());
    let rooms = Arc::new(InMemoryRoomRepository::default());

    // 3. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 4. Create UseCases
    let state = AppState::new(
        matchmaking,
        Arc::new(profiles),
        rooms,
        message_pusher,
        Arc::new(SystemClock),
        config.room_ttl_millis(),
    );

    // 5. Create and run the server
    let server = Server::new(state, config.sweep_interval());
    if let Err(e) = server.run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
