//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        end_match, find_match, get_active_matches, get_current_match, get_rooms,
        get_waiting_users, health_check, join_waiting_pool, leave_waiting_pool, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
    sweeper::spawn_room_sweeper,
};

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let matching = Router::new()
        .route(
            "/waiting-pool",
            post(join_waiting_pool).delete(leave_waiting_pool),
        )
        .route("/find-match", get(find_match))
        .route("/current-match", get(get_current_match))
        .route("/end-match", post(end_match))
        .route("/waiting-users", get(get_waiting_users))
        .route("/active-matches", get(get_active_matches));

    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .nest("/api/matching", matching)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Matchmaking and signaling server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, Duration::from_secs(300));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// 期限切れルーム掃除の間隔
    sweep_interval: Duration,
}

impl Server {
    pub fn new(state: AppState, sweep_interval: Duration) -> Self {
        Self {
            state: Arc::new(state),
            sweep_interval,
        }
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<(), Box<dyn std::error::Error>> {
        let sweeper = spawn_room_sweeper(
            self.state.expire_rooms_usecase.clone(),
            self.sweep_interval,
        );
        let app = build_router(self.state);

        let local_addr = listener.local_addr()?;
        tracing::info!("AccentSwap server listening on {}", local_addr);
        tracing::info!("Signaling endpoint: ws://{}/ws", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await;
        sweeper.abort();
        result?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
