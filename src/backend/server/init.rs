/**
 * Server Initialization
 *
 * Assembles the Axum application: collaborative state, the broadcast
 * channel sessions subscribe to, and the WebSocket route.
 */
use crate::backend::collab::handlers::handle_document_socket;
use crate::backend::collab::state::CollabState;
use crate::backend::realtime::broadcast::DocumentEvent;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;
use axum::routing::any;
use axum::Router;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Broadcast channel capacity; a lagging session skips to live events
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Create and configure the Axum application
///
/// The document is seeded from the configuration and starts at revision
/// zero. Every session shares the returned state.
pub fn create_app(config: &ServerConfig) -> Router {
    tracing::info!("[Startup] Initializing document server");

    let collab = Arc::new(RwLock::new(CollabState::new(&config.seed)));
    let (events, _) = broadcast::channel::<DocumentEvent>(EVENT_CHANNEL_CAPACITY);

    let app_state = AppState { collab, events };

    tracing::info!("[Startup] Document state and broadcast channel initialized");

    Router::new()
        .route("/document", any(handle_document_socket))
        .with_state(app_state)
}
