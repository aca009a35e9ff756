/**
 * Application State Management
 *
 * `AppState` is the central state container shared by every session
 * handler. The collaborative state sits behind `Arc<RwLock<>>` so a commit
 * takes the write lock only for its own duration, and the broadcast sender
 * is cloned into each session.
 *
 * The `FromRef` implementations let handlers extract exactly the piece of
 * state they need instead of the whole container.
 */
use crate::backend::collab::state::CollabState;
use crate::backend::realtime::broadcast::DocumentEventBroadcast;
use axum::extract::FromRef;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state for every document session handler
#[derive(Clone)]
pub struct AppState {
    /// The authoritative document and the participant color registry
    pub collab: Arc<RwLock<CollabState>>,

    /// Broadcast channel carrying committed operations to all sessions
    pub events: DocumentEventBroadcast,
}

impl FromRef<AppState> for Arc<RwLock<CollabState>> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.collab.clone()
    }
}

impl FromRef<AppState> for DocumentEventBroadcast {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.events.clone()
    }
}
