//! Collaborative Editing Module
//!
//! The WebSocket side of the document server: session handlers that feed
//! client operations into the authority and the shared collaborative state
//! they operate on.

/// WebSocket session handlers
pub mod handlers;

/// Shared collaborative state
pub mod state;

pub use handlers::handle_document_socket;
pub use state::CollabState;
