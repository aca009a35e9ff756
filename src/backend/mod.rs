//! Backend Module
//!
//! This module contains all server-side code for the cowrite application:
//! an Axum WebSocket server that hosts the authoritative document and
//! relays committed operations to every connected participant.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`collab`** - The WebSocket document session handlers
//! - **`realtime`** - Broadcast channel for committed-operation fan-out
//! - **`colors`** - Participant color assignment
//! - **`error`** - Backend-specific error types
//!
//! # State Management
//!
//! All session handlers share one `AppState` containing the collaborative
//! state (authoritative document plus color registry) behind
//! `Arc<RwLock<>>`, and a `tokio::sync::broadcast` sender every session
//! subscribes to. A session holds the write lock only for the duration of
//! a single commit.
//!
//! # Session Protocol
//!
//! 1. On connect the server assigns a fresh client id and color and sends
//!    a `Snapshot` message with the current revision and content.
//! 2. Each operation message from the client is rebased and committed by
//!    the authority, acknowledged to its sender, and broadcast to everyone
//!    else in committed form.
//! 3. On disconnect the participant's color returns to the pool.

/// Server setup and configuration
pub mod server;

/// WebSocket document sessions
pub mod collab;

/// Committed-operation broadcasting
pub mod realtime;

/// Participant color assignment
pub mod colors;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use collab::handlers::handle_document_socket;
pub use colors::{Color, ColorRegistry};
pub use error::BackendError;
pub use realtime::{broadcast_event, DocumentEvent, DocumentEventBroadcast};
pub use server::init::create_app;
