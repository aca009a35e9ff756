//! Server Module
//!
//! The authoritative document and its commit protocol. Like the client
//! module this is pure state machine; the WebSocket plumbing that feeds it
//! lives in the backend.

/// Authoritative document with operation history
pub mod document;

pub use document::ServerDocument;
