//! Backend Error Types
//!
//! Error types specific to the WebSocket server. Protocol-level failures
//! from the shared module pass through transparently so session handlers
//! can use `?` on decode and merge results alike.

/// Error type definitions
pub mod types;

pub use types::BackendError;
