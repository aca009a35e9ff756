//! Real-time Update Module
//!
//! Fan-out of committed operations to every live document session. Each
//! session subscribes to one `tokio::sync::broadcast` channel and filters
//! out events it originated itself; the commit acknowledgement travels back
//! to the originator directly instead.

/// Event broadcasting utilities
pub mod broadcast;

pub use broadcast::{broadcast_event, DocumentEvent, DocumentEventBroadcast};
