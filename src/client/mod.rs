//! Client Module
//!
//! The optimistic local replica a participant edits against. All transport
//! concerns live elsewhere; this module is pure state machine.

/// Optimistic local replica
pub mod document;

pub use document::ClientDocument;
