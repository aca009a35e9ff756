//! Shared Error Types
//!
//! This module defines error types that are shared between the client and
//! server replicas. These errors represent common failure cases that can
//! occur on either side of the wire.
//!
//! # Error Categories
//!
//! - Serialization errors (`UnknownMessageType`, `UnknownOperationType`,
//!   `MalformedMessage`) are surfaced to the transport layer, which decides
//!   whether to drop the message or the connection. Decoding never produces
//!   partial results.
//! - Protocol errors (`InvalidRevision`, `FutureRevision`) mean a peer
//!   claimed a revision that cannot be reconciled. The server rejects the
//!   merge without touching its operation history.
//! - Local precondition errors (`NoSelection`) are caller-side programming
//!   errors and are surfaced immediately rather than retried.
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.
use thiserror::Error;

/// Errors shared between the client and server document replicas
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A wire message carried a type tag this implementation does not know
    #[error("Unknown message type: '{message_type}'")]
    UnknownMessageType {
        /// The unrecognized type tag
        message_type: String,
    },

    /// An operation payload carried a type tag this implementation does not know
    #[error("Unknown operation type: '{operation_type}'")]
    UnknownOperationType {
        /// The unrecognized type tag
        operation_type: String,
    },

    /// A wire message was missing a field or carried a mistyped field
    #[error("Malformed message in field '{field}': {message}")]
    MalformedMessage {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A client operation carried a revision that is not a valid history index
    #[error("Invalid revision {revision}: revisions must be non-negative")]
    InvalidRevision {
        /// The offending revision as received on the wire
        revision: i64,
    },

    /// A client operation claimed a revision ahead of the server's history
    #[error("Operation revision {revision} is ahead of the current server revision {current}")]
    FutureRevision {
        /// The revision the sender claimed to have seen
        revision: usize,
        /// The server revision at the time of the merge
        current: usize,
    },

    /// A local edit was requested before the client ever placed a cursor
    #[error("Client '{client_id}' has no selection to edit at")]
    NoSelection {
        /// The client that attempted the edit
        client_id: String,
    },
}

impl SharedError {
    /// Create a new unknown-message-type error
    pub fn unknown_message_type(message_type: impl Into<String>) -> Self {
        Self::UnknownMessageType {
            message_type: message_type.into(),
        }
    }

    /// Create a new unknown-operation-type error
    pub fn unknown_operation_type(operation_type: impl Into<String>) -> Self {
        Self::UnknownOperationType {
            operation_type: operation_type.into(),
        }
    }

    /// Create a new malformed-message error
    pub fn malformed_message(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedMessage {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-revision error
    pub fn invalid_revision(revision: i64) -> Self {
        Self::InvalidRevision { revision }
    }

    /// Create a new future-revision error
    pub fn future_revision(revision: usize, current: usize) -> Self {
        Self::FutureRevision { revision, current }
    }

    /// Create a new no-selection error
    pub fn no_selection(client_id: impl Into<String>) -> Self {
        Self::NoSelection {
            client_id: client_id.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed_message("json", err.to_string())
    }
}
