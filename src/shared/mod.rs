//! Shared Module
//!
//! This module contains the transport-agnostic core shared by the client and
//! server replicas: the operation model, the transform engine, the document
//! state both replicas fold operations into, the wire message envelope, and
//! the shared error taxonomy.
//!
//! Everything in here is pure and synchronous. Transform and apply are total
//! functions over bounded input; nothing blocks, awaits, or retries.

/// Shared error types
pub mod error;

/// Document state folded by both replicas
pub mod document;

/// Wire message envelope and decoding
pub mod message;

/// Operation model and splice primitive
pub mod operation;

/// Cursor selections
pub mod selection;

/// Pairwise operational transformation
pub mod transform;

/// Re-export commonly used types for convenience
pub use document::DocumentState;
pub use error::SharedError;
pub use message::Message;
pub use operation::{Delete, Insert, Operation, PendingOperation, Select};
pub use selection::{ClientSelections, Selection};
pub use transform::{transform, Transformed};
