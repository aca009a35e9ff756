//! Cowrite - Collaborative Plain-Text Editing
//!
//! Cowrite keeps a single plain-text document synchronized across any
//! number of concurrent editors using operational transformation. Every
//! participant edits an optimistic local replica; a central server decides
//! the total order of operations and rebases whatever arrives late.
//!
//! # Module Structure
//!
//! - **`shared`** - The transport-agnostic core used on both sides:
//!   operations, the transform engine, document state, wire messages, and
//!   the shared error taxonomy
//! - **`client`** - The optimistic local replica with its pending/queue
//!   state machine
//! - **`server`** - The authoritative document with its append-only
//!   operation history
//! - **`backend`** - The Axum WebSocket server that hosts the authority
//!   and fans committed operations out to every session
//!
//! # Convergence
//!
//! Convergence rests on two rules both sides follow exactly:
//!
//! - `transform(concurrent, transforming)` produces a pair such that
//!   applying either order yields the same content, and exact position
//!   ties always favor the concurrent operand
//! - every replica puts the operation that is earlier in the server's
//!   total order in the concurrent seat
//!
//! The server rebases stale client operations across the history they
//! missed; clients rebase incoming committed operations past their own
//! unacknowledged work. Once all operations are delivered, every replica
//! holds the same content.
//!
//! # Example
//!
//! ```rust
//! use cowrite::server::ServerDocument;
//!
//! let mut server = ServerDocument::new("Hello");
//! let mut alice = server.fork_client("alice", "rgb(255, 0, 0)");
//!
//! alice.select(3, 3);
//! alice.insert("!").unwrap();
//! assert_eq!(alice.snapshot(), "Hel!lo");
//!
//! // the selection travels first, then the insert
//! while let Some(pending) = alice.waiting_for().cloned() {
//!     server.merge(&pending).unwrap();
//!     alice.confirm();
//! }
//!
//! assert_eq!(server.snapshot(), "Hel!lo");
//! assert_eq!(alice.snapshot(), server.snapshot());
//! ```

/// Transport-agnostic core shared by both replicas
pub mod shared;

/// Optimistic client replica
pub mod client;

/// Authoritative server document
pub mod server;

/// Axum WebSocket server
pub mod backend;
