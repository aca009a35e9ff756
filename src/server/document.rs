//! Server Authority
//!
//! `ServerDocument` is the single ordering authority for a shared document.
//! It keeps an append-only history of every committed operation; the current
//! revision is simply the history length. Client operations arrive stamped
//! with the revision they were generated against and are rebased across
//! everything committed since before they are applied.
//!
//! # Commit Protocol
//!
//! An incoming operation at revision `r` is transformed past each history
//! entry in `history[r..]` in order, with the history entry in the
//! concurrent seat. The fully rebased operation is applied to state and
//! appended to history atomically from the caller's perspective: a
//! [`SharedError::FutureRevision`] rejection leaves state, history, and
//! revision untouched.
use crate::client::ClientDocument;
use crate::shared::document::DocumentState;
use crate::shared::error::SharedError;
use crate::shared::operation::{Operation, PendingOperation};
use crate::shared::selection::ClientSelections;
use crate::shared::transform::transform;

/// The authoritative document with its append-only operation history
#[derive(Debug, Clone, Default)]
pub struct ServerDocument {
    state: DocumentState,
    history: Vec<Operation>,
}

impl ServerDocument {
    /// Create an authority seeded with initial content at revision zero
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            state: DocumentState::new(seed),
            history: Vec::new(),
        }
    }

    /// The current revision, equal to the number of committed operations
    pub fn revision(&self) -> usize {
        self.history.len()
    }

    /// The current authoritative content
    pub fn snapshot(&self) -> &str {
        self.state.snapshot()
    }

    /// Every tracked participant selection
    pub fn selections(&self) -> &ClientSelections {
        self.state.selections()
    }

    /// Every committed operation, oldest first
    pub fn history(&self) -> &[Operation] {
        &self.history
    }

    /// Fork a client replica from the current snapshot and revision
    pub fn fork_client(
        &self,
        id: impl Into<String>,
        color: impl Into<String>,
    ) -> ClientDocument {
        ClientDocument::new(id, color, self.revision(), self.snapshot())
    }

    /// Rebase and commit one client operation.
    ///
    /// Returns the operation as committed, which is what must be broadcast
    /// to the other participants. Rejects operations stamped with a
    /// revision the authority has not reached yet, without touching state.
    pub fn merge(&mut self, pending: &PendingOperation) -> Result<Operation, SharedError> {
        if pending.revision > self.revision() {
            return Err(SharedError::future_revision(
                pending.revision,
                self.revision(),
            ));
        }

        let mut committed = pending.operation.clone();
        for concurrent in &self.history[pending.revision..] {
            committed = transform(concurrent, &committed).transforming;
        }

        self.state.apply(&committed);
        self.history.push(committed.clone());
        Ok(committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new_document_is_at_revision_zero() {
        let doc = ServerDocument::new("Hello");
        assert_eq!(doc.revision(), 0);
        assert_eq!(doc.snapshot(), "Hello");
        assert!(doc.history().is_empty());
    }

    #[test]
    fn test_merge_current_revision_applies_unchanged() {
        let mut doc = ServerDocument::new("Hello");
        let committed = doc
            .merge(&PendingOperation::new(Operation::insert(3, "!"), 0))
            .unwrap();

        assert_eq!(committed, Operation::insert(3, "!"));
        assert_eq!(doc.snapshot(), "Hel!lo");
        assert_eq!(doc.revision(), 1);
    }

    #[test]
    fn test_merge_rebases_stale_operation() {
        let mut doc = ServerDocument::new("Hello");
        doc.merge(&PendingOperation::new(Operation::insert(1, "xx"), 0))
            .unwrap();

        // generated against revision 0, so it rebases past the first insert
        let committed = doc
            .merge(&PendingOperation::new(Operation::insert(3, "!"), 0))
            .unwrap();

        assert_eq!(committed, Operation::insert(5, "!"));
        assert_eq!(doc.snapshot(), "Hxxel!lo");
    }

    #[test]
    fn test_merge_tie_favors_earlier_commit() {
        let mut doc = ServerDocument::new("Hello");
        doc.merge(&PendingOperation::new(Operation::insert(2, "!"), 0))
            .unwrap();
        doc.merge(&PendingOperation::new(Operation::insert(2, "?"), 0))
            .unwrap();

        assert_eq!(doc.snapshot(), "He!?llo");
    }

    #[test]
    fn test_merge_rebases_across_multiple_entries() {
        let mut doc = ServerDocument::new("Hello");
        doc.merge(&PendingOperation::new(Operation::insert(0, "a"), 0))
            .unwrap();
        doc.merge(&PendingOperation::new(Operation::insert(0, "b"), 1))
            .unwrap();

        let committed = doc
            .merge(&PendingOperation::new(Operation::delete(1, 1), 0))
            .unwrap();

        assert_eq!(committed, Operation::delete(3, 1));
        assert_eq!(doc.snapshot(), "abHllo");
    }

    #[test]
    fn test_merge_select_rebases_but_keeps_content() {
        let mut doc = ServerDocument::new("Hello");
        doc.merge(&PendingOperation::new(Operation::insert(1, "xy"), 0))
            .unwrap();

        let committed = doc
            .merge(&PendingOperation::new(
                Operation::select(3, 3, "alice", "rgb(255, 0, 0)"),
                0,
            ))
            .unwrap();

        assert_eq!(
            committed,
            Operation::select(5, 5, "alice", "rgb(255, 0, 0)")
        );
        assert_eq!(doc.snapshot(), "Hxyello");
        assert_eq!(doc.selections().get("alice").unwrap().start, 5);
    }

    #[test]
    fn test_merge_future_revision_is_rejected_without_side_effects() {
        let mut doc = ServerDocument::new("Hello");
        let result = doc.merge(&PendingOperation::new(Operation::insert(0, "x"), 3));

        assert_matches!(
            result,
            Err(SharedError::FutureRevision {
                revision: 3,
                current: 0
            })
        );
        assert_eq!(doc.snapshot(), "Hello");
        assert_eq!(doc.revision(), 0);
        assert!(doc.history().is_empty());
    }

    #[test]
    fn test_fork_client_matches_authority() {
        let mut doc = ServerDocument::new("Hello");
        doc.merge(&PendingOperation::new(Operation::insert(5, "!"), 0))
            .unwrap();

        let replica = doc.fork_client("alice", "rgb(255, 0, 0)");
        assert_eq!(replica.snapshot(), "Hello!");
        assert_eq!(replica.revision(), 1);
    }
}
