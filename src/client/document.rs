//! Client Replica
//!
//! `ClientDocument` is one participant's local view of the shared document.
//! Local edits apply immediately (the user never waits on the network) and
//! are then either captured as the single pending operation awaiting server
//! acknowledgement, or appended to the queue behind it. Remote operations
//! are rebased past pending and queue before they touch local state.
//!
//! # State Machine
//!
//! The replica is *idle* when `pending` is `None` and the queue is empty,
//! and *awaiting-ack* otherwise. At most one operation is ever in flight;
//! `confirm()` promotes the queue head into the pending slot, which is the
//! point where the transport should send the next operation.
//!
//! # Revision Accounting
//!
//! `revision` counts every operation folded into this view since the fork:
//! it increments once when a local operation is captured (pending slot) and
//! once per merged remote operation. The revision stored in a
//! `PendingOperation` is the revision the operation was generated against.
use crate::shared::document::DocumentState;
use crate::shared::error::SharedError;
use crate::shared::operation::{Operation, PendingOperation};
use crate::shared::selection::{ClientSelections, Selection};
use crate::shared::transform::transform;
use std::collections::VecDeque;

/// A participant's optimistic local replica of the shared document
#[derive(Debug, Clone)]
pub struct ClientDocument {
    id: String,
    color: String,
    revision: usize,
    state: DocumentState,
    queue: VecDeque<Operation>,
    pending: Option<PendingOperation>,
}

impl ClientDocument {
    /// Fork a replica from a server snapshot
    pub fn new(
        id: impl Into<String>,
        color: impl Into<String>,
        revision: usize,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            color: color.into(),
            revision,
            state: DocumentState::new(content),
            queue: VecDeque::new(),
            pending: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Number of operations folded into this view since the fork point
    pub fn revision(&self) -> usize {
        self.revision
    }

    /// The current local content
    pub fn snapshot(&self) -> &str {
        self.state.snapshot()
    }

    /// Every tracked selection, including other participants'
    pub fn selections(&self) -> &ClientSelections {
        self.state.selections()
    }

    /// This participant's own selection, if one has been placed
    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection(&self.id)
    }

    /// The operation sent to the server but not yet acknowledged
    pub fn waiting_for(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    /// Number of local operations queued behind the pending one
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Whether there is no local work awaiting acknowledgement
    pub fn is_idle(&self) -> bool {
        self.pending.is_none() && self.queue.is_empty()
    }

    /// Insert `value` at the current selection.
    ///
    /// Fails with [`SharedError::NoSelection`] if this participant has never
    /// placed a cursor.
    pub fn insert(&mut self, value: impl Into<String>) -> Result<Operation, SharedError> {
        let selection = self
            .selection()
            .ok_or_else(|| SharedError::no_selection(&self.id))?;

        let operation = Operation::insert(selection.start, value);
        self.merge_local(operation.clone());
        Ok(operation)
    }

    /// Delete one character at the current selection.
    ///
    /// Fails with [`SharedError::NoSelection`] if this participant has never
    /// placed a cursor.
    pub fn delete(&mut self) -> Result<Operation, SharedError> {
        let selection = self
            .selection()
            .ok_or_else(|| SharedError::no_selection(&self.id))?;

        let operation = Operation::delete(selection.start, 1);
        self.merge_local(operation.clone());
        Ok(operation)
    }

    /// Move this participant's selection
    pub fn select(&mut self, start: usize, end: usize) -> Operation {
        let operation = Operation::select(start, end, self.id.clone(), self.color.clone());
        self.merge_local(operation.clone());
        operation
    }

    /// Shift the selection one character left, clamped at the start
    pub fn move_left(&mut self) -> Result<Operation, SharedError> {
        let selection = self
            .selection()
            .ok_or_else(|| SharedError::no_selection(&self.id))?;

        let (start, end) = (selection.start.saturating_sub(1), selection.end.saturating_sub(1));
        Ok(self.select(start, end))
    }

    /// Shift the selection one character right
    pub fn move_right(&mut self) -> Result<Operation, SharedError> {
        let selection = self
            .selection()
            .ok_or_else(|| SharedError::no_selection(&self.id))?;

        let (start, end) = (selection.start + 1, selection.end + 1);
        Ok(self.select(start, end))
    }

    /// Record the server's acknowledgement of the pending operation.
    ///
    /// Clears the pending slot; if local edits are queued behind it, the
    /// queue head is promoted and should be sent to the server next. Callers
    /// must check [`waiting_for`](Self::waiting_for) rather than assume a
    /// promotion happened.
    pub fn confirm(&mut self) {
        self.pending = None;

        if let Some(next) = self.queue.pop_front() {
            self.set_pending(next);
        }
    }

    /// Merge a server-confirmed remote operation into this replica.
    ///
    /// The remote operation was committed by the server before anything this
    /// replica still has in flight, so it is cascaded past `pending` and
    /// then each queue slot in generation order. The remote operation sits
    /// in the concurrent seat of every transform: on position ties it keeps
    /// its place, exactly as it did on the server, and the local operations
    /// are the ones shifted. Seating them the other way around makes
    /// replicas disagree with the server about tie order.
    ///
    /// Returns the cascaded operation as it was applied locally.
    pub fn merge(&mut self, operation: Operation) -> Operation {
        let mut remote = operation;

        if let Some(pending) = self.pending.take() {
            let result = transform(&remote, &pending.operation);
            remote = result.concurrent;
            self.pending = Some(PendingOperation::new(result.transforming, pending.revision));
        }

        for slot in self.queue.iter_mut() {
            let result = transform(&remote, slot);
            remote = result.concurrent;
            *slot = result.transforming;
        }

        self.state.apply(&remote);
        self.revision += 1;
        self.shift_selections(&remote);

        remote
    }

    /// Capture a freshly generated local operation
    fn merge_local(&mut self, operation: Operation) {
        if self.pending.is_none() {
            self.set_pending(operation.clone());
        } else {
            self.queue.push_back(operation.clone());
        }

        self.state.apply(&operation);
        self.shift_selections(&operation);
    }

    fn set_pending(&mut self, operation: Operation) {
        self.pending = Some(PendingOperation::new(operation, self.revision));
        self.revision += 1;
    }

    /// Re-pin every tracked selection after `edit` changed the content
    fn shift_selections(&mut self, edit: &Operation) {
        let tracked: Vec<(String, Selection)> = self
            .state
            .selections()
            .iter()
            .map(|(id, selection)| (id.clone(), selection.clone()))
            .collect();

        for (client_id, selection) in tracked {
            let as_operation = Operation::select(
                selection.start,
                selection.end,
                selection.client_id,
                selection.color,
            );
            let result = transform(edit, &as_operation);

            if let Operation::Select(shifted) = result.transforming {
                self.state
                    .selections_mut()
                    .insert(client_id, shifted.apply());
            }
        }
    }
}
