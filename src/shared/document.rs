//! Document State
//!
//! The state every replica folds operations into: the content string plus
//! the tracked selection of each participant. Applying an `Insert` or
//! `Delete` rewrites content through the splice primitive; applying a
//! `Select` only replaces that participant's slot in the selections map.
use crate::shared::operation::Operation;
use crate::shared::selection::{ClientSelections, Selection};

/// Content plus per-participant selections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    content: String,
    selections: ClientSelections,
}

impl DocumentState {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            selections: ClientSelections::new(),
        }
    }

    /// The current content
    pub fn snapshot(&self) -> &str {
        &self.content
    }

    /// All tracked selections, keyed by client id
    pub fn selections(&self) -> &ClientSelections {
        &self.selections
    }

    pub(crate) fn selections_mut(&mut self) -> &mut ClientSelections {
        &mut self.selections
    }

    /// The tracked selection of one participant, if any
    pub fn selection(&self, client_id: &str) -> Option<&Selection> {
        self.selections.get(client_id)
    }

    /// Fold one operation into this state
    pub fn apply(&mut self, operation: &Operation) {
        match operation {
            Operation::Insert(op) => self.content = op.apply(&self.content),
            Operation::Delete(op) => self.content = op.apply(&self.content),
            Operation::Select(op) => {
                self.selections.insert(op.client_id.clone(), op.apply());
            }
        }
    }
}
