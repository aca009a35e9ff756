//! Cursor Selections
//!
//! A selection is the cursor state of one participant: two raw endpoints
//! plus the owning client id and its display color. `start` and `end` keep
//! the direction the user dragged in; `first`/`last` are the normalized
//! bounds that rendering and transforms care about.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One participant's cursor or selection range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// The endpoint where the selection was anchored
    pub start: usize,
    /// The endpoint where the selection currently ends (may be before `start`)
    pub end: usize,
    /// The participant owning this selection
    #[serde(rename = "clientId")]
    pub client_id: String,
    /// The participant's display color
    pub color: String,
}

impl Selection {
    pub fn new(
        start: usize,
        end: usize,
        client_id: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            start,
            end,
            client_id: client_id.into(),
            color: color.into(),
        }
    }

    /// The numerically smaller endpoint
    pub fn first(&self) -> usize {
        self.start.min(self.end)
    }

    /// The numerically larger endpoint
    pub fn last(&self) -> usize {
        self.start.max(self.end)
    }

    /// Whether this selection spans at least one character
    pub fn is_range(&self) -> bool {
        self.start != self.end
    }
}

/// All tracked selections of a document, keyed by client id.
/// Each client owns exactly one slot; a new selection replaces the old one.
pub type ClientSelections = HashMap<String, Selection>;
