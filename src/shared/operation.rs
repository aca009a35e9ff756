/**
 * Document Operations
 *
 * This module defines the operation model for collaborative editing: the
 * three operation kinds (`Insert`, `Delete`, `Select`), the single splice
 * primitive all content edits route through, and `PendingOperation`, an
 * operation paired with the revision it was generated against.
 *
 * Operations are plain values. The position helpers (`moved_left`,
 * `moved_right` and the `Select` endpoint variants) consume and return a
 * new value instead of mutating in place, so an operation held in a queue
 * slot can never alias a transform's intermediate result.
 *
 * Positions are character offsets, not byte offsets. All splicing counts
 * `char`s so multi-byte text cannot tear.
 */
use crate::shared::selection::Selection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Splice `insertion` into `content`, replacing `remove` characters at `start`.
///
/// Returns `content[0..start] + insertion + content[start + remove..]`,
/// counted in characters. Out-of-range indices clamp to the content length,
/// so the splice is total over any input.
pub fn splice(content: &str, start: usize, remove: usize, insertion: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let start = start.min(chars.len());
    let rest = (start + remove).min(chars.len());

    let mut result: String = chars[..start].iter().collect();
    result.push_str(insertion);
    result.extend(&chars[rest..]);
    result
}

/// Insert a non-empty string at a character position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insert {
    pub position: usize,
    pub value: String,
}

impl Insert {
    pub fn new(position: usize, value: impl Into<String>) -> Self {
        Self {
            position,
            value: value.into(),
        }
    }

    /// Number of characters this operation inserts
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn apply(&self, content: &str) -> String {
        splice(content, self.position, 0, &self.value)
    }

    pub fn moved_right(mut self, steps: usize) -> Self {
        self.position += steps;
        self
    }

    pub fn moved_left(mut self, steps: usize) -> Self {
        self.position = self.position.saturating_sub(steps);
        self
    }
}

/// Remove a run of characters.
///
/// `position` names the character immediately preceding the deleted run when
/// `length > 1`, and the deleted character itself when `length == 1`. The
/// splice point is therefore `position + 1` for range deletes and `position`
/// for single-character deletes. This mirrors a cursor reporting "delete the
/// thing to my left" and must stay consistent with the transform rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delete {
    pub position: usize,
    pub length: usize,
}

impl Delete {
    /// Create a delete; a zero length is normalized to one character.
    pub fn new(position: usize, length: usize) -> Self {
        Self {
            position,
            length: if length == 0 { 1 } else { length },
        }
    }

    pub fn apply(&self, content: &str) -> String {
        let start = if self.length > 1 {
            self.position + 1
        } else {
            self.position
        };
        splice(content, start, self.length, "")
    }

    pub fn moved_right(mut self, steps: usize) -> Self {
        self.position += steps;
        self
    }

    pub fn moved_left(mut self, steps: usize) -> Self {
        self.position = self.position.saturating_sub(steps);
        self
    }
}

/// Replace the owning participant's selection.
///
/// `start` and `end` are raw endpoints; either may be larger. A select never
/// changes document content, it only updates the selections map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "clientId")]
    pub client_id: String,
    pub color: String,
}

impl Select {
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

    pub fn is_range(&self) -> bool {
        self.start != self.end
    }

    /// The selection value this operation resolves to
    pub fn apply(&self) -> Selection {
        Selection::new(self.start, self.end, self.client_id.clone(), self.color.clone())
    }

    fn set_first(&mut self, value: usize) {
        if self.start <= self.end {
            self.start = value;
        } else {
            self.end = value;
        }
    }

    fn set_last(&mut self, value: usize) {
        if self.start <= self.end {
            self.end = value;
        } else {
            self.start = value;
        }
    }

    pub fn moved_start_right(mut self, steps: usize) -> Self {
        self.start += steps;
        self
    }

    pub fn moved_start_left(mut self, steps: usize) -> Self {
        self.start = self.start.saturating_sub(steps);
        self
    }

    pub fn moved_end_right(mut self, steps: usize) -> Self {
        self.end += steps;
        self
    }

    pub fn moved_end_left(mut self, steps: usize) -> Self {
        self.end = self.end.saturating_sub(steps);
        self
    }

    pub fn moved_first_right(mut self, steps: usize) -> Self {
        let first = self.first() + steps;
        self.set_first(first);
        self
    }

    pub fn moved_first_left(mut self, steps: usize) -> Self {
        let first = self.first().saturating_sub(steps);
        self.set_first(first);
        self
    }

    pub fn moved_last_right(mut self, steps: usize) -> Self {
        let last = self.last() + steps;
        self.set_last(last);
        self
    }

    pub fn moved_last_left(mut self, steps: usize) -> Self {
        let last = self.last().saturating_sub(steps);
        self.set_last(last);
        self
    }

    /// Shift both endpoints right
    pub fn moved_right(self, steps: usize) -> Self {
        self.moved_start_right(steps).moved_end_right(steps)
    }

    /// Shift both endpoints left, clamped at zero
    pub fn moved_left(self, steps: usize) -> Self {
        self.moved_start_left(steps).moved_end_left(steps)
    }
}

/// An atomic edit or selection change on a document.
///
/// This is a closed sum: the transform engine pattern-matches over every
/// pair of variants, so the compiler proves the dispatch table is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Operation {
    Insert(Insert),
    Delete(Delete),
    Select(Select),
}

impl Operation {
    /// Create an insert operation
    pub fn insert(position: usize, value: impl Into<String>) -> Self {
        Self::Insert(Insert::new(position, value))
    }

    /// Create a delete operation (zero lengths normalize to one)
    pub fn delete(position: usize, length: usize) -> Self {
        Self::Delete(Delete::new(position, length))
    }

    /// Create a select operation
    pub fn select(
        start: usize,
        end: usize,
        client_id: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self::Select(Select::new(start, end, client_id, color))
    }

    /// The wire tag for this operation kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::Delete(_) => "delete",
            Self::Select(_) => "select",
        }
    }

    /// Whether this operation edits content (as opposed to a selection change)
    pub fn is_edit(&self) -> bool {
        !matches!(self, Self::Select(_))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(op) => write!(f, "insert({:?} @ {})", op.value, op.position),
            Self::Delete(op) => write!(f, "delete({} @ {})", op.length, op.position),
            Self::Select(op) => write!(f, "select({}@{}:{})", op.client_id, op.start, op.end),
        }
    }
}

/// An operation paired with the document revision it was generated against.
///
/// This doubles as the client's "operation awaiting acknowledgement" and as
/// the wire envelope for every operation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub operation: Operation,
    pub revision: usize,
}

impl PendingOperation {
    pub fn new(operation: Operation, revision: usize) -> Self {
        Self { operation, revision }
    }
}

impl fmt::Display for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pending#{}<{}>", self.revision, self.operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_inserts() {
        assert_eq!(splice("Hello", 3, 0, "!"), "Hel!lo");
        assert_eq!(splice("Hello", 0, 0, ">"), ">Hello");
        assert_eq!(splice("Hello", 5, 0, "!"), "Hello!");
    }

    #[test]
    fn test_splice_removes() {
        assert_eq!(splice("Hello", 1, 1, ""), "Hllo");
        assert_eq!(splice("Hello", 1, 3, ""), "Ho");
    }

    #[test]
    fn test_splice_replaces() {
        assert_eq!(splice("Hello", 0, 5, "Goodbye"), "Goodbye");
    }

    #[test]
    fn test_splice_clamps_out_of_range() {
        assert_eq!(splice("Hi", 10, 0, "!"), "Hi!");
        assert_eq!(splice("Hi", 1, 10, ""), "H");
        assert_eq!(splice("", 3, 3, "x"), "x");
    }

    #[test]
    fn test_splice_counts_characters_not_bytes() {
        assert_eq!(splice("héllo", 2, 1, "x"), "héxlo");
        assert_eq!(splice("日本語", 1, 1, "!"), "日!語");
    }

    #[test]
    fn test_insert_apply() {
        let op = Insert::new(3, "!");
        assert_eq!(op.apply("Hello"), "Hel!lo");
    }

    #[test]
    fn test_insert_length_in_characters() {
        assert_eq!(Insert::new(0, "ab").len(), 2);
        assert_eq!(Insert::new(0, "日本").len(), 2);
    }

    #[test]
    fn test_single_delete_splices_at_position() {
        let op = Delete::new(1, 1);
        assert_eq!(op.apply("Hello"), "Hllo");
    }

    #[test]
    fn test_range_delete_splices_after_position() {
        // position marks the character left of the removed run
        let op = Delete::new(1, 2);
        assert_eq!(op.apply("Hello"), "Heo");
    }

    #[test]
    fn test_delete_normalizes_zero_length() {
        let op = Delete::new(2, 0);
        assert_eq!(op.length, 1);
        assert_eq!(op.apply("Hello"), "Helo");
    }

    #[test]
    fn test_moves_are_pure() {
        let op = Insert::new(3, "x");
        let moved = op.clone().moved_right(2);
        assert_eq!(op.position, 3);
        assert_eq!(moved.position, 5);
        assert_eq!(moved.moved_left(10).position, 0);
    }

    #[test]
    fn test_select_first_last_track_direction() {
        let forward = Select::new(1, 4, "a", "c");
        assert_eq!((forward.first(), forward.last()), (1, 4));

        let backward = Select::new(4, 1, "a", "c");
        assert_eq!((backward.first(), backward.last()), (1, 4));

        // first/last moves touch whichever raw endpoint is smaller/larger
        let moved = backward.moved_first_right(1);
        assert_eq!(moved.end, 2);
        assert_eq!(moved.start, 4);
    }

    #[test]
    fn test_select_apply_produces_selection() {
        let op = Select::new(2, 6, "alice", "rgb(255, 0, 0)");
        let selection = op.apply();
        assert_eq!(selection.start, 2);
        assert_eq!(selection.end, 6);
        assert_eq!(selection.client_id, "alice");
    }

    #[test]
    fn test_operation_serialization_is_tagged() {
        let op = Operation::insert(3, "!");
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains("\"type\":\"insert\""));
        assert!(json.contains("\"position\":3"));

        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn test_select_serialization_round_trip() {
        let op = Operation::select(5, 2, "bob", "rgb(0, 0, 255)");
        let json = serde_json::to_string(&op).unwrap();
        assert!(json.contains("\"clientId\":\"bob\""));
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn test_pending_operation_round_trip() {
        let pending = PendingOperation::new(Operation::delete(4, 2), 9);
        let json = serde_json::to_string(&pending).unwrap();
        let back: PendingOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pending);
        assert_eq!(back.revision, 9);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::insert(2, "!").to_string(), "insert(\"!\" @ 2)");
        assert_eq!(Operation::delete(2, 1).to_string(), "delete(1 @ 2)");
        assert_eq!(
            Operation::select(1, 3, "alice", "c").to_string(),
            "select(alice@1:3)"
        );
    }
}
