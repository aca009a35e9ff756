//! Operational Transformation Engine
//!
//! Given two operations that were independently generated against the same
//! base document, [`transform`] returns an adjusted pair that can be applied
//! in sequence while preserving both editing intentions:
//!
//! applying `concurrent` then `transforming'` produces the same content as
//! applying `transforming` then `concurrent'`.
//!
//! The `concurrent` operand is the operation that is already committed in
//! the total order (a history entry on the server, or a server-confirmed
//! remote operation on the client); `transforming` is the operation being
//! repositioned past it. On an exact position tie the concurrent operand
//! keeps its position and the transforming operand is shifted to make room,
//! except where a delete meets an insert at the same position (the insert
//! point stays anchored and the delete shifts past the inserted text).
//! Every replica must place the operands the same way around or replicas
//! disagree about tie order and silently diverge.
//!
//! Selection rules are tried first, then edit rules. The pairing of rules is
//! exhaustive over the operation variants, so the dispatch is total and a
//! missing table entry is a compile error rather than a runtime one.
use crate::shared::operation::{Delete, Insert, Operation, Select};

/// The adjusted operand pair produced by a transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// The concurrent operand, shifted if the transforming operand displaced it
    pub concurrent: Operation,
    /// The transforming operand, shifted past the concurrent operand's effect
    pub transforming: Operation,
}

/// Transform `transforming` against `concurrent`.
///
/// Exactly one side of the returned pair is repositioned per rule; the other
/// is returned unchanged. Inputs are never mutated.
pub fn transform(concurrent: &Operation, transforming: &Operation) -> Transformed {
    select_transform(concurrent, transforming)
        .or_else(|| edit_transform(concurrent, transforming))
        .unwrap_or_else(|| Transformed {
            concurrent: concurrent.clone(),
            transforming: transforming.clone(),
        })
}

/// Rules for pairs involving a selection.
///
/// The strictness of each comparison is deliberate cursor behavior:
/// an insertion exactly at a tracked selection endpoint leaves that endpoint
/// anchored (`>`), while a selection being repositioned past an insertion at
/// or before its endpoint follows the typed text (`<=`), and a deletion
/// ending exactly at an endpoint does not pull it further (`<`).
fn select_transform(concurrent: &Operation, transforming: &Operation) -> Option<Transformed> {
    use Operation::{Delete as Del, Insert as Ins, Select as Sel};

    match (concurrent, transforming) {
        // Selections never move relative to each other.
        (Sel(_), Sel(_)) => Some(Transformed {
            concurrent: concurrent.clone(),
            transforming: transforming.clone(),
        }),
        (Sel(c), Ins(t)) => {
            let mut adjusted = c.clone();
            if c.start > t.position {
                adjusted = adjusted.moved_start_right(t.len());
            }
            if c.end > t.position {
                adjusted = adjusted.moved_end_right(t.len());
            }
            Some(Transformed {
                concurrent: Sel(adjusted),
                transforming: transforming.clone(),
            })
        }
        (Sel(c), Del(t)) => {
            let mut adjusted = c.clone();
            if c.start > t.position {
                adjusted = adjusted.moved_start_left(t.length);
            }
            if c.end > t.position {
                adjusted = adjusted.moved_end_left(t.length);
            }
            Some(Transformed {
                concurrent: Sel(adjusted),
                transforming: transforming.clone(),
            })
        }
        (Ins(c), Sel(t)) => {
            let mut adjusted = t.clone();
            if c.position <= t.start {
                adjusted = adjusted.moved_start_right(c.len());
            }
            if c.position <= t.end {
                adjusted = adjusted.moved_end_right(c.len());
            }
            Some(Transformed {
                concurrent: concurrent.clone(),
                transforming: Sel(adjusted),
            })
        }
        (Del(c), Sel(t)) => {
            let mut adjusted = t.clone();
            if c.position < t.start {
                adjusted = adjusted.moved_start_left(c.length);
            }
            if c.position < t.end {
                adjusted = adjusted.moved_end_left(c.length);
            }
            Some(Transformed {
                concurrent: concurrent.clone(),
                transforming: Sel(adjusted),
            })
        }
        _ => None,
    }
}

/// Rules for pairs of content edits.
///
/// Position ties favor the concurrent operand: it keeps its position and
/// the transforming operand is shifted. The one exception is a delete
/// meeting an insert at the same position, where the insert point sits
/// before the deleted character and must stay anchored.
fn edit_transform(concurrent: &Operation, transforming: &Operation) -> Option<Transformed> {
    use Operation::{Delete as Del, Insert as Ins};

    match (concurrent, transforming) {
        (Ins(c), Ins(t)) => Some(if c.position <= t.position {
            shifted_transforming(concurrent, Ins(t.clone().moved_right(c.len())))
        } else {
            shifted_concurrent(Ins(c.clone().moved_right(t.len())), transforming)
        }),
        (Del(c), Del(t)) => Some(if c.position <= t.position {
            shifted_transforming(concurrent, Del(t.clone().moved_left(c.length)))
        } else {
            shifted_concurrent(Del(c.clone().moved_left(t.length)), transforming)
        }),
        (Ins(c), Del(t)) => Some(if c.position <= t.position {
            shifted_transforming(concurrent, Del(t.clone().moved_right(c.len())))
        } else {
            shifted_concurrent(Ins(c.clone().moved_left(t.length)), transforming)
        }),
        // Strict comparison: an insert exactly at the delete position stays
        // put and the delete shifts past the inserted text. Pulling the
        // insert left instead would land it inside the deleted region and
        // the two application orders would disagree.
        (Del(c), Ins(t)) => Some(if c.position < t.position {
            shifted_transforming(concurrent, Ins(t.clone().moved_left(c.length)))
        } else {
            shifted_concurrent(Del(c.clone().moved_right(t.len())), transforming)
        }),
        _ => None,
    }
}

fn shifted_transforming(concurrent: &Operation, transforming: Operation) -> Transformed {
    Transformed {
        concurrent: concurrent.clone(),
        transforming,
    }
}

fn shifted_concurrent(concurrent: Operation, transforming: &Operation) -> Transformed {
    Transformed {
        concurrent,
        transforming: transforming.clone(),
    }
}
