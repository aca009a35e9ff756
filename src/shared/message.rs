/**
 * Wire Messages
 *
 * This module defines the tagged message envelope exchanged between the
 * server and its clients, and the decode path with its error taxonomy.
 *
 * # Message Kinds
 *
 * - `Snapshot` - initial handshake; the connecting client forks its local
 *   replica from the carried `(revision, content)` pair
 * - `Acknowledge` - the sender's pending operation was accepted; triggers
 *   `confirm()` on the client replica
 * - `Insert` / `Delete` / `Select` - an operation envelope
 *   (`PendingOperation`) traveling in either direction
 *
 * # Decoding
 *
 * Decoding validates the outer type tag before any field, and the inner
 * operation tag before the operation fields. An unrecognized tag is an
 * `UnknownMessageType` / `UnknownOperationType` error, a missing or
 * mistyped field is `MalformedMessage`, and a negative revision is
 * `InvalidRevision`. Decoding also enforces operation well-formedness:
 * an empty insert value is malformed and a zero-length delete normalizes
 * to length one. Nothing is partially decoded: any failure leaves the
 * caller with only the error.
 */
use crate::shared::error::SharedError;
use crate::shared::operation::{Delete, Insert, Operation, PendingOperation, Select};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The tagged message envelope for client/server transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    /// Initial handshake from server to a newly connected client
    Snapshot {
        #[serde(rename = "clientId")]
        client_id: String,
        color: String,
        revision: usize,
        snapshot: String,
    },
    /// The sender's pending operation was accepted by the server
    Acknowledge,
    /// An insert operation envelope
    Insert { operation: PendingOperation },
    /// A delete operation envelope
    Delete { operation: PendingOperation },
    /// A selection-change operation envelope
    Select { operation: PendingOperation },
}

impl Message {
    /// Create a snapshot handshake message
    pub fn snapshot(
        client_id: impl Into<String>,
        color: impl Into<String>,
        revision: usize,
        snapshot: impl Into<String>,
    ) -> Self {
        Self::Snapshot {
            client_id: client_id.into(),
            color: color.into(),
            revision,
            snapshot: snapshot.into(),
        }
    }

    /// Wrap an operation in the message kind matching its variant
    pub fn for_operation(operation: Operation, revision: usize) -> Self {
        let envelope = PendingOperation::new(operation, revision);
        match &envelope.operation {
            Operation::Insert(_) => Self::Insert { operation: envelope },
            Operation::Delete(_) => Self::Delete { operation: envelope },
            Operation::Select(_) => Self::Select { operation: envelope },
        }
    }

    /// The operation envelope, for the three operation-carrying kinds
    pub fn operation(&self) -> Option<&PendingOperation> {
        match self {
            Self::Insert { operation } | Self::Delete { operation } | Self::Select { operation } => {
                Some(operation)
            }
            _ => None,
        }
    }

    /// Serialize for the wire
    pub fn encode(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a wire message, validating tags before fields
    pub fn decode(data: &str) -> Result<Self, SharedError> {
        let value: Value = serde_json::from_str(data)
            .map_err(|err| SharedError::malformed_message("message", err.to_string()))?;

        let tag = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| SharedError::malformed_message("type", "missing message type tag"))?;

        match tag {
            "snapshot" => {
                let message = serde_json::from_value(value)
                    .map_err(|err| SharedError::malformed_message("snapshot", err.to_string()))?;
                Ok(message)
            }
            "acknowledge" => Ok(Self::Acknowledge),
            "insert" | "delete" | "select" => {
                let envelope = value.get("operation").ok_or_else(|| {
                    SharedError::malformed_message("operation", "missing operation envelope")
                })?;
                let operation = decode_pending_operation(envelope)?;
                Ok(match tag {
                    "insert" => Self::Insert { operation },
                    "delete" => Self::Delete { operation },
                    _ => Self::Select { operation },
                })
            }
            other => Err(SharedError::unknown_message_type(other)),
        }
    }
}

/// Decode a `PendingOperation` envelope from a JSON value.
///
/// The revision must be a non-negative number and the inner operation tag
/// must name a known operation kind.
pub fn decode_pending_operation(value: &Value) -> Result<PendingOperation, SharedError> {
    let envelope = value.as_object().ok_or_else(|| {
        SharedError::malformed_message("operation", "operation envelope must be an object")
    })?;

    let revision = match envelope.get("revision") {
        Some(Value::Number(number)) => match number.as_u64() {
            Some(revision) => revision as usize,
            None => {
                let revision = number.as_i64().unwrap_or(i64::MIN);
                return Err(SharedError::invalid_revision(revision));
            }
        },
        _ => {
            return Err(SharedError::malformed_message(
                "revision",
                "expected a number",
            ));
        }
    };

    let operation = envelope.get("operation").ok_or_else(|| {
        SharedError::malformed_message("operation", "missing inner operation")
    })?;

    Ok(PendingOperation::new(decode_operation(operation)?, revision))
}

/// Decode a single operation from a JSON value, dispatching on its tag
pub fn decode_operation(value: &Value) -> Result<Operation, SharedError> {
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| SharedError::malformed_message("type", "missing operation type tag"))?;

    match tag {
        "insert" => {
            let op: Insert = serde_json::from_value(value.clone())
                .map_err(|err| SharedError::malformed_message("insert", err.to_string()))?;
            if op.is_empty() {
                return Err(SharedError::malformed_message(
                    "insert",
                    "value must not be empty",
                ));
            }
            Ok(Operation::Insert(op))
        }
        "delete" => {
            let op: Delete = serde_json::from_value(value.clone())
                .map_err(|err| SharedError::malformed_message("delete", err.to_string()))?;
            // zero lengths normalize the same way the constructor does
            Ok(Operation::delete(op.position, op.length))
        }
        "select" => {
            let op: Select = serde_json::from_value(value.clone())
                .map_err(|err| SharedError::malformed_message("select", err.to_string()))?;
            Ok(Operation::Select(op))
        }
        other => Err(SharedError::unknown_operation_type(other)),
    }
}
