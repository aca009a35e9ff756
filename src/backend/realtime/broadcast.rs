/**
 * Committed-Operation Broadcasting
 *
 * After the authority commits an operation, the resulting wire message is
 * broadcast to every live session tagged with the committing client's id.
 * Sessions drop events whose origin matches their own id; the sender hears
 * about its commit through the `Acknowledge` reply instead.
 */
use crate::shared::Message;
use tokio::sync::broadcast;
use uuid::Uuid;

/// A committed operation on its way to the other participants
#[derive(Debug, Clone)]
pub struct DocumentEvent {
    /// The session that submitted the operation
    pub origin: Uuid,
    /// The committed operation, already wrapped for the wire
    pub message: Message,
}

/// Broadcast sender shared by every document session
pub type DocumentEventBroadcast = broadcast::Sender<DocumentEvent>;

/// Broadcast a committed operation to all subscribed sessions.
///
/// Returns the number of sessions that received the event. Zero receivers
/// is not an error; the committing session may simply be alone.
pub fn broadcast_event(events: &DocumentEventBroadcast, event: DocumentEvent) -> usize {
    match events.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("[Realtime] Event broadcast to {} sessions", subscriber_count);
            subscriber_count
        }
        Err(_) => {
            tracing::debug!("[Realtime] No sessions subscribed to receive event");
            0
        }
    }
}
