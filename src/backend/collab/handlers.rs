/**
 * Document Session Handlers
 *
 * One WebSocket session per connected participant, over `GET /document`.
 *
 * # Session Lifecycle
 *
 * 1. The upgrade handler assigns a fresh client id and a palette color,
 *    then sends a `Snapshot` message carrying the current revision and
 *    content so the client can fork its local replica. The snapshot is
 *    captured and the event stream subscribed inside one critical section,
 *    so every commit lands either in the snapshot or on the stream.
 * 2. The session loop multiplexes two sources with `tokio::select!`:
 *    operation messages arriving on the socket, and committed operations
 *    broadcast by other sessions.
 * 3. An incoming operation is rebased, committed, and broadcast by the
 *    authority under the write lock, then acknowledged back to its sender.
 *    Replicas apply events in arrival order, so the channel must carry
 *    commits in commit order; broadcasting inside the commit's critical
 *    section guarantees that.
 * 4. On disconnect the participant's color returns to the pool.
 *
 * # Error Handling
 *
 * A malformed or unmergeable message is logged and dropped; the session
 * stays up and the authority is left untouched. Only transport failures
 * end the session.
 */
use crate::backend::error::BackendError;
use crate::backend::realtime::broadcast::{broadcast_event, DocumentEvent};
use crate::backend::server::state::AppState;
use crate::shared::{Message, Operation, PendingOperation, SharedError};
use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

/// Handle a document WebSocket upgrade (GET /document)
pub async fn handle_document_socket(
    ws: WebSocketUpgrade,
    State(app_state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| document_session(socket, app_state))
}

/// Everything a new session needs to fork a consistent local replica
struct SessionStart {
    color: String,
    revision: usize,
    snapshot: String,
    events: broadcast::Receiver<DocumentEvent>,
}

/// Admit a participant: color assignment, snapshot, event subscription.
///
/// All three happen under the write lock. Commits broadcast under the same
/// lock, so any commit is serialized against this block: it is either
/// already in the snapshot, or it arrives on the subscribed stream. No
/// commit can fall between the two.
async fn join_session(app_state: &AppState, client_id: Uuid) -> SessionStart {
    let mut collab = app_state.collab.write().await;
    let color = collab.colors.assign(client_id);
    let events = app_state.events.subscribe();

    SessionStart {
        color: color.css(),
        revision: collab.document.revision(),
        snapshot: collab.document.snapshot().to_string(),
        events,
    }
}

/// Rebase and commit one operation, broadcasting the committed form.
///
/// The broadcast happens inside the commit's critical section. The send is
/// synchronous and never blocks, and keeping it under the lock means the
/// event channel carries commits in exactly the order the authority
/// committed them.
async fn commit_operation(
    app_state: &AppState,
    client_id: Uuid,
    pending: &PendingOperation,
) -> Result<(Operation, usize), SharedError> {
    let mut collab = app_state.collab.write().await;
    let committed = collab.document.merge(pending)?;
    let revision = collab.document.revision();

    broadcast_event(
        &app_state.events,
        DocumentEvent {
            origin: client_id,
            message: Message::for_operation(committed.clone(), revision),
        },
    );

    Ok((committed, revision))
}

/// Run one participant's session until the socket closes
async fn document_session(socket: WebSocket, app_state: AppState) {
    let client_id = Uuid::new_v4();

    let SessionStart {
        color,
        revision,
        snapshot,
        mut events,
    } = join_session(&app_state, client_id).await;

    tracing::info!(
        "[Collab] Client {} connected with color {} at revision {}",
        client_id,
        color,
        revision
    );

    let (mut sink, mut stream) = socket.split();

    let handshake = Message::snapshot(client_id.to_string(), &color, revision, snapshot);
    if send_message(&mut sink, &handshake).await.is_err() {
        tracing::warn!("[Collab] Client {} dropped during handshake", client_id);
        app_state.collab.write().await.colors.release(&client_id);
        return;
    }

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => {
                    if let Err(err) =
                        handle_client_message(&text, client_id, &app_state, &mut sink).await
                    {
                        match err {
                            BackendError::Socket { .. } => {
                                tracing::warn!("[Collab] Client {}: {}", client_id, err);
                                break;
                            }
                            other => {
                                // protocol errors drop the message, not the session
                                tracing::warn!(
                                    "[Collab] Client {} sent a rejected message: {}",
                                    client_id,
                                    other
                                );
                            }
                        }
                    }
                }
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {} // binary and ping/pong frames are ignored
                Some(Err(err)) => {
                    tracing::warn!("[Collab] Client {} socket error: {}", client_id, err);
                    break;
                }
            },
            event = events.recv() => match event {
                Ok(event) => {
                    if event.origin == client_id {
                        continue;
                    }
                    if send_message(&mut sink, &event.message).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        "[Collab] Client {} lagged, skipped {} events",
                        client_id,
                        skipped
                    );
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    app_state.collab.write().await.colors.release(&client_id);
    tracing::info!("[Collab] Client {} disconnected", client_id);
}

/// Decode and commit one client message, then acknowledge it.
///
/// The broadcast to other sessions goes out during the commit itself; only
/// the Acknowledge to the sender waits for the socket. Any failure before
/// the commit leaves the authority untouched.
async fn handle_client_message(
    text: &str,
    client_id: Uuid,
    app_state: &AppState,
    sink: &mut SplitSink<WebSocket, WsMessage>,
) -> Result<(), BackendError> {
    let message = Message::decode(text)?;

    let Some(pending) = message.operation() else {
        tracing::debug!(
            "[Collab] Client {} sent a non-operation message, ignoring",
            client_id
        );
        return Ok(());
    };

    let (committed, revision) = commit_operation(app_state, client_id, pending).await?;

    tracing::debug!(
        "[Collab] Client {} committed {} as revision {}",
        client_id,
        committed,
        revision
    );

    send_message(sink, &Message::Acknowledge).await?;

    Ok(())
}

/// Encode and send one message on the socket
async fn send_message(
    sink: &mut SplitSink<WebSocket, WsMessage>,
    message: &Message,
) -> Result<(), BackendError> {
    let json = message.encode()?;
    sink.send(WsMessage::Text(json.into()))
        .await
        .map_err(|err| BackendError::socket(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::collab::state::CollabState;
    use crate::shared::DocumentState;
    use assert_matches::assert_matches;
    use std::sync::Arc;
    use tokio::sync::broadcast::error::TryRecvError;
    use tokio::sync::RwLock;

    fn test_state(seed: &str) -> AppState {
        let (events, _) = broadcast::channel(64);
        AppState {
            collab: Arc::new(RwLock::new(CollabState::new(seed))),
            events,
        }
    }

    #[tokio::test]
    async fn test_concurrent_commits_broadcast_in_commit_order() {
        let app_state = test_state("Hello");
        let mut events = app_state.events.subscribe();

        // four clients race same-position inserts, all against revision 0
        let mut handles = Vec::new();
        for value in ["a", "b", "c", "d"] {
            let app_state = app_state.clone();
            handles.push(tokio::spawn(async move {
                let pending = PendingOperation::new(Operation::insert(0, value), 0);
                commit_operation(&app_state, Uuid::new_v4(), &pending)
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // applying the events in arrival order must reproduce the authority
        let mut replica = DocumentState::new("Hello");
        for expected_revision in 1..=4 {
            let event = events.recv().await.unwrap();
            let envelope = event.message.operation().unwrap();
            assert_eq!(envelope.revision, expected_revision);
            replica.apply(&envelope.operation);
        }

        let collab = app_state.collab.read().await;
        assert_eq!(replica.snapshot(), collab.document.snapshot());
    }

    #[tokio::test]
    async fn test_joining_session_misses_no_commit() {
        let app_state = test_state("Hello");
        let writer = Uuid::new_v4();

        let before = PendingOperation::new(Operation::insert(5, "!"), 0);
        commit_operation(&app_state, writer, &before).await.unwrap();

        let mut start = join_session(&app_state, Uuid::new_v4()).await;
        assert_eq!(start.revision, 1);
        assert_eq!(start.snapshot, "Hello!");
        // the commit before the join is in the snapshot, not on the stream
        assert_matches!(start.events.try_recv(), Err(TryRecvError::Empty));

        let after = PendingOperation::new(Operation::insert(0, "A"), 1);
        commit_operation(&app_state, writer, &after).await.unwrap();

        let event = start.events.recv().await.unwrap();
        let envelope = event.message.operation().unwrap();
        assert_eq!(envelope.revision, 2);

        let mut replica = DocumentState::new(start.snapshot);
        replica.apply(&envelope.operation);

        let collab = app_state.collab.read().await;
        assert_eq!(replica.snapshot(), collab.document.snapshot());
    }

    #[tokio::test]
    async fn test_rejected_commit_broadcasts_nothing() {
        let app_state = test_state("Hello");
        let mut events = app_state.events.subscribe();

        let forged = PendingOperation::new(Operation::insert(0, "x"), 5);
        let result = commit_operation(&app_state, Uuid::new_v4(), &forged).await;

        assert_matches!(result, Err(SharedError::FutureRevision { .. }));
        assert_matches!(events.try_recv(), Err(TryRecvError::Empty));

        let collab = app_state.collab.read().await;
        assert_eq!(collab.document.snapshot(), "Hello");
        assert_eq!(collab.document.revision(), 0);
    }
}
