/**
 * Collaborative State
 *
 * The state every document session shares: the authoritative document and
 * the participant color registry. Sessions access it through
 * `Arc<RwLock<CollabState>>` in [`AppState`](crate::backend::server::state::AppState).
 */
use crate::backend::colors::ColorRegistry;
use crate::server::ServerDocument;

/// The authoritative document plus participant bookkeeping
#[derive(Debug, Clone, Default)]
pub struct CollabState {
    /// The single authoritative document
    pub document: ServerDocument,

    /// Colors held by currently connected participants
    pub colors: ColorRegistry,
}

impl CollabState {
    /// Create collaborative state seeded with initial document content
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            document: ServerDocument::new(seed),
            colors: ColorRegistry::new(),
        }
    }
}
