//! Bounded per-session turn history.
//!
//! Only user turns and final assistant turns live here. The synthesized
//! persona prompt and the tool-call/tool-result scaffolding of a single
//! orchestration pass are rebuilt per call and never persisted.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use ck_domain::trace::TraceEvent;

/// Retained turns per session. Appends past this drop the oldest first.
pub const MAX_HISTORY_TURNS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One persisted message of a check-in conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: TurnRole::User, content: content.into() }
    }
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: TurnRole::Assistant, content: content.into() }
    }
}

/// Injectable session-history seam: in-memory for the kiosk, swappable
/// for a shared cache when sessions must survive the process.
pub trait HistoryStore: Send + Sync {
    /// Snapshot of the retained turns, oldest first. Empty for unseen ids.
    fn turns(&self, session_id: &str) -> Vec<Turn>;

    /// Append a turn, creating the session on first use and enforcing
    /// the FIFO cap atomically.
    fn append(&self, session_id: &str, turn: Turn);

    /// Drop the session entirely. A no-op for unknown ids.
    fn clear(&self, session_id: &str);
}

/// Process-wide history map.
///
/// Sessions are created lazily and removed only by [`HistoryStore::clear`]
/// — there is no idle eviction, so session count grows with unique kiosk
/// ids for the life of the process.
#[derive(Default)]
pub struct InMemoryHistory {
    sessions: RwLock<HashMap<String, Vec<Turn>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions (for the health endpoint).
    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl HistoryStore for InMemoryHistory {
    fn turns(&self, session_id: &str) -> Vec<Turn> {
        self.sessions.read().get(session_id).cloned().unwrap_or_default()
    }

    fn append(&self, session_id: &str, turn: Turn) {
        let mut sessions = self.sessions.write();
        let is_new = !sessions.contains_key(session_id);
        let turns = sessions.entry(session_id.to_owned()).or_default();
        turns.push(turn);
        if turns.len() > MAX_HISTORY_TURNS {
            let overflow = turns.len() - MAX_HISTORY_TURNS;
            turns.drain(..overflow);
        }
        if is_new {
            TraceEvent::SessionResolved {
                session_id: session_id.to_owned(),
                is_new: true,
            }
            .emit();
        }
    }

    fn clear(&self, session_id: &str) {
        let removed = self.sessions.write().remove(session_id).is_some();
        if removed {
            TraceEvent::SessionCleared { session_id: session_id.to_owned() }.emit();
        }
    }
}
