//! Per-session conversation state: the bounded turn history (the loop's
//! only durable mutable state) and the per-session turn gate that keeps
//! overlapping kiosk submits from interleaving.

pub mod gate;
pub mod history;

pub use gate::SessionGate;
pub use history::{HistoryStore, InMemoryHistory, Turn, TurnRole, MAX_HISTORY_TURNS};
