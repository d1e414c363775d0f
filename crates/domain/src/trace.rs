use serde::Serialize;

/// Structured trace events emitted across the kiosk crates.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event")]
pub enum TraceEvent {
    SessionResolved {
        session_id: String,
        is_new: bool,
    },
    SessionCleared {
        session_id: String,
    },
    ToolDispatched {
        tool_name: String,
        emitted_action: bool,
        is_error: bool,
    },
    UnknownTool {
        tool_name: String,
    },
    ProviderFallback {
        from_provider: String,
        to_provider: String,
        reason: String,
    },
    CannedReply {
        session_id: String,
    },
    LoopExhausted {
        session_id: String,
        actions: usize,
    },
}

impl TraceEvent {
    pub fn emit(&self) {
        let json = serde_json::to_string(self).unwrap_or_default();
        tracing::info!(trace_event = %json, "ck_event");
    }
}
