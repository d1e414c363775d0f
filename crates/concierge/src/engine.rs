//! The orchestration loop — the bounded call/execute/feed-back cycle that
//! lets the model use tools before producing its final reply.
//!
//! Entry point: [`ConciergeEngine::chat`]. One invocation handles one
//! guest message; tool calls execute sequentially and their UI actions
//! accumulate in execution order.

use std::sync::Arc;

use ck_domain::checkin::UiAction;
use ck_domain::error::Result;
use ck_domain::tool::{Message, ToolDefinition};
use ck_domain::trace::TraceEvent;
use ck_hotel::HotelDirectory;
use ck_providers::{ChatProvider, ChatRequest, ProviderRegistry};
use ck_sessions::{HistoryStore, SessionGate, Turn, TurnRole};

use crate::canned;
use crate::executor::dispatch_tool;
use crate::prompt::{system_prompt, SessionContext};
use crate::registry::tool_definitions;

/// Maximum model calls per guest message — the circuit breaker against
/// runaway tool loops.
pub const MAX_TOOL_LOOPS: usize = 5;

/// Reply used when the loop cap is hit without a plain-text answer.
const EXHAUSTED_REPLY: &str = "Let me help you with that. Could you tell me a bit more?";

/// What one guest turn produces.
#[derive(Debug)]
pub struct ChatOutcome {
    pub reply: String,
    /// Kiosk instructions, in the order their originating tool calls ran.
    pub actions: Vec<UiAction>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ConciergeEngine
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct ConciergeEngine {
    registry: ProviderRegistry,
    directory: Arc<dyn HotelDirectory>,
    history: Arc<dyn HistoryStore>,
    gate: SessionGate,
    tool_defs: Vec<ToolDefinition>,
    hotel_name: String,
    temperature: f32,
    max_tokens: u32,
}

impl ConciergeEngine {
    pub fn new(
        registry: ProviderRegistry,
        directory: Arc<dyn HotelDirectory>,
        history: Arc<dyn HistoryStore>,
        hotel_name: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            directory,
            history,
            gate: SessionGate::new(),
            tool_defs: tool_definitions(),
            hotel_name: hotel_name.into(),
            temperature: 0.7,
            max_tokens: 200,
        }
    }

    /// Override the sampling settings (from `[llm]` config).
    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Run one guest turn. Always produces a reply: provider failures
    /// degrade through the fallback provider and finally the canned
    /// responder rather than surfacing an error to the kiosk.
    pub async fn chat(
        &self,
        message: &str,
        session_id: &str,
        context: &SessionContext,
    ) -> ChatOutcome {
        // Whole-turn exclusion per session: a double-submit waits here
        // instead of interleaving history updates.
        let _turn = self.gate.acquire(session_id).await;

        self.history.append(session_id, Turn::user(message));

        // The persona prompt is rebuilt every call and never persisted.
        let system = system_prompt(&self.hotel_name, context);
        let turns = self.history.turns(session_id);
        let mut messages = Vec::with_capacity(turns.len() + 1);
        messages.push(Message::system(&system));
        for turn in turns {
            messages.push(match turn.role {
                TurnRole::User => Message::user(turn.content),
                TurnRole::Assistant => Message::assistant(turn.content),
            });
        }

        let outcome = match self.registry.primary() {
            Some(provider) => {
                match self.run_tool_loop(provider.as_ref(), session_id, messages.clone()).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::warn!(
                            provider = provider.provider_id(),
                            error = %e,
                            "primary provider failed, degrading"
                        );
                        self.degraded_reply(message, session_id, messages).await
                    }
                }
            }
            None => self.degraded_reply(message, session_id, messages).await,
        };

        self.history.append(session_id, Turn::assistant(&outcome.reply));
        outcome
    }

    /// Drop all history for a session. Safe to call repeatedly.
    pub fn clear_session(&self, session_id: &str) {
        self.history.clear(session_id);
    }

    // ── The tool loop ──────────────────────────────────────────────

    async fn run_tool_loop(
        &self,
        provider: &dyn ChatProvider,
        session_id: &str,
        mut messages: Vec<Message>,
    ) -> Result<ChatOutcome> {
        let mut actions: Vec<UiAction> = Vec::new();

        for loop_idx in 0..MAX_TOOL_LOOPS {
            tracing::debug!(loop_idx, session_id, "tool loop iteration");

            let req = ChatRequest {
                messages: messages.clone(),
                tools: self.tool_defs.clone(),
                temperature: Some(self.temperature),
                max_tokens: Some(self.max_tokens),
                model: None,
            };
            let resp = provider.chat(&req).await?;

            // No tool calls means this is the final answer (an empty
            // message short-circuits the same way).
            if resp.tool_calls.is_empty() {
                return Ok(ChatOutcome { reply: resp.content, actions });
            }

            // Tool scaffolding lives only in this call's message list.
            messages.push(Message::assistant_tool_calls(&resp.content, &resp.tool_calls));

            // Sequential execution, in the model's order: actions must
            // reach the kiosk exactly as requested, and later calls often
            // depend on earlier results being visible to the model.
            for tc in &resp.tool_calls {
                let outcome = dispatch_tool(self.directory.as_ref(), &tc.tool_name, &tc.arguments).await;
                if let Some(action) = outcome.action {
                    actions.push(action);
                }
                messages.push(Message::tool_result(&tc.call_id, outcome.result.to_string()));
            }
        }

        TraceEvent::LoopExhausted {
            session_id: session_id.to_owned(),
            actions: actions.len(),
        }
        .emit();

        // Cap hit: degrade to a generic nudge but honor the actions the
        // model already queued.
        Ok(ChatOutcome { reply: EXHAUSTED_REPLY.into(), actions })
    }

    // ── Degraded paths ─────────────────────────────────────────────

    /// Provider failure path: try the plain-completion fallback (no
    /// tools, so no actions), then the canned responder.
    async fn degraded_reply(
        &self,
        message: &str,
        session_id: &str,
        mut messages: Vec<Message>,
    ) -> ChatOutcome {
        if let Some(fallback) = self.registry.fallback() {
            TraceEvent::ProviderFallback {
                from_provider: self.registry.primary().map(|p| p.provider_id().to_owned())
                    .unwrap_or_else(|| "none".into()),
                to_provider: fallback.provider_id().to_owned(),
                reason: "primary unavailable or erroring".into(),
            }
            .emit();

            // Strip any tool scaffolding; the fallback only speaks text.
            messages.retain(|m| m.content.text().is_some());
            let req = ChatRequest {
                messages,
                tools: Vec::new(),
                temperature: Some(self.temperature),
                max_tokens: Some(self.max_tokens),
                model: None,
            };
            match fallback.chat(&req).await {
                Ok(resp) if !resp.content.is_empty() => {
                    return ChatOutcome { reply: resp.content, actions: Vec::new() };
                }
                Ok(_) => {
                    tracing::warn!(
                        provider = fallback.provider_id(),
                        "fallback provider returned an empty reply"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        provider = fallback.provider_id(),
                        error = %e,
                        "fallback provider also failed"
                    );
                }
            }
        }

        TraceEvent::CannedReply { session_id: session_id.to_owned() }.emit();
        ChatOutcome { reply: canned::reply(message), actions: Vec::new() }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;
    use serde_json::json;

    use ck_domain::error::Error;
    use ck_domain::tool::ToolCall;
    use ck_hotel::MockDirectory;
    use ck_providers::ChatResponse;
    use ck_sessions::{InMemoryHistory, MAX_HISTORY_TURNS};

    /// Provider that replays a queue of scripted responses and records
    /// every request it sees.
    struct ScriptedProvider {
        id: &'static str,
        tools: bool,
        script: Mutex<VecDeque<Result<ChatResponse>>>,
        calls: AtomicUsize,
        last_messages: Mutex<Vec<Message>>,
    }

    impl ScriptedProvider {
        fn new(id: &'static str, tools: bool, script: Vec<Result<ChatResponse>>) -> Arc<Self> {
            Arc::new(Self {
                id,
                tools,
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
                last_messages: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ChatProvider for ScriptedProvider {
        async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_messages.lock() = req.messages.clone();
            self.script
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(Error::Other("script exhausted".into())))
        }

        fn supports_tools(&self) -> bool {
            self.tools
        }

        fn provider_id(&self) -> &str {
            self.id
        }
    }

    fn text_reply(content: &str) -> Result<ChatResponse> {
        Ok(ChatResponse {
            content: content.into(),
            tool_calls: Vec::new(),
            model: "scripted".into(),
            finish_reason: Some("stop".into()),
        })
    }

    fn tool_reply(calls: Vec<(&str, &str, serde_json::Value)>) -> Result<ChatResponse> {
        Ok(ChatResponse {
            content: String::new(),
            tool_calls: calls
                .into_iter()
                .map(|(id, name, args)| ToolCall {
                    call_id: id.into(),
                    tool_name: name.into(),
                    arguments: args,
                })
                .collect(),
            model: "scripted".into(),
            finish_reason: Some("tool_calls".into()),
        })
    }

    fn engine_with(
        primary: Option<Arc<ScriptedProvider>>,
        fallback: Option<Arc<ScriptedProvider>>,
    ) -> ConciergeEngine {
        let mut providers: Vec<Arc<dyn ChatProvider>> = Vec::new();
        if let Some(p) = &primary {
            providers.push(p.clone());
        }
        if let Some(f) = &fallback {
            providers.push(f.clone());
        }
        let registry = ProviderRegistry::with_providers(
            providers,
            primary.map(|p| p.id).unwrap_or("primary"),
            fallback.map(|f| f.id.to_owned()),
        );
        ConciergeEngine::new(
            registry,
            Arc::new(MockDirectory::new()),
            Arc::new(InMemoryHistory::new()),
            "The Grand Azure Hotel",
        )
    }

    #[tokio::test]
    async fn plain_reply_round_trip_persists_both_turns() {
        let primary = ScriptedProvider::new("primary", true, vec![text_reply("Welcome in!")]);
        let engine = engine_with(Some(primary.clone()), None);

        let outcome = engine.chat("Hello", "s1", &SessionContext::default()).await;
        assert_eq!(outcome.reply, "Welcome in!");
        assert!(outcome.actions.is_empty());
        assert_eq!(primary.call_count(), 1);

        let turns = engine.history.turns("s1");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "Hello");
        assert_eq!(turns[1].content, "Welcome in!");
    }

    #[tokio::test]
    async fn system_prompt_is_sent_but_never_persisted() {
        let primary = ScriptedProvider::new("primary", true, vec![text_reply("Hi James!")]);
        let engine = engine_with(Some(primary.clone()), None);

        engine.chat("My name is James", "s1", &SessionContext::default()).await;

        let sent = primary.last_messages.lock();
        assert!(matches!(sent[0].role, ck_domain::tool::Role::System));

        for turn in engine.history.turns("s1") {
            assert!(!turn.content.contains("You are an AI concierge"));
        }
    }

    #[tokio::test]
    async fn scenario_a_lookup_then_step_then_reply() {
        let primary = ScriptedProvider::new(
            "primary",
            true,
            vec![
                tool_reply(vec![
                    ("call_1", "lookup_reservation_by_name",
                     json!({"firstName": "James", "lastName": "Chen"})),
                    ("call_2", "set_checkin_step", json!({"step": "reservation-found"})),
                ]),
                text_reply("Welcome back, James! I found your reservation."),
            ],
        );
        let engine = engine_with(Some(primary.clone()), None);

        let outcome = engine
            .chat("My name is James Chen", "s1", &SessionContext::default())
            .await;

        assert_eq!(outcome.reply, "Welcome back, James! I found your reservation.");
        assert_eq!(outcome.actions.len(), 2);
        assert!(matches!(&outcome.actions[0], UiAction::StoreReservation(r) if r.id == "res-1"));
        assert_eq!(
            outcome.actions[1],
            UiAction::SetStep { step: "reservation-found".into() }
        );
        assert_eq!(primary.call_count(), 2);

        // The second call saw the tool scaffolding with matching ids.
        let sent = primary.last_messages.lock();
        let has_result_for_call_1 = sent.iter().any(|m| {
            matches!(&m.content, ck_domain::tool::MessageContent::Parts(parts)
                if parts.iter().any(|p| matches!(p,
                    ck_domain::tool::ContentPart::ToolResult { tool_use_id, .. }
                        if tool_use_id == "call_1")))
        });
        assert!(has_result_for_call_1);
    }

    #[tokio::test]
    async fn scenario_b_near_miss_yields_no_actions() {
        let primary = ScriptedProvider::new(
            "primary",
            true,
            vec![
                tool_reply(vec![(
                    "call_1",
                    "lookup_reservation_by_name",
                    json!({"firstName": "Jams", "lastName": "Chen"}),
                )]),
                text_reply("I couldn't find that name. Did you mean James Chen?"),
            ],
        );
        let engine = engine_with(Some(primary), None);

        let outcome = engine.chat("Jams Chen", "s1", &SessionContext::default()).await;
        assert!(outcome.reply.contains("James Chen"));
        assert!(outcome.actions.is_empty());
    }

    #[tokio::test]
    async fn action_order_follows_tool_execution_order() {
        let primary = ScriptedProvider::new(
            "primary",
            true,
            vec![
                tool_reply(vec![
                    ("t1", "trigger_payment", json!({})),
                    ("t2", "get_hotel_info", json!({})),
                    ("t3", "set_checkin_step", json!({"step": "payment"})),
                ]),
                text_reply("Let's settle the bill."),
            ],
        );
        let engine = engine_with(Some(primary), None);

        let outcome = engine.chat("pay now", "s1", &SessionContext::default()).await;
        // t2 emits no action; t1 and t3 keep their relative order.
        assert_eq!(
            outcome.actions,
            vec![
                UiAction::ShowPayment,
                UiAction::SetStep { step: "payment".into() },
            ]
        );
    }

    #[tokio::test]
    async fn loop_cap_returns_fallback_reply_after_exactly_five_calls() {
        let endless: Vec<Result<ChatResponse>> = (0..10)
            .map(|i| {
                Ok(ChatResponse {
                    content: String::new(),
                    tool_calls: vec![ToolCall {
                        call_id: format!("call_{i}"),
                        tool_name: "set_checkin_step".into(),
                        arguments: json!({"step": "identify"}),
                    }],
                    model: "scripted".into(),
                    finish_reason: Some("tool_calls".into()),
                })
            })
            .collect();
        let primary = ScriptedProvider::new("primary", true, endless);
        let engine = engine_with(Some(primary.clone()), None);

        let outcome = engine.chat("check me in", "s1", &SessionContext::default()).await;
        assert_eq!(primary.call_count(), MAX_TOOL_LOOPS);
        assert_eq!(outcome.reply, EXHAUSTED_REPLY);
        // Actions gathered before exhaustion are still honored.
        assert_eq!(outcome.actions.len(), MAX_TOOL_LOOPS);

        // The fallback reply is durable history too.
        let turns = engine.history.turns("s1");
        assert_eq!(turns.last().unwrap().content, EXHAUSTED_REPLY);
    }

    #[tokio::test]
    async fn unknown_tool_does_not_abort_the_turn() {
        let primary = ScriptedProvider::new(
            "primary",
            true,
            vec![
                tool_reply(vec![("x1", "order_room_service", json!({"dish": "laksa"}))]),
                text_reply("I've noted that."),
            ],
        );
        let engine = engine_with(Some(primary), None);

        let outcome = engine.chat("laksa please", "s1", &SessionContext::default()).await;
        assert_eq!(outcome.reply, "I've noted that.");
        assert!(outcome.actions.is_empty());
    }

    #[tokio::test]
    async fn primary_failure_falls_back_to_plain_provider_with_no_actions() {
        let primary = ScriptedProvider::new(
            "primary",
            true,
            vec![Err(Error::Provider {
                provider: "primary".into(),
                message: "HTTP 500".into(),
            })],
        );
        let fallback =
            ScriptedProvider::new("fallback", false, vec![text_reply("I can still help you.")]);
        let engine = engine_with(Some(primary), Some(fallback.clone()));

        let outcome = engine.chat("hello", "s1", &SessionContext::default()).await;
        assert_eq!(outcome.reply, "I can still help you.");
        assert!(outcome.actions.is_empty());
        assert_eq!(fallback.call_count(), 1);

        // The fallback request carries no tool definitions.
        assert!(fallback.last_messages.lock().len() >= 2);
    }

    #[tokio::test]
    async fn both_providers_failing_lands_on_canned_reply() {
        let primary = ScriptedProvider::new(
            "primary",
            true,
            vec![Err(Error::Other("down".into()))],
        );
        let fallback = ScriptedProvider::new(
            "fallback",
            false,
            vec![Err(Error::Other("also down".into()))],
        );
        let engine = engine_with(Some(primary), Some(fallback));

        let outcome = engine
            .chat("what's the wifi password?", "s1", &SessionContext::default())
            .await;
        assert!(outcome.reply.contains("AZURE2024"));
        assert!(outcome.actions.is_empty());
    }

    #[tokio::test]
    async fn no_providers_at_all_still_answers() {
        let engine = engine_with(None, None);
        let outcome = engine.chat("hello", "s1", &SessionContext::default()).await;
        assert!(outcome.reply.contains("Welcome to The Grand Azure Hotel"));
    }

    #[tokio::test]
    async fn history_stays_bounded_across_many_turns() {
        let script: Vec<Result<ChatResponse>> =
            (0..15).map(|i| text_reply(&format!("reply {i}"))).collect();
        let primary = ScriptedProvider::new("primary", true, script);
        let engine = engine_with(Some(primary), None);

        for i in 0..15 {
            engine
                .chat(&format!("msg {i}"), "s1", &SessionContext::default())
                .await;
        }
        let turns = engine.history.turns("s1");
        assert_eq!(turns.len(), MAX_HISTORY_TURNS);
        assert_eq!(turns.last().unwrap().content, "reply 14");
    }

    #[tokio::test]
    async fn clear_session_restarts_history() {
        let primary = ScriptedProvider::new(
            "primary",
            true,
            vec![text_reply("first"), text_reply("second")],
        );
        let engine = engine_with(Some(primary), None);

        engine.chat("one", "s1", &SessionContext::default()).await;
        engine.clear_session("s1");
        engine.clear_session("s1");
        assert!(engine.history.turns("s1").is_empty());

        engine.chat("two", "s1", &SessionContext::default()).await;
        let turns = engine.history.turns("s1");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "two");
    }
}
