//! Provider registry.
//!
//! Constructs all configured adapters once at startup. Auth keys are
//! resolved eagerly; a provider that cannot initialize is logged and
//! skipped, so unavailability is a checked state rather than an exception
//! thrown during a guest's turn.

use std::collections::HashMap;
use std::sync::Arc;

use ck_domain::config::{LlmConfig, ProviderKind};

use crate::gemini::GeminiProvider;
use crate::openai::OpenAiProvider;
use crate::traits::ChatProvider;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ProviderRegistry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Holds the instantiated providers and the explicit primary → fallback
/// ordering the orchestration loop follows.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ChatProvider>>,
    primary_id: String,
    fallback_id: Option<String>,
}

impl ProviderRegistry {
    /// Build the registry from the application's [`LlmConfig`].
    pub fn from_config(config: &LlmConfig) -> Self {
        let mut providers: HashMap<String, Arc<dyn ChatProvider>> = HashMap::new();

        for pc in &config.providers {
            let result = match pc.kind {
                ProviderKind::OpenaiCompat => {
                    OpenAiProvider::from_config(pc).map(|p| Arc::new(p) as Arc<dyn ChatProvider>)
                }
                ProviderKind::Gemini => {
                    GeminiProvider::from_config(pc).map(|p| Arc::new(p) as Arc<dyn ChatProvider>)
                }
            };

            match result {
                Ok(provider) => {
                    tracing::info!(
                        provider_id = %pc.id,
                        kind = ?pc.kind,
                        "registered LLM provider"
                    );
                    providers.insert(pc.id.clone(), provider);
                }
                Err(e) => {
                    tracing::warn!(
                        provider_id = %pc.id,
                        kind = ?pc.kind,
                        error = %e,
                        "failed to initialize LLM provider, skipping"
                    );
                }
            }
        }

        if providers.is_empty() {
            tracing::warn!(
                "no LLM providers initialized; the concierge will answer \
                 with canned replies until credentials are configured"
            );
        }

        Self {
            providers,
            primary_id: config.primary.clone(),
            fallback_id: config.fallback.clone(),
        }
    }

    /// Test/bench constructor for hand-built providers.
    pub fn with_providers(
        providers: Vec<Arc<dyn ChatProvider>>,
        primary_id: impl Into<String>,
        fallback_id: Option<String>,
    ) -> Self {
        let providers = providers
            .into_iter()
            .map(|p| (p.provider_id().to_owned(), p))
            .collect();
        Self {
            providers,
            primary_id: primary_id.into(),
            fallback_id,
        }
    }

    /// The provider driving the tool-calling loop, if available.
    pub fn primary(&self) -> Option<Arc<dyn ChatProvider>> {
        self.providers.get(&self.primary_id).cloned()
    }

    /// The degraded plain-completion fallback, if configured and distinct
    /// from the primary.
    pub fn fallback(&self) -> Option<Arc<dyn ChatProvider>> {
        let id = self.fallback_id.as_ref()?;
        if *id == self.primary_id {
            return None;
        }
        self.providers.get(id).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// All registered provider IDs (sorted, for the health endpoint).
    pub fn list_providers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }
}
