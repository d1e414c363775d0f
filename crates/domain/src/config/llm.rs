use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LLM provider system
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider id driving the tool-calling loop.
    #[serde(default = "d_openai")]
    pub primary: String,
    /// Provider id for the degraded plain-completion fallback.
    /// May be unset — the canned-reply layer still guarantees an answer.
    #[serde(default)]
    pub fallback: Option<String>,
    /// Sampling temperature for concierge turns.
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    /// Response cap — concierge replies are spoken via TTS, so short.
    #[serde(default = "d_max_tokens")]
    pub max_tokens: u32,
    /// Registered providers (adding a provider = adding config).
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            primary: d_openai(),
            fallback: None,
            temperature: d_temperature(),
            max_tokens: d_max_tokens(),
            providers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub id: String,
    pub kind: ProviderKind,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// OpenAI chat-completions contract (tool calling supported).
    OpenaiCompat,
    /// Google Gemini generateContent (plain completion fallback only).
    Gemini,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Env var containing the API key (read once at startup).
    #[serde(default)]
    pub env: Option<String>,
    /// Direct key (config-only setups; prefer env).
    #[serde(default)]
    pub key: Option<String>,
}

impl AuthConfig {
    /// Resolve the key: direct value first, then the env var.
    /// `None` means the provider is unavailable and must be skipped at
    /// registry construction, not errored during a turn.
    pub fn resolve(&self) -> Option<String> {
        if let Some(key) = &self.key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        let var = self.env.as_deref()?;
        std::env::var(var).ok().filter(|v| !v.is_empty())
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_openai() -> String {
    "openai".into()
}
fn d_temperature() -> f32 {
    0.7
}
fn d_max_tokens() -> u32 {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_config_defaults() {
        let cfg = LlmConfig::default();
        assert_eq!(cfg.primary, "openai");
        assert!(cfg.fallback.is_none());
        assert_eq!(cfg.max_tokens, 200);
    }

    #[test]
    fn provider_config_parses() {
        let toml_str = r#"
            primary = "openai"
            fallback = "gemini"

            [[providers]]
            id = "openai"
            kind = "openai_compat"
            default_model = "gpt-4o"

            [providers.auth]
            env = "OPENAI_API_KEY"

            [[providers]]
            id = "gemini"
            kind = "gemini"

            [providers.auth]
            env = "GEMINI_API_KEY"
        "#;
        let cfg: LlmConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.providers.len(), 2);
        assert_eq!(cfg.providers[0].kind, ProviderKind::OpenaiCompat);
        assert_eq!(cfg.providers[1].kind, ProviderKind::Gemini);
        assert_eq!(cfg.fallback.as_deref(), Some("gemini"));
    }

    #[test]
    fn auth_direct_key_wins_over_env() {
        let auth = AuthConfig {
            env: Some("CK_UNSET_TEST_VAR".into()),
            key: Some("sk-direct".into()),
        };
        assert_eq!(auth.resolve().as_deref(), Some("sk-direct"));
    }

    #[test]
    fn auth_missing_everything_resolves_none() {
        let auth = AuthConfig::default();
        assert!(auth.resolve().is_none());
    }
}
