//! Google Gemini adapter.
//!
//! Implements the `generateContent` API as a plain-completion fallback:
//! `supports_tools()` is false, so the orchestration loop only reaches for
//! this adapter on the degraded single-shot path (reply, no actions).

use serde_json::Value;

use ck_domain::config::ProviderConfig;
use ck_domain::error::{Error, Result};
use ck_domain::tool::Role;

use crate::traits::{ChatProvider, ChatRequest, ChatResponse};
use crate::util::from_reqwest;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub struct GeminiProvider {
    id: String,
    base_url: String,
    api_key: String,
    default_model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn from_config(cfg: &ProviderConfig) -> Result<Self> {
        let api_key = cfg.auth.resolve().ok_or_else(|| {
            Error::Config(format!("provider '{}': no API key available", cfg.id))
        })?;

        let base_url = cfg
            .base_url
            .clone()
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com".into());
        let default_model = cfg
            .default_model
            .clone()
            .unwrap_or_else(|| "gemini-1.5-flash".into());

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            id: cfg.id.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            default_model,
            client,
        })
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }

    fn build_body(&self, req: &ChatRequest) -> Value {
        let mut contents: Vec<Value> = Vec::new();
        let mut system_instruction: Option<Value> = None;

        for msg in &req.messages {
            match msg.role {
                Role::System => {
                    system_instruction = Some(serde_json::json!({
                        "parts": [{"text": msg.content.extract_all_text()}]
                    }));
                }
                // Gemini's two-party history: tool scaffolding never
                // reaches this adapter, so text mapping is enough.
                Role::User | Role::Tool => {
                    contents.push(gemini_content("user", &msg.content.extract_all_text()));
                }
                Role::Assistant => {
                    contents.push(gemini_content("model", &msg.content.extract_all_text()));
                }
            }
        }

        let mut body = serde_json::json!({ "contents": contents });
        if let Some(si) = system_instruction {
            body["systemInstruction"] = si;
        }

        let mut generation_config = serde_json::Map::new();
        if let Some(temp) = req.temperature {
            generation_config.insert("temperature".into(), serde_json::json!(temp));
        }
        if let Some(max) = req.max_tokens {
            generation_config.insert("maxOutputTokens".into(), serde_json::json!(max));
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        body
    }
}

fn gemini_content(role: &str, text: &str) -> Value {
    serde_json::json!({
        "role": role,
        "parts": [{"text": text}],
    })
}

fn parse_generate_response(provider_id: &str, body: &Value) -> Result<ChatResponse> {
    let candidate = body
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| Error::Provider {
            provider: provider_id.to_owned(),
            message: "no candidates in response".into(),
        })?;

    let text: String = candidate
        .pointer("/content/parts")
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let finish_reason = candidate
        .get("finishReason")
        .and_then(|v| v.as_str())
        .map(String::from);

    let model = body
        .get("modelVersion")
        .and_then(|v| v.as_str())
        .unwrap_or("gemini")
        .to_string();

    Ok(ChatResponse {
        content: text,
        tool_calls: Vec::new(),
        model,
        finish_reason,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl ChatProvider for GeminiProvider {
    async fn chat(&self, req: &ChatRequest) -> Result<ChatResponse> {
        let model = req
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());
        let url = self.generate_url(&model);
        let body = self.build_body(req);

        tracing::debug!(provider = %self.id, model = %model, "gemini chat request");

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        parse_generate_response(&self.id, &resp_json)
    }

    fn supports_tools(&self) -> bool {
        false
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use ck_domain::config::{AuthConfig, ProviderKind};
    use ck_domain::tool::Message;

    fn provider() -> GeminiProvider {
        GeminiProvider::from_config(&ProviderConfig {
            id: "gemini".into(),
            kind: ProviderKind::Gemini,
            base_url: None,
            auth: AuthConfig { env: None, key: Some("test-key".into()) },
            default_model: None,
        })
        .unwrap()
    }

    #[test]
    fn system_prompt_becomes_system_instruction() {
        let p = provider();
        let req = ChatRequest {
            messages: vec![
                Message::system("You are Azure."),
                Message::user("hello"),
                Message::assistant("Welcome!"),
            ],
            ..Default::default()
        };
        let body = p.build_body(&req);
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "You are Azure."
        );
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
    }

    #[test]
    fn parse_concatenates_candidate_parts() {
        let body = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{"text": "Good "}, {"text": "evening."}] },
                "finishReason": "STOP"
            }]
        });
        let resp = parse_generate_response("gemini", &body).unwrap();
        assert_eq!(resp.content, "Good evening.");
        assert!(resp.tool_calls.is_empty());
    }

    #[test]
    fn empty_candidates_is_a_provider_error() {
        let body = serde_json::json!({ "candidates": [] });
        assert!(parse_generate_response("gemini", &body).is_err());
    }
}
