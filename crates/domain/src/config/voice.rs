use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Voice (TTS / STT)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Settings for the speech wrappers. The kiosk speaks every concierge
/// reply aloud and transcribes microphone input; both go through the
/// OpenAI audio endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "d_voice_base_url")]
    pub base_url: String,
    /// Env var containing the API key. When unresolved, the voice routes
    /// answer 503 and the kiosk falls back to on-screen text.
    #[serde(default = "d_voice_key_env")]
    pub api_key_env: String,
    #[serde(default = "d_tts_model")]
    pub tts_model: String,
    #[serde(default = "d_stt_model")]
    pub stt_model: String,
    /// Default synthesis voice.
    #[serde(default = "d_voice_name")]
    pub voice: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            base_url: d_voice_base_url(),
            api_key_env: d_voice_key_env(),
            tts_model: d_tts_model(),
            stt_model: d_stt_model(),
            voice: d_voice_name(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_voice_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn d_voice_key_env() -> String {
    "OPENAI_API_KEY".into()
}
fn d_tts_model() -> String {
    "tts-1".into()
}
fn d_stt_model() -> String {
    "whisper-1".into()
}
fn d_voice_name() -> String {
    "nova".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_defaults() {
        let cfg = VoiceConfig::default();
        assert_eq!(cfg.voice, "nova");
        assert_eq!(cfg.tts_model, "tts-1");
        assert_eq!(cfg.stt_model, "whisper-1");
    }

    #[test]
    fn voice_overrides_parse() {
        let cfg: VoiceConfig = toml::from_str("voice = \"alloy\"\n").unwrap();
        assert_eq!(cfg.voice, "alloy");
        assert_eq!(cfg.api_key_env, "OPENAI_API_KEY");
    }
}
