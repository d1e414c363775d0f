//! Voice wrappers — thin request/response calls to the OpenAI audio
//! endpoints. The kiosk speaks replies aloud (TTS) and transcribes
//! microphone input (STT); both are simple vendor calls, no streaming.

use ck_domain::config::VoiceConfig;
use ck_domain::error::{Error, Result};

pub struct VoiceClient {
    base_url: String,
    api_key: String,
    tts_model: String,
    stt_model: String,
    default_voice: String,
    client: reqwest::Client,
}

impl VoiceClient {
    /// Build the client if the configured API key resolves; `None` makes
    /// the voice routes answer 503 instead of failing mid-request.
    pub fn from_config(cfg: &VoiceConfig) -> Option<Self> {
        let api_key = std::env::var(&cfg.api_key_env).ok().filter(|k| !k.is_empty())?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .ok()?;
        Some(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
            tts_model: cfg.tts_model.clone(),
            stt_model: cfg.stt_model.clone(),
            default_voice: cfg.voice.clone(),
            client,
        })
    }

    /// Synthesize speech. Returns MP3 bytes.
    pub async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<Vec<u8>> {
        let url = format!("{}/audio/speech", self.base_url);
        let body = serde_json::json!({
            "model": self.tts_model,
            "voice": voice.unwrap_or(&self.default_voice),
            "input": text,
        });

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Voice(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let err_text = resp.text().await.unwrap_or_default();
            return Err(Error::Voice(format!("TTS HTTP {} - {}", status.as_u16(), err_text)));
        }

        let bytes = resp.bytes().await.map_err(|e| Error::Voice(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    /// Transcribe an uploaded audio clip to text.
    pub async fn transcribe(&self, audio: Vec<u8>, filename: &str) -> Result<String> {
        let url = format!("{}/audio/transcriptions", self.base_url);

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename.to_owned())
            .mime_str("application/octet-stream")
            .map_err(|e| Error::Voice(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.stt_model.clone())
            .part("file", part);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Voice(e.to_string()))?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(|e| Error::Voice(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Voice(format!("STT HTTP {} - {}", status.as_u16(), resp_text)));
        }

        let v: serde_json::Value = serde_json::from_str(&resp_text)?;
        Ok(v.get("text").and_then(|t| t.as_str()).unwrap_or("").to_string())
    }
}
