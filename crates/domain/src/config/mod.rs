mod llm;
mod server;
mod voice;

pub use llm::*;
pub use server::*;
pub use voice::*;

use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub hotel: HotelConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Hotel
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelConfig {
    /// Display name the concierge persona introduces itself with.
    #[serde(default = "d_hotel_name")]
    pub name: String,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self { name: d_hotel_name() }
    }
}

fn d_hotel_name() -> String {
    "The Grand Azure Hotel".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_all_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.hotel.name, "The Grand Azure Hotel");
        assert_eq!(cfg.server.port, 3001);
        assert!(cfg.llm.providers.is_empty());
    }

    #[test]
    fn hotel_name_overridable() {
        let cfg: Config = toml::from_str("[hotel]\nname = \"Hotel Meridian\"\n").unwrap();
        assert_eq!(cfg.hotel.name, "Hotel Meridian");
    }
}
