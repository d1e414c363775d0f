//! LLM provider adapters for the concierge.
//!
//! Two capability tiers: the OpenAI-compatible adapter drives the full
//! tool-calling loop; the Gemini adapter is a plain-completion fallback
//! used only when the primary is down.

pub mod gemini;
pub mod openai;
pub mod registry;
pub mod traits;
pub(crate) mod util;

pub use registry::ProviderRegistry;
pub use traits::{ChatProvider, ChatRequest, ChatResponse};
