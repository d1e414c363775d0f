//! HTTP transport for the concierge kiosk: the axum API, the voice
//! wrappers, and the CLI entry points.

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod state;
pub mod voice;
