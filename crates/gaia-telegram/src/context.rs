//! Telegram context interface — re-exported from the shared pipeline.
//!
//! `TelegramAppContext` is an alias for `gaia_agent::pipeline::MessageContext`,
//! defined once in `gaia-agent` so future channel adapters share it.

pub use gaia_agent::pipeline::MessageContext as TelegramAppContext;
