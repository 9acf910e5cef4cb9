//! # greetbot-telegram
//!
//! Telegram transport layer: teloxide type adapters, the core `Bot`
//! implementation, the long-polling runner, and the webhook HTTP server.
//! Only Telegram plumbing lives here; handlers and chain wiring come from
//! the caller.

mod adapters;
mod allowed;
mod bot_adapter;
mod runner;
mod server;

pub use adapters::{TelegramMessageWrapper, TelegramUpdateWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use runner::run_polling;
pub use server::{local_url, run_webhook};

use greetbot_core::AppConfig;
use tracing::error;

/// Builds the teloxide bot from config, honoring the optional API base URL
/// override (used to point at a mock Bot API server).
pub(crate) fn build_bot(config: &AppConfig) -> teloxide::Bot {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match config.telegram_api_url.as_deref() {
        Some(raw) => match reqwest::Url::parse(raw) {
            Ok(url) => bot.set_api_url(url),
            Err(err) => {
                error!(error = %err, url = %raw, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        },
        None => bot,
    }
}
