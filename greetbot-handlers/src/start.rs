//! `/start` command handler.

use async_trait::async_trait;
use greetbot_core::{greeting, Bot, ChatKind, Handler, HandlerOutcome, Result, Update};
use std::sync::Arc;
use tracing::info;

/// Replies to `/start` in private chats with a localized greeting addressed
/// to the sender's username (empty when absent). Any other chat kind, text,
/// or update kind passes through.
pub struct StartHandler {
    bot: Arc<dyn Bot>,
}

impl StartHandler {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}

/// Matches `/start`, `/start@SomeBot`, and `/start` followed by arguments.
fn is_start_command(text: &str) -> bool {
    match text.strip_prefix("/start") {
        Some(rest) => {
            rest.is_empty() || rest.starts_with('@') || rest.starts_with(char::is_whitespace)
        }
        None => false,
    }
}

#[async_trait]
impl Handler for StartHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerOutcome> {
        let Some(message) = update.message() else {
            return Ok(HandlerOutcome::Pass);
        };
        if message.chat.kind != ChatKind::Private {
            return Ok(HandlerOutcome::Pass);
        }
        let Some(text) = message.text.as_deref() else {
            return Ok(HandlerOutcome::Pass);
        };
        if !is_start_command(text) {
            return Ok(HandlerOutcome::Pass);
        }

        let name = message.user.username.as_deref().unwrap_or("");
        let reply = greeting(message.user.language_code.as_deref(), name);

        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            "Replying to /start"
        );
        self.bot.reply_to(message, &reply).await?;

        Ok(HandlerOutcome::Handled)
    }
}
