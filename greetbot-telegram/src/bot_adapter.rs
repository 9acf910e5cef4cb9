//! teloxide-backed implementation of the core [`Bot`] send seam.

use async_trait::async_trait;
use greetbot_core::{Bot, BotError, Result};
use teloxide::prelude::*;

pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Bot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| BotError::Telegram(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_bot_adapter_new() {
        let _adapter = TelegramBotAdapter::new(teloxide::Bot::new("dummy_token"));
    }
}
