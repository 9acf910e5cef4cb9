//! Outbound send seam.
//!
//! [`Bot`] is transport-agnostic; the teloxide-backed implementation lives in
//! greetbot-telegram. Handlers depend on this trait only, so they can be
//! tested against a recording fake.

use crate::error::Result;
use crate::types::Message;
use async_trait::async_trait;

/// Abstraction for sending messages back to a chat.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message to the chat with the given id.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Replies in the chat the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(message.chat.id, text).await
    }
}
