//! Core types: user, chat, message, update, handler outcome, and the Handler trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User identity (id, username, name, locale).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    /// IETF language tag reported by the client, drives greeting localization.
    pub language_code: Option<String>,
}

/// Conversation type as reported by Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

/// Chat identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
}

/// A single inbound message with its chat, sender, and optional text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub chat: Chat,
    pub user: User,
    pub text: Option<String>,
}

/// One inbound event from Telegram. `update_id` is the platform's sequence
/// counter; update kinds this scaffold does not model arrive with
/// `message: None` and fall through to the unhandled tail of the chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

impl Update {
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

/// Handler result for the chain. `Handled` stops the walk; `Pass` hands the
/// update to the next handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    Handled,
    Pass,
}

/// A single update handler. Implementations must be cheap to call for
/// updates they do not own and return `Pass` for them.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, update: &Update) -> crate::error::Result<HandlerOutcome>;
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Converts a transport-specific update type to core [`Update`].
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Update;
}
