//! Adapters from teloxide types to greetbot-core types.
//! Depends only on teloxide and the core type definitions.

use greetbot_core::{Chat, ChatKind, Message, ToCoreMessage, ToCoreUpdate, ToCoreUser, Update, User};
use teloxide::types::UpdateKind;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            language_code: self.0.language_code.clone(),
        }
    }
}

fn chat_kind(chat: &teloxide::types::Chat) -> ChatKind {
    if chat.is_private() {
        ChatKind::Private
    } else if chat.is_group() {
        ChatKind::Group
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else {
        ChatKind::Channel
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.0 as i64,
            chat: Chat {
                id: self.0.chat.id.0,
                kind: chat_kind(&self.0.chat),
            },
            user: self
                .0
                .from
                .as_ref()
                .map(|user| TelegramUserWrapper(user).to_core())
                .unwrap_or_else(|| User {
                    id: 0,
                    username: None,
                    first_name: None,
                    language_code: None,
                }),
            text: self.0.text().map(str::to_string),
        }
    }
}

/// Wraps a teloxide Update for conversion to core [`Update`]. Update kinds
/// this scaffold does not model convert with `message: None`.
pub struct TelegramUpdateWrapper<'a>(pub &'a teloxide::types::Update);

impl<'a> ToCoreUpdate for TelegramUpdateWrapper<'a> {
    fn to_core(&self) -> Update {
        Update {
            update_id: self.0.id.0 as i64,
            message: match &self.0.kind {
                UpdateKind::Message(message) => Some(TelegramMessageWrapper(message).to_core()),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_user_wrapper_to_core() {
        let user = teloxide::types::User {
            id: teloxide::types::UserId(123),
            is_bot: false,
            first_name: "Alice".to_string(),
            last_name: None,
            username: Some("alice".to_string()),
            language_code: Some("en".to_string()),
            is_premium: false,
            added_to_attachment_menu: false,
        };

        let core_user = TelegramUserWrapper(&user).to_core();

        assert_eq!(core_user.id, 123);
        assert_eq!(core_user.username, Some("alice".to_string()));
        assert_eq!(core_user.first_name, Some("Alice".to_string()));
        assert_eq!(core_user.language_code, Some("en".to_string()));
    }

    fn raw_private_start_update() -> &'static str {
        r#"{
            "update_id": 1000,
            "message": {
                "message_id": 10,
                "date": 1700000000,
                "chat": {"id": 456, "type": "private", "first_name": "Alice", "username": "alice"},
                "from": {"id": 123, "is_bot": false, "first_name": "Alice", "username": "alice", "language_code": "en"},
                "text": "/start"
            }
        }"#
    }

    #[test]
    fn test_telegram_update_wrapper_message_update() {
        let update: teloxide::types::Update =
            serde_json::from_str(raw_private_start_update()).unwrap();

        let core_update = TelegramUpdateWrapper(&update).to_core();

        assert_eq!(core_update.update_id, 1000);
        let message = core_update.message().unwrap();
        assert_eq!(message.id, 10);
        assert_eq!(message.chat.id, 456);
        assert_eq!(message.chat.kind, ChatKind::Private);
        assert_eq!(message.user.username.as_deref(), Some("alice"));
        assert_eq!(message.text.as_deref(), Some("/start"));
    }

    #[test]
    fn test_telegram_update_wrapper_group_chat_kind() {
        let raw = r#"{
            "update_id": 1001,
            "message": {
                "message_id": 11,
                "date": 1700000000,
                "chat": {"id": -100200, "type": "group", "title": "A Group"},
                "from": {"id": 123, "is_bot": false, "first_name": "Alice"},
                "text": "hello"
            }
        }"#;
        let update: teloxide::types::Update = serde_json::from_str(raw).unwrap();

        let core_update = TelegramUpdateWrapper(&update).to_core();

        assert_eq!(
            core_update.message().unwrap().chat.kind,
            ChatKind::Group
        );
    }

    #[test]
    fn test_telegram_update_wrapper_non_message_kind() {
        let raw = r#"{
            "update_id": 1002,
            "edited_message": {
                "message_id": 12,
                "date": 1700000000,
                "edit_date": 1700000100,
                "chat": {"id": 456, "type": "private", "first_name": "Alice"},
                "from": {"id": 123, "is_bot": false, "first_name": "Alice"},
                "text": "edited"
            }
        }"#;
        let update: teloxide::types::Update = serde_json::from_str(raw).unwrap();

        let core_update = TelegramUpdateWrapper(&update).to_core();

        assert_eq!(core_update.update_id, 1002);
        assert!(core_update.message().is_none());
    }
}
