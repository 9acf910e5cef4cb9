//! Mapping from configured update-type names to teloxide's filter type.

use teloxide::types::AllowedUpdate;

/// Maps `ALLOWED_UPDATES` entries to [`AllowedUpdate`]. Unknown names are a
/// config error: better to fail at startup than silently drop a filter.
pub(crate) fn parse_allowed_updates(names: &[String]) -> anyhow::Result<Vec<AllowedUpdate>> {
    names
        .iter()
        .map(|name| match name.as_str() {
            "message" => Ok(AllowedUpdate::Message),
            "edited_message" => Ok(AllowedUpdate::EditedMessage),
            "channel_post" => Ok(AllowedUpdate::ChannelPost),
            "edited_channel_post" => Ok(AllowedUpdate::EditedChannelPost),
            "callback_query" => Ok(AllowedUpdate::CallbackQuery),
            "inline_query" => Ok(AllowedUpdate::InlineQuery),
            "my_chat_member" => Ok(AllowedUpdate::MyChatMember),
            "chat_member" => Ok(AllowedUpdate::ChatMember),
            other => anyhow::bail!("Unknown ALLOWED_UPDATES entry: `{other}`"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_updates_known_names() {
        let names = vec!["message".to_string(), "callback_query".to_string()];
        let allowed = parse_allowed_updates(&names).unwrap();
        assert_eq!(
            allowed,
            vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery]
        );
    }

    #[test]
    fn test_parse_allowed_updates_unknown_name_fails() {
        let names = vec!["message".to_string(), "telepathy".to_string()];
        assert!(parse_allowed_updates(&names).is_err());
    }
}
