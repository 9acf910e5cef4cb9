//! Configuration, loaded once from the environment at startup and treated as
//! immutable for the process lifetime.

use anyhow::Result;
use std::env;
use std::str::FromStr;

/// How the bot receives updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The bot pulls updates over outbound long-poll requests.
    Polling,
    /// Telegram pushes updates to an HTTP endpoint this process exposes.
    Webhook,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "polling" => Ok(Mode::Polling),
            "webhook" => Ok(Mode::Webhook),
            other => anyhow::bail!("BOT_MODE must be `polling` or `webhook`, got `{other}`"),
        }
    }
}

/// Process configuration from environment variables.
pub struct AppConfig {
    pub bot_token: String,
    pub mode: Mode,
    /// Update-type names passed to Telegram as the allowed-update filter.
    pub allowed_updates: Vec<String>,
    pub server_host: String,
    pub server_port: u16,
    /// Public URL Telegram pushes updates to; required in webhook mode.
    pub webhook_url: Option<String>,
    /// Secret echoed back by Telegram in a request header; required in webhook mode.
    pub webhook_secret: Option<String>,
    /// Optional Bot API base URL override (used to point at a mock server).
    /// Environment: `TELEGRAM_API_URL` or `TELOXIDE_API_URL`.
    pub telegram_api_url: Option<String>,
}

impl AppConfig {
    /// Loads configuration from the environment. If `token` is given it
    /// overrides `BOT_TOKEN`. Webhook-only keys stay optional here and are
    /// validated by the webhook startup path.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let mode = env::var("BOT_MODE")
            .unwrap_or_else(|_| "polling".to_string())
            .parse()?;
        let allowed_updates: Vec<String> = env::var("ALLOWED_UPDATES")
            .unwrap_or_else(|_| "message".to_string())
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        // An empty filter means "almost everything" to Telegram, the
        // opposite of what an operator clearing the list intends.
        if allowed_updates.is_empty() {
            anyhow::bail!("ALLOWED_UPDATES must name at least one update type");
        }
        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a port number"))?;
        let webhook_url = env::var("WEBHOOK_URL").ok();
        let webhook_secret = env::var("WEBHOOK_SECRET").ok();
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        Ok(Self {
            bot_token,
            mode,
            allowed_updates,
            server_host,
            server_port,
            webhook_url,
            webhook_secret,
            telegram_api_url,
        })
    }
}
