use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Reply failed: {0}")]
    Reply(String),

    #[error("Serialization failed: {0}")]
    Serialize(String),
}

pub type Result<T> = std::result::Result<T, BotError>;
