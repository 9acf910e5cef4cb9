//! # greetbot-core
//!
//! Core types and traits for the bot scaffold: [`Bot`], [`Handler`], update and
//! message types, configuration, greeting localization, the shutdown latch, and
//! tracing initialization. Transport-agnostic; used by update-chain,
//! greetbot-handlers and greetbot-telegram.

pub mod bot;
pub mod config;
pub mod error;
pub mod greeting;
pub mod logger;
pub mod shutdown;
pub mod types;

pub use bot::Bot;
pub use config::{AppConfig, Mode};
pub use error::{BotError, HandlerError, Result};
pub use greeting::greeting;
pub use logger::init_tracing;
pub use shutdown::{spawn_signal_listener, ShutdownLatch};
pub use types::{
    Chat, ChatKind, Handler, HandlerOutcome, Message, ToCoreMessage, ToCoreUpdate, ToCoreUser,
    Update, User,
};
