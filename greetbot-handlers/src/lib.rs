//! # greetbot-handlers
//!
//! Concrete handlers for the scaffold: the `/start` command and the terminal
//! fallback, plus the default chain wiring.

mod fallback;
mod start;

#[cfg(test)]
mod test;

pub use fallback::FallbackHandler;
pub use start::StartHandler;

use greetbot_core::Bot;
use std::sync::Arc;
use update_chain::{traced, UpdateChain};

/// Builds the default chain: `/start` first, then the logging fallback that
/// claims (and dumps) everything nothing else handled.
pub fn build_chain(bot: Arc<dyn Bot>) -> UpdateChain {
    UpdateChain::new()
        .add_handler(traced("command-start", Arc::new(StartHandler::new(bot))))
        .add_handler(traced("unhandled-update", Arc::new(FallbackHandler)))
}
