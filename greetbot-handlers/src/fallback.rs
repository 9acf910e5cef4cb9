//! Terminal chain entry.

use async_trait::async_trait;
use greetbot_core::{Handler, HandlerOutcome, Result, Update};

/// Claims every update so nothing falls off the end of the chain. The
/// `traced("unhandled-update", …)` wrapper around it does the actual
/// diagnostic logging.
pub struct FallbackHandler;

#[async_trait]
impl Handler for FallbackHandler {
    async fn handle(&self, _update: &Update) -> Result<HandlerOutcome> {
        Ok(HandlerOutcome::Handled)
    }
}
