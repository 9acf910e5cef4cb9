//! Ordered update handler chain with a tracing wrapper.
//!
//! Handlers run in registration order; the first [`HandlerOutcome::Handled`]
//! ends the walk, `Pass` hands the update to the next handler. [`traced`]
//! wraps a handler so every dispatch is logged under a stable handler id
//! before delegating; it never short-circuits.

use async_trait::async_trait;
use greetbot_core::{Handler, HandlerOutcome, Result, Update};
use std::sync::Arc;
use tracing::{debug, info};

/// Handler ids with this prefix get the full update payload in their log
/// events, for diagnosing updates nothing else claimed.
const UNHANDLED_PREFIX: &str = "unhandled";

/// Ordered list of handlers an update walks through.
#[derive(Clone, Default)]
pub struct UpdateChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl UpdateChain {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Dispatches one update. Returns `Handled` as soon as a handler claims
    /// it, `Pass` when every handler passed. Handler errors propagate
    /// immediately and stop the walk.
    pub async fn dispatch(&self, update: &Update) -> Result<HandlerOutcome> {
        for handler in &self.handlers {
            match handler.handle(update).await? {
                HandlerOutcome::Handled => {
                    debug!(update_id = update.update_id, "Update handled");
                    return Ok(HandlerOutcome::Handled);
                }
                HandlerOutcome::Pass => continue,
            }
        }
        Ok(HandlerOutcome::Pass)
    }
}

struct Traced {
    id: String,
    inner: Arc<dyn Handler>,
}

/// Wraps a handler so each dispatch logs the handler id before delegating.
/// Ids starting with `unhandled` additionally log the update serialized to
/// JSON with the `update_id` sequence counter stripped.
pub fn traced(id: impl Into<String>, inner: Arc<dyn Handler>) -> Arc<dyn Handler> {
    Arc::new(Traced {
        id: id.into(),
        inner,
    })
}

#[async_trait]
impl Handler for Traced {
    async fn handle(&self, update: &Update) -> Result<HandlerOutcome> {
        if self.id.starts_with(UNHANDLED_PREFIX) {
            info!(
                handler = %self.id,
                update = %diagnostic_payload(update),
                "Handling update"
            );
        } else {
            info!(handler = %self.id, "Handling update");
        }
        self.inner.handle(update).await
    }
}

/// Serializes an update for diagnostics, stripping `update_id`.
pub fn diagnostic_payload(update: &Update) -> String {
    let mut value = match serde_json::to_value(update) {
        Ok(value) => value,
        Err(_) => return String::new(),
    };
    if let Some(map) = value.as_object_mut() {
        map.remove("update_id");
    }
    value.to_string()
}
