//! Long-polling startup path.

use anyhow::{Context, Result};
use greetbot_core::{spawn_signal_listener, AppConfig, Bot, ShutdownLatch, ToCoreUpdate};
use std::sync::Arc;
use teloxide::dptree;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;
use tracing::{error, info, instrument};
use update_chain::UpdateChain;

use crate::adapters::TelegramUpdateWrapper;
use crate::allowed::parse_allowed_updates;
use crate::bot_adapter::TelegramBotAdapter;
use crate::build_bot;

/// Runs the bot in long-polling mode. The shutdown latch is registered
/// before dispatch starts; its cleanup stops the dispatcher, which unblocks
/// this function. Blocks until the polling loop terminates.
#[instrument(skip(config, make_chain))]
pub async fn run_polling<F>(config: &AppConfig, make_chain: F) -> Result<()>
where
    F: FnOnce(Arc<dyn Bot>) -> UpdateChain,
{
    let allowed = parse_allowed_updates(&config.allowed_updates)?;
    let bot = build_bot(config);

    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let chain = Arc::new(make_chain(adapter));

    let me = bot.get_me().await.context("Failed to fetch bot identity")?;
    info!(
        username = %me.user.username.as_deref().unwrap_or_default(),
        "Bot running in polling mode"
    );

    let handler = dptree::entry().endpoint(
        |update: teloxide::types::Update, chain: Arc<UpdateChain>| async move {
            let core_update = TelegramUpdateWrapper(&update).to_core();
            if let Err(err) = chain.dispatch(&core_update).await {
                error!(
                    error = %err,
                    update_id = core_update.update_id,
                    "Handler chain failed"
                );
            }
            Ok::<(), teloxide::RequestError>(())
        },
    );

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![chain])
        .build();

    let shutdown_token = dispatcher.shutdown_token();
    let latch = ShutdownLatch::new(async move {
        if let Ok(stopped) = shutdown_token.shutdown() {
            stopped.await;
        }
    });
    spawn_signal_listener(latch);

    let listener = Polling::builder(bot).allowed_updates(allowed).build();
    dispatcher
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("Polling listener error"),
        )
        .await;

    info!("Polling stopped");
    Ok(())
}
