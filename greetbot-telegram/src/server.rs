//! Webhook startup path: axum server receiving pushed updates.

use std::future::IntoFuture;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use greetbot_core::{spawn_signal_listener, AppConfig, Bot, ShutdownLatch, ToCoreUpdate};
use teloxide::payloads::SetWebhookSetters;
use teloxide::prelude::*;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{error, info, instrument, warn};
use update_chain::UpdateChain;
use url::Url;

use crate::adapters::TelegramUpdateWrapper;
use crate::allowed::parse_allowed_updates;
use crate::bot_adapter::TelegramBotAdapter;
use crate::build_bot;

/// Telegram sends this header with every webhook request; its value must
/// match the secret supplied to `setWebhook`.
const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

pub(crate) struct WebhookState {
    chain: Arc<UpdateChain>,
    secret: String,
}

/// Runs the bot in webhook mode: initialize the bot, bind the listener,
/// register the webhook with Telegram, then block until the shutdown latch
/// closes the server. Any failure aborts; no step runs after a failed one.
#[instrument(skip(config, make_chain))]
pub async fn run_webhook<F>(config: &AppConfig, make_chain: F) -> Result<()>
where
    F: FnOnce(Arc<dyn Bot>) -> UpdateChain,
{
    let webhook_url = config
        .webhook_url
        .as_deref()
        .context("WEBHOOK_URL must be set in webhook mode")?;
    let webhook_url = Url::parse(webhook_url).context("WEBHOOK_URL is not a valid URL")?;
    let secret = config
        .webhook_secret
        .clone()
        .context("WEBHOOK_SECRET must be set in webhook mode")?;
    let allowed = parse_allowed_updates(&config.allowed_updates)?;

    let bot = build_bot(config);
    let adapter: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let chain = Arc::new(make_chain(adapter));

    let me = bot.get_me().await.context("Failed to fetch bot identity")?;
    info!(
        username = %me.user.username.as_deref().unwrap_or_default(),
        "Bot initialized"
    );

    // The cleanup only signals the close channel, so it stays a no-op if
    // the listener never came up. Registered before bind so a signal during
    // startup still runs it.
    let (close_tx, mut close_rx) = watch::channel(false);
    let latch = ShutdownLatch::new(async move {
        let _ = close_tx.send(true);
    });
    spawn_signal_listener(latch);

    let listener = bind_listener(&config.server_host, config.server_port).await?;
    let local_addr = listener.local_addr()?;
    info!(url = %local_url(&local_addr), "Server started");

    let state = Arc::new(WebhookState {
        chain,
        secret: secret.clone(),
    });
    let app = webhook_router(webhook_url.path(), state);

    let server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = close_rx.changed().await;
            })
            .into_future(),
    );

    bot.set_webhook(webhook_url.clone())
        .secret_token(secret)
        .allowed_updates(allowed)
        .await
        .context("Failed to register webhook with Telegram")?;
    info!(url = %webhook_url, "Webhook set");

    server
        .await
        .context("Server task panicked")?
        .context("Server error")?;
    info!("Server stopped");
    Ok(())
}

/// Binds the update listener. Hostname values of `SERVER_HOST` (e.g.
/// `localhost`) go through the OS resolver, not just IP literals.
pub(crate) async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))
}

/// Renders a bound address as an http URL; IPv6 hosts are bracketed.
pub fn local_url(addr: &SocketAddr) -> String {
    match addr.ip() {
        IpAddr::V4(ip) => format!("http://{}:{}", ip, addr.port()),
        IpAddr::V6(ip) => format!("http://[{}]:{}", ip, addr.port()),
    }
}

pub(crate) fn webhook_router(path: &str, state: Arc<WebhookState>) -> Router {
    let path = if path.is_empty() { "/" } else { path };
    Router::new()
        .route(path, post(receive_update))
        .with_state(state)
}

async fn receive_update(
    State(state): State<Arc<WebhookState>>,
    headers: HeaderMap,
    Json(update): Json<teloxide::types::Update>,
) -> StatusCode {
    let presented = headers.get(SECRET_HEADER).and_then(|value| value.to_str().ok());
    if presented != Some(state.secret.as_str()) {
        warn!("Rejected webhook request with missing or wrong secret token");
        return StatusCode::UNAUTHORIZED;
    }

    let core_update = TelegramUpdateWrapper(&update).to_core();
    if let Err(err) = state.chain.dispatch(&core_update).await {
        error!(
            error = %err,
            update_id = core_update.update_id,
            "Handler chain failed"
        );
    }
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use greetbot_core::{Handler, HandlerOutcome, Update};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_bind_listener_accepts_hostname() {
        let listener = bind_listener("localhost", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_listener_accepts_ip_literal() {
        let listener = bind_listener("127.0.0.1", 0).await.unwrap();
        assert_eq!(
            listener.local_addr().unwrap().ip(),
            "127.0.0.1".parse::<std::net::IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_local_url_ipv4() {
        let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
        assert_eq!(local_url(&addr), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_local_url_ipv6() {
        let addr: SocketAddr = "[::1]:3000".parse().unwrap();
        assert_eq!(local_url(&addr), "http://[::1]:3000");
    }

    struct CountingHandler {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Handler for CountingHandler {
        async fn handle(&self, _update: &Update) -> greetbot_core::Result<HandlerOutcome> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HandlerOutcome::Handled)
        }
    }

    fn test_router(secret: &str) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = UpdateChain::new().add_handler(Arc::new(CountingHandler {
            calls: calls.clone(),
        }));
        let state = Arc::new(WebhookState {
            chain: Arc::new(chain),
            secret: secret.to_string(),
        });
        (webhook_router("/telegram", state), calls)
    }

    fn raw_update() -> &'static str {
        r#"{
            "update_id": 1000,
            "message": {
                "message_id": 10,
                "date": 1700000000,
                "chat": {"id": 456, "type": "private", "first_name": "Alice", "username": "alice"},
                "from": {"id": 123, "is_bot": false, "first_name": "Alice", "username": "alice"},
                "text": "/start"
            }
        }"#
    }

    fn post_update(secret: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/telegram")
            .header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header(SECRET_HEADER, secret);
        }
        builder.body(Body::from(raw_update())).unwrap()
    }

    #[tokio::test]
    async fn test_webhook_rejects_missing_secret() {
        let (app, calls) = test_router("s3cret");

        let response = app.oneshot(post_update(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_webhook_rejects_wrong_secret() {
        let (app, calls) = test_router("s3cret");

        let response = app.oneshot(post_update(Some("not-it"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_webhook_accepts_valid_secret_and_dispatches() {
        let (app, calls) = test_router("s3cret");

        let response = app.oneshot(post_update(Some("s3cret"))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
