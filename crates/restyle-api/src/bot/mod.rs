//! Chat bot runtime.
//!
//! Long-polls the Telegram Bot API and hands each update to the dialogue
//! engine in its own task. A user's tasks are chained so their events are
//! handled in the order Telegram delivered them.

mod sequencer;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use restyle_core::chat::dispatcher::Dispatcher;
use restyle_core::chat::messages::BOT_COMMANDS;
use restyle_infra::config::{require_secret, BOT_TOKEN_VAR};
use restyle_infra::filesystem::LocalStyleStore;
use restyle_infra::gateway_client::HttpRewriteGateway;
use restyle_infra::telegram::TelegramClient;
use restyle_types::config::AppConfig;

use self::sequencer::EventSequencer;

pub type ConcreteDispatcher = Dispatcher<LocalStyleStore, TelegramClient, HttpRewriteGateway>;

/// Pause after a failed poll before trying again.
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Build the dispatcher from configuration and poll until `shutdown` fires.
pub async fn run(config: &AppConfig, shutdown: CancellationToken) -> anyhow::Result<()> {
    let token = require_secret(BOT_TOKEN_VAR)?;

    tokio::fs::create_dir_all(&config.styles_dir)
        .await
        .with_context(|| format!("failed to create {}", config.styles_dir.display()))?;

    let dispatcher = Arc::new(Dispatcher::new(
        LocalStyleStore::new(&config.styles_dir),
        TelegramClient::new(token),
        HttpRewriteGateway::new(&config.gateway_url),
    ));

    tracing::info!(
        styles_dir = %config.styles_dir.display(),
        gateway = %config.gateway_url,
        "bot starting"
    );
    register_commands(&dispatcher).await;
    poll_updates(dispatcher, config.poll_timeout_secs, shutdown).await;
    tracing::info!("bot stopped");
    Ok(())
}

/// Publish the command menu. Failures are logged and ignored.
async fn register_commands(dispatcher: &ConcreteDispatcher) {
    match dispatcher.transport().set_my_commands(BOT_COMMANDS).await {
        Ok(()) => tracing::info!(count = BOT_COMMANDS.len(), "bot commands registered"),
        Err(e) => tracing::warn!(error = %e, "failed to register bot commands"),
    }
}

/// Fetch updates until cancelled, spawning one task per event.
pub async fn poll_updates(
    dispatcher: Arc<ConcreteDispatcher>,
    timeout_secs: u64,
    shutdown: CancellationToken,
) {
    let mut offset = 0;
    let mut sequencer = EventSequencer::new();

    loop {
        let batch = tokio::select! {
            _ = shutdown.cancelled() => break,
            batch = dispatcher.transport().get_updates(offset, timeout_secs) => batch,
        };

        let updates = match batch {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "polling for updates failed");
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = tokio::time::sleep(RETRY_DELAY) => continue,
                }
            }
        };

        sequencer.prune();
        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(event) = update.into_event() else {
                continue;
            };
            let dispatcher = Arc::clone(&dispatcher);
            sequencer.spawn(event.session_key(), async move {
                dispatcher.handle(event).await;
            });
        }
    }
}
