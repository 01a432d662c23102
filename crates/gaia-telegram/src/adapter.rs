//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event
//! loop for the lifetime of the process. The agent's own handle is resolved
//! in the background at startup; until that completes, inbound messages are
//! dropped rather than queued.

use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use tracing::{info, warn};

use gaia_core::config::TelegramConfig;
use gaia_core::identity::AgentIdentity;

use crate::context::TelegramAppContext;
use crate::handler::handle_message;

pub struct TelegramAdapter<C: TelegramAppContext + 'static> {
    ctx: Arc<C>,
    identity: Arc<AgentIdentity>,
    bot_token: String,
}

impl<C: TelegramAppContext + 'static> TelegramAdapter<C> {
    pub fn new(config: &TelegramConfig, ctx: Arc<C>, identity: Arc<AgentIdentity>) -> Self {
        Self {
            ctx,
            identity,
            bot_token: config.bot_token.clone(),
        }
    }

    /// Connect to Telegram and drive the long-polling loop.
    ///
    /// Never returns — runs for the lifetime of the process. Transport
    /// errors are retried by the polling listener.
    pub async fn run(self) {
        let bot = Bot::new(&self.bot_token);

        tokio::spawn(resolve_identity(bot.clone(), Arc::clone(&self.identity)));

        info!("telegram: starting long-polling dispatcher");

        let handler = Update::filter_message().endpoint(handle_message::<C>);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![self.ctx, self.identity])
            .default_handler(|_upd| async {})
            .build()
            .dispatch()
            .await;
    }
}

/// Resolve the bot's own username via `get_me`, retrying with backoff.
/// Messages keep being dropped (fail closed) until this succeeds.
async fn resolve_identity(bot: Bot, identity: Arc<AgentIdentity>) {
    let mut delay = Duration::from_secs(1);
    loop {
        match bot.get_me().await {
            Ok(me) => {
                match me.user.username.clone() {
                    Some(username) => identity.resolve(username),
                    None => warn!("bot profile has no username; group addressing disabled"),
                }
                return;
            }
            Err(e) => {
                warn!(error = %e, retry_in_secs = delay.as_secs(), "get_me failed");
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(Duration::from_secs(30));
            }
        }
    }
}
