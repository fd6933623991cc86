use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use relay_core::{config::Config, messaging::port::MessagingPort, service::RelayService};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub relay: Arc<RelayService>,
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    // Basic startup info. A rejected token is logged, not fatal.
    match bot.get_me().await {
        Ok(me) => tracing::info!("relay started: @{}", me.username()),
        Err(e) => tracing::error!("getMe failed, check BOT_TOKEN: {e}"),
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        relay: Arc::new(RelayService::new(cfg.clone(), messenger)),
    });

    let handler =
        dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    tracing::info!(
        source = %state.cfg.source_channel_id,
        destination = %state.cfg.destination_channel_id,
        trigger = %state.cfg.trigger_token,
        "Bot is running and monitoring the source channel"
    );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
