use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use tokio::sync::mpsc;

use cbb_core::{config::Config, dispatch, domain::MembershipEvent, ports::BanPort};

use crate::handlers;
use crate::TelegramBanner;

/// Capacity of the membership event queue between the teloxide handlers and
/// the core dispatch loop; sends block (backpressure) when the loop is busy
/// with an outbound ban call.
const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub events: mpsc::Sender<MembershipEvent>,
}

pub async fn run_polling(cfg: Arc<Config>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    if let Ok(me) = bot.get_me().await {
        tracing::info!("cbb started: @{}", me.username());
    }
    tracing::info!("monitoring channel ID: {}", cfg.target_channel.0);

    let banner: Arc<dyn BanPort> = Arc::new(TelegramBanner::new(bot.clone()));
    let (events_tx, events_rx) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    let dispatch_loop = tokio::spawn(dispatch::run(events_rx, cfg.target_channel, banner));

    let state = Arc::new(AppState {
        cfg: cfg.clone(),
        events: events_tx,
    });

    // Both membership streams share one classification path; command messages
    // are the operator surface and never touch the classifier.
    let handler = dptree::entry()
        .branch(Update::filter_my_chat_member().endpoint(handlers::handle_my_chat_member))
        .branch(Update::filter_chat_member().endpoint(handlers::handle_chat_member))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    // The dispatcher owned the last event sender; once it is gone the queue
    // closes and the loop drains whatever is left.
    let _ = dispatch_loop.await;

    Ok(())
}
