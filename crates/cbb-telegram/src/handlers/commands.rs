use std::sync::Arc;

use chrono::Utc;
use teloxide::prelude::*;

use crate::router::AppState;

fn parse_command(text: &str) -> (String, String) {
    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

pub async fn handle_command(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if !text.starts_with('/') {
        return Ok(());
    }

    let (cmd, _rest) = parse_command(text);
    match cmd.as_str() {
        "start" => {
            let _ = bot
                .send_message(
                    msg.chat.id,
                    "Bot is running and watching channel unsubscribes.\n\
                     Users who unsubscribe from the channel are banned automatically.",
                )
                .await;
        }
        "stats" => {
            let now = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
            let reply = format!(
                "Bot is active and monitoring channel ID: {}\nCurrent time: {now}",
                state.cfg.target_channel.0
            );
            let _ = bot.send_message(msg.chat.id, reply).await;
        }
        _ => {}
    }

    Ok(())
}
