//! Telegram adapter (teloxide).
//!
//! This crate implements the `cbb-core` BanPort over the Telegram Bot API and
//! hosts the update router that feeds the core dispatch loop.

use async_trait::async_trait;

use teloxide::prelude::*;

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use cbb_core::{
    domain::{ChatId, UserId},
    errors::Error,
    ports::BanPort,
    Result,
};

#[derive(Clone)]
pub struct TelegramBanner {
    bot: Bot,
}

impl TelegramBanner {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Ban(format!("telegram error: {e}"))
    }

    // One RetryAfter wait at the transport layer; everything else surfaces
    // immediately so the dispatch loop can log it and move on.
    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

#[async_trait]
impl BanPort for TelegramBanner {
    async fn ban_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()> {
        self.with_retry(|| {
            self.bot.ban_chat_member(
                Self::tg_chat(chat_id),
                teloxide::types::UserId(user_id.0 as u64),
            )
        })
        .await?;
        Ok(())
    }
}
