//! Telegram update handlers.
//!
//! Each handler does the minimum at the transport boundary: decode the update
//! into a core type, hand it to the core (queue or command reply), and always
//! return `Ok` so one bad update never takes down the dispatcher.

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{ChatMemberUpdated, Message},
};

use cbb_core::domain::EventKind;

use crate::router::AppState;

mod commands;
pub mod membership;

pub async fn handle_chat_member(
    upd: ChatMemberUpdated,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    forward(upd, EventKind::MemberUpdate, state).await
}

pub async fn handle_my_chat_member(
    upd: ChatMemberUpdated,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    forward(upd, EventKind::OwnMembership, state).await
}

async fn forward(
    upd: ChatMemberUpdated,
    kind: EventKind,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    match membership::decode(&upd, kind) {
        Ok(event) => {
            if state.events.send(event).await.is_err() {
                tracing::error!("dispatch queue closed, dropping membership event");
            }
        }
        Err(e) => {
            tracing::warn!(update = kind.as_str(), "dropping membership update: {e}");
        }
    }
    Ok(())
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    commands::handle_command(bot, msg, state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbb_core::config::Config;
    use cbb_core::domain::{MemberStatus, UserId};
    use teloxide::types::{ChatMember, ChatMemberKind};
    use tokio::sync::mpsc;

    use crate::handlers::membership::tests::{updated, user};

    fn state(events: mpsc::Sender<cbb_core::domain::MembershipEvent>) -> Arc<AppState> {
        let cfg = Config::from_parts(Some("123:abc".to_string()), Some("-1001234".to_string()))
            .unwrap();
        Arc::new(AppState {
            cfg: Arc::new(cfg),
            events,
        })
    }

    #[tokio::test]
    async fn malformed_updates_are_dropped_before_the_queue() {
        let (tx, mut rx) = mpsc::channel(4);
        let state = state(tx);

        let upd = updated(
            -1001234,
            ChatMember {
                user: user(42),
                kind: ChatMemberKind::Member,
            },
            ChatMember {
                user: user(43),
                kind: ChatMemberKind::Left,
            },
        );

        forward(upd, EventKind::MemberUpdate, state).await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn decoded_updates_reach_the_queue() {
        let (tx, mut rx) = mpsc::channel(4);
        let state = state(tx);

        let upd = updated(
            -1001234,
            ChatMember {
                user: user(42),
                kind: ChatMemberKind::Member,
            },
            ChatMember {
                user: user(42),
                kind: ChatMemberKind::Left,
            },
        );

        forward(upd, EventKind::OwnMembership, state).await.unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.user_id, UserId(42));
        assert_eq!(event.new_status, MemberStatus::Left);
        assert_eq!(event.kind, EventKind::OwnMembership);
    }
}
