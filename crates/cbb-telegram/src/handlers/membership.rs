//! Decoding `ChatMemberUpdated` into the core event type.

use teloxide::types::{ChatMemberKind, ChatMemberUpdated};

use cbb_core::{
    domain::{ChatId, EventKind, MemberStatus, MembershipEvent, UserId},
    errors::Error,
    Result,
};

/// Build a [`MembershipEvent`] from a Telegram membership update.
///
/// Fails with `MalformedEvent` when the update is internally inconsistent;
/// the caller logs and drops such updates without touching the queue.
pub fn decode(upd: &ChatMemberUpdated, kind: EventKind) -> Result<MembershipEvent> {
    let old = &upd.old_chat_member;
    let new = &upd.new_chat_member;

    if old.user.id != new.user.id {
        return Err(Error::MalformedEvent(format!(
            "old/new sides refer to different users ({} vs {})",
            old.user.id.0, new.user.id.0
        )));
    }

    let user = &new.user;
    let mut user_name = user.full_name();
    if let Some(username) = &user.username {
        user_name.push_str(&format!(" (@{username})"));
    }

    Ok(MembershipEvent {
        chat_id: ChatId(upd.chat.id.0),
        user_id: UserId(user.id.0 as i64),
        user_name,
        user_is_bot: user.is_bot,
        old_status: map_status(&old.kind),
        new_status: map_status(&new.kind),
        kind,
    })
}

fn map_status(kind: &ChatMemberKind) -> MemberStatus {
    match kind {
        ChatMemberKind::Owner(_) => MemberStatus::Owner,
        ChatMemberKind::Administrator(_) => MemberStatus::Administrator,
        ChatMemberKind::Member => MemberStatus::Member,
        ChatMemberKind::Restricted(_) => MemberStatus::Restricted,
        ChatMemberKind::Left => MemberStatus::Left,
        ChatMemberKind::Banned(_) => MemberStatus::Kicked,
    }
}
