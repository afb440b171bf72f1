use async_trait::async_trait;

use crate::{
    domain::{ChatId, UserId},
    Result,
};

/// Hexagonal port for the outbound ban command.
///
/// Telegram is the first implementation; the shape is a single fallible call
/// so the dispatch loop can be exercised in tests with stub implementations.
#[async_trait]
pub trait BanPort: Send + Sync {
    /// Ban `user_id` from `chat_id`, removing membership and preventing
    /// rejoining until explicitly reversed. Exactly one attempt; retry
    /// policy, if any, belongs to the transport.
    async fn ban_member(&self, chat_id: ChatId, user_id: UserId) -> Result<()>;
}
