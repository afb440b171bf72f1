use std::fmt;

/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// A user's relationship to the monitored channel.
///
/// Only two partitions matter to the classifier: subscribed
/// (owner/administrator/member) and unsubscribed (left/kicked). Everything
/// else is "other" and never triggers a ban by itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberStatus {
    Owner,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
    Unknown,
}

impl MemberStatus {
    pub fn is_subscribed(self) -> bool {
        matches!(self, Self::Owner | Self::Administrator | Self::Member)
    }

    pub fn is_unsubscribed(self) -> bool {
        matches!(self, Self::Left | Self::Kicked)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Owner => "owner",
            Self::Administrator => "administrator",
            Self::Member => "member",
            Self::Restricted => "restricted",
            Self::Left => "left",
            Self::Kicked => "kicked",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Which update stream an event arrived on.
///
/// Telegram delivers the bot's own membership changes (`my_chat_member`)
/// separately from other users' changes (`chat_member`); both go through the
/// same classification rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    OwnMembership,
    MemberUpdate,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OwnMembership => "my_chat_member",
            Self::MemberUpdate => "chat_member",
        }
    }
}

/// Immutable record of one membership status transition.
///
/// Events are classified independently and statelessly; nothing is stored,
/// deduplicated, or correlated across calls.
#[derive(Clone, Debug)]
pub struct MembershipEvent {
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_is_bot: bool,
    pub old_status: MemberStatus,
    pub new_status: MemberStatus,
    pub kind: EventKind,
}

/// Outcome of classifying one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    /// No action and no log line.
    Ignore,
    /// Ban this user from the target channel.
    Ban(UserId),
    /// Record the transition for operator visibility, no action.
    LogOnly(MemberStatus, MemberStatus),
}
