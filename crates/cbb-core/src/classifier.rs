//! The membership-transition classifier.
//!
//! A pure, total function: every reachable combination of statuses, chat id
//! and bot flag maps to exactly one [`Decision`]. Rule order is fixed; the
//! chat filter and the bot filter short-circuit before anything else looks at
//! the statuses.

use crate::domain::{ChatId, Decision, MembershipEvent};

/// Classify one membership event against the configured target channel.
///
/// The subscribed→unsubscribed edge is the only transition that produces a
/// side effect: a user who was never a member (e.g. restricted → left) is not
/// an intentional unsubscribe and only gets logged.
pub fn classify(event: &MembershipEvent, target: ChatId) -> Decision {
    if event.chat_id != target {
        return Decision::Ignore;
    }

    if event.user_is_bot {
        return Decision::Ignore;
    }

    if event.old_status.is_subscribed() && event.new_status.is_unsubscribed() {
        return Decision::Ban(event.user_id);
    }

    if event.old_status != event.new_status {
        return Decision::LogOnly(event.old_status, event.new_status);
    }

    Decision::Ignore
}
