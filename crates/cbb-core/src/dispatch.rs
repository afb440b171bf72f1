//! Event dispatch: classify, enact, contain.
//!
//! The loop pulls membership events off a queue one at a time and guarantees
//! its own liveness: whatever the actuator does with a single event, the next
//! event is still processed. Only the transport side closing the queue ends
//! the loop.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    classifier::classify,
    domain::{ChatId, Decision, MembershipEvent},
    ports::BanPort,
};

/// Consume events until the sender side closes the channel.
pub async fn run(
    mut events: mpsc::Receiver<MembershipEvent>,
    target: ChatId,
    banner: Arc<dyn BanPort>,
) {
    while let Some(event) = events.recv().await {
        process_event(&event, target, banner.as_ref()).await;
    }
    tracing::info!("membership event stream closed, dispatch loop exiting");
}

/// Classify one event and enact the decision. Never fails the caller: ban
/// command errors are converted into log records here.
pub async fn process_event(event: &MembershipEvent, target: ChatId, banner: &dyn BanPort) {
    match classify(event, target) {
        Decision::Ignore => {}
        Decision::LogOnly(old, new) => {
            tracing::info!(
                user_id = event.user_id.0,
                user = %event.user_name,
                update = event.kind.as_str(),
                "status change: {old} -> {new}"
            );
        }
        Decision::Ban(user_id) => {
            match banner.ban_member(target, user_id).await {
                Ok(()) => {
                    tracing::info!(
                        user_id = user_id.0,
                        user = %event.user_name,
                        update = event.kind.as_str(),
                        "unsubscribed and banned: {} -> {}",
                        event.old_status,
                        event.new_status
                    );
                }
                Err(e) => {
                    tracing::error!(
                        user_id = user_id.0,
                        user = %event.user_name,
                        "failed to ban user: {e}"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventKind, MemberStatus, UserId};
    use crate::errors::Error;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const TARGET: ChatId = ChatId(-1001234567890);

    #[derive(Default)]
    struct RecordingBanner {
        calls: Mutex<Vec<(ChatId, UserId)>>,
    }

    #[async_trait]
    impl BanPort for RecordingBanner {
        async fn ban_member(&self, chat_id: ChatId, user_id: UserId) -> crate::Result<()> {
            self.calls.lock().unwrap().push((chat_id, user_id));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FailingBanner {
        attempts: Mutex<usize>,
    }

    #[async_trait]
    impl BanPort for FailingBanner {
        async fn ban_member(&self, _chat_id: ChatId, _user_id: UserId) -> crate::Result<()> {
            *self.attempts.lock().unwrap() += 1;
            Err(Error::Ban("not enough rights".to_string()))
        }
    }

    fn unsubscribe(user: i64) -> MembershipEvent {
        MembershipEvent {
            chat_id: TARGET,
            user_id: UserId(user),
            user_name: format!("user-{user}"),
            user_is_bot: false,
            old_status: MemberStatus::Member,
            new_status: MemberStatus::Left,
            kind: EventKind::MemberUpdate,
        }
    }

    #[tokio::test]
    async fn unsubscribe_issues_exactly_one_ban() {
        let banner = RecordingBanner::default();
        process_event(&unsubscribe(7), TARGET, &banner).await;

        let calls = banner.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(TARGET, UserId(7))]);
    }

    #[tokio::test]
    async fn ignored_events_touch_nothing() {
        let banner = RecordingBanner::default();
        let mut ev = unsubscribe(7);
        ev.chat_id = ChatId(-100555);
        process_event(&ev, TARGET, &banner).await;

        assert!(banner.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn ban_failure_does_not_stop_the_loop() {
        let banner = Arc::new(FailingBanner::default());
        let (tx, rx) = mpsc::channel(8);

        tx.send(unsubscribe(1)).await.unwrap();
        tx.send(unsubscribe(2)).await.unwrap();
        tx.send(unsubscribe(3)).await.unwrap();
        drop(tx);

        run(rx, TARGET, banner.clone()).await;

        // One attempt per event, no retries, no early exit.
        assert_eq!(*banner.attempts.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn loop_processes_events_in_order() {
        let banner = Arc::new(RecordingBanner::default());
        let (tx, rx) = mpsc::channel(8);

        for id in [10, 20, 30] {
            tx.send(unsubscribe(id)).await.unwrap();
        }
        drop(tx);

        run(rx, TARGET, banner.clone()).await;

        let calls = banner.calls.lock().unwrap();
        let users: Vec<i64> = calls.iter().map(|(_, u)| u.0).collect();
        assert_eq!(users, vec![10, 20, 30]);
    }
}
