//! Notification fan-out for follow, like, and mention events.
//!
//! Fan-out is best-effort by contract: a mentioned username that resolves to
//! nobody is skipped, and insert failures are logged, never surfaced. The
//! triggering action must not fail because a notification could not land.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Notification, NotificationKind};
use crate::ports::ContentStore;

use super::mention::mentions;

#[derive(Clone)]
pub struct NotificationFanout {
    store: Arc<dyn ContentStore>,
}

impl NotificationFanout {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    pub async fn follow(&self, from: Uuid, to: Uuid) {
        self.insert(Notification::new(from, to, NotificationKind::Follow, None))
            .await;
    }

    pub async fn like(&self, from: Uuid, to: Uuid, post_id: Option<Uuid>) {
        self.insert(Notification::new(from, to, NotificationKind::Like, post_id))
            .await;
    }

    /// Scan the text for `@mentions` and notify every username that resolves
    /// to an existing user.
    pub async fn mentions(&self, from: Uuid, text: &str, post_id: Option<Uuid>) {
        for username in mentions(text) {
            match self.store.user_by_username(&username).await {
                Ok(Some(user)) => {
                    self.insert(Notification::new(
                        from,
                        user.id,
                        NotificationKind::Mention,
                        post_id,
                    ))
                    .await;
                }
                Ok(None) => {
                    tracing::debug!(%username, "mentioned user does not exist, skipping");
                }
                Err(err) => {
                    tracing::warn!(%username, %err, "mention lookup failed, skipping");
                }
            }
        }
    }

    async fn insert(&self, notification: Notification) {
        if let Err(err) = self.store.put_notification(notification).await {
            tracing::warn!(%err, "notification insert failed");
        }
    }
}
