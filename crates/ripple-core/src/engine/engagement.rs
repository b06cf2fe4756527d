//! Generic like/bookmark toggling shared by posts and comments.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{EngagementKind, EngagementRef, TargetKind};
use crate::error::DomainError;
use crate::ports::{ContentStore, WriteOp};

use super::NotificationFanout;

/// Engagement edges live on both sides: the actor's `likes`/`bookmarks`
/// array is the canonical membership record, the target's set is the derived
/// index. Every toggle writes both sides in one atomic batch so they cannot
/// diverge, which also makes the toggle idempotent per actor: applying it
/// twice restores the pre-toggle state exactly.
#[derive(Clone)]
pub struct EngagementToggler {
    store: Arc<dyn ContentStore>,
    fanout: NotificationFanout,
}

impl EngagementToggler {
    pub fn new(store: Arc<dyn ContentStore>, fanout: NotificationFanout) -> Self {
        Self { store, fanout }
    }

    /// Toggle one edge for one actor on one target. Returns the target's
    /// updated engagement set. A fresh *like* notifies the target's author;
    /// unlikes and bookmarks never do.
    pub async fn toggle(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
        target_kind: TargetKind,
        edge: EngagementKind,
    ) -> Result<Vec<Uuid>, DomainError> {
        let mut actor = self.store.user(actor_id).await?.ok_or(DomainError::NotFound {
            entity: "user",
            id: actor_id,
        })?;

        let entry = EngagementRef {
            item: target_id,
            kind: target_kind,
        };
        let engaged = actor.engagements(edge).contains(&entry);

        if engaged {
            actor.engagements_mut(edge).retain(|e| *e != entry);
        } else {
            actor.engagements_mut(edge).push(entry);
        }

        let (updated, author_id, feed_post) = match target_kind {
            TargetKind::Post => {
                let mut post =
                    self.store
                        .post(target_id)
                        .await?
                        .ok_or(DomainError::NotFound {
                            entity: "post",
                            id: target_id,
                        })?;
                let set = post.engaged_set_mut(edge);
                if engaged {
                    set.retain(|id| *id != actor_id);
                } else if !set.contains(&actor_id) {
                    set.push(actor_id);
                }
                let updated = set.clone();
                let author_id = post.author_id;
                self.store
                    .apply_batch(vec![WriteOp::PutPost(post), WriteOp::PutUser(actor)])
                    .await?;
                (updated, author_id, Some(target_id))
            }
            TargetKind::Comment => {
                let mut comment =
                    self.store
                        .comment(target_id)
                        .await?
                        .ok_or(DomainError::NotFound {
                            entity: "comment",
                            id: target_id,
                        })?;
                let set = comment.engaged_set_mut(edge);
                if engaged {
                    set.retain(|id| *id != actor_id);
                } else if !set.contains(&actor_id) {
                    set.push(actor_id);
                }
                let updated = set.clone();
                let author_id = comment.author_id;
                let feed_post = comment.post_id;
                self.store
                    .apply_batch(vec![WriteOp::PutComment(comment), WriteOp::PutUser(actor)])
                    .await?;
                (updated, author_id, Some(feed_post))
            }
        };

        if !engaged && edge == EngagementKind::Like {
            self.fanout.like(actor_id, author_id, feed_post).await;
        }

        Ok(updated)
    }
}
