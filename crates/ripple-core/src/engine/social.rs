//! Follow graph: symmetric follower/following edges between users.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::DomainError;
use crate::ports::{ContentStore, WriteOp};

use super::NotificationFanout;

/// What a follow toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowOutcome {
    Followed,
    Unfollowed,
}

#[derive(Clone)]
pub struct SocialGraph {
    store: Arc<dyn ContentStore>,
    fanout: NotificationFanout,
}

impl SocialGraph {
    pub fn new(store: Arc<dyn ContentStore>, fanout: NotificationFanout) -> Self {
        Self { store, fanout }
    }

    /// Toggle the actor's follow edge to the target. The two documents are
    /// updated in one batch so `A in B.followers` and `B in A.followings`
    /// stay symmetric. Following notifies the target; unfollowing does not.
    pub async fn toggle_follow(
        &self,
        actor_id: Uuid,
        target_id: Uuid,
    ) -> Result<FollowOutcome, DomainError> {
        if actor_id == target_id {
            return Err(DomainError::Validation(
                "cannot follow yourself".to_string(),
            ));
        }

        let mut actor = self.store.user(actor_id).await?.ok_or(DomainError::NotFound {
            entity: "user",
            id: actor_id,
        })?;
        let mut target = self
            .store
            .user(target_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "user",
                id: target_id,
            })?;

        let following = actor.followings.contains(&target_id);
        if following {
            actor.followings.retain(|id| *id != target_id);
            target.followers.retain(|id| *id != actor_id);
        } else {
            actor.followings.push(target_id);
            target.followers.push(actor_id);
        }

        self.store
            .apply_batch(vec![WriteOp::PutUser(actor), WriteOp::PutUser(target)])
            .await?;

        if following {
            Ok(FollowOutcome::Unfollowed)
        } else {
            self.fanout.follow(actor_id, target_id).await;
            Ok(FollowOutcome::Followed)
        }
    }
}
