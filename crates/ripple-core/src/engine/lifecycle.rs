//! Post creation, deletion, and pinning.
//!
//! Deletion is the most invariant-heavy operation in the engine: it touches
//! all four collections, so every write goes into one atomic store batch.
//! Either the whole cascade commits or nothing does.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostBody, TargetKind};
use crate::error::DomainError;
use crate::ports::{ContentStore, ImageStore, WriteOp};

use super::{NotificationFanout, ensure_content};

#[derive(Clone)]
pub struct PostLifecycle {
    store: Arc<dyn ContentStore>,
    images: Arc<dyn ImageStore>,
    fanout: NotificationFanout,
}

impl PostLifecycle {
    pub fn new(
        store: Arc<dyn ContentStore>,
        images: Arc<dyn ImageStore>,
        fanout: NotificationFanout,
    ) -> Self {
        Self {
            store,
            images,
            fanout,
        }
    }

    /// Create an original post. Image payloads go through the image store
    /// first; the post records the returned URLs.
    pub async fn create(
        &self,
        actor_id: Uuid,
        text: String,
        image_payloads: Vec<String>,
        location: String,
    ) -> Result<Post, DomainError> {
        ensure_content(&text, &image_payloads)?;

        let mut actor = self.store.user(actor_id).await?.ok_or(DomainError::NotFound {
            entity: "user",
            id: actor_id,
        })?;

        let mut urls = Vec::with_capacity(image_payloads.len());
        for payload in &image_payloads {
            let url = self
                .images
                .upload(payload)
                .await
                .map_err(|err| DomainError::Internal(err.to_string()))?;
            urls.push(url);
        }

        let post = Post::new(actor_id, text, urls, location, PostBody::Original);
        actor.user_posts.push(post.id);

        self.store
            .apply_batch(vec![WriteOp::PutPost(post.clone()), WriteOp::PutUser(actor)])
            .await?;

        self.fanout
            .mentions(actor_id, &post.text, Some(post.id))
            .await;

        Ok(post)
    }

    /// Delete a post and everything that hangs off it.
    ///
    /// - A derivative (repost or quote) decrements its origin's
    ///   amplification and scrubs the actor's tracking arrays.
    /// - An original takes every repost wrapper down with it and scrubs the
    ///   deleted ids from every referencing user. Quote posts of it survive
    ///   as self-contained snapshots.
    ///
    /// All writes land in one batch. Stored images are removed afterwards,
    /// best-effort: the image host is not transactional, and a failed image
    /// delete must not resurrect the post.
    pub async fn delete(&self, actor_id: Uuid, post_id: Uuid) -> Result<(), DomainError> {
        let post = self.store.post(post_id).await?.ok_or(DomainError::NotFound {
            entity: "post",
            id: post_id,
        })?;

        if post.author_id != actor_id {
            return Err(DomainError::Forbidden(
                "only the author can delete a post".to_string(),
            ));
        }

        let mut ops = Vec::new();

        // Derivative: give the origin its amplification back. A quote can
        // outlive its origin (the origin's deletion leaves quotes standing
        // as snapshots), so the decrement only applies while the origin
        // still exists.
        if let Some((origin_id, origin_kind)) = post.amplifies() {
            let origin_live = match origin_kind {
                TargetKind::Post => self.store.post(origin_id).await?.is_some(),
                TargetKind::Comment => self.store.comment(origin_id).await?.is_some(),
            };
            if origin_live {
                ops.push(WriteOp::Amplify {
                    target_id: origin_id,
                    target_kind: origin_kind,
                    actor_id,
                    delta: -1,
                });
            }
        }

        // Every wrapper amplifying this post dies with it. Their counters
        // lived on this post, so no decrement is owed anywhere.
        let wrappers = self.store.reposts_of(post_id).await?;
        let mut doomed: Vec<Uuid> = Vec::with_capacity(wrappers.len() + 1);
        doomed.push(post_id);
        doomed.extend(wrappers.iter().map(|w| w.id));

        // Scrub the deleted ids from every user that references them.
        let mut affected = self.store.users_referencing(&doomed).await?;
        for user in &mut affected {
            user.user_posts.retain(|id| !doomed.contains(id));
            user.reposted_posts.retain(|id| *id != post_id);
            if user.pinned_post.is_some_and(|id| doomed.contains(&id)) {
                user.pinned_post = None;
            }
        }

        // Deleting one's own derivative also drops the origin marker.
        if let Some((origin_id, _)) = post.amplifies() {
            if let Some(actor) = affected.iter_mut().find(|u| u.id == actor_id) {
                actor.reposted_posts.retain(|id| *id != origin_id);
            }
        }

        ops.extend(affected.into_iter().map(WriteOp::PutUser));
        ops.extend(doomed.iter().copied().map(WriteOp::DeletePost));

        self.store.apply_batch(ops).await?;

        for url in &post.images {
            if let Err(err) = self.images.delete(url).await {
                tracing::warn!(%url, %err, "image delete failed");
            }
        }

        Ok(())
    }

    /// Toggle the actor's single pinned post. Pinning a second post replaces
    /// the first; pinning the same post again unpins it. Returns the new
    /// pinned id, if any.
    pub async fn pin(&self, actor_id: Uuid, post_id: Uuid) -> Result<Option<Uuid>, DomainError> {
        let post = self.store.post(post_id).await?.ok_or(DomainError::NotFound {
            entity: "post",
            id: post_id,
        })?;

        if post.author_id != actor_id {
            return Err(DomainError::Forbidden(
                "only the author can pin a post".to_string(),
            ));
        }

        let mut actor = self.store.user(actor_id).await?.ok_or(DomainError::NotFound {
            entity: "user",
            id: actor_id,
        })?;

        actor.pinned_post = if actor.pinned_post == Some(post_id) {
            None
        } else {
            Some(post_id)
        };
        let pinned = actor.pinned_post;

        self.store.put_user(actor).await?;
        Ok(pinned)
    }
}
