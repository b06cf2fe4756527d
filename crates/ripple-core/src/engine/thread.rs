//! Comment threads: creation, replies, soft delete, and ancestor-chain
//! reconstruction.
//!
//! A comment moves through exactly one transition, active -> soft-deleted,
//! and never back. Deletion detaches the node from its parent's listing and
//! marks it for placeholder rendering; it never severs `parent_id` or the
//! node's own `replies`, so the subtree below a deleted comment stays
//! reachable.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Comment;
use crate::error::DomainError;
use crate::ports::{ContentStore, WriteOp};

use super::{NotificationFanout, ensure_content};

#[derive(Clone)]
pub struct CommentThreads {
    store: Arc<dyn ContentStore>,
    fanout: NotificationFanout,
}

impl CommentThreads {
    pub fn new(store: Arc<dyn ContentStore>, fanout: NotificationFanout) -> Self {
        Self { store, fanout }
    }

    /// Create a top-level comment on a post.
    pub async fn comment(
        &self,
        actor_id: Uuid,
        post_id: Uuid,
        text: String,
        images: Vec<String>,
    ) -> Result<Comment, DomainError> {
        ensure_content(&text, &images)?;

        let mut post = self.store.post(post_id).await?.ok_or(DomainError::NotFound {
            entity: "post",
            id: post_id,
        })?;

        let comment = Comment::new(actor_id, post_id, None, text, images);
        post.comments.push(comment.id);

        self.store
            .apply_batch(vec![
                WriteOp::PutComment(comment.clone()),
                WriteOp::PutPost(post),
            ])
            .await?;

        self.fanout
            .mentions(actor_id, &comment.text, Some(post_id))
            .await;

        Ok(comment)
    }

    /// Reply to an existing comment. The reply inherits the parent's
    /// `post_id`, so every node in a thread points at the same root post.
    pub async fn reply(
        &self,
        actor_id: Uuid,
        parent_id: Uuid,
        text: String,
        images: Vec<String>,
    ) -> Result<Comment, DomainError> {
        ensure_content(&text, &images)?;

        let mut parent = self
            .store
            .comment(parent_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "comment",
                id: parent_id,
            })?;

        let reply = Comment::new(actor_id, parent.post_id, Some(parent_id), text, images);
        parent.replies.push(reply.id);

        self.store
            .apply_batch(vec![
                WriteOp::PutComment(reply.clone()),
                WriteOp::PutComment(parent),
            ])
            .await?;

        self.fanout
            .mentions(actor_id, &reply.text, Some(reply.post_id))
            .await;

        Ok(reply)
    }

    /// Soft-delete a comment. Only the author may delete; children are left
    /// untouched and keep resolving through the deleted node.
    pub async fn delete(&self, actor_id: Uuid, comment_id: Uuid) -> Result<(), DomainError> {
        let mut comment = self
            .store
            .comment(comment_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "comment",
                id: comment_id,
            })?;

        if comment.author_id != actor_id {
            return Err(DomainError::Forbidden(
                "only the author can delete a comment".to_string(),
            ));
        }

        let mut ops = Vec::with_capacity(2);
        if let Some(parent_id) = comment.parent_id {
            if let Some(mut parent) = self.store.comment(parent_id).await? {
                parent.replies.retain(|id| *id != comment_id);
                ops.push(WriteOp::PutComment(parent));
            }
        }

        comment.is_deleted = true;
        ops.push(WriteOp::PutComment(comment));

        self.store.apply_batch(ops).await?;
        Ok(())
    }

    /// Walk `parent_id` upward from the given comment and return its
    /// ancestors root-first. Soft-deleted ancestors are included (they
    /// render as placeholders); a dangling parent pointer truncates the
    /// chain rather than failing the walk.
    pub async fn ancestor_chain(&self, comment_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        let focus = self
            .store
            .comment(comment_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "comment",
                id: comment_id,
            })?;

        let mut chain = Vec::new();
        let mut cursor = focus.parent_id;
        while let Some(id) = cursor {
            match self.store.comment(id).await? {
                Some(ancestor) => {
                    cursor = ancestor.parent_id;
                    chain.push(ancestor);
                }
                None => {
                    tracing::warn!(comment_id = %id, "ancestor missing, truncating chain");
                    break;
                }
            }
        }

        chain.reverse();
        Ok(chain)
    }
}
