//! Repost and quote creation: derivative posts that amplify an original
//! post or comment.
//!
//! Both paths move the origin's amplification counter through the store's
//! atomic primitive inside the same batch that lands the derivative, so
//! `repost_by_num` always equals the count of live reposts + quotes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    AuthorSnapshot, Comment, Post, PostBody, QuoteSource, RepostSource, TargetKind,
};
use crate::error::DomainError;
use crate::ports::{ContentStore, WriteOp};

use super::{NotificationFanout, ensure_content};

/// What a repost call did.
#[derive(Debug)]
pub enum RepostOutcome {
    Created(Post),
    Removed,
}

/// The item being amplified, loaded once per operation.
enum Origin {
    Post(Post),
    Comment(Comment),
}

impl Origin {
    fn author_id(&self) -> Uuid {
        match self {
            Origin::Post(p) => p.author_id,
            Origin::Comment(c) => c.author_id,
        }
    }

    fn text(&self) -> &str {
        match self {
            Origin::Post(p) => &p.text,
            Origin::Comment(c) => &c.text,
        }
    }

    fn images(&self) -> &[String] {
        match self {
            Origin::Post(p) => &p.images,
            Origin::Comment(c) => &c.images,
        }
    }

    fn created_at(&self) -> DateTime<Utc> {
        match self {
            Origin::Post(p) => p.created_at,
            Origin::Comment(c) => c.created_at,
        }
    }

    fn quote_block(&self) -> Option<&QuoteSource> {
        match self {
            Origin::Post(p) => p.quote_block(),
            Origin::Comment(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct RepostEngine {
    store: Arc<dyn ContentStore>,
    fanout: NotificationFanout,
}

impl RepostEngine {
    pub fn new(store: Arc<dyn ContentStore>, fanout: NotificationFanout) -> Self {
        Self { store, fanout }
    }

    /// Toggle a repost of `origin_id` for the actor.
    ///
    /// A second call by the same actor on the same origin undoes the first:
    /// the wrapper is deleted and every counter and array returns to its
    /// prior state.
    pub async fn repost(
        &self,
        actor_id: Uuid,
        origin_id: Uuid,
        origin_kind: TargetKind,
    ) -> Result<RepostOutcome, DomainError> {
        let origin = self.load_origin(origin_id, origin_kind).await?;
        let mut actor = self.store.user(actor_id).await?.ok_or(DomainError::NotFound {
            entity: "user",
            id: actor_id,
        })?;

        if let Some(existing) = self.store.repost_by_actor(actor_id, origin_id).await? {
            actor.user_posts.retain(|id| *id != existing.id);
            actor.reposted_posts.retain(|id| *id != origin_id);
            self.store
                .apply_batch(vec![
                    WriteOp::DeletePost(existing.id),
                    WriteOp::PutUser(actor),
                    WriteOp::Amplify {
                        target_id: origin_id,
                        target_kind: origin_kind,
                        actor_id,
                        delta: -1,
                    },
                ])
                .await?;
            return Ok(RepostOutcome::Removed);
        }

        let owner = self
            .store
            .user(origin.author_id())
            .await?
            .ok_or(DomainError::NotFound {
                entity: "user",
                id: origin.author_id(),
            })?;

        let source = RepostSource {
            origin_id,
            origin_kind,
            owner: AuthorSnapshot::from(&owner),
            text: origin.text().to_string(),
            images: origin.images().to_vec(),
        };
        // A repost of a quote keeps the quote card visible one level down.
        let quoted = origin.quote_block().cloned();

        let wrapper = Post::new(
            actor_id,
            String::new(),
            Vec::new(),
            String::new(),
            PostBody::Repost { source, quoted },
        );
        actor.user_posts.push(wrapper.id);
        actor.reposted_posts.push(origin_id);

        self.store
            .apply_batch(vec![
                WriteOp::PutPost(wrapper.clone()),
                WriteOp::PutUser(actor),
                WriteOp::Amplify {
                    target_id: origin_id,
                    target_kind: origin_kind,
                    actor_id,
                    delta: 1,
                },
            ])
            .await?;

        Ok(RepostOutcome::Created(wrapper))
    }

    /// Quote `origin_id` with the actor's own text and images.
    ///
    /// Quotes share the repost counter - both are amplification events on
    /// the origin. There is no undo toggle; deleting the quote post goes
    /// through the generic post-deletion path, which still decrements the
    /// origin.
    pub async fn quote(
        &self,
        actor_id: Uuid,
        origin_id: Uuid,
        origin_kind: TargetKind,
        text: String,
        images: Vec<String>,
        location: String,
    ) -> Result<Post, DomainError> {
        ensure_content(&text, &images)?;

        let origin = self.load_origin(origin_id, origin_kind).await?;
        if let Origin::Comment(comment) = &origin {
            if comment.is_deleted {
                return Err(DomainError::Validation(
                    "cannot quote a deleted comment".to_string(),
                ));
            }
        }

        let mut actor = self.store.user(actor_id).await?.ok_or(DomainError::NotFound {
            entity: "user",
            id: actor_id,
        })?;
        let author = self
            .store
            .user(origin.author_id())
            .await?
            .ok_or(DomainError::NotFound {
                entity: "user",
                id: origin.author_id(),
            })?;

        // Quoting a reply gets "replying to @x" context from the parent
        // comment's author.
        let reply_to = match &origin {
            Origin::Comment(comment) => self.reply_context(comment).await?,
            Origin::Post(_) => None,
        };

        let source = QuoteSource {
            origin_id,
            origin_kind,
            author: AuthorSnapshot::from(&author),
            text: origin.text().to_string(),
            images: origin.images().to_vec(),
            created_at: origin.created_at(),
            reply_to,
        };

        let quote = Post::new(actor_id, text, images, location, PostBody::Quote { source });
        actor.user_posts.push(quote.id);
        actor.reposted_posts.push(origin_id);

        self.store
            .apply_batch(vec![
                WriteOp::PutPost(quote.clone()),
                WriteOp::PutUser(actor),
                WriteOp::Amplify {
                    target_id: origin_id,
                    target_kind: origin_kind,
                    actor_id,
                    delta: 1,
                },
            ])
            .await?;

        self.fanout
            .mentions(actor_id, &quote.text, Some(quote.id))
            .await;

        Ok(quote)
    }

    async fn load_origin(&self, id: Uuid, kind: TargetKind) -> Result<Origin, DomainError> {
        match kind {
            TargetKind::Post => Ok(Origin::Post(self.store.post(id).await?.ok_or(
                DomainError::NotFound {
                    entity: "post",
                    id,
                },
            )?)),
            TargetKind::Comment => Ok(Origin::Comment(self.store.comment(id).await?.ok_or(
                DomainError::NotFound {
                    entity: "comment",
                    id,
                },
            )?)),
        }
    }

    async fn reply_context(
        &self,
        comment: &Comment,
    ) -> Result<Option<AuthorSnapshot>, DomainError> {
        let Some(parent_id) = comment.parent_id else {
            return Ok(None);
        };
        let Some(parent) = self.store.comment(parent_id).await? else {
            return Ok(None);
        };
        Ok(self
            .store
            .user(parent.author_id)
            .await?
            .as_ref()
            .map(AuthorSnapshot::from))
    }
}
