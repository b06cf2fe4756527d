use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EngagementKind, TargetKind, User};

/// Point-in-time copy of an author's identity, embedded in repost and quote
/// blocks. Set once at creation and never refreshed: profile edits after the
/// fact do not retroactively update the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSnapshot {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub profile_img: Option<String>,
}

impl From<&User> for AuthorSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            profile_img: user.profile_img.clone(),
        }
    }
}

/// What a repost wrapper carries about the item it amplifies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepostSource {
    pub origin_id: Uuid,
    pub origin_kind: TargetKind,
    pub owner: AuthorSnapshot,
    pub text: String,
    pub images: Vec<String>,
}

/// What a quote post carries about the item it quotes. `reply_to` is set
/// only when the quoted item is a reply comment, and snapshots the parent
/// comment's author for "replying to @x" context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSource {
    pub origin_id: Uuid,
    pub origin_kind: TargetKind,
    pub author: AuthorSnapshot,
    pub text: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub reply_to: Option<AuthorSnapshot>,
}

/// What a post *is*. Exactly one of the three applies; the tagged union
/// makes repost-and-quote-on-one-post unrepresentable.
///
/// A repost of a quote keeps the origin's quote block in `quoted`, so one
/// level of chaining survives the wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostBody {
    Original,
    Repost {
        source: RepostSource,
        quoted: Option<QuoteSource>,
    },
    Quote {
        source: QuoteSource,
    },
}

/// Post entity.
///
/// `repost_by_num` equals the count of live reposts + quotes referencing
/// this post and `repost_by` holds those actors; both are maintained through
/// the store's atomic amplification primitive, never recomputed by scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub images: Vec<String>,
    pub body: PostBody,
    pub likes: Vec<Uuid>,
    pub bookmarks: Vec<Uuid>,
    pub comments: Vec<Uuid>,
    pub repost_by: Vec<Uuid>,
    pub repost_by_num: i64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(
        author_id: Uuid,
        text: String,
        images: Vec<String>,
        location: String,
        body: PostBody,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            text,
            images,
            body,
            likes: Vec::new(),
            bookmarks: Vec::new(),
            comments: Vec::new(),
            repost_by: Vec::new(),
            repost_by_num: 0,
            location,
            created_at: Utc::now(),
        }
    }

    /// The item this post amplifies, if it is a repost or quote wrapper.
    /// Deleting the post must decrement exactly this target.
    pub fn amplifies(&self) -> Option<(Uuid, TargetKind)> {
        match &self.body {
            PostBody::Original => None,
            PostBody::Repost { source, .. } => Some((source.origin_id, source.origin_kind)),
            PostBody::Quote { source } => Some((source.origin_id, source.origin_kind)),
        }
    }

    /// The origin id when this post is a pure repost wrapper.
    pub fn repost_origin(&self) -> Option<Uuid> {
        match &self.body {
            PostBody::Repost { source, .. } => Some(source.origin_id),
            _ => None,
        }
    }

    /// The quote block this post carries, whether it is a quote itself or a
    /// repost that inherited one.
    pub fn quote_block(&self) -> Option<&QuoteSource> {
        match &self.body {
            PostBody::Quote { source } => Some(source),
            PostBody::Repost { quoted, .. } => quoted.as_ref(),
            PostBody::Original => None,
        }
    }

    /// The derived engagement index for one edge kind.
    pub fn engaged_set_mut(&mut self, kind: EngagementKind) -> &mut Vec<Uuid> {
        match kind {
            EngagementKind::Like => &mut self.likes,
            EngagementKind::Bookmark => &mut self.bookmarks,
        }
    }
}
