//! Content-graph entities and the reference types they share.

mod comment;
mod notification;
mod post;
mod user;

pub use comment::Comment;
pub use notification::{Notification, NotificationKind};
pub use post::{AuthorSnapshot, Post, PostBody, QuoteSource, RepostSource};
pub use user::User;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Upper bound on attached images for posts and comments.
pub const MAX_IMAGES: usize = 4;

/// The two kinds of content an engagement or amplification edge can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Post,
    Comment,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Post => write!(f, "Post"),
            TargetKind::Comment => write!(f, "Comment"),
        }
    }
}

impl FromStr for TargetKind {
    type Err = DomainError;

    /// Strict parse: anything other than `Post` or `Comment` is a
    /// validation error, never silently defaulted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Post" => Ok(TargetKind::Post),
            "Comment" => Ok(TargetKind::Comment),
            other => Err(DomainError::Validation(format!(
                "unknown target kind: {other}"
            ))),
        }
    }
}

/// The two engagement edges a user can toggle on content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementKind {
    Like,
    Bookmark,
}

/// One entry in a user's `likes`/`bookmarks` array: the engaged item plus
/// which collection it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngagementRef {
    pub item: Uuid,
    pub kind: TargetKind,
}
