use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EngagementKind;

/// Comment entity. `post_id` is the root post of the thread and is inherited
/// from the parent on replies, so it always equals the root ancestor's.
///
/// Deletion is soft: `is_deleted` flips on and the node is detached from its
/// parent's `replies`, but `parent_id` and the node's own `replies` are
/// never severed, so children stay walkable and the node renders as a
/// placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub text: String,
    pub images: Vec<String>,
    pub replies: Vec<Uuid>,
    pub likes: Vec<Uuid>,
    pub bookmarks: Vec<Uuid>,
    pub repost_by: Vec<Uuid>,
    pub repost_by_num: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(
        author_id: Uuid,
        post_id: Uuid,
        parent_id: Option<Uuid>,
        text: String,
        images: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            post_id,
            parent_id,
            text,
            images,
            replies: Vec::new(),
            likes: Vec::new(),
            bookmarks: Vec::new(),
            repost_by: Vec::new(),
            repost_by_num: 0,
            is_deleted: false,
            created_at: Utc::now(),
        }
    }

    pub fn engaged_set_mut(&mut self, kind: EngagementKind) -> &mut Vec<Uuid> {
        match kind {
            EngagementKind::Like => &mut self.likes,
            EngagementKind::Bookmark => &mut self.bookmarks,
        }
    }
}
