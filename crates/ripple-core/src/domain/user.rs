use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EngagementKind, EngagementRef};

/// User entity.
///
/// `followers`/`followings` are kept symmetric across the two documents by
/// dual update. `likes`/`bookmarks` are the canonical side of the engagement
/// edges; the matching sets on posts and comments are derived indexes.
/// `reposted_posts` tracks the *original* ids the user has reposted or
/// quoted; `user_posts` owns every post the user authored, wrappers
/// included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub bio: String,
    pub link: String,
    pub profile_img: Option<String>,
    pub cover_img: Option<String>,
    pub followers: Vec<Uuid>,
    pub followings: Vec<Uuid>,
    pub likes: Vec<EngagementRef>,
    pub bookmarks: Vec<EngagementRef>,
    pub reposted_posts: Vec<Uuid>,
    pub user_posts: Vec<Uuid>,
    pub pinned_post: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and empty graph edges.
    pub fn new(username: String, full_name: String, email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            full_name,
            email,
            password_hash,
            bio: String::new(),
            link: String::new(),
            profile_img: None,
            cover_img: None,
            followers: Vec::new(),
            followings: Vec::new(),
            likes: Vec::new(),
            bookmarks: Vec::new(),
            reposted_posts: Vec::new(),
            user_posts: Vec::new(),
            pinned_post: None,
            created_at: Utc::now(),
        }
    }

    /// The user's engagement array for one edge kind.
    pub fn engagements(&self, kind: EngagementKind) -> &Vec<EngagementRef> {
        match kind {
            EngagementKind::Like => &self.likes,
            EngagementKind::Bookmark => &self.bookmarks,
        }
    }

    pub fn engagements_mut(&mut self, kind: EngagementKind) -> &mut Vec<EngagementRef> {
        match kind {
            EngagementKind::Like => &mut self.likes,
            EngagementKind::Bookmark => &mut self.bookmarks,
        }
    }
}
