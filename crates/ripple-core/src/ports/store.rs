use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Notification, Post, TargetKind, User};
use crate::error::StoreError;

/// One write in an atomic batch.
///
/// `Amplify` is the store-level counter primitive: it adjusts
/// `repost_by_num` and the `repost_by` membership of one target in a single
/// atomic step, so concurrent amplifications never lose updates the way an
/// application-level read-modify-write would.
#[derive(Debug, Clone)]
pub enum WriteOp {
    PutUser(User),
    PutPost(Post),
    PutComment(Comment),
    PutNotification(Notification),
    DeletePost(Uuid),
    Amplify {
        target_id: Uuid,
        target_kind: TargetKind,
        actor_id: Uuid,
        delta: i64,
    },
}

/// Persistent repository of the four content-graph collections.
///
/// `apply_batch` is the transaction primitive: every op in the batch commits
/// or none do. Operations that must keep two documents in sync (engagement
/// dual writes, follow symmetry, post deletion cascades) go through it.
#[async_trait]
pub trait ContentStore: Send + Sync {
    // -- users
    async fn user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn put_user(&self, user: User) -> Result<(), StoreError>;

    /// Every user whose `user_posts` or `reposted_posts` reference any of
    /// the given post ids. Used by the post-deletion sweep.
    async fn users_referencing(&self, post_ids: &[Uuid]) -> Result<Vec<User>, StoreError>;

    // -- posts
    async fn post(&self, id: Uuid) -> Result<Option<Post>, StoreError>;
    async fn put_post(&self, post: Post) -> Result<(), StoreError>;

    /// The derivative wrapper a specific actor created for a specific
    /// origin, if any. Backs the repost toggle.
    async fn repost_by_actor(
        &self,
        actor_id: Uuid,
        origin_id: Uuid,
    ) -> Result<Option<Post>, StoreError>;

    /// Every repost wrapper pointing at the given origin.
    async fn reposts_of(&self, origin_id: Uuid) -> Result<Vec<Post>, StoreError>;

    // -- comments
    async fn comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError>;
    async fn put_comment(&self, comment: Comment) -> Result<(), StoreError>;

    // -- notifications
    async fn notification(&self, id: Uuid) -> Result<Option<Notification>, StoreError>;
    async fn put_notification(&self, notification: Notification) -> Result<(), StoreError>;

    /// The recipient's feed, newest first.
    async fn notifications_for(&self, user_id: Uuid) -> Result<Vec<Notification>, StoreError>;
    async fn delete_notification(&self, id: Uuid) -> Result<(), StoreError>;
    async fn delete_notifications_for(&self, user_id: Uuid) -> Result<(), StoreError>;

    // -- consistency primitives
    /// Atomic counter adjustment on one target; see [`WriteOp::Amplify`].
    async fn adjust_amplification(
        &self,
        target_id: Uuid,
        target_kind: TargetKind,
        actor_id: Uuid,
        delta: i64,
    ) -> Result<(), StoreError>;

    /// Apply every op or none of them.
    async fn apply_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError>;
}
