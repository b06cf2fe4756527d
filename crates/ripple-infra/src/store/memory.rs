//! In-memory content store over four document collections.
//!
//! Atomicity model: every write path funnels into `apply_batch`, which
//! applies the ops to a draft copy of the collections under the write lock
//! and swaps it in only when every op succeeded. A failing op leaves the
//! live collections untouched, which is exactly the all-or-nothing contract
//! the post-deletion cascade relies on. The amplification counter is
//! adjusted inside the same lock, so concurrent increments cannot lose
//! updates. Note: data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ripple_core::domain::{Comment, Notification, Post, TargetKind, User};
use ripple_core::error::StoreError;
use ripple_core::ports::{ContentStore, WriteOp};

#[derive(Default, Clone)]
struct Collections {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
    notifications: HashMap<Uuid, Notification>,
}

pub struct InMemoryContentStore {
    state: RwLock<Collections>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(Collections::default()),
        }
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_op(cols: &mut Collections, op: WriteOp) -> Result<(), StoreError> {
    match op {
        WriteOp::PutUser(user) => {
            cols.users.insert(user.id, user);
        }
        WriteOp::PutPost(post) => {
            cols.posts.insert(post.id, post);
        }
        WriteOp::PutComment(comment) => {
            cols.comments.insert(comment.id, comment);
        }
        WriteOp::PutNotification(notification) => {
            cols.notifications.insert(notification.id, notification);
        }
        WriteOp::DeletePost(id) => {
            cols.posts.remove(&id).ok_or(StoreError::NotFound)?;
        }
        WriteOp::Amplify {
            target_id,
            target_kind,
            actor_id,
            delta,
        } => match target_kind {
            TargetKind::Post => {
                let post = cols.posts.get_mut(&target_id).ok_or(StoreError::NotFound)?;
                bump(&mut post.repost_by_num, &mut post.repost_by, actor_id, delta);
            }
            TargetKind::Comment => {
                let comment = cols
                    .comments
                    .get_mut(&target_id)
                    .ok_or(StoreError::NotFound)?;
                bump(
                    &mut comment.repost_by_num,
                    &mut comment.repost_by,
                    actor_id,
                    delta,
                );
            }
        },
    }
    Ok(())
}

/// Counter and membership move together, always.
fn bump(count: &mut i64, by: &mut Vec<Uuid>, actor_id: Uuid, delta: i64) {
    *count += delta;
    if delta > 0 {
        if !by.contains(&actor_id) {
            by.push(actor_id);
        }
    } else {
        by.retain(|id| *id != actor_id);
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    async fn user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn put_user(&self, user: User) -> Result<(), StoreError> {
        self.apply_batch(vec![WriteOp::PutUser(user)]).await
    }

    async fn users_referencing(&self, post_ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .filter(|u| {
                u.user_posts.iter().any(|id| post_ids.contains(id))
                    || u.reposted_posts.iter().any(|id| post_ids.contains(id))
            })
            .cloned()
            .collect())
    }

    async fn post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn put_post(&self, post: Post) -> Result<(), StoreError> {
        self.apply_batch(vec![WriteOp::PutPost(post)]).await
    }

    async fn repost_by_actor(
        &self,
        actor_id: Uuid,
        origin_id: Uuid,
    ) -> Result<Option<Post>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .values()
            .find(|p| p.author_id == actor_id && p.repost_origin() == Some(origin_id))
            .cloned())
    }

    async fn reposts_of(&self, origin_id: Uuid) -> Result<Vec<Post>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .values()
            .filter(|p| p.repost_origin() == Some(origin_id))
            .cloned()
            .collect())
    }

    async fn comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        Ok(self.state.read().await.comments.get(&id).cloned())
    }

    async fn put_comment(&self, comment: Comment) -> Result<(), StoreError> {
        self.apply_batch(vec![WriteOp::PutComment(comment)]).await
    }

    async fn notification(&self, id: Uuid) -> Result<Option<Notification>, StoreError> {
        Ok(self.state.read().await.notifications.get(&id).cloned())
    }

    async fn put_notification(&self, notification: Notification) -> Result<(), StoreError> {
        self.apply_batch(vec![WriteOp::PutNotification(notification)])
            .await
    }

    async fn notifications_for(&self, user_id: Uuid) -> Result<Vec<Notification>, StoreError> {
        let state = self.state.read().await;
        let mut feed: Vec<Notification> = state
            .notifications
            .values()
            .filter(|n| n.to_user == user_id)
            .cloned()
            .collect();
        feed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(feed)
    }

    async fn delete_notification(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .notifications
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    async fn delete_notifications_for(&self, user_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state.notifications.retain(|_, n| n.to_user != user_id);
        Ok(())
    }

    async fn adjust_amplification(
        &self,
        target_id: Uuid,
        target_kind: TargetKind,
        actor_id: Uuid,
        delta: i64,
    ) -> Result<(), StoreError> {
        self.apply_batch(vec![WriteOp::Amplify {
            target_id,
            target_kind,
            actor_id,
            delta,
        }])
        .await
    }

    async fn apply_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        // Draft-and-swap keeps the live collections untouched when any op
        // fails partway through the batch.
        let mut draft = state.clone();
        for op in ops {
            apply_op(&mut draft, op)?;
        }
        *state = draft;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::domain::PostBody;

    fn user(name: &str) -> User {
        User::new(
            name.to_string(),
            name.to_string(),
            format!("{name}@example.com"),
            "hash".to_string(),
        )
    }

    fn post(author: &User) -> Post {
        Post::new(
            author.id,
            "hello".to_string(),
            Vec::new(),
            String::new(),
            PostBody::Original,
        )
    }

    #[tokio::test]
    async fn batch_failure_applies_nothing() {
        let store = InMemoryContentStore::new();
        let alice = user("alice");
        let p = post(&alice);

        // Second op targets a post that does not exist, so the first op
        // must not land either.
        let result = store
            .apply_batch(vec![
                WriteOp::PutUser(alice.clone()),
                WriteOp::DeletePost(Uuid::new_v4()),
            ])
            .await;
        assert!(result.is_err());
        assert!(store.user(alice.id).await.unwrap().is_none());

        store
            .apply_batch(vec![WriteOp::PutUser(alice.clone()), WriteOp::PutPost(p.clone())])
            .await
            .unwrap();
        assert!(store.user(alice.id).await.unwrap().is_some());
        assert!(store.post(p.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn amplify_moves_count_and_membership_together() {
        let store = InMemoryContentStore::new();
        let alice = user("alice");
        let bob = user("bob");
        let p = post(&alice);
        store.put_post(p.clone()).await.unwrap();

        store
            .adjust_amplification(p.id, TargetKind::Post, bob.id, 1)
            .await
            .unwrap();
        let amplified = store.post(p.id).await.unwrap().unwrap();
        assert_eq!(amplified.repost_by_num, 1);
        assert_eq!(amplified.repost_by, vec![bob.id]);

        store
            .adjust_amplification(p.id, TargetKind::Post, bob.id, -1)
            .await
            .unwrap();
        let restored = store.post(p.id).await.unwrap().unwrap();
        assert_eq!(restored.repost_by_num, 0);
        assert!(restored.repost_by.is_empty());
    }

    #[tokio::test]
    async fn amplify_on_missing_target_is_not_found() {
        let store = InMemoryContentStore::new();
        let result = store
            .adjust_amplification(Uuid::new_v4(), TargetKind::Comment, Uuid::new_v4(), 1)
            .await;
        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn lookup_by_username_and_email() {
        let store = InMemoryContentStore::new();
        let alice = user("alice");
        store.put_user(alice.clone()).await.unwrap();

        let by_name = store.user_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, alice.id);
        let by_email = store
            .user_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id, alice.id);
        assert!(store.user_by_username("nobody").await.unwrap().is_none());
    }
}
