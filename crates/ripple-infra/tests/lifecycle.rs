//! Post creation, mention fan-out, and the deletion cascade.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::World;
use uuid::Uuid;

use ripple_core::domain::{Comment, Notification, NotificationKind, Post, TargetKind, User};
use ripple_core::engine::{NotificationFanout, PostLifecycle};
use ripple_core::error::{DomainError, StoreError};
use ripple_core::ports::{ContentStore, ImageStore, WriteOp};
use ripple_infra::{InMemoryContentStore, InMemoryImageStore};

#[tokio::test]
async fn create_uploads_images_and_records_ownership() {
    let world = World::new();
    let alice = world.user("alice").await;

    let post = world
        .posts
        .create(
            alice.id,
            "with pics".to_string(),
            vec!["payload-1".to_string(), "payload-2".to_string()],
            "berlin".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(post.images.len(), 2);
    for url in &post.images {
        assert!(world.images.contains(url).await);
    }
    assert_eq!(post.location, "berlin");

    let alice_doc = world.store.user(alice.id).await.unwrap().unwrap();
    assert_eq!(alice_doc.user_posts, vec![post.id]);
}

#[tokio::test]
async fn mentioning_an_existing_user_notifies_exactly_once() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;

    world.post(&alice, "hello @bob").await;

    let feed = world.feed.list(bob.id).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, NotificationKind::Mention);
    assert_eq!(feed[0].from_user, alice.id);
}

#[tokio::test]
async fn mentioning_a_ghost_is_silently_skipped() {
    let world = World::new();
    let alice = world.user("alice").await;

    // Creation succeeds even though nobody is called ghost.
    let post = world.post(&alice, "hi @ghost").await;
    assert!(world.store.post(post.id).await.unwrap().is_some());

    // No notification landed anywhere.
    assert!(world.feed.list(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_an_original_takes_every_wrapper_down() {
    let world = World::new();
    let alice = world.user("alice").await;
    let u1 = world.user("u1").await;
    let u2 = world.user("u2").await;
    let post = world.post(&alice, "doomed").await;

    world.reposts.repost(u1.id, post.id, TargetKind::Post).await.unwrap();
    world.reposts.repost(u2.id, post.id, TargetKind::Post).await.unwrap();

    world.posts.delete(alice.id, post.id).await.unwrap();

    // No wrapper survives.
    assert!(world.store.reposts_of(post.id).await.unwrap().is_empty());
    assert!(world.store.post(post.id).await.unwrap().is_none());

    // Neither reposter still references the post or their wrapper.
    for user in [u1.id, u2.id, alice.id] {
        let doc = world.store.user(user).await.unwrap().unwrap();
        assert!(doc.user_posts.is_empty());
        assert!(doc.reposted_posts.is_empty());
    }
}

#[tokio::test]
async fn deleting_a_wrapper_gives_the_origin_its_count_back() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let post = world.post(&alice, "original").await;

    let wrapper = match world
        .reposts
        .repost(bob.id, post.id, TargetKind::Post)
        .await
        .unwrap()
    {
        ripple_core::engine::RepostOutcome::Created(p) => p,
        other => panic!("expected created wrapper, got {other:?}"),
    };

    world.posts.delete(bob.id, wrapper.id).await.unwrap();

    let origin = world.store.post(post.id).await.unwrap().unwrap();
    assert_eq!(origin.repost_by_num, 0);
    assert!(origin.repost_by.is_empty());

    let bob_doc = world.store.user(bob.id).await.unwrap().unwrap();
    assert!(bob_doc.user_posts.is_empty());
    assert!(bob_doc.reposted_posts.is_empty());
}

#[tokio::test]
async fn deleting_a_quote_decrements_the_quoted_comment() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let post = world.post(&alice, "root").await;
    let comment = world
        .threads
        .comment(alice.id, post.id, "quotable".to_string(), Vec::new())
        .await
        .unwrap();

    let quote = world
        .reposts
        .quote(
            bob.id,
            comment.id,
            TargetKind::Comment,
            "sharing this".to_string(),
            Vec::new(),
            String::new(),
        )
        .await
        .unwrap();
    assert_eq!(
        world
            .store
            .comment(comment.id)
            .await
            .unwrap()
            .unwrap()
            .repost_by_num,
        1
    );

    world.posts.delete(bob.id, quote.id).await.unwrap();

    let comment_doc = world.store.comment(comment.id).await.unwrap().unwrap();
    assert_eq!(comment_doc.repost_by_num, 0);
    assert!(comment_doc.repost_by.is_empty());
}

#[tokio::test]
async fn a_quote_outliving_its_origin_can_still_be_deleted() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let post = world.post(&alice, "soon gone").await;

    let quote = world
        .reposts
        .quote(
            bob.id,
            post.id,
            TargetKind::Post,
            "preserved take".to_string(),
            Vec::new(),
            String::new(),
        )
        .await
        .unwrap();

    // The origin's deletion leaves the quote standing as a snapshot.
    world.posts.delete(alice.id, post.id).await.unwrap();
    assert!(world.store.post(quote.id).await.unwrap().is_some());

    // With the origin gone, there is no counter left to give back; the
    // quote's own deletion must still go through.
    world.posts.delete(bob.id, quote.id).await.unwrap();
    assert!(world.store.post(quote.id).await.unwrap().is_none());

    let bob_doc = world.store.user(bob.id).await.unwrap().unwrap();
    assert!(bob_doc.user_posts.is_empty());
    assert!(bob_doc.reposted_posts.is_empty());
}

#[tokio::test]
async fn delete_is_owner_only_and_clears_a_dangling_pin() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let post = world.post(&alice, "pinned then gone").await;

    assert!(matches!(
        world.posts.delete(bob.id, post.id).await,
        Err(DomainError::Forbidden(_))
    ));

    world.posts.pin(alice.id, post.id).await.unwrap();
    world.posts.delete(alice.id, post.id).await.unwrap();

    let alice_doc = world.store.user(alice.id).await.unwrap().unwrap();
    assert_eq!(alice_doc.pinned_post, None);
}

#[tokio::test]
async fn pin_is_a_single_slot_toggle() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let first = world.post(&alice, "first").await;
    let second = world.post(&alice, "second").await;

    assert_eq!(
        world.posts.pin(alice.id, first.id).await.unwrap(),
        Some(first.id)
    );
    // Pinning another post replaces the first.
    assert_eq!(
        world.posts.pin(alice.id, second.id).await.unwrap(),
        Some(second.id)
    );
    // Pinning the same post again unpins.
    assert_eq!(world.posts.pin(alice.id, second.id).await.unwrap(), None);

    // Only the author may pin.
    assert!(matches!(
        world.posts.pin(bob.id, first.id).await,
        Err(DomainError::Forbidden(_))
    ));
}

// -- simulated store failure ------------------------------------------------

/// Store wrapper that can be armed to reject the next atomic batch,
/// simulating a backend failure mid-deletion.
struct FailingStore {
    inner: InMemoryContentStore,
    fail_batches: AtomicBool,
}

impl FailingStore {
    fn new() -> Self {
        Self {
            inner: InMemoryContentStore::new(),
            fail_batches: AtomicBool::new(false),
        }
    }

    fn arm(&self) {
        self.fail_batches.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContentStore for FailingStore {
    async fn user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.inner.user(id).await
    }
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.inner.user_by_username(username).await
    }
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.inner.user_by_email(email).await
    }
    async fn put_user(&self, user: User) -> Result<(), StoreError> {
        self.inner.put_user(user).await
    }
    async fn users_referencing(&self, post_ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        self.inner.users_referencing(post_ids).await
    }
    async fn post(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        self.inner.post(id).await
    }
    async fn put_post(&self, post: Post) -> Result<(), StoreError> {
        self.inner.put_post(post).await
    }
    async fn repost_by_actor(
        &self,
        actor_id: Uuid,
        origin_id: Uuid,
    ) -> Result<Option<Post>, StoreError> {
        self.inner.repost_by_actor(actor_id, origin_id).await
    }
    async fn reposts_of(&self, origin_id: Uuid) -> Result<Vec<Post>, StoreError> {
        self.inner.reposts_of(origin_id).await
    }
    async fn comment(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        self.inner.comment(id).await
    }
    async fn put_comment(&self, comment: Comment) -> Result<(), StoreError> {
        self.inner.put_comment(comment).await
    }
    async fn notification(&self, id: Uuid) -> Result<Option<Notification>, StoreError> {
        self.inner.notification(id).await
    }
    async fn put_notification(&self, notification: Notification) -> Result<(), StoreError> {
        self.inner.put_notification(notification).await
    }
    async fn notifications_for(&self, user_id: Uuid) -> Result<Vec<Notification>, StoreError> {
        self.inner.notifications_for(user_id).await
    }
    async fn delete_notification(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.delete_notification(id).await
    }
    async fn delete_notifications_for(&self, user_id: Uuid) -> Result<(), StoreError> {
        self.inner.delete_notifications_for(user_id).await
    }
    async fn adjust_amplification(
        &self,
        target_id: Uuid,
        target_kind: TargetKind,
        actor_id: Uuid,
        delta: i64,
    ) -> Result<(), StoreError> {
        self.inner
            .adjust_amplification(target_id, target_kind, actor_id, delta)
            .await
    }
    async fn apply_batch(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        if self.fail_batches.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated outage".to_string()));
        }
        self.inner.apply_batch(ops).await
    }
}

#[tokio::test]
async fn failed_delete_leaves_no_partial_state() {
    let store = Arc::new(FailingStore::new());
    let images = Arc::new(InMemoryImageStore::new());
    let dyn_store: Arc<dyn ContentStore> = store.clone();
    let dyn_images: Arc<dyn ImageStore> = images.clone();
    let fanout = NotificationFanout::new(dyn_store.clone());
    let posts = PostLifecycle::new(dyn_store.clone(), dyn_images, fanout.clone());
    let reposts = ripple_core::engine::RepostEngine::new(dyn_store.clone(), fanout);

    let alice = User::new(
        "alice".to_string(),
        "Alice Example".to_string(),
        "alice@example.com".to_string(),
        "hash".to_string(),
    );
    let bob = User::new(
        "bob".to_string(),
        "Bob Example".to_string(),
        "bob@example.com".to_string(),
        "hash".to_string(),
    );
    store.put_user(alice.clone()).await.unwrap();
    store.put_user(bob.clone()).await.unwrap();

    let post = posts
        .create(
            alice.id,
            "survivor".to_string(),
            vec!["payload".to_string()],
            String::new(),
        )
        .await
        .unwrap();
    reposts
        .repost(bob.id, post.id, TargetKind::Post)
        .await
        .unwrap();

    store.arm();
    let result = posts.delete(alice.id, post.id).await;
    assert!(result.is_err());

    // Nothing changed anywhere: post and wrapper still present, counters
    // intact, user arrays intact, images still hosted.
    let post_doc = store.post(post.id).await.unwrap().unwrap();
    assert_eq!(post_doc.repost_by_num, 1);
    assert_eq!(store.reposts_of(post.id).await.unwrap().len(), 1);

    let alice_doc = store.user(alice.id).await.unwrap().unwrap();
    assert_eq!(alice_doc.user_posts, vec![post.id]);
    let bob_doc = store.user(bob.id).await.unwrap().unwrap();
    assert_eq!(bob_doc.reposted_posts, vec![post.id]);

    for url in &post_doc.images {
        assert!(images.contains(url).await);
    }
}
