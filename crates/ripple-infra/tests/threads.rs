//! Comment thread structure: replies, soft delete, ancestor chains.

mod common;

use common::World;

use ripple_core::error::DomainError;
use ripple_core::ports::ContentStore;
use uuid::Uuid;

#[tokio::test]
async fn reply_inherits_the_root_post_id() {
    let world = World::new();
    let alice = world.user("alice").await;
    let post = world.post(&alice, "root").await;

    let top = world
        .threads
        .comment(alice.id, post.id, "top".to_string(), Vec::new())
        .await
        .unwrap();
    let mid = world
        .threads
        .reply(alice.id, top.id, "mid".to_string(), Vec::new())
        .await
        .unwrap();
    let leaf = world
        .threads
        .reply(alice.id, mid.id, "leaf".to_string(), Vec::new())
        .await
        .unwrap();

    assert_eq!(mid.post_id, post.id);
    assert_eq!(leaf.post_id, post.id);
    assert_eq!(leaf.parent_id, Some(mid.id));

    let post_doc = world.store.post(post.id).await.unwrap().unwrap();
    assert_eq!(post_doc.comments, vec![top.id]);
    let top_doc = world.store.comment(top.id).await.unwrap().unwrap();
    assert_eq!(top_doc.replies, vec![mid.id]);
}

#[tokio::test]
async fn soft_delete_detaches_but_keeps_children_walkable() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let post = world.post(&alice, "root").await;

    let top = world
        .threads
        .comment(alice.id, post.id, "top".to_string(), Vec::new())
        .await
        .unwrap();
    let mid = world
        .threads
        .reply(bob.id, top.id, "mid".to_string(), Vec::new())
        .await
        .unwrap();
    let leaf = world
        .threads
        .reply(alice.id, mid.id, "leaf".to_string(), Vec::new())
        .await
        .unwrap();

    world.threads.delete(bob.id, mid.id).await.unwrap();

    // Flag set, detached from the parent's listing.
    let mid_doc = world.store.comment(mid.id).await.unwrap().unwrap();
    assert!(mid_doc.is_deleted);
    let top_doc = world.store.comment(top.id).await.unwrap().unwrap();
    assert!(!top_doc.replies.contains(&mid.id));

    // But the child still resolves through the deleted node.
    let leaf_doc = world.store.comment(leaf.id).await.unwrap().unwrap();
    assert_eq!(leaf_doc.parent_id, Some(mid.id));
    assert_eq!(mid_doc.replies, vec![leaf.id]);

    // Ancestor walk from the leaf reaches the deleted node and beyond,
    // root-first.
    let chain = world.threads.ancestor_chain(leaf.id).await.unwrap();
    let ids: Vec<Uuid> = chain.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![top.id, mid.id]);
    assert!(chain[1].is_deleted);
}

#[tokio::test]
async fn only_the_author_can_delete() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let post = world.post(&alice, "root").await;
    let comment = world
        .threads
        .comment(alice.id, post.id, "mine".to_string(), Vec::new())
        .await
        .unwrap();

    let result = world.threads.delete(bob.id, comment.id).await;
    assert!(matches!(result, Err(DomainError::Forbidden(_))));

    let doc = world.store.comment(comment.id).await.unwrap().unwrap();
    assert!(!doc.is_deleted);
}

#[tokio::test]
async fn replying_to_a_missing_comment_is_not_found() {
    let world = World::new();
    let alice = world.user("alice").await;

    let result = world
        .threads
        .reply(alice.id, Uuid::new_v4(), "orphan".to_string(), Vec::new())
        .await;
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn empty_comment_is_rejected() {
    let world = World::new();
    let alice = world.user("alice").await;
    let post = world.post(&alice, "root").await;

    let result = world
        .threads
        .comment(alice.id, post.id, "".to_string(), Vec::new())
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    let too_many: Vec<String> = (0..5).map(|i| format!("img-{i}")).collect();
    let result = world
        .threads
        .comment(alice.id, post.id, "pics".to_string(), too_many)
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}
