//! Follow edges and the notification feed.

mod common;

use common::World;

use ripple_core::domain::NotificationKind;
use ripple_core::engine::FollowOutcome;
use ripple_core::error::DomainError;
use ripple_core::ports::ContentStore;

#[tokio::test]
async fn follow_writes_both_sides_and_unfollow_reverts() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;

    let outcome = world.social.toggle_follow(bob.id, alice.id).await.unwrap();
    assert_eq!(outcome, FollowOutcome::Followed);

    let alice_doc = world.store.user(alice.id).await.unwrap().unwrap();
    let bob_doc = world.store.user(bob.id).await.unwrap().unwrap();
    assert_eq!(alice_doc.followers, vec![bob.id]);
    assert_eq!(bob_doc.followings, vec![alice.id]);

    let outcome = world.social.toggle_follow(bob.id, alice.id).await.unwrap();
    assert_eq!(outcome, FollowOutcome::Unfollowed);

    let alice_doc = world.store.user(alice.id).await.unwrap().unwrap();
    let bob_doc = world.store.user(bob.id).await.unwrap().unwrap();
    assert!(alice_doc.followers.is_empty());
    assert!(bob_doc.followings.is_empty());
}

#[tokio::test]
async fn following_yourself_is_rejected() {
    let world = World::new();
    let alice = world.user("alice").await;

    let result = world.social.toggle_follow(alice.id, alice.id).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn only_a_fresh_follow_notifies() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;

    world.social.toggle_follow(bob.id, alice.id).await.unwrap();
    let feed = world.feed.list(alice.id).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].kind, NotificationKind::Follow);
    assert_eq!(feed[0].from_user, bob.id);

    // Unfollowing adds nothing.
    world.social.toggle_follow(bob.id, alice.id).await.unwrap();
    assert_eq!(world.feed.list(alice.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn feed_is_owner_scoped() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let carol = world.user("carol").await;

    world.social.toggle_follow(bob.id, alice.id).await.unwrap();
    let feed = world.feed.list(alice.id).await.unwrap();
    let note = &feed[0];

    // Carol cannot read or mutate alice's notification.
    assert!(matches!(
        world.feed.mark_read(carol.id, note.id).await,
        Err(DomainError::Forbidden(_))
    ));
    assert!(matches!(
        world.feed.delete(carol.id, note.id).await,
        Err(DomainError::Forbidden(_))
    ));

    // The owner can.
    world.feed.mark_read(alice.id, note.id).await.unwrap();
    let feed = world.feed.list(alice.id).await.unwrap();
    assert!(feed[0].is_read);
}

#[tokio::test]
async fn mark_all_and_delete_all_touch_only_the_owner() {
    let world = World::new();
    let alice = world.user("alice").await;
    let bob = world.user("bob").await;
    let carol = world.user("carol").await;

    world.social.toggle_follow(bob.id, alice.id).await.unwrap();
    world.social.toggle_follow(carol.id, alice.id).await.unwrap();
    world.social.toggle_follow(alice.id, bob.id).await.unwrap();

    world.feed.mark_all_read(alice.id).await.unwrap();
    assert!(world
        .feed
        .list(alice.id)
        .await
        .unwrap()
        .iter()
        .all(|n| n.is_read));
    // Bob's follow notification from alice is untouched.
    assert!(!world.feed.list(bob.id).await.unwrap()[0].is_read);

    world.feed.delete_all(alice.id).await.unwrap();
    assert!(world.feed.list(alice.id).await.unwrap().is_empty());
    assert_eq!(world.feed.list(bob.id).await.unwrap().len(), 1);
}
