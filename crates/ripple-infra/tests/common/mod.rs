#![allow(dead_code)]

use std::sync::Arc;

use ripple_core::domain::{Post, User};
use ripple_core::engine::{
    CommentThreads, EngagementToggler, NotificationFanout, NotificationFeed, PostLifecycle,
    RepostEngine, SocialGraph,
};
use ripple_core::ports::{ContentStore, ImageStore};
use ripple_infra::{InMemoryContentStore, InMemoryImageStore};

/// One fully wired content-graph engine over fresh in-memory backends.
pub struct World {
    pub store: Arc<InMemoryContentStore>,
    pub images: Arc<InMemoryImageStore>,
    pub posts: PostLifecycle,
    pub threads: CommentThreads,
    pub engagement: EngagementToggler,
    pub reposts: RepostEngine,
    pub social: SocialGraph,
    pub feed: NotificationFeed,
}

impl World {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryContentStore::new());
        let images = Arc::new(InMemoryImageStore::new());
        let dyn_store: Arc<dyn ContentStore> = store.clone();
        let dyn_images: Arc<dyn ImageStore> = images.clone();
        let fanout = NotificationFanout::new(dyn_store.clone());

        Self {
            posts: PostLifecycle::new(dyn_store.clone(), dyn_images, fanout.clone()),
            threads: CommentThreads::new(dyn_store.clone(), fanout.clone()),
            engagement: EngagementToggler::new(dyn_store.clone(), fanout.clone()),
            reposts: RepostEngine::new(dyn_store.clone(), fanout.clone()),
            social: SocialGraph::new(dyn_store.clone(), fanout),
            feed: NotificationFeed::new(dyn_store),
            store,
            images,
        }
    }

    /// Register a user directly in the store.
    pub async fn user(&self, name: &str) -> User {
        let user = User::new(
            name.to_string(),
            format!("{name} Example"),
            format!("{name}@example.com"),
            "argon2-hash".to_string(),
        );
        self.store.put_user(user.clone()).await.unwrap();
        user
    }

    /// Create an original text post through the lifecycle service.
    pub async fn post(&self, author: &User, text: &str) -> Post {
        self.posts
            .create(author.id, text.to_string(), Vec::new(), String::new())
            .await
            .unwrap()
    }
}
