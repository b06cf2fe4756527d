//! Application state - shared across all handlers.

use std::sync::Arc;

use ripple_core::engine::{
    CommentThreads, EngagementToggler, NotificationFanout, NotificationFeed, PostLifecycle,
    RepostEngine, SocialGraph,
};
use ripple_core::ports::{ContentStore, ImageStore};
use ripple_infra::{InMemoryContentStore, InMemoryImageStore};

/// Shared application state: the store and image host behind their ports,
/// plus one instance of each content-graph service.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContentStore>,
    pub images: Arc<dyn ImageStore>,
    pub posts: PostLifecycle,
    pub threads: CommentThreads,
    pub engagement: EngagementToggler,
    pub reposts: RepostEngine,
    pub social: SocialGraph,
    pub feed: NotificationFeed,
}

impl AppState {
    pub fn new() -> Self {
        let store: Arc<dyn ContentStore> = Arc::new(InMemoryContentStore::new());
        let images: Arc<dyn ImageStore> = Arc::new(InMemoryImageStore::new());
        let fanout = NotificationFanout::new(store.clone());

        let state = Self {
            posts: PostLifecycle::new(store.clone(), images.clone(), fanout.clone()),
            threads: CommentThreads::new(store.clone(), fanout.clone()),
            engagement: EngagementToggler::new(store.clone(), fanout.clone()),
            reposts: RepostEngine::new(store.clone(), fanout.clone()),
            social: SocialGraph::new(store.clone(), fanout),
            feed: NotificationFeed::new(store.clone()),
            store,
            images,
        };

        tracing::info!("Application state initialized");
        state
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
