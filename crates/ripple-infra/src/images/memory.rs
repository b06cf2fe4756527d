//! In-memory image host - used in tests and when no external host is
//! configured. Hands back stable `mem://` URLs; contents are lost on
//! process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use ripple_core::ports::{ImageError, ImageStore};

pub struct InMemoryImageStore {
    objects: RwLock<HashMap<String, String>>,
}

impl InMemoryImageStore {
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Whether a URL still resolves to stored content.
    pub async fn contains(&self, url: &str) -> bool {
        self.objects.read().await.contains_key(url)
    }
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload(&self, payload: &str) -> Result<String, ImageError> {
        let url = format!("mem://images/{}", Uuid::new_v4());
        let mut objects = self.objects.write().await;
        objects.insert(url.clone(), payload.to_string());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<(), ImageError> {
        // Best-effort contract: deleting an unknown URL is not an error.
        let mut objects = self.objects.write().await;
        objects.remove(url);
        Ok(())
    }
}
