use async_trait::async_trait;

/// Image store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed: {0}")]
    Delete(String),
}

/// Image host collaborator: accepts raw image payloads, hands back a stable
/// content URL, and deletes by that URL. Deletion is best-effort; callers
/// log failures and move on.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, payload: &str) -> Result<String, ImageError>;
    async fn delete(&self, url: &str) -> Result<(), ImageError>;
}
