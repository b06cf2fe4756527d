//! The content-graph consistency engine: every mutation of the User, Post,
//! Comment, and Notification collections that carries an invariant.
//!
//! Each service holds the store (and collaborators) behind ports and runs
//! its sub-steps in order within one call; writes that must land together
//! go through the store's atomic batch.

mod engagement;
mod fanout;
mod feed;
mod lifecycle;
mod mention;
mod repost;
mod social;
mod thread;

pub use engagement::EngagementToggler;
pub use fanout::NotificationFanout;
pub use feed::NotificationFeed;
pub use lifecycle::PostLifecycle;
pub use mention::mentions;
pub use repost::{RepostEngine, RepostOutcome};
pub use social::{FollowOutcome, SocialGraph};
pub use thread::CommentThreads;

use crate::domain::MAX_IMAGES;
use crate::error::DomainError;

/// Authored content needs text or images, and at most [`MAX_IMAGES`] images.
fn ensure_content(text: &str, images: &[String]) -> Result<(), DomainError> {
    if text.trim().is_empty() && images.is_empty() {
        return Err(DomainError::Validation(
            "content needs text or images".to_string(),
        ));
    }
    if images.len() > MAX_IMAGES {
        return Err(DomainError::Validation(format!(
            "at most {MAX_IMAGES} images allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_is_rejected() {
        assert!(ensure_content("", &[]).is_err());
        assert!(ensure_content("   ", &[]).is_err());
    }

    #[test]
    fn text_or_images_is_enough() {
        assert!(ensure_content("hello", &[]).is_ok());
        assert!(ensure_content("", &["mem://images/a".to_string()]).is_ok());
    }

    #[test]
    fn image_count_is_capped() {
        let images: Vec<String> = (0..5).map(|i| format!("mem://images/{i}")).collect();
        assert!(ensure_content("hi", &images).is_err());
        assert!(ensure_content("hi", &images[..4]).is_ok());
    }
}
