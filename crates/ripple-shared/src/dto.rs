//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub created_at: String,
}

/// Request to create an original post. `images` carries raw image payloads
/// (data URLs); the server uploads them and stores the resulting URLs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: String,
}

/// Request to repost a post or comment. `on_model` must be exactly
/// `Post` or `Comment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepostRequest {
    pub original_id: Uuid,
    pub on_model: String,
}

/// Request to quote a post or comment with the actor's own content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub original_id: Uuid,
    pub on_model: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub location: String,
}

/// Request to create a comment or a reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Updated engagement set for a target after a toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementResponse {
    pub engaged_by: Vec<Uuid>,
}

/// The actor's pinned post after a pin toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinResponse {
    pub pinned_post: Option<Uuid>,
}

/// Follow toggle outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowResponse {
    pub following: bool,
}
