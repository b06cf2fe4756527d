//! Social graph handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::engine::FollowOutcome;
use ripple_shared::ApiResponse;
use ripple_shared::dto::FollowResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/users/{id}/follow - toggle the follow edge.
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .social
        .toggle_follow(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(FollowResponse {
        following: outcome == FollowOutcome::Followed,
    })))
}
