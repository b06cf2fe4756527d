//! Comment thread handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::domain::{EngagementKind, TargetKind};
use ripple_shared::ApiResponse;
use ripple_shared::dto::{CreateCommentRequest, EngagementResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/{id}/comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let comment = state
        .threads
        .comment(identity.user_id, path.into_inner(), req.text, req.images)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(comment)))
}

/// POST /api/comments/{id}/replies
pub async fn reply(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let comment = state
        .threads
        .reply(identity.user_id, path.into_inner(), req.text, req.images)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .threads
        .delete(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/comments/{id}/thread - ancestors of a focused comment,
/// root-first.
pub async fn thread(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let chain = state.threads.ancestor_chain(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(chain)))
}

/// POST /api/comments/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    toggle(&state, identity, path.into_inner(), EngagementKind::Like).await
}

/// POST /api/comments/{id}/bookmark
pub async fn bookmark(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    toggle(&state, identity, path.into_inner(), EngagementKind::Bookmark).await
}

async fn toggle(
    state: &AppState,
    identity: Identity,
    comment_id: Uuid,
    edge: EngagementKind,
) -> AppResult<HttpResponse> {
    let engaged_by = state
        .engagement
        .toggle(identity.user_id, comment_id, TargetKind::Comment, edge)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(EngagementResponse { engaged_by })))
}
