//! Post lifecycle, engagement, and amplification handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_core::domain::{EngagementKind, Post, TargetKind};
use ripple_core::engine::RepostOutcome;
use ripple_shared::ApiResponse;
use ripple_shared::dto::{
    CreatePostRequest, EngagementResponse, PinResponse, QuoteRequest, RepostRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(identity.user_id, req.text, req.images, req.location)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let post = state
        .store
        .post(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post with id {} not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.posts.delete(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/repost
pub async fn repost(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<RepostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let kind: TargetKind = req.on_model.parse()?;

    match state
        .reposts
        .repost(identity.user_id, req.original_id, kind)
        .await?
    {
        RepostOutcome::Created(post) => Ok(HttpResponse::Created()
            .json(ApiResponse::ok_with_message(Some(post), "repost created"))),
        RepostOutcome::Removed => Ok(HttpResponse::Ok()
            .json(ApiResponse::ok_with_message(None::<Post>, "repost removed"))),
    }
}

/// POST /api/posts/quote
pub async fn quote(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<QuoteRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let kind: TargetKind = req.on_model.parse()?;

    let post = state
        .reposts
        .quote(
            identity.user_id,
            req.original_id,
            kind,
            req.text,
            req.images,
            req.location,
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// POST /api/posts/{id}/like
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    toggle(&state, identity, path.into_inner(), EngagementKind::Like).await
}

/// POST /api/posts/{id}/bookmark
pub async fn bookmark(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    toggle(&state, identity, path.into_inner(), EngagementKind::Bookmark).await
}

/// POST /api/posts/{id}/pin
pub async fn pin(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let pinned_post = state.posts.pin(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PinResponse { pinned_post })))
}

async fn toggle(
    state: &AppState,
    identity: Identity,
    post_id: Uuid,
    edge: EngagementKind,
) -> AppResult<HttpResponse> {
    let engaged_by = state
        .engagement
        .toggle(identity.user_id, post_id, TargetKind::Post, edge)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(EngagementResponse { engaged_by })))
}
