//! Notification feed handlers. Every operation is scoped to the
//! authenticated recipient.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use ripple_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let feed = state.feed.list(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(feed)))
}

/// POST /api/notifications/{id}/read
pub async fn mark_read(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let notification = state
        .feed
        .mark_read(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(notification)))
}

/// POST /api/notifications/read-all
pub async fn mark_all_read(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    state.feed.mark_all_read(identity.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/notifications/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .feed
        .delete(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /api/notifications
pub async fn delete_all(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    state.feed.delete_all(identity.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
