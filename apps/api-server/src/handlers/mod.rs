//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod notifications;
mod posts;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post lifecycle, engagement, amplification
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("/repost", web::post().to(posts::repost))
                    .route("/quote", web::post().to(posts::quote))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::delete().to(posts::delete))
                    .route("/{id}/like", web::post().to(posts::like))
                    .route("/{id}/bookmark", web::post().to(posts::bookmark))
                    .route("/{id}/pin", web::post().to(posts::pin))
                    .route("/{id}/comments", web::post().to(comments::create)),
            )
            // Comment threads
            .service(
                web::scope("/comments")
                    .route("/{id}/replies", web::post().to(comments::reply))
                    .route("/{id}", web::delete().to(comments::delete))
                    .route("/{id}/like", web::post().to(comments::like))
                    .route("/{id}/bookmark", web::post().to(comments::bookmark))
                    .route("/{id}/thread", web::get().to(comments::thread)),
            )
            // Social graph
            .service(web::scope("/users").route("/{id}/follow", web::post().to(users::follow)))
            // Notification feed
            .service(
                web::scope("/notifications")
                    .route("", web::get().to(notifications::list))
                    .route("", web::delete().to(notifications::delete_all))
                    .route("/read-all", web::post().to(notifications::mark_all_read))
                    .route("/{id}/read", web::post().to(notifications::mark_read))
                    .route("/{id}", web::delete().to(notifications::delete)),
            ),
    );
}
