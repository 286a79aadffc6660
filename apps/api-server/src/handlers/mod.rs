//! REST handlers and route configuration.

mod auth;
mod feed;
mod health;

use actix_web::web;

/// Configure the REST routes. The GraphQL route is registered separately in
/// `main` because it needs the schema as app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Accounts
        .route("/signup", web::post().to(auth::signup))
        .route("/login", web::post().to(auth::login))
        .route("/status", web::get().to(auth::get_status))
        .route("/status", web::patch().to(auth::update_status))
        // Standalone image upload, returns a path for later attachment
        .route("/image", web::put().to(feed::upload_image))
        // Feed
        .service(
            web::scope("/posts")
                .route("", web::get().to(feed::list_posts))
                .route("", web::post().to(feed::create_post))
                .route("/{id}", web::get().to(feed::get_post))
                .route("/{id}", web::put().to(feed::update_post))
                .route("/{id}", web::delete().to(feed::delete_post)),
        );
}
