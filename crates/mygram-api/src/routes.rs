use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::require_auth;
use crate::{AppState, auth, comments, photos, socials, users};

/// Route table. Only register and login are reachable without a token.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login));

    let protected_routes = Router::new()
        .route("/users", get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/photos", get(users::list_user_photos))
        .route("/users/{id}/socials", get(users::list_user_socials))
        .route("/photos", get(photos::list_photos).post(photos::create_photo))
        .route(
            "/photos/{id}",
            get(photos::get_photo)
                .put(photos::update_photo)
                .delete(photos::delete_photo),
        )
        .route("/photos/{id}/comments", get(photos::list_photo_comments))
        .route(
            "/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route("/socials", get(socials::list_socials).post(socials::create_social))
        .route(
            "/socials/{id}",
            get(socials::get_social)
                .put(socials::update_social)
                .delete(socials::delete_social),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
