use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let uploads = ServeDir::new(&state.upload_dir);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Rotation users
        .route("/users", get(handlers::list_users).post(handlers::create_user))
        .route("/users/reorder", post(handlers::reorder_users))
        .route(
            "/users/:id",
            patch(handlers::update_user).delete(handlers::delete_user),
        )
        // Rotation engine
        .route("/rotation/next", get(handlers::rotation_next))
        .route("/rotation/confirm", post(handlers::rotation_confirm))
        // Search & watch history
        .route("/movies/search2", get(handlers::search_movies))
        .route("/movies/select", post(handlers::select_movie))
        .route("/watchlog", get(handlers::watchlog))
        .route(
            "/watchevents/:id",
            patch(handlers::update_watch_event).delete(handlers::delete_watch_event),
        )
        // Avatar uploads
        .route("/upload/avatar", post(handlers::upload_avatar))
        .nest_service("/uploads", uploads)
        // Profile service
        .route(
            "/api/profiles",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route(
            "/api/profiles/:id",
            get(handlers::get_profile)
                .put(handlers::update_profile)
                .delete(handlers::delete_profile),
        )
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
