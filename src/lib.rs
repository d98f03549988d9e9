pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

use axum::{
    Router,
    http::{
        HeaderValue, Method,
        header::{ACCEPT, CONTENT_TYPE},
    },
    routing::{get, post, put},
};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

/// `*` in the list allows any origin; otherwise each entry must be a valid
/// header value and invalid ones are skipped.
fn allowed_origins(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|origin| origin.trim() == "*") {
        return AllowOrigin::any();
    }

    let origins = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    AllowOrigin::list(origins)
}

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config.allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([ACCEPT, CONTENT_TYPE]);

    let api_routes = Router::new()
        // Question routes
        .route("/questions", get(handlers::questions::get_questions))
        .route(
            "/question",
            post(handlers::questions::create_question)
                .put(handlers::questions::update_question)
                .delete(handlers::questions::delete_question),
        )
        .route(
            "/question/{question_id}",
            get(handlers::questions::get_question),
        )
        .route(
            "/question/{question_id}/view",
            post(handlers::questions::increment_view_count),
        )
        // Answer routes
        .route(
            "/answer",
            post(handlers::answers::create_answer)
                .put(handlers::answers::update_answer)
                .delete(handlers::answers::delete_answer),
        )
        .route(
            "/answer/{question_id}",
            get(handlers::answers::get_question_answers),
        )
        .route("/answer/vote", post(handlers::answers::vote_answer))
        .route("/answer/accept", post(handlers::answers::accept_answer))
        // Notification routes; {id} is the user id on reads and the
        // notification id on writes
        .route(
            "/notifications/read-all",
            put(handlers::notifications::mark_all_notifications_read),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notifications::get_notifications)
                .delete(handlers::notifications::delete_notification),
        )
        .route(
            "/notifications/{id}/unread-count",
            get(handlers::notifications::get_unread_count),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notifications::mark_notification_read),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
