pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless interview API
        .route(
            "/api/v1/interview/questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/interview/grade",
            post(handlers::handle_grade_answer),
        )
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/answers",
            post(handlers::handle_submit_answer),
        )
        .route(
            "/api/v1/sessions/:id/navigate",
            post(handlers::handle_navigate),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(handlers::handle_reset_session),
        )
        .with_state(state)
}
