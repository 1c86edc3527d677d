pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::generation::handlers as generation_handlers;
use crate::parser::handlers as parser_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume parsing
        .route(
            "/api/v1/resumes/parse",
            post(parser_handlers::handle_parse_upload),
        )
        .route(
            "/api/v1/resumes/parse-text",
            post(parser_handlers::handle_parse_text),
        )
        // Section generation
        .route(
            "/api/v1/generation/inputs",
            post(generation_handlers::handle_build_inputs),
        )
        .route(
            "/api/v1/generation/section",
            post(generation_handlers::handle_generate_section),
        )
        .with_state(state)
}
