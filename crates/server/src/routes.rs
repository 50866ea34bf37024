use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::messages::MessageStore;

use crate::{metrics, openapi};

pub mod messages;

/// Shared router state: the one store every handler talks to.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }
}

/// Health check
#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Service is running", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::running())
}

async fn metrics_text() -> (StatusCode, String) {
    metrics::render()
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    metrics::init();

    let message_routes = Router::new()
        .route("/messages", get(messages::list_messages).post(messages::post_message))
        .route(
            "/messages/:id",
            get(messages::get_message).delete(messages::delete_message),
        );

    Router::new()
        .route("/", get(health))
        .route("/openapi.json", get(openapi::openapi_json))
        .route("/metrics", get(metrics_text))
        .merge(message_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
