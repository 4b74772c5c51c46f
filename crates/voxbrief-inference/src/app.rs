use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::context::ServiceContext;

/// Assemble the inference router. `max_upload_bytes` caps the `/process` body.
pub fn build_router(ctx: Arc<ServiceContext>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(crate::http::health::root_handler))
        .route("/health", get(crate::http::health::health_handler))
        .route("/process", post(crate::http::process::process_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
