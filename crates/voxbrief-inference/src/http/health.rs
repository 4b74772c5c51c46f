use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::context::ServiceContext;

/// GET / — liveness.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Audio Processing API is running",
    }))
}

/// GET /health — readiness, reports which backends are loaded.
pub async fn health_handler(State(ctx): State<Arc<ServiceContext>>) -> Json<Value> {
    let loaded = ctx.models_loaded();
    Json(json!({
        "status": if loaded { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "models_loaded": loaded,
        "whisper_loaded": ctx.transcriber.is_some(),
        "summarizer_loaded": ctx.summarizer.is_some(),
    }))
}
