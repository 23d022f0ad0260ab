use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn liveness_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
}

/// Static body for the hosting platform's keep-alive pings.
async fn index() -> &'static str {
    "FX signal scanner is running"
}

/// Health check with scanner progress. No auth required.
async fn healthz(State(state): State<AppState>) -> Json<Value> {
    let status = state.status.read().await;
    Json(json!({
        "status": "ok",
        "pairs": status.pairs,
        "last_scan": status.last_scan,
        "cycles_completed": status.cycles_completed,
        "alerts_sent": status.alerts_sent,
    }))
}
