//! Health API 模块

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::db::repository::SeatStore;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// GET /api/health - 服务健康检查
async fn health(
    axum::extract::State(state): axum::extract::State<ServerState>,
) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "chope-server",
        "version": env!("CARGO_PKG_VERSION"),
        "storageBackend": state.store().backend(),
    }))
}
