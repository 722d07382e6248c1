//! Reservations API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/policies", get(handler::policies))
        .route("/validate", post(handler::validate))
        .route("/validate-cancellation", post(handler::validate_cancellation))
        .route("/health", get(handler::health))
}
