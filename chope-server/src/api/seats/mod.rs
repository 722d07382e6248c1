//! Seats API 模块

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/seats", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/availability/{foodCentre}", get(handler::availability))
        .route("/map/{foodCentre}", get(handler::seat_map))
        .route("/validate", post(handler::validate_seat_data))
        .route("/book", post(handler::book))
        .route("/cancel", post(handler::cancel))
        .route("/health", get(handler::health))
}
