//! Bookings API 模块 (预订历史)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{userId}", get(handler::active_bookings))
}
