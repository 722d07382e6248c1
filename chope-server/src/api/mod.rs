//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 服务健康检查
//! - [`reservations`] - 预订校验与规则接口
//! - [`seats`] - 座位查询、预订、取消接口
//! - [`bookings`] - 用户预订历史接口

pub mod bookings;
pub mod health;
pub mod reservations;
pub mod seats;

use crate::core::ServerState;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    let request_timeout = state.config.request_timeout();

    Router::new()
        .merge(health::router())
        .merge(reservations::router())
        .merge(seats::router())
        .merge(bookings::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
