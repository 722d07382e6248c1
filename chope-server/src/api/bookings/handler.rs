//! Bookings API Handlers

use axum::extract::{Path, State};

use crate::booking::ActiveBooking;
use crate::core::ServerState;
use shared::{ApiResponse, AppError, AppResult};

/// GET /api/bookings/:userId - 用户当前有效预订
pub async fn active_bookings(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<ApiResponse<Vec<ActiveBooking>>> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::validation("Valid userId is required"));
    }

    let bookings = state.booking().active_bookings_for(user_id).await?;
    Ok(ApiResponse::success(bookings))
}
