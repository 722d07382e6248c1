//! Seats API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::str::FromStr;

use crate::booking::BookingConfirmation;
use crate::core::ServerState;
use crate::policy::{self, ReservationInput, SeatDataInput};
use shared::{ApiResponse, AppError, AppResult, CentreSeats, FoodCentre, SeatCounts, SeatKey};

/// Availability summary for one centre
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySummary {
    pub food_centre: FoodCentre,
    #[serde(flatten)]
    pub counts: SeatCounts,
}

/// Cancellation request payload
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CancelRequest {
    pub user_id: Option<String>,
    pub food_centre: Option<String>,
    pub table_number: Option<i64>,
    pub seat_number: Option<i64>,
}

fn parse_centre(code: &str) -> AppResult<FoodCentre> {
    FoodCentre::from_str(code).map_err(|_| AppError::centre_not_found(code))
}

/// GET /api/seats/availability/:foodCentre - 食阁空位统计
pub async fn availability(
    State(state): State<ServerState>,
    Path(food_centre): Path<String>,
) -> AppResult<ApiResponse<AvailabilitySummary>> {
    let centre = parse_centre(&food_centre)?;
    let counts = state.booking().seat_counts(centre).await?;
    Ok(ApiResponse::success(AvailabilitySummary {
        food_centre: centre,
        counts,
    }))
}

/// GET /api/seats/map/:foodCentre - 食阁完整座位表 (table → seat → record)
pub async fn seat_map(
    State(state): State<ServerState>,
    Path(food_centre): Path<String>,
) -> AppResult<ApiResponse<CentreSeats>> {
    let centre = parse_centre(&food_centre)?;
    let seats = state.booking().list_seats(centre).await?;
    Ok(ApiResponse::success(seats))
}

/// POST /api/seats/validate - 座位数据结构校验
pub async fn validate_seat_data(
    Json(input): Json<SeatDataInput>,
) -> AppResult<ApiResponse<()>> {
    let outcome = policy::validate_seat_data(&input);
    if !outcome.valid {
        let mut err = AppError::validation_errors(outcome.errors);
        err.message = "Invalid seat data".to_string();
        return Err(err);
    }
    Ok(ApiResponse::ok_with_message("Seat data is valid"))
}

/// POST /api/seats/book - 预订座位 (权威写入)
pub async fn book(
    State(state): State<ServerState>,
    Json(input): Json<ReservationInput>,
) -> AppResult<ApiResponse<BookingConfirmation>> {
    let confirmation = state.booking().book(&input).await?;
    Ok(ApiResponse::success_with_message(
        "Seat booked successfully",
        confirmation,
    ))
}

/// POST /api/seats/cancel - 取消预订 (所有权校验)
pub async fn cancel(
    State(state): State<ServerState>,
    Json(request): Json<CancelRequest>,
) -> AppResult<ApiResponse<()>> {
    let mut errors = Vec::new();

    let user_id = request.user_id.as_deref().map(str::trim).unwrap_or("");
    if user_id.is_empty() {
        errors.push("Valid userId is required".to_string());
    }

    let centre = match request.food_centre.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push("Valid foodCentre is required".to_string());
            None
        }
        Some(code) => match FoodCentre::from_str(code) {
            Ok(centre) => Some(centre),
            Err(e) => {
                errors.push(e.to_string());
                None
            }
        },
    };

    let table = match request.table_number.and_then(|t| u32::try_from(t).ok()) {
        Some(t) if t >= 1 => Some(t),
        _ => {
            errors.push("Valid tableNumber is required".to_string());
            None
        }
    };

    let seat = match request.seat_number.and_then(|s| u32::try_from(s).ok()) {
        Some(s) if s >= 1 => Some(s),
        _ => {
            errors.push("Valid seatNumber is required".to_string());
            None
        }
    };

    let (Some(centre), Some(table), Some(seat)) = (centre, table, seat) else {
        return Err(AppError::validation_errors(errors));
    };
    if !errors.is_empty() {
        return Err(AppError::validation_errors(errors));
    }

    state
        .booking()
        .cancel(user_id, &SeatKey::new(centre, table, seat))
        .await?;
    Ok(ApiResponse::ok_with_message("Booking cancelled successfully"))
}

/// GET /api/seats/health - 子系统健康检查
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "seats",
        "message": "Seats service is running",
    }))
}
