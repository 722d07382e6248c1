//! Reservations API Handlers

use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

use crate::policy::{
    self, CancellationInput, CancellationViolation, PolicySet, ReservationInput,
};
use shared::{ApiResponse, AppError, AppResult, ErrorCode};

/// Echo of a validated reservation request, with the applied rule values
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedReservation {
    pub user_id: String,
    pub food_centre: String,
    pub table_number: i64,
    pub seat_number: i64,
    /// Applied duration (requested value, or the policy default)
    pub duration: i64,
    pub validated_at: i64,
    pub rules: AppliedRules,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedRules {
    pub max_duration: i64,
    pub cancellation_window: i64,
}

/// GET /api/reservations/policies - 预订规则常量 (仅供客户端展示)
pub async fn policies() -> ApiResponse<PolicySet> {
    ApiResponse::success(policy::policies())
}

/// POST /api/reservations/validate - 预订请求校验
///
/// Collects every violation into `details`; the authoritative booking
/// happens on `POST /api/seats/book`.
pub async fn validate(
    Json(input): Json<ReservationInput>,
) -> AppResult<ApiResponse<ValidatedReservation>> {
    let outcome = policy::validate_reservation(&input);
    if !outcome.valid {
        return Err(AppError::validation_errors(outcome.errors));
    }

    let duration = policy::effective_duration(input.duration);
    Ok(ApiResponse::success_with_message(
        "Reservation validated successfully",
        ValidatedReservation {
            user_id: input.user_id.unwrap_or_default(),
            food_centre: input.food_centre.unwrap_or_default(),
            table_number: input.table_number.unwrap_or_default(),
            seat_number: input.seat_number.unwrap_or_default(),
            duration,
            validated_at: shared::util::now_millis(),
            rules: AppliedRules {
                max_duration: policy::MAX_DURATION_MINUTES,
                cancellation_window: policy::CANCELLATION_WINDOW_MINUTES,
            },
        },
    ))
}

/// POST /api/reservations/validate-cancellation - 取消请求校验
pub async fn validate_cancellation(
    Json(input): Json<CancellationInput>,
) -> AppResult<ApiResponse<()>> {
    match policy::validate_cancellation(&input, shared::util::now_millis()) {
        Ok(()) => Ok(ApiResponse::ok_with_message("Cancellation allowed")),
        Err(violation) => {
            let code = match violation {
                CancellationViolation::WindowClosed => ErrorCode::CancellationWindowClosed,
                _ => ErrorCode::ValidationFailed,
            };
            Err(AppError::with_message(code, violation.to_string()))
        }
    }
}

/// GET /api/reservations/health - 子系统健康检查
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "reservations",
        "message": "Reservations service is running",
    }))
}
