use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::Local;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{categorize, BookAppointmentRequest, UpdateStatusRequest};
use crate::services::{BookingError, BookingService};

fn map_booking_error(err: BookingError) -> AppError {
    match err {
        BookingError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        BookingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        BookingError::SlotTaken => {
            AppError::Conflict("Slot no longer available, please pick another time".to_string())
        }
        BookingError::InvalidSlot(msg) => AppError::BadRequest(msg),
        BookingError::InvalidTransition(msg) => AppError::BadRequest(msg),
        BookingError::Backend(e) => AppError::Internal(e.to_string()),
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let booking_service = BookingService::new(&state);
    let today = Local::now().date_naive();

    let appointment = booking_service
        .book_appointment(&user.id, request, today, token)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!(appointment)))
}

#[axum::debug_handler]
pub async fn my_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let booking_service = BookingService::new(&state);

    let appointments = booking_service
        .list_for_patient(&user.id, token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let lists = categorize(appointments, Local::now().date_naive());
    Ok(Json(json!(lists)))
}

#[axum::debug_handler]
pub async fn doctor_appointments(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let booking_service = BookingService::new(&state);

    let appointments = booking_service
        .list_for_doctor(&user.id, token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let lists = categorize(appointments, Local::now().date_naive());
    Ok(Json(json!(lists)))
}

#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<AppConfig>>,
    Path(appointment_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let booking_service = BookingService::new(&state);

    let appointment = booking_service
        .update_status(&appointment_id, request, token)
        .await
        .map_err(map_booking_error)?;

    Ok(Json(json!(appointment)))
}
