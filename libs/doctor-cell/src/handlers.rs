use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::{Local, NaiveDate};
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    CreateDoctorRequest, DaySlotsResponse, DoctorSearchFilters, Specialization,
    UpdateDoctorRequest,
};
use crate::services::DoctorService;

#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    pub q: Option<String>,
    pub specialization: Option<Specialization>,
}

#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub date: NaiveDate,
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<DoctorSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let filters = DoctorSearchFilters {
        query: query.q,
        specialization: query.specialization,
    };

    let doctors = doctor_service
        .search_doctors(filters)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "doctors": doctors,
        "total": doctors.len()
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .get_doctor(&doctor_id)
        .await
        .map_err(|_| AppError::NotFound("Doctor not found".to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<Value>, AppError> {
    let doctor_service = DoctorService::new(&state);
    let today = Local::now().date_naive();

    let slots = doctor_service
        .get_available_slots(&doctor_id, query.date, today)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let response = DaySlotsResponse {
        doctor_id: uuid::Uuid::parse_str(&doctor_id)
            .map_err(|_| AppError::BadRequest("Invalid doctor ID".to_string()))?,
        date: query.date,
        slots,
    };

    Ok(Json(json!(response)))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();
    let doctor_service = DoctorService::new(&state);

    let doctor = doctor_service
        .create_doctor(&user.id, request, token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(doctor)))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<AppConfig>>,
    Path(doctor_id): Path<String>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let token = auth.token();

    // Doctors may only edit their own profile.
    if user.id != doctor_id {
        return Err(AppError::Auth(
            "Not authorized to update this doctor profile".to_string(),
        ));
    }

    let doctor_service = DoctorService::new(&state);

    let updated = doctor_service
        .update_doctor(&doctor_id, request, token)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(updated)))
}
