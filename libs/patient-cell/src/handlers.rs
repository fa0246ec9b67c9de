use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::UpdatePatientProfileRequest;
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn get_my_profile(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let patient_service = PatientService::new(&state);

    let profile = patient_service
        .get_profile(&user.id, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("Patient profile not found".to_string()))?;

    Ok(Json(json!(profile)))
}

#[axum::debug_handler]
pub async fn update_my_profile(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdatePatientProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let patient_service = PatientService::new(&state);

    let profile = patient_service
        .upsert_profile(&user.id, request, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(profile)))
}
