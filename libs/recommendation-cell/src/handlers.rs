use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Local;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::RecommendationRequest;
use crate::services::RecommendationService;

#[axum::debug_handler]
pub async fn get_recommendations(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<Value>, AppError> {
    // The engine is never invoked on empty symptom text.
    if request.symptoms.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Describe your symptoms to get recommendations".to_string(),
        ));
    }

    let service = RecommendationService::new(&state);
    let today = Local::now().date_naive();

    let recommendations = service
        .recommend(request, today)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "recommendations": recommendations,
        "total": recommendations.len()
    })))
}
