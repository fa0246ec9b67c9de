use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::Local;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::Period;
use crate::services::AnalyticsService;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub period: Period,
}

#[axum::debug_handler]
pub async fn get_summary(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Value>, AppError> {
    let analytics_service = AnalyticsService::new(&state);
    let today = Local::now().date_naive();

    let summary = analytics_service
        .summary(query.period, today, auth.token())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(summary)))
}
