use std::sync::Arc;

use axum::{routing::get, Router};

use analytics_cell::router::analytics_routes;
use appointment_cell::router::appointment_routes;
use doctor_cell::router::doctor_routes;
use patient_cell::router::patient_routes;
use recommendation_cell::router::recommendation_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "MediBook API is running!" }))
        .nest("/doctors", doctor_routes(state.clone()))
        .nest("/patients", patient_routes(state.clone()))
        .nest("/appointments", appointment_routes(state.clone()))
        .nest("/recommendations", recommendation_routes(state.clone()))
        .nest("/analytics", analytics_routes(state.clone()))
}
