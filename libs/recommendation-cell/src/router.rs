use std::sync::Arc;

use axum::{middleware, routing::post, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn recommendation_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", post(handlers::get_recommendations))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
