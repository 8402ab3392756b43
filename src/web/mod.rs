//! HTTP front-end: search form, report page and static content pages.

mod error;
mod pages;

pub use error::AppError;

use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::services::air_quality_api::AirQualityApi;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    pub config: AppConfig,
    pub api: Arc<dyn AirQualityApi>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/report", get(pages::report))
        .route("/resources", get(pages::resources))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
