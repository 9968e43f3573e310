use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handles::{ControlState, covering_router};
use crate::services::CoveringRegistry;

pub fn create_app(registry: Arc<CoveringRegistry>) -> Router {
    Router::new()
        .merge(covering_router(ControlState { registry }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
