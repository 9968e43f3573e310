use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rfblinds_api::models::{CoveringStatus, TargetPositionRequest};
use serde_json::json;

use crate::errors::ApiError;
use crate::services::CoveringRegistry;

#[derive(Clone)]
pub struct ControlState {
    pub registry: Arc<CoveringRegistry>,
}

pub fn covering_router(control_state: ControlState) -> Router {
    Router::new()
        .route("/api/coverings", get(get_coverings))
        .route("/api/coverings/:serial_number", get(get_covering))
        .route(
            "/api/coverings/:serial_number/current",
            get(get_current_position),
        )
        .route(
            "/api/coverings/:serial_number/target",
            get(get_target_position).put(set_target_position),
        )
        .route("/api/coverings/:serial_number/state", get(get_motion_state))
        .route(
            "/api/coverings/:serial_number/identify",
            post(identify_covering),
        )
        .with_state(control_state)
}

pub async fn get_coverings(State(state): State<ControlState>) -> Json<Vec<CoveringStatus>> {
    let mut coverings = Vec::with_capacity(state.registry.len());
    for covering in state.registry.iter() {
        coverings.push(covering.status().await);
    }

    Json(coverings)
}

pub async fn get_covering(
    State(state): State<ControlState>,
    Path(serial_number): Path<String>,
) -> Result<Json<CoveringStatus>, ApiError> {
    let covering = state.registry.get(&serial_number)?;

    Ok(Json(covering.status().await))
}

pub async fn get_current_position(
    State(state): State<ControlState>,
    Path(serial_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let covering = state.registry.get(&serial_number)?;

    Ok(Json(json!({ "position": covering.get_current_position().await })))
}

pub async fn get_target_position(
    State(state): State<ControlState>,
    Path(serial_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let covering = state.registry.get(&serial_number)?;

    Ok(Json(json!({ "position": covering.get_target_position().await })))
}

pub async fn get_motion_state(
    State(state): State<ControlState>,
    Path(serial_number): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let covering = state.registry.get(&serial_number)?;

    Ok(Json(json!({ "motion_state": covering.get_motion_state().await })))
}

/// Accepts the move once the open or close code is on air; the stop follows later.
pub async fn set_target_position(
    State(state): State<ControlState>,
    Path(serial_number): Path<String>,
    Json(body): Json<TargetPositionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let covering = state.registry.get(&serial_number)?;
    covering.set_target_position(body.position).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "position": body.position })),
    ))
}

pub async fn identify_covering(
    State(state): State<ControlState>,
    Path(serial_number): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.registry.get(&serial_number)?.identify();

    Ok(StatusCode::NO_CONTENT)
}
