//! Operator control endpoints

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::application::dto::ControlResponseDto;
use crate::domain::value_objects::ControlUpdate;
use crate::infrastructure::state::AppState;

/// Merge a partial control update and echo the resulting state
pub async fn update_control(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ControlUpdate>,
) -> Json<ControlResponseDto> {
    Json(state.control.update(update).await.into())
}

pub async fn get_control(State(state): State<Arc<AppState>>) -> Json<ControlResponseDto> {
    Json(state.control.read().await.into())
}
