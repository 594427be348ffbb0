use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};

use crate::domain::value_objects::Action;
use crate::infrastructure::state::AppState;

/// Decide the next action for a game-state snapshot.
///
/// The body is taken raw so that a malformed snapshot still gets a safe wait
/// instead of an extractor rejection.
pub async fn decide(State(state): State<Arc<AppState>>, body: Bytes) -> Json<Action> {
    Json(state.dispatcher.decide_payload(&body).await)
}
