use axum::extract::State;
use axum::Json;

use crate::db;
use crate::error::AppError;
use crate::models::EndpointList;
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<EndpointList>, AppError> {
    let endpoints = db::catalog::list_all(&state.pool, state.schema).await?;
    Ok(Json(endpoints))
}
