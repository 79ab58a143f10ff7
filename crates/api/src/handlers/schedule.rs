use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use slotsync_core::{
    models::schedule::{CreateScheduleRequest, CreateScheduleResponse, Schedule},
    schedule,
};

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<CreateScheduleResponse>), AppError> {
    let response = schedule::define_schedule(state.store.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn list_schedules(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Schedule>>, AppError> {
    let schedules = schedule::list_schedules(state.store.as_ref()).await?;
    Ok(Json(schedules))
}
