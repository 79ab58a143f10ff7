//! # Availability Handlers
//!
//! Serves the monthly availability of one schedule. The month is read in the
//! schedule's own zone; every slot is rendered in the zone the client asks for.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;
use slotsync_core::{
    availability,
    models::availability::{AvailabilityQuery, DayAvailability},
};

use crate::{ApiState, middleware::error_handling::AppError};

/// Returns the days of `yearMonth` that carry candidate hours, each hour
/// marked `available` or `unavailable`.
///
/// # Errors
///
/// * 404 - No schedule with this id
/// * 400 - `timeZone` or `yearMonth` is not valid
/// * 500 - The store failed while resolving; no partial result is sent
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    Path(schedule_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<DayAvailability>>, AppError> {
    let days = availability::resolve_availability(
        state.store.as_ref(),
        schedule_id,
        &query.time_zone,
        &query.year_month,
    )
    .await?;

    Ok(Json(days))
}
