use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use slotsync_core::{
    booking,
    models::session::{BookSessionRequest, BookSessionResponse, Session},
};
use tracing::info;

use crate::{ApiState, middleware::error_handling::AppError};

/// Books a session for the requested slot instants.
///
/// Answers 201 with the stored session, 400 for an invalid request and 409
/// when one of the instants is already booked.
#[axum::debug_handler]
pub async fn book_session(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookSessionRequest>,
) -> Result<(StatusCode, Json<BookSessionResponse>), AppError> {
    let response = booking::book(state.store.as_ref(), payload).await?;
    info!(
        "Booked session {} with {} slots",
        response.session.id,
        response.session.slots.len()
    );
    Ok((StatusCode::CREATED, Json(response)))
}

#[axum::debug_handler]
pub async fn list_sessions(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Session>>, AppError> {
    let sessions = booking::list_sessions(state.store.as_ref()).await?;
    Ok(Json(sessions))
}
