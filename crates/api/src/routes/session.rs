use axum::{
    Router,
    routing::get,
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/sessions",
        get(handlers::session::list_sessions).post(handlers::session::book_session),
    )
}
