//! # SlotSync API
//!
//! HTTP surface of the SlotSync booking service: schedule definition,
//! monthly availability and session booking.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure per resource
//! - **Handlers**: Extract the request, call into `slotsync_core`, shape the response
//! - **Middleware**: Error to status mapping
//! - **Config**: Environment configuration
//!
//! Handlers only see the `BookingStore` trait, so the server runs against
//! Postgres in production and against a mock store in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling middleware
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode, header},
};
use eyre::Result;
use slotsync_core::store::BookingStore;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Persistence behind every handler
    pub store: Arc<dyn BookingStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }
}

/// Builds the application router with all routes attached to `state`.
///
/// Transport layers (CORS, timeout, tracing) are added by `start_server`,
/// so tests can drive this router directly.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Schedule management endpoints
        .merge(routes::schedule::routes())
        // Monthly availability
        .merge(routes::availability::routes())
        // Session booking
        .merge(routes::session::routes())
        .with_state(state)
}

/// Starts the API server with the provided configuration and store
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `store` - Booking store shared by all handlers
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let pool = slotsync_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// start_server(config, Arc::new(PgBookingStore::new(pool))).await?;
/// ```
pub async fn start_server(config: config::ApiConfig, store: Arc<dyn BookingStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = build_router(Arc::new(ApiState::new(store)));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        app.layer(cors_layer(origins))
    } else {
        app
    };

    // Request timeout; an elapsed request answers 408
    let timeout = Duration::from_secs(config.request_timeout);
    let app = app
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(|err: BoxError| async move {
                    if err.is::<tower::timeout::error::Elapsed>() {
                        StatusCode::REQUEST_TIMEOUT
                    } else {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                }))
                .timeout(timeout),
        )
        .layer(TraceLayer::new_for_http());

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allowed)
}
