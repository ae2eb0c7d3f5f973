//! HTTP API for the verification service.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{cors_layer, logging_middleware};
pub use types::*;

use crate::service::OtpService;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// OTP lifecycle service
    pub service: Arc<OtpService>,
}

impl AppState {
    /// Create new application state.
    pub fn new(service: OtpService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Create the API router allowing the default development origin.
pub fn create_router(state: AppState) -> Router {
    create_router_with_cors(state, cors_layer(&["http://localhost:5173".to_string()]))
}

/// Create the API router with a custom CORS layer.
pub fn create_router_with_cors(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/send-otp", post(handlers::send_otp))
        .route("/api/verify-otp", post(handlers::verify_otp))
        .route("/api/check-auth", get(handlers::check_auth))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
