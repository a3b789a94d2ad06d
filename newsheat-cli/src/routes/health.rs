//! Health check endpoints

use axum::{routing::get, Router};

use crate::server::AppState;

/// Liveness check (OK while the server is running)
async fn liveness() -> &'static str {
    "OK"
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health/live", get(liveness))
}
