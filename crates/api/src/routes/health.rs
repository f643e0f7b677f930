//! Liveness endpoint.
//!
//! Mounted outside the authenticated router; clients hit it before any
//! token exists.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// What the liveness endpoint reports.
#[derive(Serialize)]
pub struct HealthReport {
    /// Name of the responding service.
    pub service: &'static str,
    /// Liveness status, always `"healthy"` when the process answers.
    pub status: &'static str,
    /// Crate version of the running binary.
    pub version: &'static str,
}

async fn health() -> Json<HealthReport> {
    Json(HealthReport {
        service: env!("CARGO_PKG_NAME"),
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mounts the liveness route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_names_the_service() {
        let Json(report) = health().await;

        assert_eq!(report.service, "simpanan-api");
        assert_eq!(report.status, "healthy");
        assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
    }
}
