//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// The resolver has no external dependencies, so the service is always
/// healthy once it serves requests. The checks report how it is configured.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "normalizer": {
///       "status": "ok",
///       "message": "Backend origin: http://localhost:5000"
///     },
///     "allowlist": {
///       "status": "ok",
///       "message": "5 unoptimized host fragments"
///     }
///   }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            normalizer: check_normalizer(&state),
            allowlist: check_allowlist(&state),
        },
    })
}

/// Reports whether relative paths will be resolved against a backend origin.
fn check_normalizer(state: &AppState) -> CheckStatus {
    let message = match state.image_service.normalizer().origin() {
        Some(origin) => format!("Backend origin: {origin}"),
        None => "No backend origin, relative paths pass through".to_string(),
    };

    CheckStatus {
        status: "ok".to_string(),
        message: Some(message),
    }
}

/// An empty allowlist is legal but means every image goes through the optimizer.
fn check_allowlist(state: &AppState) -> CheckStatus {
    let count = state.image_service.allowlist().len();

    CheckStatus {
        status: if count == 0 { "warning" } else { "ok" }.to_string(),
        message: Some(format!("{count} unoptimized host fragments")),
    }
}
