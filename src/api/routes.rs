//! API route configuration.

use crate::api::handlers::{classify_handler, resolve_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Image endpoints, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST /images/resolve`   - Normalize and classify a batch of image records
/// - `GET  /images/classify`  - Classify a single URL (`?url=`)
pub fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/images/resolve", post(resolve_handler))
        .route("/images/classify", get(classify_handler))
}
