//! Handlers for image resolution and classification.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::images::{
    ClassifyQuery, ClassifyResponse, ResolveRequest, ResolveResponse, ResolveSummary,
    ResolvedItem,
};
use crate::error::AppError;
use crate::state::AppState;

/// Normalizes and classifies a batch of upstream image records.
///
/// # Endpoint
///
/// `POST /api/images/resolve`
///
/// # Request Body
///
/// ```json
/// {
///   "images": [
///     { "url": "/uploads/cover.jpg", "alt": "Cover" },
///     { "url": "example.orghttps//cdn.example.com/img.png" },
///     { "url": null }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 3, "repaired": 2, "empty": 1 },
///   "items": [
///     {
///       "input": "/uploads/cover.jpg",
///       "src": "http://localhost:5000/uploads/cover.jpg",
///       "unoptimized": true,
///       "alt": "Cover"
///     },
///     {
///       "input": "example.orghttps//cdn.example.com/img.png",
///       "src": "https://cdn.example.com/img.png",
///       "unoptimized": false
///     },
///     { "input": null, "src": "", "unoptimized": false }
///   ],
///   "primary": { "input": "/uploads/cover.jpg", "src": "...", "unoptimized": true, "alt": "Cover" }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `images` is empty or larger than the configured
/// batch limit. Individual records never fail.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Json<ResolveResponse>, AppError> {
    payload.validate()?;

    let total = payload.images.len();
    if total > state.max_batch_size {
        return Err(AppError::bad_request(
            "Too many images in one request",
            json!({ "max": state.max_batch_size, "got": total }),
        ));
    }

    let resolved = state.image_service.resolve_all(&payload.images);

    let items: Vec<ResolvedItem> = payload
        .images
        .into_iter()
        .zip(resolved)
        .map(|(record, image)| ResolvedItem::new(record, image))
        .collect();

    let repaired = items.iter().filter(|item| item.is_repaired()).count();
    let empty = items.iter().filter(|item| item.src.is_empty()).count();
    let primary = items.iter().find(|item| !item.src.is_empty()).cloned();

    tracing::debug!(total, repaired, empty, "Resolved image batch");

    Ok(Json(ResolveResponse {
        summary: ResolveSummary {
            total,
            repaired,
            empty,
        },
        items,
        primary,
    }))
}

/// Tells whether a URL should bypass the image optimizer.
///
/// # Endpoint
///
/// `GET /api/images/classify?url=<url>`
///
/// The URL is matched as given, without normalization. A missing `url`
/// parameter classifies as `false`.
pub async fn classify_handler(
    State(state): State<AppState>,
    Query(query): Query<ClassifyQuery>,
) -> Json<ClassifyResponse> {
    let unoptimized = state.image_service.is_unoptimized(query.url.as_deref());

    Json(ClassifyResponse {
        url: query.url,
        unoptimized,
    })
}

/// Fallback for unknown routes.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Route not found", json!({}))
}
