//! DTOs for image resolution and classification endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::entities::{ImageRecord, ResolvedImage};

/// Request to resolve a batch of upstream image records.
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveRequest {
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub images: Vec<ImageRecord>,
}

/// Batch resolution result.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub summary: ResolveSummary,
    pub items: Vec<ResolvedItem>,
    /// First item with a non-empty `src`, `null` if there is none.
    pub primary: Option<ResolvedItem>,
}

/// Counts over the batch.
#[derive(Debug, Serialize)]
pub struct ResolveSummary {
    pub total: usize,
    /// Items whose `src` differs from the trimmed input string.
    pub repaired: usize,
    /// Items that resolved to an empty `src`.
    pub empty: usize,
}

/// One resolved record, echoing the raw input next to the result.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedItem {
    pub input: Value,
    pub src: String,
    pub unoptimized: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ResolvedItem {
    pub fn new(record: ImageRecord, resolved: ResolvedImage) -> Self {
        Self {
            input: record.url,
            src: resolved.src,
            unoptimized: resolved.unoptimized,
            alt: record.alt,
        }
    }

    /// `true` if normalization changed a non-empty input string.
    pub fn is_repaired(&self) -> bool {
        match self.input.as_str() {
            Some(raw) => !self.src.is_empty() && raw.trim() != self.src,
            None => false,
        }
    }
}

/// Query string of `GET /api/images/classify`.
#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub url: Option<String>,
}

/// Classification result.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub url: Option<String>,
    pub unoptimized: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(input: Value, src: &str) -> ResolvedItem {
        ResolvedItem {
            input,
            src: src.to_string(),
            unoptimized: false,
            alt: None,
        }
    }

    #[test]
    fn test_is_repaired() {
        assert!(item(json!("/a.jpg"), "http://localhost:5000/a.jpg").is_repaired());
        assert!(!item(json!(" https://a.example/x.jpg "), "https://a.example/x.jpg").is_repaired());
        assert!(!item(json!(null), "").is_repaired());
        assert!(!item(json!("   "), "").is_repaired());
    }

    #[test]
    fn test_resolve_request_validation() {
        let request: ResolveRequest = serde_json::from_value(json!({ "images": [] })).unwrap();
        assert!(request.validate().is_err());

        let request: ResolveRequest =
            serde_json::from_value(json!({ "images": [{ "url": "/a.jpg" }] })).unwrap();
        assert!(request.validate().is_ok());
    }
}
