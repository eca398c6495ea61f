//! Image records as delivered by the upstream API and as handed to renderers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of an upstream `images[]` array.
///
/// `url` stays an untyped JSON value: upstream data may carry `null`, numbers
/// or objects there, all of which resolve to an empty `src`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub url: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Value::String(url.into()),
            alt: None,
        }
    }
}

/// A normalized image reference ready for an image element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    /// Normalized URL, empty when nothing usable was found.
    pub src: String,
    /// Whether the image optimizer should be bypassed for this host.
    pub unoptimized: bool,
}

impl ResolvedImage {
    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }
}
