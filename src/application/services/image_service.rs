//! Image resolution service.

use serde_json::Value;

use crate::config::Config;
use crate::domain::HostAllowlist;
use crate::domain::entities::{ImageRecord, ResolvedImage};
use crate::utils::url_normalizer::UrlNormalizer;

/// Turns raw image references into values an image element can render.
///
/// Normalizes the reference first and classifies the *normalized* URL, so a
/// relative path resolved against a local backend is recognized as local.
#[derive(Debug, Clone, Default)]
pub struct ImageService {
    normalizer: UrlNormalizer,
    allowlist: HostAllowlist,
}

impl ImageService {
    /// Creates a new image service.
    pub fn new(normalizer: UrlNormalizer, allowlist: HostAllowlist) -> Self {
        Self {
            normalizer,
            allowlist,
        }
    }

    /// Builds the service from the configured origin and allowlist.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            UrlNormalizer::new(config.backend_origin.clone()),
            config.allowlist(),
        )
    }

    pub fn normalizer(&self) -> &UrlNormalizer {
        &self.normalizer
    }

    pub fn allowlist(&self) -> &HostAllowlist {
        &self.allowlist
    }

    /// Normalizes `raw` and decides whether the optimizer should be bypassed.
    ///
    /// An empty `src` is never marked unoptimized.
    pub fn resolve(&self, raw: Option<&str>) -> ResolvedImage {
        let src = self.normalizer.normalize(raw);
        let unoptimized = !src.is_empty() && self.allowlist.matches(Some(&src));

        ResolvedImage { src, unoptimized }
    }

    /// Resolves an untyped JSON value. Anything but a string resolves to an empty `src`.
    pub fn resolve_value(&self, value: &Value) -> ResolvedImage {
        self.resolve(value.as_str())
    }

    /// Resolves every record, preserving order.
    pub fn resolve_all(&self, records: &[ImageRecord]) -> Vec<ResolvedImage> {
        records
            .iter()
            .map(|record| self.resolve_value(&record.url))
            .collect()
    }

    /// First record that resolves to a non-empty `src`, e.g. a campaign cover image.
    pub fn primary_image(&self, records: &[ImageRecord]) -> Option<ResolvedImage> {
        records
            .iter()
            .map(|record| self.resolve_value(&record.url))
            .find(|image| !image.is_empty())
    }

    /// Classifies a URL as given, without normalizing it.
    pub fn is_unoptimized(&self, url: Option<&str>) -> bool {
        self.allowlist.matches(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::BackendOrigin;
    use serde_json::json;

    fn service(origin: Option<&str>) -> ImageService {
        let origin = origin.map(|o| BackendOrigin::parse(o).unwrap());
        ImageService::new(UrlNormalizer::new(origin), HostAllowlist::default())
    }

    #[test]
    fn test_resolve_relative_path_is_local() {
        let image = service(Some("http://localhost:5000")).resolve(Some("/uploads/x.jpg"));

        assert_eq!(image.src, "http://localhost:5000/uploads/x.jpg");
        assert!(image.unoptimized);
    }

    #[test]
    fn test_resolve_relative_path_without_origin() {
        let image = service(None).resolve(Some("/uploads/x.jpg"));

        assert_eq!(image.src, "/uploads/x.jpg");
        assert!(!image.unoptimized);
    }

    #[test]
    fn test_resolve_external_cdn() {
        let image = service(None).resolve(Some("https://cdn.example.com/a.jpg"));

        assert_eq!(image.src, "https://cdn.example.com/a.jpg");
        assert!(!image.unoptimized);
    }

    #[test]
    fn test_resolve_classifies_after_repair() {
        let image = service(None).resolve(Some("https://mybucket.s3.a/a.jpg"));

        assert_eq!(image.src, "https://mybucket.s3.amazonaws.com/a.jpg");
        assert!(image.unoptimized);
    }

    #[test]
    fn test_resolve_empty() {
        let service = service(Some("http://localhost:5000"));

        assert_eq!(
            service.resolve(None),
            ResolvedImage {
                src: String::new(),
                unoptimized: false
            }
        );
        assert!(service.resolve(Some("  ")).is_empty());
    }

    #[test]
    fn test_resolve_value_non_string() {
        let service = service(Some("http://localhost:5000"));

        assert!(service.resolve_value(&json!(null)).is_empty());
        assert!(service.resolve_value(&json!(12)).is_empty());
        assert!(service.resolve_value(&json!({ "url": "/a.jpg" })).is_empty());
    }

    #[test]
    fn test_resolve_all_preserves_order() {
        let records = vec![
            ImageRecord::new("https://cdn.example.com/1.jpg"),
            ImageRecord::default(),
            ImageRecord::new("/2.jpg"),
        ];

        let resolved = service(Some("http://localhost:5000")).resolve_all(&records);

        let srcs: Vec<_> = resolved.iter().map(|r| r.src.as_str()).collect();
        assert_eq!(
            srcs,
            [
                "https://cdn.example.com/1.jpg",
                "",
                "http://localhost:5000/2.jpg"
            ]
        );
    }

    #[test]
    fn test_primary_image_skips_empty() {
        let records = vec![
            ImageRecord::default(),
            ImageRecord::new("   "),
            ImageRecord::new("https://cdn.example.com/cover.jpg"),
            ImageRecord::new("https://cdn.example.com/other.jpg"),
        ];

        let primary = service(None).primary_image(&records).unwrap();
        assert_eq!(primary.src, "https://cdn.example.com/cover.jpg");

        assert!(service(None).primary_image(&[]).is_none());
    }

    #[test]
    fn test_is_unoptimized_does_not_normalize() {
        let service = service(Some("http://localhost:5000"));

        assert!(!service.is_unoptimized(Some("/uploads/x.jpg")));
        assert!(!service.is_unoptimized(None));
        assert!(service.is_unoptimized(Some("https://images.unsplash.com/x.jpg")));
    }
}
