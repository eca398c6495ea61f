//! Hosts whose images bypass the image optimization pipeline.
//!
//! Matching is a literal, case-sensitive substring test on the whole URL.
//! No parsing and no case folding: callers pass URLs the way they will be
//! rendered.

use std::sync::LazyLock;

/// Built-in fragments: local development backends, object storage and image CDNs.
pub const DEFAULT_UNOPTIMIZED_HOSTS: &[&str] = &[
    "localhost",
    "127.0.0.1",
    "res.cloudinary.com",
    "images.unsplash.com",
    "amazonaws.com",
];

static DEFAULT_ALLOWLIST: LazyLock<HostAllowlist> = LazyLock::new(HostAllowlist::default);

/// Ordered set of host fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAllowlist {
    entries: Vec<String>,
}

impl Default for HostAllowlist {
    fn default() -> Self {
        Self::new(DEFAULT_UNOPTIMIZED_HOSTS.iter().copied())
    }
}

impl HostAllowlist {
    /// Builds an allowlist from exactly these fragments.
    ///
    /// Blank entries are dropped, since an empty fragment would match every URL.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::empty().with_extra(entries)
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds fragments, skipping blanks and duplicates.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for entry in extra {
            let entry = entry.into().trim().to_string();
            if !entry.is_empty() && !self.entries.contains(&entry) {
                self.entries.push(entry);
            }
        }
        self
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `url` contains any fragment of the list.
    pub fn matches(&self, url: Option<&str>) -> bool {
        let Some(url) = url else {
            return false;
        };
        self.entries.iter().any(|entry| url.contains(entry.as_str()))
    }

    /// Splits a comma-separated list such as `UNOPTIMIZED_HOSTS`.
    pub fn parse_list(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Checks `url` against [`DEFAULT_UNOPTIMIZED_HOSTS`].
pub fn is_unoptimized_host(url: Option<&str>) -> bool {
    DEFAULT_ALLOWLIST.matches(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_positive_cases() {
        assert!(is_unoptimized_host(Some("http://localhost:5000/x.jpg")));
        assert!(is_unoptimized_host(Some("https://mybucket.s3.amazonaws.com/x.jpg")));
        assert!(is_unoptimized_host(Some("https://images.unsplash.com/x.jpg")));
        assert!(is_unoptimized_host(Some("http://127.0.0.1:8080/a.png")));
        assert!(is_unoptimized_host(Some(
            "https://res.cloudinary.com/demo/image/upload/a.jpg"
        )));
    }

    #[test]
    fn test_default_negative_cases() {
        assert!(!is_unoptimized_host(Some(
            "https://totally-unknown-cdn.example/x.jpg"
        )));
        assert!(!is_unoptimized_host(None));
        assert!(!is_unoptimized_host(Some("")));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(!is_unoptimized_host(Some("http://LOCALHOST:5000/x.jpg")));
    }

    #[test]
    fn test_matches_anywhere_in_string() {
        assert!(is_unoptimized_host(Some(
            "https://proxy.example.com/?src=images.unsplash.com/a.jpg"
        )));
    }

    #[test]
    fn test_with_extra_skips_blank_and_duplicates() {
        let allowlist = HostAllowlist::default().with_extra(["partner.example.org", " ", "localhost"]);

        assert_eq!(allowlist.len(), DEFAULT_UNOPTIMIZED_HOSTS.len() + 1);
        assert!(allowlist.matches(Some("https://partner.example.org/logo.png")));
    }

    #[test]
    fn test_empty_allowlist_matches_nothing() {
        let allowlist = HostAllowlist::new(["", "  "]);
        assert!(allowlist.is_empty());
        assert!(!allowlist.matches(Some("http://localhost/x.jpg")));
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            HostAllowlist::parse_list(" cdn.example.com, ,partner.example.org,"),
            vec!["cdn.example.com", "partner.example.org"]
        );
        assert!(HostAllowlist::parse_list("").is_empty());
    }
}
