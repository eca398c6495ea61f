//! Image URL normalization.
//!
//! Turns whatever an upstream API put into an `images[].url` field into a
//! single usable URL. Repairs run as an ordered pipeline of
//! [`RepairRule`](crate::utils::repair_rules::RepairRule)s; when none of them yields a parseable absolute URL the
//! input is treated as a path relative to the backend origin.
//!
//! Normalization never fails. The worst case is the trimmed input coming
//! back unchanged (no origin configured) or an origin-prefixed guess.

use std::borrow::Cow;

use crate::domain::entities::BackendOrigin;
use crate::utils::repair_rules::{parse_candidate, repair};

/// Metric counting which step produced each normalized URL.
const NORMALIZATIONS_METRIC: &str = "image_url_normalizations_total";

const RELATIVE_FALLBACK: &str = "relative_fallback";

/// Upper bound on re-running the pipeline over its own output.
const MAX_SETTLE_PASSES: usize = 16;

/// Normalizes raw image references against an optional backend origin.
///
/// The origin is injected once at construction; a normalizer is immutable
/// afterwards and can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct UrlNormalizer {
    origin: Option<BackendOrigin>,
}

impl UrlNormalizer {
    /// Creates a normalizer. `None` disables the relative-path prefixing.
    pub fn new(origin: Option<BackendOrigin>) -> Self {
        Self { origin }
    }

    /// Backend origin used for relative paths, if any.
    pub fn origin(&self) -> Option<&BackendOrigin> {
        self.origin.as_ref()
    }

    /// Normalizes a raw image reference.
    ///
    /// # Rules
    ///
    /// Applied to the trimmed input, first success wins:
    ///
    /// 1. **Malformed protocol**: `example.orghttps//cdn/x.png` → `https://cdn/x.png`
    /// 2. **Rightmost occurrence**: with several `http(s)://` tokens the last
    ///    candidate that parses is kept
    /// 3. **Embedded occurrence**: garbage before a single `http(s)://` is dropped
    /// 4. **Direct parse**: the input already is a URL
    /// 5. **Relative fallback**: `origin + path`, or the trimmed input when no
    ///    origin is configured
    ///
    /// Truncated `*.s3.a` hosts are completed inside rules 1-4. Parsed hosts
    /// containing `http` are always rejected.
    ///
    /// ASCII tabs and newlines are removed before any rule runs, as the URL
    /// parser drops them anyway. A parsed result is fed back through the
    /// rules until it stops changing, so `normalize(normalize(s)) ==
    /// normalize(s)` even when URL serialization reveals a new protocol token
    /// or host (dot segments, backslashes, default ports).
    ///
    /// # Examples
    ///
    /// ```
    /// use image_url_resolver::domain::entities::BackendOrigin;
    /// use image_url_resolver::utils::url_normalizer::UrlNormalizer;
    ///
    /// let origin = BackendOrigin::parse("http://localhost:5000").unwrap();
    /// let normalizer = UrlNormalizer::new(Some(origin));
    ///
    /// assert_eq!(normalizer.normalize(None), "");
    /// assert_eq!(
    ///     normalizer.normalize(Some("http://bad/first.jpghttps://good.example.com/real.jpg")),
    ///     "https://good.example.com/real.jpg"
    /// );
    /// assert_eq!(
    ///     normalizer.normalize(Some("uploads/x.jpg")),
    ///     "http://localhost:5000/uploads/x.jpg"
    /// );
    /// ```
    pub fn normalize(&self, input: Option<&str>) -> String {
        let Some(input) = input else {
            return String::new();
        };

        let cleaned = strip_tabs_and_newlines(input);
        let trimmed = cleaned.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        if let Some((rule, url)) = repair(trimmed) {
            let url = settle(url);
            record(rule.name(), trimmed, &url);
            return url;
        }

        let url = self.relative_fallback(trimmed);
        record(RELATIVE_FALLBACK, trimmed, &url);
        url
    }

    /// Prefixes the backend origin, or returns the input when there is none.
    fn relative_fallback(&self, trimmed: &str) -> String {
        let Some(origin) = &self.origin else {
            return trimmed.to_string();
        };

        let joined = origin.join(trimmed);

        match parse_candidate(&joined) {
            Some(url) => settle(url.into()),
            None => joined,
        }
    }
}

/// Removes the characters the URL parser skips silently.
fn strip_tabs_and_newlines(input: &str) -> Cow<'_, str> {
    if input.contains(['\t', '\n', '\r']) {
        Cow::Owned(input.replace(['\t', '\n', '\r'], ""))
    } else {
        Cow::Borrowed(input)
    }
}

/// Re-runs the pipeline on a parsed URL until the output is a fixed point.
///
/// Every changing pass drops a protocol token or completes a host, so the
/// loop ends long before the bound for real input.
fn settle(mut url: String) -> String {
    for _ in 0..MAX_SETTLE_PASSES {
        match repair(&url) {
            Some((_, next)) if next != url => url = next,
            _ => return url,
        }
    }

    tracing::warn!(url = %url, "Image URL did not settle");
    url
}

fn record(rule: &'static str, input: &str, output: &str) {
    if input != output {
        tracing::debug!(rule, input, output, "Image URL rewritten");
    }
    metrics::counter!(NORMALIZATIONS_METRIC, "rule" => rule).increment(1);
}
