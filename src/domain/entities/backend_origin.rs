//! Backend origin used to resolve relative image paths.

use std::fmt;
use std::str::FromStr;
use url::Url;

/// Errors that can occur while parsing a backend origin.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum OriginError {
    #[error("Backend origin is empty")]
    Empty,

    #[error("Invalid backend origin: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS origins are allowed")]
    UnsupportedProtocol,

    #[error("Backend origin has no host")]
    MissingHost,

    #[error("Backend origin host must not contain 'http'")]
    HttpInHost,
}

/// Base URL of the API server, e.g. `http://localhost:5000`.
///
/// Stored as given, minus surrounding whitespace and trailing slashes, so that
/// joining a root-relative path never produces `//`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendOrigin(String);

impl BackendOrigin {
    /// Parses and validates an origin.
    ///
    /// # Errors
    ///
    /// - [`OriginError::Empty`] for blank input
    /// - [`OriginError::InvalidFormat`] if the value is not a URL
    /// - [`OriginError::UnsupportedProtocol`] for non-HTTP(S) schemes
    /// - [`OriginError::MissingHost`] if the URL has no host
    /// - [`OriginError::HttpInHost`] if the host contains `http`, since URLs
    ///   joined onto it would never be accepted by the normalizer
    pub fn parse(input: &str) -> Result<Self, OriginError> {
        let trimmed = input.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(OriginError::Empty);
        }

        let url = Url::parse(trimmed).map_err(|e| OriginError::InvalidFormat(e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(OriginError::UnsupportedProtocol),
        }

        let Some(host) = url.host_str().filter(|h| !h.is_empty()) else {
            return Err(OriginError::MissingHost);
        };

        if host.to_ascii_lowercase().contains("http") {
            return Err(OriginError::HttpInHost);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends `path`, inserting a `/` separator unless the path already starts with one.
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.0, path)
        } else {
            format!("{}/{}", self.0, path)
        }
    }
}

impl FromStr for BackendOrigin {
    type Err = OriginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BackendOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
